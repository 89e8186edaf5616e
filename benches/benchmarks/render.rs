use anyhow::Result;
use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use sortbench_report::chart::{self, Figure};
use sortbench_report::settings::ChartSettings;
use sortbench_report::ResultsTable;

fn make_table(nr_runs: usize) -> Result<ResultsTable> {
    let mut data = String::from("ChunkSize_MB,TotalTime_s,Throughput_elements_sec\n");
    for i in 1..=nr_runs {
        let total_time_s = 10.0 / i as f64 + 0.5;
        let throughput = 1_000_000.0 / total_time_s;
        data.push_str(&format!("{},{},{}\n", i, total_time_s, throughput));
    }
    Ok(ResultsTable::from_reader(data.as_bytes(), "bench.csv")?)
}

fn make_figure(nr_runs: usize, settings: &ChartSettings) -> Result<Figure> {
    let table = make_table(nr_runs)?;
    Ok(chart::render(&table, settings)?)
}

fn benchmark_render_figure(c: &mut Criterion) {
    let settings = ChartSettings::default();
    let mut group = c.benchmark_group("render_figure");
    for nr_runs in [3_usize, 30, 300] {
        let table = make_table(nr_runs).expect("failed to build results table");
        group.bench_with_input(BenchmarkId::from_parameter(nr_runs), &table, |b, table| {
            b.iter(|| black_box(chart::render(table, &settings).expect("render failed")))
        });
    }
    group.finish();
}

fn benchmark_draw_png(c: &mut Criterion) {
    let settings = ChartSettings { draw_labels: false, ..ChartSettings::default() };
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("bench.png");
    let figure = make_figure(10, &settings).expect("failed to build figure");

    c.bench_function("draw_png_unlabelled", |b| {
        b.iter(|| chart::draw_png(black_box(&figure), &path, false).expect("draw failed"))
    });
}

criterion_group!(render, benchmark_render_figure, benchmark_draw_png);
