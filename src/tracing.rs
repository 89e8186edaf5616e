use once_cell::sync::Lazy;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let filter = if std::env::var("TEST_LOG").is_ok() { "trace" } else { "" };
    let subscriber = get_subscriber("test", filter);
    init_subscriber(subscriber);
});

/// Subscriber writing bunyan JSON events to stderr, so stdout carries only the report's console
/// messages. `RUST_LOG`, when set, wins over `env_filter`.
///
/// The layered type is left opaque; `Send + Sync` is what [`init_subscriber`] needs to install
/// it as the global default.
pub fn get_subscriber(name: impl Into<String>, env_filter: impl AsRef<str>) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let formatting_layer = BunyanFormattingLayer::new(name.into(), std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Install `subscriber` process-wide and route `log` records into it. Panics on a second call.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("log records already routed to a logger");
    set_global_default(subscriber).expect("global tracing subscriber already installed");
}
