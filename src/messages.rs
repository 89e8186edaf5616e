//! Console messages shown to the person running the report.

use std::path::Path;

use crate::settings::Locale;

pub fn data_not_found(locale: Locale, input_path: &Path) -> String {
    match locale {
        Locale::En => format!("Error: could not find results file {}!", input_path.display()),
        Locale::Vi => format!("Lỗi: Không tìm thấy file {}!", input_path.display()),
    }
}

pub fn chart_saved(locale: Locale, artifact_path: &Path) -> String {
    match locale {
        Locale::En => format!("Success! The chart has been saved to {}", artifact_path.display()),
        Locale::Vi => format!("Thành công! Biểu đồ đã được lưu trong thư mục {}", artifact_path.display()),
    }
}
