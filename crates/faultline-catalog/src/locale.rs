//! Locale detection.
//!
//! Priority:
//! 1. `FAULTLINE_LOCALE`
//! 2. `LANG`, language part only (`pt_BR.UTF-8` -> `pt`)
//! 3. the default locale (configured, else [`DEFAULT_LOCALE`])

pub const DEFAULT_LOCALE: &str = "en";

/// Detect the active locale from a variable source such as
/// `std::env::var`
pub fn detect_from(var: impl Fn(&str) -> Option<String>, default_locale: &str) -> String {
    if let Some(locale) = var("FAULTLINE_LOCALE").and_then(|l| language(&l)) {
        return locale;
    }

    var("LANG")
        .and_then(|l| language(&l))
        .unwrap_or_else(|| default_locale.to_string())
}

/// Language code of a POSIX locale string; `None` for `C`/`POSIX`/empty
pub fn language(raw: &str) -> Option<String> {
    let code = raw
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match code.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(code),
    }
}
