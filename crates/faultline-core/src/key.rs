//! Error key normalization.
//!
//! Every fault key lives under a single domain prefix so that keys double
//! as catalog paths (`error.file.not-found`) and as stable error codes.

/// Domain prefix shared by every fault key
pub const KEY_PREFIX: &str = "error";

/// Namespace a raw key under [`KEY_PREFIX`].
///
/// Keys that already carry the prefix are returned unchanged, so the
/// operation is idempotent.
pub fn normalize(raw: &str) -> String {
    if is_normalized(raw) {
        raw.to_string()
    } else {
        format!("{}.{}", KEY_PREFIX, raw)
    }
}

/// Whether `key` already starts with `error.`
pub fn is_normalized(key: &str) -> bool {
    key.strip_prefix(KEY_PREFIX)
        .map_or(false, |rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_bare_key() {
        assert_eq!(normalize("file.not-found"), "error.file.not-found");
        assert_eq!(normalize("general"), "error.general");
    }

    #[test]
    fn test_keeps_prefixed_key() {
        assert_eq!(normalize("error.general"), "error.general");
    }

    #[test]
    fn test_prefix_without_dot_is_not_normalized() {
        assert_eq!(normalize("errors.x"), "error.errors.x");
        assert_eq!(normalize("error"), "error.error");
    }

    #[test]
    fn test_idempotent() {
        for key in ["custom", "error.custom", "error", "a.b.c", "", "errorish"] {
            let once = normalize(key);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", key);
        }
    }
}
