//! String transformation utilities for package naming

/// Normalizes a human-provided namespace into a package-name fragment.
///
/// The namespace is lowercased and every character outside `[a-z0-9]` is
/// dropped. Malformed namespaces simply normalize to a shorter (possibly
/// empty) fragment.
///
/// # Examples
/// ```
/// use openworld_sdk_generator::utils::normalize_namespace;
///
/// assert_eq!(normalize_namespace("Travel-API!"), "travelapi");
/// assert_eq!(normalize_namespace("fraud prevention v2"), "fraudpreventionv2");
/// ```
pub fn normalize_namespace(namespace: &str) -> String {
    namespace
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_namespace() {
        assert_eq!(normalize_namespace("Travel-API!"), "travelapi");
        assert_eq!(normalize_namespace("rapid"), "rapid");
        assert_eq!(normalize_namespace("Fraud-Prevention-Test"), "fraudpreventiontest");
        assert_eq!(normalize_namespace("v2_Lodging.Shopping"), "v2lodgingshopping");
    }

    #[test]
    fn test_normalize_namespace_drops_non_ascii() {
        // Lowercasing may produce non-ASCII letters; they are stripped too
        assert_eq!(normalize_namespace("Café"), "caf");
        assert_eq!(normalize_namespace("ÅÄÖ"), "");
        assert_eq!(normalize_namespace("---"), "");
        assert_eq!(normalize_namespace(""), "");
    }

    #[test]
    fn test_normalize_namespace_is_idempotent() {
        let inputs = ["Travel-API!", "  spaced out  ", "ALL_CAPS_99", "ünïcödé"];
        for input in inputs {
            let once = normalize_namespace(input);
            assert_eq!(normalize_namespace(&once), once);
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "unexpected character in {once:?}"
            );
        }
    }
}
