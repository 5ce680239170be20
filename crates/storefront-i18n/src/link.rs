//! Locale-prefixed link helper.

/// Rewrite a navigation target so it carries the active locale prefix.
///
/// Relative targets (leading `.`) are left untouched; anything else
/// becomes `/{lang}/{path}` with a duplicate leading slash stripped.
pub fn localize_path(to: &str, lang: &str) -> String {
    if to.starts_with('.') {
        return to.to_string();
    }
    format!("/{}/{}", lang, to.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_gets_prefix() {
        assert_eq!(localize_path("/products", "en"), "/en/products");
    }

    #[test]
    fn test_bare_path_gets_prefix() {
        assert_eq!(localize_path("sign-in", "ar"), "/ar/sign-in");
    }

    #[test]
    fn test_relative_path_untouched() {
        assert_eq!(localize_path("./edit", "en"), "./edit");
        assert_eq!(localize_path("../list", "en"), "../list");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(localize_path("/", "fr"), "/fr/");
    }
}
