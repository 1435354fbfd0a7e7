//! Canonical domain keys from user-supplied URLs and domains.

/// Reduce a URL or bare domain to the key sent to the lookup provider.
///
/// Strips a leading `http://`/`https://` (any case), any leading `www.`,
/// then cuts at the first `/` and the first `:`. No syntax validation is
/// done: garbage in gives deterministic garbage out. The output never
/// contains `/` or `:` and never starts with `www.`, so normalizing twice
/// is the same as normalizing once.
pub fn normalize_domain(input: &str) -> String {
    let mut rest = input.trim();

    for scheme in ["https://", "http://"] {
        if let Some(head) = rest.get(..scheme.len()) {
            if head.eq_ignore_ascii_case(scheme) {
                rest = &rest[scheme.len()..];
                break;
            }
        }
    }

    while let Some(stripped) = rest.trim_start().strip_prefix("www.") {
        rest = stripped;
    }

    let rest = rest.split('/').next().unwrap_or_default();
    let rest = rest.split(':').next().unwrap_or_default();
    rest.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        assert_eq!(
            normalize_domain("https://www.Example.com/path:8080"),
            "Example.com"
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(normalize_domain("HTTP://acme.io"), "acme.io");
        assert_eq!(normalize_domain("Https://acme.io/about"), "acme.io");
    }

    #[test]
    fn test_port_and_path() {
        assert_eq!(normalize_domain("acme.io:8443/login"), "acme.io");
        assert_eq!(normalize_domain("http://localhost:3000"), "localhost");
    }

    #[test]
    fn test_bare_domain_unchanged() {
        assert_eq!(normalize_domain("stripe.com"), "stripe.com");
        assert_eq!(normalize_domain("sub.stripe.com"), "sub.stripe.com");
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(normalize_domain("  www.acme.io \n"), "acme.io");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://www.Example.com/path:8080",
            "www.www.double.com",
            "https://https://nested.com",
            "ftp://odd.example",
            ":8080",
            "",
            "http://",
            "www.",
            "www. www.spaced.com",
            "acme.io /path",
            "ünïcödé.example/x",
        ];

        for input in inputs {
            let once = normalize_domain(input);
            assert_eq!(normalize_domain(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("https://"), "");
        assert_eq!(normalize_domain(":8080"), "");
        assert_eq!(normalize_domain("ftp://odd.example"), "ftp");
    }
}
