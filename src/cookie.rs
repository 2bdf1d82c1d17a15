use wasm_bindgen::JsCast;

/// Look up `name` in a `document.cookie` string. The value is percent-decoded;
/// a value that does not decode is returned as-is.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}

/// Current `document.cookie`, empty when unavailable.
pub fn document_cookies() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_named_cookie() {
        let cookies = "sessionid=abc; csrftoken=Xy12Zq; theme=dark";
        assert_eq!(find_cookie(cookies, "csrftoken").as_deref(), Some("Xy12Zq"));
        assert_eq!(find_cookie(cookies, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(find_cookie("", "csrftoken"), None);
        assert_eq!(find_cookie("sessionid=abc", "csrftoken"), None);
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        let cookies = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(find_cookie(cookies, "csrftoken").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_value_is_percent_decoded() {
        assert_eq!(
            find_cookie("csrftoken=a%2Fb%3Dc", "csrftoken").as_deref(),
            Some("a/b=c")
        );
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(find_cookie("a=1; a=2", "a").as_deref(), Some("1"));
    }
}
