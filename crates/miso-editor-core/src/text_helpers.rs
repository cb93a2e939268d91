//! Text analysis and URL helpers shared by the tracker and the sanitizer.

/// Number of whitespace-delimited, non-empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of characters once all whitespace is removed.
pub fn count_non_whitespace(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Character length of the trimmed text.
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Scheme of a URL, lowercased, or `None` for relative URLs.
///
/// Whitespace and control characters are ignored while reading the scheme,
/// the way browsers do, so `java\tscript:` is still `javascript`.
pub fn url_scheme(url: &str) -> Option<String> {
    let mut scheme = String::new();
    for c in url.trim_start().chars() {
        match c {
            ':' => return (!scheme.is_empty()).then_some(scheme),
            c if c.is_ascii_whitespace() || c.is_control() => continue,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                scheme.push(c.to_ascii_lowercase())
            }
            // '/', '?', '#' or anything else before a ':' means no scheme.
            _ => return None,
        }
    }
    None
}

/// Whether a URL is safe to keep in an `href`/`src` attribute.
///
/// Relative URLs and ordinary schemes pass. Script schemes never pass, and
/// `data:` URLs pass only for images when `allow_data_images` is set.
pub fn is_safe_url(url: &str, allow_data_images: bool) -> bool {
    match url_scheme(url).as_deref() {
        None => true,
        Some("javascript") | Some("vbscript") => false,
        Some("data") => {
            allow_data_images && {
                let rest = url.trim_start();
                rest.get(..11)
                    .is_some_and(|p| p.eq_ignore_ascii_case("data:image/"))
            }
        }
        Some(_) => true,
    }
}
