// Pure navigation logic - no Tauri imports allowed.
// URL-field handling that can be unit tested.

use url::{ParseError, Url};

/// Scheme prepended to URL-field input that has none.
pub const DEFAULT_SCHEME: &str = "http";

/// Turns raw URL-field text into the string handed to the web view.
///
/// Input that already carries a scheme is passed through untouched. Anything
/// else gets `http://` prepended. No validation or escaping happens here; a
/// malformed address is left for the engine to render an error page for.
pub fn with_default_scheme(input: &str) -> String {
    let trimmed = input.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, trimmed)
    }
}

/// True when `input` starts with a URL scheme, as judged by the `url` parser.
///
/// Input that only fails to parse after its scheme (`http://`, a bad host)
/// still counts as having one. `host:port` input such as `localhost:3000` is
/// not a scheme, even though the parser accepts it as one.
pub fn has_scheme(input: &str) -> bool {
    let looks_like_port = input
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with(|c: char| c.is_ascii_digit()));
    if looks_like_port {
        return false;
    }

    match Url::parse(input) {
        Ok(_) => true,
        Err(ParseError::RelativeUrlWithoutBase) => false,
        Err(_) => true,
    }
}
