//! Chrome Web Store link parsing

use crate::error::{ExtensionError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use url::{ParseError, Url};

const WEBSTORE_PREFIX: &str = "/webstore";

lazy_static! {
    // First 32-letter lowercase run that sits after at least one path
    // segment and ends at `/`, `#`, `?` or the end of the path
    static ref EXTENSION_ID_PATTERN: Regex =
        Regex::new(r"(?s)^.+?/([a-z]{32})(?:[/#?]|$)").unwrap();
}

/// Parse a store link into `(name, id)`.
///
/// Only the path of the link is looked at; scheme, host and query are
/// ignored. A link without a scheme is taken as a path as a whole, up to
/// its query or fragment.
pub fn parse_store_url(link: &str) -> Result<(String, String)> {
    let link = link.trim();
    match Url::parse(link) {
        Ok(url) => parse_store_path(url.path()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let path = link.split(['?', '#']).next().unwrap_or_default();
            parse_store_path(path)
        }
        Err(e) => Err(ExtensionError::IdentityParse(format!("invalid link {link:?}: {e}"))),
    }
}

/// Parse the (still percent-encoded) path component of a store link.
pub fn parse_store_path(path: &str) -> Result<(String, String)> {
    let decoded = urlencoding::decode(path)
        .map_err(|e| ExtensionError::IdentityParse(format!("path is not valid UTF-8: {e}")))?;
    let path = strip_webstore_prefix(&decoded);

    let id = EXTENSION_ID_PATTERN
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtensionError::IdentityParse("no id found".to_string()))?;

    let remainder = path.replace(&id, "");
    let name = remainder
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if name.is_empty() {
        return Err(ExtensionError::IdentityParse("no name found".to_string()));
    }

    Ok((name.to_string(), id))
}

/// Check whether `id` looks like a store extension id.
pub fn is_extension_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| b.is_ascii_lowercase())
}

fn strip_webstore_prefix(path: &str) -> &str {
    match path.strip_prefix(WEBSTORE_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_webstore_link() {
        let (name, id) = parse_store_url(
            "https://chrome.google.com/webstore/detail/some-extension/abcdefghijklmnopqrstuvwxyzabcdef",
        )
        .unwrap();
        assert_eq!(name, "some-extension");
        assert_eq!(id, "abcdefghijklmnopqrstuvwxyzabcdef");
    }

    #[test]
    fn test_webstore_prefix_is_a_segment() {
        assert_eq!(strip_webstore_prefix("/webstore/detail/x"), "/detail/x");
        assert_eq!(strip_webstore_prefix("/webstores/detail/x"), "/webstores/detail/x");
        assert_eq!(strip_webstore_prefix("/detail/x"), "/detail/x");
    }

    #[test]
    fn test_is_extension_id() {
        assert!(is_extension_id("cjpalhdlnbpafiamejdnhcphjbkeiagm"));
        assert!(!is_extension_id("CJPALHDLNBPAFIAMEJDNHCPHJBKEIAGM"));
        assert!(!is_extension_id("cjpalhdlnbpafiamejdnhcphjbkeiag"));
        assert!(!is_extension_id("cjpalhdlnbpafiamejdnhcphjbkeiag1"));
    }
}
