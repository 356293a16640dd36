//! Small URL helpers: Drive identifiers, query-component encoding and
//! resolution of relative `Location` headers.

use regex::Regex;
use std::sync::LazyLock;
use url::{Url, form_urlencoded};

/// Host names that mark a Google Drive / Docs link.
pub const DRIVE_MARKERS: [&str; 2] = ["drive.google.com", "docs.google.com"];

static FILE_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("file path id pattern"));

static QUERY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("query id pattern"));

static DRIVE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://drive\.google\.com/[^"'\s<>\\]+"#).expect("drive link pattern")
});

pub fn is_drive_url(url: &str) -> bool {
    DRIVE_MARKERS.iter().any(|marker| url.contains(marker))
}

/// File identifier of a Drive link, taken from a `/file/d/<id>` segment or,
/// failing that, from an `id=<id>` query parameter.
pub fn drive_file_id(url: &str) -> Option<String> {
    if !is_drive_url(url) {
        return None;
    }
    FILE_PATH_ID
        .captures(url)
        .or_else(|| QUERY_ID.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

pub fn drive_download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

pub fn drive_preview_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/preview")
}

/// Regular Drive page for the file, for opening it outside the app.
pub fn drive_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}

/// First `https://drive.google.com/...` link embedded in `text`.
pub fn find_drive_link(text: &str) -> Option<&str> {
    DRIVE_LINK.find(text).map(|found| found.as_str())
}

/// Percent-encodes `input` for use as a single query value.
pub fn encode_component(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// Resolves a `Location` header value against the URL that returned it.
/// `None` when either side is not a usable URL.
pub fn join_location(base: &str, location: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(location.trim()).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_comes_from_path_or_query() {
        assert_eq!(
            drive_file_id("https://drive.google.com/file/d/ABC_12-x/view?usp=sharing").as_deref(),
            Some("ABC_12-x")
        );
        assert_eq!(
            drive_file_id("https://drive.google.com/uc?export=download&id=XYZ").as_deref(),
            Some("XYZ")
        );
        assert_eq!(drive_file_id("https://drive.google.com/drive/folders"), None);
        assert_eq!(drive_file_id("https://example.com/file/d/ABC"), None);
    }

    #[test]
    fn drive_urls_for_a_file_id() {
        assert_eq!(drive_download_url("X1"), "https://drive.google.com/uc?export=download&id=X1");
        assert_eq!(drive_view_url("X1"), "https://drive.google.com/file/d/X1/view");
    }

    #[test]
    fn finds_first_drive_link_in_markup() {
        let html = r#"<a href="https://drive.google.com/file/d/ONE/view">x</a>
                      <a href='https://drive.google.com/file/d/TWO/view'>y</a>"#;
        assert_eq!(
            find_drive_link(html),
            Some("https://drive.google.com/file/d/ONE/view")
        );
        assert_eq!(find_drive_link("no links here"), None);
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_component("a b&c=d/é"), "a+b%26c%3Dd%2F%C3%A9");
        assert_eq!(encode_component("safe-_.*"), "safe-_.*");
    }

    #[test]
    fn joins_relative_locations() {
        let base = "https://short.example/dir/abc?q=1";
        let join = |location| join_location(base, location);
        assert_eq!(join("https://other.example/x.pdf").as_deref(), Some("https://other.example/x.pdf"));
        assert_eq!(join("//cdn.example/x").as_deref(), Some("https://cdn.example/x"));
        assert_eq!(join("/top/file.pdf").as_deref(), Some("https://short.example/top/file.pdf"));
        assert_eq!(join("next").as_deref(), Some("https://short.example/dir/next"));
        assert_eq!(join("../up?id=1").as_deref(), Some("https://short.example/up?id=1"));
        assert_eq!(join("?page=2").as_deref(), Some("https://short.example/dir/abc?page=2"));
        assert_eq!(
            join_location("https://short.example", "landing").as_deref(),
            Some("https://short.example/landing")
        );
    }

    #[test]
    fn join_needs_an_absolute_base() {
        assert_eq!(join_location("not a url", "/x"), None);
        assert_eq!(
            join_location("https://short.example/dir/abc", " ").as_deref(),
            Some("https://short.example/dir/abc")
        );
    }
}
