pub mod elements;
pub mod extract;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

static UNSAFE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s/\\]").unwrap());

/// Compile a selector known at build time.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Text nodes trimmed and glued with no separator.
pub fn stripped_text(el: ElementRef) -> String {
    joined_text(el, "")
}

/// Text nodes trimmed and joined by `sep`, empty nodes dropped.
pub fn joined_text(el: ElementRef, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

pub fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Resolve an `href` against the wiki base. `None` for unusable links.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// Absolute https address for an image `src`. Protocol-relative and
/// plain-http sources are moved to https; relative paths join `page`.
pub fn resolve_image(page: &Url, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    let mut url = if let Some(rest) = src.strip_prefix("//") {
        Url::parse(&format!("https://{}", rest)).ok()?
    } else {
        page.join(src).ok()?
    };
    if url.scheme() == "http" {
        url.set_scheme("https").ok()?;
    }
    Some(url.into())
}

/// `<year>_<title>.jpg` with whitespace and path separators as `_`.
pub fn image_file_name(year: u16, title: &str) -> String {
    format!("{}_{}.jpg", year, UNSAFE_FILENAME_RE.replace_all(title, "_"))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&sel(css)).next().unwrap()
    }

    #[test]
    fn stripped_text_glues_nodes() {
        let doc = Html::parse_document(
            "<table><tr><td> <i><a href='/x'>Example</a></i> Film <sup>[1]</sup></td></tr></table>",
        );
        let td = first(&doc, "td");
        assert_eq!(stripped_text(td), "ExampleFilm[1]");
        assert_eq!(joined_text(td, " "), "Example Film [1]");
    }

    #[test]
    fn resolve_wiki_link() {
        let base = Url::parse("https://en.wikipedia.org/wiki/").unwrap();
        assert_eq!(
            resolve_link(&base, "/wiki/Example_Film").as_deref(),
            Some("https://en.wikipedia.org/wiki/Example_Film")
        );
        assert_eq!(
            resolve_link(&base, "https://example.org/a").as_deref(),
            Some("https://example.org/a")
        );
        assert_eq!(resolve_link(&base, "  "), None);
    }

    #[test]
    fn image_sources_are_forced_to_https() {
        let page = Url::parse("https://en.wikipedia.org/wiki/Example_Film").unwrap();
        assert_eq!(
            resolve_image(&page, "//upload.wikimedia.org/poster.jpg").as_deref(),
            Some("https://upload.wikimedia.org/poster.jpg")
        );
        assert_eq!(
            resolve_image(&page, "http://upload.wikimedia.org/poster.jpg").as_deref(),
            Some("https://upload.wikimedia.org/poster.jpg")
        );
        assert_eq!(
            resolve_image(&page, "/static/poster.png").as_deref(),
            Some("https://en.wikipedia.org/static/poster.png")
        );
    }

    #[test]
    fn file_names() {
        assert_eq!(image_file_name(1999, "Example Film"), "1999_Example_Film.jpg");
        assert_eq!(image_file_name(2004, "Fahrenheit 9/11"), "2004_Fahrenheit_9_11.jpg");
    }
}
