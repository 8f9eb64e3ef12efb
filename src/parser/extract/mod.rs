pub mod highest_grossing;
pub mod infobox;
pub mod notable;

use scraper::{ElementRef, Html};
use url::Url;

use super::{resolve_link, sel, stripped_text};
use crate::record::Section;

/// A listing-table row before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub title: String,
    /// Absolute address of the film page, if the title cell links anywhere.
    pub link: Option<String>,
    pub box_office_raw: Option<String>,
    pub release_date: Option<String>,
    pub section: Section,
}

/// Rows from both listing tables: highest-grossing first, then notable releases.
pub fn extract_all(doc: &Html, base: &Url) -> Vec<ListingRow> {
    let mut rows = highest_grossing::extract(doc, base);
    rows.extend(notable::extract(doc, base));
    rows
}

/// All `tr` of a table except the header row.
fn data_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    table.select(&sel("tr")).skip(1).collect::<Vec<_>>().into_iter()
}

/// Stripped title text plus the resolved href of its first anchor.
fn title_and_link(cell: ElementRef, base: &Url) -> (String, Option<String>) {
    let link = cell
        .select(&sel("a"))
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(base, href));
    (stripped_text(cell), link)
}

// ── Tests ──
