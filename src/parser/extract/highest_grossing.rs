use scraper::{ElementRef, Html};
use url::Url;

use super::{data_rows, title_and_link, ListingRow};
use crate::parser::{has_class, sel, stripped_text};
use crate::record::Section;

const CAPTION_MARKER: &str = "Highest-grossing films";

/// First `wikitable` whose caption mentions the highest-grossing list.
fn find_table(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&sel("table"))
        .filter(|t| has_class(*t, "wikitable"))
        .find(|t| {
            t.select(&sel("caption"))
                .next()
                .map(|c| c.text().collect::<String>().contains(CAPTION_MARKER))
                .unwrap_or(false)
        })
}

/// Rank | Title | ... | Gross. Title is the 2nd cell, gross the last.
pub fn extract(doc: &Html, base: &Url) -> Vec<ListingRow> {
    let Some(table) = find_table(doc) else {
        return Vec::new();
    };

    data_rows(table)
        .filter_map(|row| {
            let cells: Vec<_> = row.select(&sel("td, th")).collect();
            if cells.len() < 2 {
                return None;
            }
            let (title, link) = title_and_link(cells[1], base);
            let box_office = stripped_text(cells[cells.len() - 1]);
            Some(ListingRow {
                title,
                link,
                box_office_raw: Some(box_office),
                release_date: None,
                section: Section::HighestGrossing,
            })
        })
        .collect()
}
