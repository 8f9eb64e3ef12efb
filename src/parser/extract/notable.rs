use scraper::{ElementRef, Html};
use url::Url;

use super::{data_rows, title_and_link, ListingRow};
use crate::parser::elements::{find_id, flatten, is_tag, scan_after};
use crate::parser::{has_class, sel, stripped_text};
use crate::record::Section;

const ANCHOR_ID: &str = "Notable_films_released";

/// Tables belonging to the notable-releases section: every `wikitable` after
/// the anchor, up to the next `h2`.
pub fn section_tables(doc: &Html) -> Vec<ElementRef<'_>> {
    let elements = flatten(doc);
    let Some(anchor) = find_id(&elements, ANCHOR_ID) else {
        return Vec::new();
    };
    scan_after(
        &elements,
        anchor,
        |el| is_tag(el, "h2"),
        |el| is_tag(el, "table") && has_class(el, "wikitable"),
    )
}

/// Title | Release date | ... Only `td` cells count.
pub fn extract(doc: &Html, base: &Url) -> Vec<ListingRow> {
    // Layout varies a lot between years; rows are taken as-is.
    section_tables(doc)
        .into_iter()
        .flat_map(data_rows)
        .filter_map(|row| {
            let cells: Vec<_> = row.select(&sel("td")).collect();
            if cells.len() < 2 {
                return None;
            }
            let (title, link) = title_and_link(cells[0], base);
            Some(ListingRow {
                title,
                link,
                box_office_raw: None,
                release_date: Some(stripped_text(cells[1])),
                section: Section::NotableRelease,
            })
        })
        .collect()
}
