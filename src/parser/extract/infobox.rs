use scraper::{ElementRef, Html};

use crate::parser::{has_class, joined_text, sel, stripped_text};

/// What the film page's info panel offers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub budget_raw: Option<String>,
    /// Raw `src` of the first image, unresolved.
    pub image_src: Option<String>,
}

fn find_panel(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&sel("table")).find(|t| has_class(*t, "infobox"))
}

/// `None` when the page has no info panel at all.
pub fn parse(doc: &Html) -> Option<InfoPanel> {
    let panel = find_panel(doc)?;

    // Every matching row overwrites the previous one.
    let mut budget_raw = None;
    for row in panel.select(&sel("tr")) {
        let Some(header) = row.select(&sel("th")).next() else {
            continue;
        };
        if !stripped_text(header).to_lowercase().contains("budget") {
            continue;
        }
        if let Some(cell) = row.select(&sel("td")).next() {
            budget_raw = Some(joined_text(cell, " "));
        }
    }

    let image_src = panel
        .select(&sel("img"))
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    Some(InfoPanel {
        budget_raw,
        image_src,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/film_page.html").unwrap();
        let panel = parse(&Html::parse_document(&html)).unwrap();
        assert_eq!(panel.budget_raw.as_deref(), Some("$10 million"));
        assert_eq!(
            panel.image_src.as_deref(),
            Some("//upload.wikimedia.org/wikipedia/en/example_poster.jpg")
        );
    }

    #[test]
    fn last_budget_row_wins() {
        let doc = page(
            r#"<table class="infobox vevent">
                 <tr><th>Budget</th><td>$1 million</td></tr>
                 <tr><th>Running time</th><td>90 minutes</td></tr>
                 <tr><th>Budget (restored)</th><td>$2 <sup>[3]</sup> million</td></tr>
               </table>"#,
        );
        assert_eq!(parse(&doc).unwrap().budget_raw.as_deref(), Some("$2 [3] million"));
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let doc = page(r#"<table class="infobox"><tr><th>BUDGET</th><td>£40,000</td></tr></table>"#);
        assert_eq!(parse(&doc).unwrap().budget_raw.as_deref(), Some("£40,000"));
    }

    #[test]
    fn budget_row_without_cell_is_ignored() {
        let doc = page(
            r#"<table class="infobox">
                 <tr><th>Budget</th><td>$3 million</td></tr>
                 <tr><th>Budget</th></tr>
               </table>"#,
        );
        assert_eq!(parse(&doc).unwrap().budget_raw.as_deref(), Some("$3 million"));
    }

    #[test]
    fn no_panel() {
        let doc = page(r#"<table class="wikitable"><tr><th>Budget</th><td>$1</td></tr></table>"#);
        assert_eq!(parse(&doc), None);
    }

    #[test]
    fn panel_without_budget_or_image() {
        let doc = page(r#"<table class="infobox"><tr><th>Directed by</th><td>Someone</td></tr></table>"#);
        assert_eq!(parse(&doc), Some(InfoPanel::default()));
    }

    #[test]
    fn only_first_panel_is_read() {
        let doc = page(
            r#"<table class="infobox"><tr><th>Starring</th><td>A</td></tr></table>
               <table class="infobox"><tr><th>Budget</th><td>$9</td></tr>
               <tr><td><img src="//x/y.jpg"></td></tr></table>"#,
        );
        assert_eq!(parse(&doc), Some(InfoPanel::default()));
    }
}
