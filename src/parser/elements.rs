use scraper::{ElementRef, Html};

/// Every element of the document in document (pre-)order.
pub fn flatten(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect()
}

/// Index of the first element whose `id` attribute equals `id`.
pub fn find_id(elements: &[ElementRef], id: &str) -> Option<usize> {
    elements.iter().position(|el| el.value().id() == Some(id))
}

/// Walk `elements` after `anchor`, keeping those matching `keep`, until the
/// first element matching `stop`. The stop element is not returned.
pub fn scan_after<'a>(
    elements: &[ElementRef<'a>],
    anchor: usize,
    stop: impl Fn(ElementRef<'a>) -> bool,
    keep: impl Fn(ElementRef<'a>) -> bool,
) -> Vec<ElementRef<'a>> {
    elements
        .iter()
        .skip(anchor + 1)
        .copied()
        .take_while(|el| !stop(*el))
        .filter(|el| keep(*el))
        .collect()
}

pub fn is_tag(el: ElementRef, name: &str) -> bool {
    el.value().name() == name
}

// ── Tests ──
