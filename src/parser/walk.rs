use scraper::ElementRef;

use super::document::{has_class, next_siblings, tag, Sibling};

/// Structural role of a sibling node, as far as the extractors care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Heading(u8),
    OrderedList,
    UnorderedList,
    Comment,
    Other,
}

impl NodeKind {
    /// Levels 3 and 4 close a part-of-speech section or one of its subsections.
    pub fn is_boundary(self) -> bool {
        matches!(self, NodeKind::Heading(3) | NodeKind::Heading(4))
    }
}

pub fn classify(sibling: Sibling<'_>) -> NodeKind {
    match sibling {
        Sibling::Comment => NodeKind::Comment,
        Sibling::Element(el) => classify_element(el),
    }
}

pub fn classify_element(el: ElementRef<'_>) -> NodeKind {
    match tag(el) {
        "h1" => NodeKind::Heading(1),
        "h2" => NodeKind::Heading(2),
        "h3" => NodeKind::Heading(3),
        "h4" => NodeKind::Heading(4),
        "h5" => NodeKind::Heading(5),
        "h6" => NodeKind::Heading(6),
        "ol" => NodeKind::OrderedList,
        "ul" => NodeKind::UnorderedList,
        // Newer skins wrap headings: <div class="mw-heading mw-heading3"><h3 id=..>
        "div" => wrapped_heading_level(el).map_or(NodeKind::Other, NodeKind::Heading),
        _ => NodeKind::Other,
    }
}

fn wrapped_heading_level(el: ElementRef<'_>) -> Option<u8> {
    (1..=6u8).find(|level| has_class(el, &format!("mw-heading{level}")))
}

/// Siblings following `start`, up to (excluding) the next level 3/4 heading.
/// The end of the sibling chain closes the walk as well.
pub fn walk_until_boundary<'a>(start: ElementRef<'a>) -> impl Iterator<Item = Sibling<'a>> + 'a {
    next_siblings(start).take_while(|sibling| !classify(*sibling).is_boundary())
}
