use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;

use super::section_heading;
use crate::parser::document::{attr, text, Document, Sibling};
use crate::parser::record::{Related, RelatedEntry};
use crate::parser::sections::SectionIndex;
use crate::parser::walk::walk_until_boundary;

static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static NAV_HEAD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".NavHead").unwrap());
static NAV_CONTENT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".NavContent").unwrap());
static NAV_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".NavContent a").unwrap());

/// Category whose content is prose rather than word lists.
pub const NOTES: &str = "Notes";

/// Links into the appendix namespace are navigation, not related words.
const APPENDIX_PREFIX: &str = "Annexe:";

/// Every subsection named `category` (or `category_N`), keyed by the
/// readable name of the section that declares it.
pub fn category_ids(doc: &Document, index: &SectionIndex, category: &str) -> BTreeMap<String, String> {
    let slug = regex::escape(&category.replace(' ', "_"));
    let Ok(re) = Regex::new(&format!(r"^#{slug}(?:_\d+)?$")) else {
        return BTreeMap::new();
    };

    let mut ids = BTreeMap::new();
    for (section_id, subsections) in index.iter() {
        let name = section_name(doc, section_id);
        for sub in subsections.iter().filter(|sub| re.is_match(sub)) {
            ids.insert(name.clone(), sub.clone());
        }
    }
    ids
}

/// Readable name of a section: the text of its anchor.
pub fn section_name(doc: &Document, section_id: &str) -> String {
    doc.anchor(section_id)
        .map(|anchor| text(anchor).trim().to_string())
        .unwrap_or_default()
}

/// Related words of `category`, grouped by parent section name.
pub fn extract(doc: &Document, index: &SectionIndex, category: &str) -> BTreeMap<String, Related> {
    let mut related = BTreeMap::new();
    for (name, sub_id) in category_ids(doc, index, category) {
        let Some(heading) = section_heading(doc, &sub_id) else {
            continue;
        };
        let value = if category == NOTES {
            Related::Notes(notes(heading))
        } else {
            Related::Groups(word_groups(heading))
        };
        debug!(category, section = %name, sub_id = %sub_id, "related words extracted");
        related.insert(name, value);
    }
    related
}

/// One line of text per node of the section.
pub fn notes(heading: ElementRef<'_>) -> String {
    walk_until_boundary(heading)
        .filter_map(Sibling::element)
        .map(|el| text(el).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry per node of the section, keyed by walk position. Comments take a
/// position but produce no entry.
pub fn word_groups(heading: ElementRef<'_>) -> BTreeMap<usize, RelatedEntry> {
    walk_until_boundary(heading)
        .enumerate()
        .filter_map(|(position, sibling)| sibling.element().map(|el| (position, entry(el))))
        .collect()
}

fn entry(node: ElementRef<'_>) -> RelatedEntry {
    if node.select(&NAV_CONTENT_SEL).next().is_some() {
        let description = node
            .select(&NAV_HEAD_SEL)
            .next()
            .map(|head| text(head).trim().to_string())
            .unwrap_or_default();
        RelatedEntry {
            description,
            words: words(node.select(&NAV_LINK_SEL)),
        }
    } else {
        RelatedEntry {
            description: String::new(),
            words: words(node.select(&LINK_SEL)),
        }
    }
}

fn words<'a>(links: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    links
        .filter(|link| !attr(*link, "href").is_some_and(|href| href.contains(APPENDIX_PREFIX)))
        .map(|link| text(link).trim().to_string())
        .collect()
}
