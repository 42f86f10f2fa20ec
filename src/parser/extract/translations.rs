use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::section_heading;
use crate::parser::document::{attr, first_child, tag, text, Document};
use crate::parser::record::Translations;
use crate::parser::walk::walk_until_boundary;

static ITEM_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

/// Class of the superscript link pointing at the foreign wiki.
const EXPONENT_CLASS: &str = "trad-exposant";

/// Class suffix of transliterated forms, which duplicate the native spelling.
const TRANSLITERATION_SUFFIX: &str = "-Latn";

/// Translations listed in a `Traductions` subsection: language name → terms.
pub fn extract(doc: &Document, section_id: &str) -> Translations {
    let mut result = Translations::new();
    let Some(block) = section_heading(doc, section_id)
        .and_then(|heading| walk_until_boundary(heading).find_map(|sibling| sibling.element()))
    else {
        return result;
    };

    for item in block.select(&ITEM_SEL) {
        let Some(language) = first_child(item, "span") else {
            continue;
        };
        let language = text(language).trim().to_string();
        let terms = translated_terms(item);
        debug!(language = %language, terms = terms.len(), "translation line");
        result.insert(language, terms);
    }
    result
}

/// Walk the links following the first direct link of a translation line.
fn translated_terms(item: ElementRef<'_>) -> Vec<String> {
    let Some(first) = first_child(item, "a") else {
        return Vec::new();
    };
    std::iter::once(first)
        .chain(first.next_siblings().filter_map(ElementRef::wrap))
        .filter(|el| tag(*el) == "a" && is_translation(*el))
        .map(|link| text(link).trim().to_string())
        .collect()
}

fn is_translation(link: ElementRef<'_>) -> bool {
    match attr(link, "class") {
        None => true,
        Some(class) => class != EXPONENT_CLASS && !class.ends_with(TRANSLITERATION_SUFFIX),
    }
}
