pub mod definitions;
pub mod etymology;
pub mod related;
pub mod translations;

use scraper::ElementRef;
use tracing::debug;

use super::document::{parent_element, Document};

/// `"Nom commun"` → `"#Nom_commun"`; identifiers already starting with `#` are kept.
pub fn normalize_section_id(section: &str) -> String {
    if section.starts_with('#') {
        section.to_string()
    } else {
        format!("#{}", section.replace(' ', "_"))
    }
}

/// Heading that owns a section anchor: the walks start from here.
pub fn section_heading<'a>(doc: &'a Document, section_id: &str) -> Option<ElementRef<'a>> {
    let heading = doc.anchor(section_id).and_then(parent_element);
    if heading.is_none() {
        debug!(section_id, "anchor not found");
    }
    heading
}

/// Text up to the first line break, trimmed.
pub fn first_line(raw: &str) -> String {
    raw.split('\n').next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_section_id("Nom commun"), "#Nom_commun");
        assert_eq!(normalize_section_id("#Verbe_2"), "#Verbe_2");
    }

    #[test]
    fn first_line_cuts_at_break() {
        assert_eq!(first_line(" Félin.\nexemple\n"), "Félin.");
        assert_eq!(first_line(""), "");
    }
}
