use tracing::debug;

use super::section_heading;
use crate::parser::document::{text, Document};
use crate::parser::sections::SectionIndex;
use crate::parser::walk::walk_until_boundary;

/// Marker that identifies the etymology section of a language.
pub const ETYMOLOGY_MARKER: &str = "Étymologie";

/// Whole-text placeholders the wiki shows when nobody wrote the etymology.
const PLACEHOLDERS: &[&str] = &[
    "Étymologie manquante ou incomplète. Si vous la connaissez, vous pouvez l’ajouter en cliquant ici.",
    "Étymologie manquante ou incomplète. Si vous la connaissez, vous pouvez l'ajouter en cliquant ici.",
];

/// Locutions carrying no information, removed wherever they occur.
const NOISE: &[&str] = &["(Siècle à préciser) "];

/// The etymology block of the language, cleaned. Empty when the language has
/// no etymology section or the block is a placeholder.
pub fn extract(doc: &Document, index: &SectionIndex) -> String {
    let Some(section_id) = index.keys().find(|id| id.contains(ETYMOLOGY_MARKER)) else {
        return String::new();
    };
    let Some(heading) = section_heading(doc, section_id) else {
        return String::new();
    };
    let raw = walk_until_boundary(heading)
        .find_map(|sibling| sibling.element())
        .map(text)
        .unwrap_or_default();
    debug!(section_id, chars = raw.len(), "etymology block found");
    clean(&raw)
}

/// Apply the cleanup rules until nothing changes, so cleaning is idempotent.
pub fn clean(etymology: &str) -> String {
    let mut current = etymology.trim().to_string();
    loop {
        let mut next = current.clone();
        for noise in NOISE {
            next = next.replace(noise, "");
        }
        let mut next = next.trim().to_string();
        if PLACEHOLDERS.contains(&next.as_str()) {
            next.clear();
        }
        if next == current {
            return current;
        }
        current = next;
    }
}
