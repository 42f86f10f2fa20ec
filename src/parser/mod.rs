pub mod document;
pub mod extract;
pub mod record;
pub mod sections;
pub mod walk;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::languages;
use document::Document;
use extract::related::section_name;
use extract::{definitions, etymology, related, translations};
use record::{PartOfSpeech, PartOfSpeechContent, Related, Translations, WordData};
use sections::SectionIndex;

/// The wiki's own language: translation tables only exist in its sections.
pub const PRIMARY_LANGUAGE: &str = "Français";

/// Sections of a language that never hold a part of speech.
static NOT_PART_OF_SPEECH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Étymologie|Prononciation|Références|Voir_aussi|Anagrammes|Liens_externes|Erreurs*").unwrap()
});

static TRANSLATIONS_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#Traductions").unwrap());

/// Related-word categories collected for every part of speech, in output order.
pub const RELATED_CATEGORIES: &[&str] = &[
    "Variantes orthographiques",
    "Variantes",
    "Abréviations",
    "Transcriptions dans diverses écritures",
    "Augmentatifs",
    "Diminutifs",
    "Synonymes",
    "Quasi-synonymes",
    "Antonymes",
    "Gentilés",
    "Composés",
    "Dérivés",
    "Apparentés étymologiques",
    "Vocabulaire",
    "Phrases",
    "Variantes dialectales",
    "Hyperonymes",
    "Hyponymes",
    "Holonymes",
    "Méronymes",
    "Troponymes",
    "Dérivés dans d’autres langues",
    "Faux-amis",
    "Notes",
    "Paronymes",
    "Anagrammes",
    "Voir aussi",
];

/// Extraction over one page, for one language at a time.
///
/// The section index is rebuilt whenever the language changes; everything
/// else is computed per call from the parsed document, which is never mutated.
pub struct WiktionnaireParser {
    document: Document,
    language: String,
    sections: Option<SectionIndex>,
}

impl WiktionnaireParser {
    pub fn new(html: &str, language: &str) -> Self {
        Self::from_document(Document::parse(html), language)
    }

    /// Resolve a language code ("fr", "en", ...) to its name first.
    pub fn with_lang_code(html: &str, lang_code: &str) -> Result<Self> {
        let language = languages::name_for_code(lang_code)?;
        Ok(Self::new(html, language))
    }

    pub fn from_document(document: Document, language: &str) -> Self {
        let mut parser = WiktionnaireParser {
            document,
            language: String::new(),
            sections: None,
        };
        parser.set_language(language);
        parser
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switch language. The previous index is dropped, never merged.
    pub fn set_language(&mut self, language: &str) {
        self.language = capitalize(language);
        self.sections = sections::build(&self.document, &self.language);
        debug!(
            language = %self.language,
            sections = self.sections.as_ref().map_or(0, SectionIndex::len),
            "language selected"
        );
    }

    /// `None` when the page has no section for the language.
    pub fn section_index(&self) -> Option<&SectionIndex> {
        self.sections.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    pub fn languages(&self) -> Vec<String> {
        self.document.languages()
    }

    pub fn etymology(&self) -> String {
        self.sections
            .as_ref()
            .map(|index| etymology::extract(&self.document, index))
            .unwrap_or_default()
    }

    pub fn definitions(&self, section: &str) -> PartOfSpeechContent {
        definitions::extract(&self.document, section)
    }

    pub fn related_words(&self, category: &str) -> BTreeMap<String, Related> {
        self.sections
            .as_ref()
            .map(|index| related::extract(&self.document, index, category))
            .unwrap_or_default()
    }

    pub fn translations(&self, section_id: &str) -> Translations {
        translations::extract(&self.document, section_id)
    }

    /// Every part of speech of the language, keyed by its heading text.
    ///
    /// Related-word groups whose parent section is not a part of speech are
    /// returned separately, keyed by category.
    pub fn parts_of_speech(
        &self,
    ) -> (BTreeMap<String, PartOfSpeech>, BTreeMap<String, BTreeMap<String, Related>>) {
        let mut parts = BTreeMap::new();
        let mut unattached: BTreeMap<String, BTreeMap<String, Related>> = BTreeMap::new();
        let Some(index) = self.sections.as_ref() else {
            return (parts, unattached);
        };

        for (section_id, subsections) in index.iter() {
            if NOT_PART_OF_SPEECH.is_match(section_id) {
                continue;
            }
            let content = self.definitions(section_id);
            let ligne = content.ligne_de_forme;
            let mut entry = PartOfSpeech {
                definitions: content.definitions,
                pronunciation: Some(ligne.pronunciation).filter(|p| !p.is_empty()),
                gender: ligne.gender.filter(|g| !g.is_empty()),
                ..Default::default()
            };
            if self.language == PRIMARY_LANGUAGE {
                entry.translations = self.section_translations(subsections);
            }
            parts.insert(section_name(&self.document, section_id), entry);
        }

        for category in RELATED_CATEGORIES {
            for (section, value) in self.related_words(category) {
                match parts.get_mut(&section) {
                    Some(entry) => {
                        entry.related.insert(category.to_string(), value);
                    }
                    None => {
                        unattached
                            .entry(category.to_string())
                            .or_default()
                            .insert(section, value);
                    }
                }
            }
        }

        (parts, unattached)
    }

    /// Merge every `Traductions` subsection of a part of speech.
    fn section_translations(&self, subsections: &[String]) -> Option<Translations> {
        let mut merged: Option<Translations> = None;
        for sub in subsections.iter().filter(|sub| TRANSLATIONS_ID.is_match(sub)) {
            let found = self.translations(sub);
            let target = merged.get_or_insert_with(Translations::new);
            for (language, terms) in found {
                target.entry(language).or_default().extend(terms);
            }
        }
        merged
    }

    /// Everything the page says about the word in the current language.
    pub fn word_data(&self) -> WordData {
        let (part_of_speech, unattached) = self.parts_of_speech();
        let data = WordData {
            title: self.title(),
            etymologies: self.etymology(),
            part_of_speech,
            unattached,
        };
        info!(
            title = %data.title,
            language = %self.language,
            parts_of_speech = data.part_of_speech.len(),
            "word extracted"
        );
        data
    }
}

fn capitalize(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ──
