use std::collections::BTreeMap;

use serde::Serialize;

/// Definitions of one part of speech, keyed by their position in the list.
pub type Definitions = BTreeMap<usize, Definition>;

/// Language name → translated terms, in page order.
pub type Translations = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<usize, Example>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdefinitions: Option<BTreeMap<usize, SubDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Sub-definitions keep their example list as raw text: it is not split into
/// [`Example`] records the way top-level examples are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubDefinition {
    pub subdefinition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
}

/// Pronunciation and gender read from the introductory line of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LigneDeForme {
    pub pronunciation: Vec<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartOfSpeechContent {
    pub definitions: Definitions,
    pub ligne_de_forme: LigneDeForme,
}

/// One entry of a related-word category, keyed by its position in the section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelatedEntry {
    pub description: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Related {
    Notes(String),
    Groups(BTreeMap<usize, RelatedEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartOfSpeech {
    pub definitions: Definitions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Translations>,
    /// Category label ("Synonymes", "Notes", ...) → content.
    #[serde(flatten)]
    pub related: BTreeMap<String, Related>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordData {
    pub title: String,
    pub etymologies: String,
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: BTreeMap<String, PartOfSpeech>,
    /// Category → section name → content, for groups whose parent section is
    /// not a part of speech (e.g. paronyms listed under "Prononciation").
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unattached: BTreeMap<String, BTreeMap<String, Related>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn part_of_speech_serializes_flat() {
        let mut definitions = Definitions::new();
        definitions.insert(
            0,
            Definition {
                definition: "Félin.".into(),
                ..Default::default()
            },
        );
        let mut related = BTreeMap::new();
        related.insert("Notes".to_string(), Related::Notes("Voir chatte.".into()));
        let pos = PartOfSpeech {
            definitions,
            pronunciation: Some(vec!["ʃa".into()]),
            gender: None,
            translations: None,
            related,
        };
        assert_eq!(
            serde_json::to_value(&pos).unwrap(),
            json!({
                "definitions": {"0": {"definition": "Félin."}},
                "pronunciation": ["ʃa"],
                "Notes": "Voir chatte."
            })
        );
    }

    #[test]
    fn word_data_uses_camel_case_key() {
        let data = WordData {
            title: "chat".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("partOfSpeech").is_some());
        assert!(value.get("unattached").is_none());
    }
}
