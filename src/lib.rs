//! Structured lexical data (definitions, etymology, pronunciation, gender,
//! related words, translations) from French Wiktionary pages.

pub mod error;
pub mod fetch;
pub mod languages;
pub mod parser;
pub mod settings;

pub use error::{Error, Result};
pub use parser::record::{
    Definition, Definitions, Example, PartOfSpeech, Related, RelatedEntry, SubDefinition,
    Translations, WordData,
};
pub use parser::WiktionnaireParser;
