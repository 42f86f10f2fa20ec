use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

const EMBEDDED: &str = include_str!("languages.json");

/// Code → display name, as used in the wiki's language headings.
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    names: HashMap<String, String>,
}

impl LanguageTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(LanguageTable {
            names: serde_json::from_str(json)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn name(&self, code: &str) -> Result<&str> {
        self.names
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownLanguageCode(code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The table shipped with the crate.
pub fn embedded() -> Result<&'static LanguageTable> {
    static TABLE: OnceLock<LanguageTable> = OnceLock::new();
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }
    let table = LanguageTable::from_json(EMBEDDED)?;
    Ok(TABLE.get_or_init(|| table))
}

pub fn name_for_code(code: &str) -> Result<&'static str> {
    embedded()?.name(code)
}
