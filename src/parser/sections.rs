use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use super::document::{attr, children, first_child, next_element, parent_element, Document};

static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static TOC_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".toc").unwrap());
static TITREDEF_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".titredef").unwrap());

/// Anchor id of the etymology heading on single-language pages.
pub const ETYMOLOGY_ID: &str = "#Étymologie";

/// Section identifiers of one language, each with its declared subsections.
/// Keys are unique and kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl SectionIndex {
    /// Register a section. A repeated identifier keeps its first position and
    /// takes the newer subsection list.
    pub fn insert(&mut self, section_id: String, subsections: Vec<String>) {
        match self.entries.iter_mut().find(|(id, _)| *id == section_id) {
            Some((_, existing)) => *existing = subsections,
            None => self.entries.push((section_id, subsections)),
        }
    }

    pub fn get(&self, section_id: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(id, _)| id == section_id)
            .map(|(_, subs)| subs.as_slice())
    }

    pub fn contains(&self, section_id: &str) -> bool {
        self.get(section_id).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(id, subs)| (id.as_str(), subs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the index of `language` from the page's table of contents.
///
/// Pages without a table of contents fall back to [`infer_single_section`].
/// `None` means the table of contents has no entry for the language.
pub fn build(doc: &Document, language: &str) -> Option<SectionIndex> {
    if doc.root().select(&TOC_SEL).next().is_none() {
        debug!("no table of contents, inferring a single section");
        return Some(infer_single_section(doc));
    }

    let target = format!("#{}", language.replace(' ', "_"));
    let Some(link) = doc
        .root()
        .select(&LINK_SEL)
        .find(|link| attr(*link, "href") == Some(target.as_str()))
    else {
        warn!(language, "language not present in table of contents");
        return None;
    };

    let mut index = SectionIndex::default();
    let Some(toc_list) = next_element(link) else {
        return Some(index);
    };

    for item in children(toc_list) {
        let Some(section_id) = item_target(item) else {
            debug!("table of contents item without a target, skipped");
            continue;
        };
        if section_id.contains('*') {
            continue;
        }
        let subsections = match first_child(item, "ul") {
            Some(nested) => children(nested).filter_map(item_target).collect(),
            None => Vec::new(),
        };
        index.insert(section_id, subsections);
    }

    debug!(language, sections = index.len(), "section index built");
    Some(index)
}

/// Single-language pages have no table of contents: register the etymology
/// heading and the first part-of-speech heading, whichever exist.
pub fn infer_single_section(doc: &Document) -> SectionIndex {
    let mut index = SectionIndex::default();
    if doc.anchor(ETYMOLOGY_ID).is_some() {
        index.insert(ETYMOLOGY_ID.to_string(), Vec::new());
    }
    let word_title = doc
        .root()
        .select(&TITREDEF_SEL)
        .next()
        .and_then(parent_element)
        .and_then(|headline| attr(headline, "id"))
        .filter(|id| !id.is_empty());
    if let Some(id) = word_title {
        index.insert(format!("#{id}"), Vec::new());
    }
    index
}

fn item_target(item: ElementRef<'_>) -> Option<String> {
    first_child(item, "a")
        .and_then(|link| attr(link, "href"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOC: &str = r##"<html><body>
        <div id="toc" class="toc"><ul>
        <li><a href="#Français">Français</a>
          <ul>
            <li><a href="#Étymologie">Étymologie</a></li>
            <li><a href="#Nom_commun">Nom commun</a>
              <ul><li><a href="#Synonymes">Synonymes</a></li><li><a href="#Traductions">Traductions</a></li></ul>
            </li>
            <li><a href="#Prononciation">Prononciation</a></li>
          </ul>
        </li>
        <li><a href="#Vieux_français">Vieux français</a>
          <ul><li><a href="#Nom_commun_2">Nom commun</a></li><li><a href="#*">*</a></li><li><span>cassé</span></li></ul>
        </li>
        </ul></div>
        </body></html>"##;

    #[test]
    fn toc_index_for_language() {
        let doc = Document::parse(TOC);
        let index = build(&doc, "Français").unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.keys().collect::<Vec<_>>(),
            vec!["#Étymologie", "#Nom_commun", "#Prononciation"]
        );
        assert_eq!(index.get("#Étymologie"), Some(&[][..]));
        assert_eq!(
            index.get("#Nom_commun").unwrap(),
            &["#Synonymes".to_string(), "#Traductions".to_string()]
        );
    }

    #[test]
    fn spaces_become_underscores_and_bad_items_are_skipped() {
        let doc = Document::parse(TOC);
        let index = build(&doc, "Vieux français").unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["#Nom_commun_2"]);
    }

    #[test]
    fn absent_language_yields_none() {
        let doc = Document::parse(TOC);
        assert!(build(&doc, "Anglais").is_none());
    }

    #[test]
    fn fallback_without_toc() {
        let doc = Document::parse(
            r#"<body>
            <h3><span class="mw-headline" id="Étymologie">Étymologie</span></h3>
            <h3><span class="mw-headline" id="Adjectif"><span class="titredef">Adjectif</span></span></h3>
            </body>"#,
        );
        let index = build(&doc, "Français").unwrap();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["#Étymologie", "#Adjectif"]);
        assert!(index.iter().all(|(_, subs)| subs.is_empty()));
    }

    #[test]
    fn fallback_with_nothing_known() {
        let doc = Document::parse("<body><p>vide</p></body>");
        assert!(infer_single_section(&doc).is_empty());
    }

    #[test]
    fn insert_keeps_keys_unique() {
        let mut index = SectionIndex::default();
        index.insert("#A".into(), vec![]);
        index.insert("#B".into(), vec![]);
        index.insert("#A".into(), vec!["#A1".into()]);
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["#A", "#B"]);
        assert_eq!(index.get("#A").unwrap().len(), 1);
    }
}
