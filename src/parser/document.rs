use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// A sibling as seen by the section walkers. Text nodes are never yielded;
/// comments are, so callers can skip them while still counting positions.
#[derive(Debug, Clone, Copy)]
pub enum Sibling<'a> {
    Element(ElementRef<'a>),
    Comment,
}

impl<'a> Sibling<'a> {
    pub fn element(self) -> Option<ElementRef<'a>> {
        match self {
            Sibling::Element(el) => Some(el),
            Sibling::Comment => None,
        }
    }
}

/// Read-only view over one parsed wiki page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Document {
            html: Html::parse_document(markup),
        }
    }

    /// Parse raw bytes as returned by the retrieval layer. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Element whose `id` attribute equals `id` (no leading `#`).
    ///
    /// Done as an attribute scan rather than a CSS query: section ids carry
    /// accents, apostrophes and digits-after-underscore that would need escaping.
    pub fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
    }

    /// Anchor for a `#`-prefixed section identifier.
    pub fn anchor(&self, section_id: &str) -> Option<ElementRef<'_>> {
        self.by_id(section_id.strip_prefix('#').unwrap_or(section_id))
    }

    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    pub fn has(&self, css: &str) -> Result<bool> {
        let selector = parse_selector(css)?;
        Ok(self.html.select(&selector).next().is_some())
    }

    /// Text of the page title (`h1`), empty when the page has none.
    pub fn title(&self) -> String {
        self.select("h1")
            .ok()
            .and_then(|found| found.first().map(|el| text(*el).trim().to_string()))
            .unwrap_or_default()
    }

    /// Every language heading on the page, in document order.
    pub fn languages(&self) -> Vec<String> {
        self.select(".sectionlangue")
            .unwrap_or_default()
            .into_iter()
            .map(|el| text(el).trim().to_string())
            .collect()
    }
}

pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e:?}")))
}

pub fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Next element sibling, stepping over text and comments.
pub fn next_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Following siblings, elements and comments only.
pub fn next_siblings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = Sibling<'a>> + 'a {
    el.next_siblings().filter_map(|node| match node.value() {
        Node::Element(_) => ElementRef::wrap(node).map(Sibling::Element),
        Node::Comment(_) => Some(Sibling::Comment),
        _ => None,
    })
}

/// Immediate element children.
pub fn children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// First immediate child with the given tag name.
pub fn first_child<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    children(el).find(|child| child.value().name() == tag)
}

pub fn tag(el: ElementRef<'_>) -> &str {
    el.value().name()
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Concatenated text of every descendant text node.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <h1>chat</h1>
        <h3><span class="mw-headline" id="Dérivés_dans_d’autres_langues">Dérivés</span></h3>
        <!-- note -->
        <p id="p1">un <a href="/wiki/chaton" class="x">chaton</a></p>
        <ul id="u1"><li>a</li></ul>
    </body></html>"#;

    #[test]
    fn by_id_handles_accented_ids() {
        let doc = Document::parse(PAGE);
        let anchor = doc.anchor("#Dérivés_dans_d’autres_langues").unwrap();
        assert_eq!(text(anchor), "Dérivés");
        assert_eq!(tag(parent_element(anchor).unwrap()), "h3");
    }

    #[test]
    fn missing_id_is_none() {
        let doc = Document::parse(PAGE);
        assert!(doc.by_id("Synonymes").is_none());
    }

    #[test]
    fn siblings_keep_comments_and_drop_text() {
        let doc = Document::parse(PAGE);
        let heading = parent_element(doc.by_id("Dérivés_dans_d’autres_langues").unwrap()).unwrap();
        let kinds: Vec<_> = next_siblings(heading)
            .map(|s| s.element().map(|el| tag(el).to_string()))
            .collect();
        assert_eq!(kinds, vec![None, Some("p".into()), Some("ul".into())]);
        assert_eq!(tag(next_element(heading).unwrap()), "p");
    }

    #[test]
    fn absent_attribute_is_none() {
        let doc = Document::parse(PAGE);
        let p = doc.by_id("p1").unwrap();
        let link = first_child(p, "a").unwrap();
        assert_eq!(attr(link, "href"), Some("/wiki/chaton"));
        assert_eq!(attr(link, "title"), None);
        assert!(has_class(link, "x"));
        assert!(first_child(p, "span").is_none());
    }

    #[test]
    fn title_and_bad_selector() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.title(), "chat");
        assert!(matches!(doc.select("[[["), Err(Error::Selector(_))));
        assert!(doc.languages().is_empty());
    }
}
