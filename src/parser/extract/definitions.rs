use std::collections::BTreeMap;

use scraper::ElementRef;
use tracing::debug;

use super::{first_line, normalize_section_id, section_heading};
use crate::parser::document::{children, first_child, has_class, tag, text, Document, Sibling};
use crate::parser::record::{
    Definition, Definitions, Example, LigneDeForme, PartOfSpeechContent, SubDefinition,
};
use crate::parser::walk::{classify_element, walk_until_boundary, NodeKind};

/// Definitions of a part-of-speech section, with the pronunciation and gender
/// found on its introductory line.
///
/// The walk goes from the section heading to the first ordered list. Every
/// `p`/`span` met on the way is read as a ligne de forme. No list before the
/// next heading means no definitions.
pub fn extract(doc: &Document, section: &str) -> PartOfSpeechContent {
    let section_id = normalize_section_id(section);
    let mut content = PartOfSpeechContent::default();
    let Some(heading) = section_heading(doc, &section_id) else {
        return content;
    };

    for sibling in walk_until_boundary(heading) {
        let Sibling::Element(el) = sibling else {
            continue;
        };
        match classify_element(el) {
            NodeKind::OrderedList => {
                content.definitions = definition_list(el);
                break;
            }
            _ if matches!(tag(el), "p" | "span") => {
                read_ligne_de_forme(el, &mut content.ligne_de_forme);
            }
            _ => {}
        }
    }

    debug!(
        section_id = %section_id,
        definitions = content.definitions.len(),
        "definitions extracted"
    );
    content
}

/// Accumulate pronunciations (`a > span.API`, backslashes stripped) in page
/// order; the first `span.ligne-de-forme` gives the gender.
fn read_ligne_de_forme(line: ElementRef<'_>, context: &mut LigneDeForme) {
    for child in children(line) {
        match tag(child) {
            "a" => {
                let phonetic = first_child(child, "span").is_some_and(|span| has_class(span, "API"));
                if phonetic {
                    let value = text(child).replace('\\', "").trim().to_string();
                    if !value.is_empty() {
                        context.pronunciation.push(value);
                    }
                }
            }
            _ if context.gender.is_none() && has_class(child, "ligne-de-forme") => {
                context.gender = Some(text(child).trim().to_string());
            }
            _ => {}
        }
    }
}

fn definition_list(list: ElementRef<'_>) -> Definitions {
    children(list)
        .enumerate()
        .map(|(i, item)| {
            let mut definition = Definition {
                definition: first_line(&text(item)),
                ..Default::default()
            };
            let examples = examples(item);
            if !examples.is_empty() {
                definition.examples = Some(examples);
            }
            if let Some(nested) = first_child(item, "ol").filter(|ol| children(*ol).next().is_some()) {
                definition.subdefinitions = Some(subdefinitions(nested));
            }
            (i, definition)
        })
        .collect()
}

/// Items of the nested `ul`. Empty examples are dropped but keep their index.
fn examples(item: ElementRef<'_>) -> BTreeMap<usize, Example> {
    let Some(list) = first_child(item, "ul") else {
        return BTreeMap::new();
    };
    children(list)
        .enumerate()
        .filter_map(|(i, line)| {
            let example = first_line(&text(line));
            if example.is_empty() {
                return None;
            }
            Some((
                i,
                Example {
                    example,
                    translation: example_translation(line),
                },
            ))
        })
        .collect()
}

fn example_translation(line: ElementRef<'_>) -> Option<String> {
    let dd = first_child(line, "dl").and_then(|dl| first_child(dl, "dd"))?;
    Some(text(dd).trim().to_string()).filter(|t| !t.is_empty())
}

fn subdefinitions(list: ElementRef<'_>) -> BTreeMap<usize, SubDefinition> {
    children(list)
        .enumerate()
        .map(|(i, item)| {
            let examples = first_child(item, "ul")
                .map(|ul| text(ul).trim().to_string())
                .filter(|raw| !raw.is_empty());
            (
                i,
                SubDefinition {
                    subdefinition: first_line(&text(item)),
                    examples,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Document {
        Document::parse(&std::fs::read_to_string("tests/fixtures/chat.html").unwrap())
    }

    #[test]
    fn two_item_list_with_example() {
        let doc = Document::parse(
            r#"<body>
            <h3><span class="mw-headline" id="Nom_commun">Nom commun</span></h3>
            <ol><li>Premier sens.
            <ul><li>Un exemple.
            <dl><dd>An example.</dd></dl></li></ul>
            </li><li>Second sens.</li></ol>
            </body>"#,
        );
        let content = extract(&doc, "Nom commun");
        let defs = &content.definitions;
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[&0].definition, "Premier sens.");
        let examples = defs[&0].examples.as_ref().unwrap();
        assert_eq!(
            examples[&0],
            Example {
                example: "Un exemple.".into(),
                translation: Some("An example.".into()),
            }
        );
        assert_eq!(defs[&1].definition, "Second sens.");
        assert!(defs[&1].examples.is_none());
        assert!(defs[&1].subdefinitions.is_none());
    }

    #[test]
    fn fixture_first_noun() {
        let doc = fixture();
        let content = extract(&doc, "#Nom_commun_1");
        assert_eq!(content.ligne_de_forme.pronunciation, vec!["ʃa"]);
        assert_eq!(content.ligne_de_forme.gender.as_deref(), Some("masculin"));

        let defs = &content.definitions;
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[&0].definition, "(Zoologie) Mammifère carnivore félin de taille moyenne.");
        let example = &defs[&0].examples.as_ref().unwrap()[&0];
        assert_eq!(example.example, "Le chat dort sur le canapé.");
        assert_eq!(example.translation.as_deref(), Some("The cat sleeps on the sofa."));

        let subs = defs[&2].subdefinitions.as_ref().unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[&0].subdefinition, "Femme hypocrite.");
        assert_eq!(subs[&0].examples.as_deref(), Some("Quelle chatte !"));
        assert_eq!(subs[&1].subdefinition, "Homme rusé.");
        assert!(subs[&1].examples.is_none());
    }

    #[test]
    fn context_does_not_leak_between_sections() {
        let doc = fixture();
        let first = extract(&doc, "#Nom_commun_1");
        let second = extract(&doc, "#Nom_commun_2");
        assert!(first.ligne_de_forme.gender.is_some());
        assert_eq!(second.ligne_de_forme.pronunciation, vec!["tʃat"]);
        assert!(second.ligne_de_forme.gender.is_none());
    }

    #[test]
    fn missing_anchor_gives_nothing() {
        let doc = fixture();
        assert_eq!(extract(&doc, "Adverbe"), PartOfSpeechContent::default());
    }

    #[test]
    fn heading_before_list_closes_the_walk() {
        let doc = Document::parse(
            r#"<body>
            <h3><span id="Verbe">Verbe</span></h3><p>rien</p>
            <h4><span id="Synonymes">Synonymes</span></h4><ol><li>faux</li></ol>
            </body>"#,
        );
        assert!(extract(&doc, "Verbe").definitions.is_empty());
    }

    #[test]
    fn first_gender_wins() {
        let doc = Document::parse(
            r#"<body><h3><span id="Adjectif">Adjectif</span></h3>
            <p><span class="ligne-de-forme">masculin</span> <span class="ligne-de-forme">pluriel</span></p>
            <ol><li>x</li></ol></body>"#,
        );
        assert_eq!(extract(&doc, "Adjectif").ligne_de_forme.gender.as_deref(), Some("masculin"));
    }
}
