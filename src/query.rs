use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ItemId;
use crate::error::HelperError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([a-z_]+)%").expect("placeholder regex"));
static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").expect("language regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    Cell,
    AnatomicalEntity,
}

impl ReferenceType {
    pub fn item_id(&self) -> &'static str {
        match self {
            ReferenceType::Cell => "Q7868",
            ReferenceType::AnatomicalEntity => "Q27043950",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Entity(ItemId),
    Literal(String),
    Iri(String),
}

impl Term {
    fn render(&self) -> Result<String, HelperError> {
        match self {
            Term::Entity(id) => Ok(format!("wd:{}", id.as_str())),
            Term::Literal(value) => Ok(format!("\"{}\"", escape_literal(value))),
            Term::Iri(iri) => {
                let forbidden = |ch: char| {
                    ch.is_whitespace() || ch.is_control() || "<>\"{}|^`\\".contains(ch)
                };
                if iri.is_empty() || iri.chars().any(forbidden) {
                    return Err(HelperError::InvalidIri(iri.clone()));
                }
                Ok(format!("<{iri}>"))
            }
        }
    }
}

pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    template: &'static str,
    params: BTreeMap<&'static str, Term>,
}

impl QueryBuilder {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            params: BTreeMap::new(),
        }
    }

    pub fn bind(mut self, name: &'static str, term: Term) -> Self {
        self.params.insert(name, term);
        self
    }

    pub fn build(self) -> Result<String, HelperError> {
        let mut rendered = BTreeMap::new();
        for (name, term) in &self.params {
            rendered.insert(*name, term.render()?);
        }

        if let Some(unbound) = PLACEHOLDER
            .captures_iter(self.template)
            .map(|caps| caps[1].to_string())
            .find(|name| !rendered.contains_key(name.as_str()))
        {
            return Err(HelperError::UnboundParameter(unbound));
        }

        let query = PLACEHOLDER.replace_all(self.template, |caps: &regex::Captures<'_>| {
            rendered
                .get(&caps[1])
                .cloned()
                .unwrap_or_default()
        });
        Ok(query.trim().to_string())
    }
}

const SUBCLASS_TEMPLATE: &str = r#"
ASK {
    %item% wdt:P279* %reference% .
}
"#;

const DESCRIPTIVE_TEMPLATE: &str = r#"
SELECT ?itemLabel (GROUP_CONCAT(DISTINCT ?itemAltLabel; separator = ", ") AS ?aliases)
    (SAMPLE(?referenceTitle) AS ?referenceTitle) (SAMPLE(?pubMedID) AS ?pubMedID)
    (GROUP_CONCAT(DISTINCT ?superclassLabel; separator = ", ") AS ?superclasses)
    (SAMPLE(?superclassUberonId) AS ?superclassUberonId)
    (GROUP_CONCAT(DISTINCT ?clId; separator = ", ") AS ?clIds)
    (GROUP_CONCAT(DISTINCT ?anatomicalLocationLabel; separator = ", ") AS ?anatomicalLocations)
    (SAMPLE(?anatomicalUberonId) AS ?anatomicalUberonId)
    ?wikipediaUrl
WHERE {
    BIND(%item% AS ?item)
    OPTIONAL { ?item skos:altLabel ?itemAltLabel. FILTER(LANG(?itemAltLabel) = %lang%) }
    ?item p:P31 ?statement.
    ?statement ps:P31 ?instanceOf.
    OPTIONAL {
        ?statement prov:wasDerivedFrom ?ref.
        ?ref pr:P248 ?reference.
        ?reference rdfs:label ?referenceTitle. FILTER(LANG(?referenceTitle) = %lang%)
        OPTIONAL { ?reference wdt:P698 ?pubMedID. }
    }
    OPTIONAL {
        ?item wdt:P279 ?superclass.
        ?superclass rdfs:label ?superclassLabel. FILTER(LANG(?superclassLabel) = %lang%)
        OPTIONAL { ?superclass wdt:P1554 ?superclassUberonId. }
        OPTIONAL { ?superclass wdt:P7963 ?clId. }
    }
    OPTIONAL {
        ?item wdt:P927 ?anatomicalLocation.
        ?anatomicalLocation rdfs:label ?anatomicalLocationLabel. FILTER(LANG(?anatomicalLocationLabel) = %lang%)
        OPTIONAL { ?anatomicalLocation wdt:P1554 ?anatomicalUberonId. }
    }
    OPTIONAL {
        ?wikipediaUrl schema:about ?item;
            schema:inLanguage %lang%;
            schema:isPartOf %wiki%.
    }
    SERVICE wikibase:label { bd:serviceParam wikibase:language %lang%. }
}
GROUP BY ?itemLabel ?wikipediaUrl
"#;

const IMAGE_TEMPLATE: &str = r#"
SELECT ?cl_id ?image ?label WHERE {
    %item% wdtn:P7963 ?cl_id .
    %item% rdfs:label ?label .
    FILTER(LANG(?label) = %lang%)
    OPTIONAL { %item% wdt:P18 ?image. }
}
"#;

pub fn subclass_query(item: &ItemId, reference: ReferenceType) -> Result<String, HelperError> {
    let reference: ItemId = reference.item_id().parse()?;
    QueryBuilder::new(SUBCLASS_TEMPLATE)
        .bind("item", Term::Entity(item.clone()))
        .bind("reference", Term::Entity(reference))
        .build()
}

pub fn descriptive_query(item: &ItemId, language: &str) -> Result<String, HelperError> {
    let language = validate_language(language)?;
    QueryBuilder::new(DESCRIPTIVE_TEMPLATE)
        .bind("item", Term::Entity(item.clone()))
        .bind("lang", Term::Literal(language.to_string()))
        .bind("wiki", Term::Iri(wikipedia_host(language)))
        .build()
}

// Regional tags share the primary language's wiki: pt-br reads pt.wikipedia.org.
fn wikipedia_host(language: &str) -> String {
    let primary = language.split('-').next().unwrap_or(language);
    format!("https://{}.wikipedia.org/", primary.to_ascii_lowercase())
}

pub fn image_query(item: &ItemId, language: &str) -> Result<String, HelperError> {
    let language = validate_language(language)?;
    QueryBuilder::new(IMAGE_TEMPLATE)
        .bind("item", Term::Entity(item.clone()))
        .bind("lang", Term::Literal(language.to_string()))
        .build()
}

fn validate_language(language: &str) -> Result<&str, HelperError> {
    if LANGUAGE_TAG.is_match(language) {
        Ok(language)
    } else {
        Err(HelperError::InvalidLanguage(language.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn builder_rejects_unbound_placeholder() {
        let err = QueryBuilder::new("ASK { %item% wdt:P31 %other% . }")
            .bind("item", Term::Literal("x".to_string()))
            .build()
            .unwrap_err();
        assert_matches!(err, HelperError::UnboundParameter(name) if name == "other");
    }

    #[test]
    fn literal_is_escaped() {
        let query = QueryBuilder::new("FILTER(?x = %value%)")
            .bind("value", Term::Literal("a\" } DROP {".to_string()))
            .build()
            .unwrap();
        assert_eq!(query, r#"FILTER(?x = "a\" } DROP {")"#);
    }

    #[test]
    fn iri_with_spaces_is_rejected() {
        let err = QueryBuilder::new("%wiki%")
            .bind("wiki", Term::Iri("https://en.wikipedia.org/ x".to_string()))
            .build()
            .unwrap_err();
        assert_matches!(err, HelperError::InvalidIri(_));
    }

    #[test]
    fn wikipedia_host_drops_region_subtag() {
        assert_eq!(wikipedia_host("en"), "https://en.wikipedia.org/");
        assert_eq!(wikipedia_host("pt-BR"), "https://pt.wikipedia.org/");
    }

    #[test]
    fn language_is_validated() {
        let item: ItemId = "Q1".parse().unwrap();
        let err = descriptive_query(&item, "en\") }").unwrap_err();
        assert_matches!(err, HelperError::InvalidLanguage(_));
    }
}
