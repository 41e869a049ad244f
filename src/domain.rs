use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::HelperError;

const ENTITY_URL_PREFIXES: &[&str] = &[
    "https://www.wikidata.org/wiki/",
    "http://www.wikidata.org/wiki/",
    "https://www.wikidata.org/entity/",
    "http://www.wikidata.org/entity/",
    "/wiki/",
    "wd:",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn wiki_url(&self) -> String {
        format!("https://www.wikidata.org/wiki/{}", self.0)
    }

    pub fn entity_url(&self) -> String {
        format!("https://www.wikidata.org/entity/{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = HelperError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let stripped = ENTITY_URL_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);
        let stripped = stripped
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let normalized = stripped.to_uppercase();
        let digits = normalized.strip_prefix('Q').unwrap_or_default();
        let is_valid = !digits.is_empty()
            && digits.chars().all(|ch| ch.is_ascii_digit())
            && !digits.starts_with('0');
        if !is_valid {
            return Err(HelperError::InvalidItemId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ontology {
    Cl,
    Uberon,
}

impl Ontology {
    pub fn display_name(&self) -> &'static str {
        match self {
            Ontology::Cl => "CL",
            Ontology::Uberon => "UBERON",
        }
    }

    pub fn repository(&self) -> Repository {
        let name = match self {
            Ontology::Cl => "cell-ontology",
            Ontology::Uberon => "uberon",
        };
        Repository {
            owner: "obophenotype".to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Ontology {
    type Err = HelperError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cl" => Ok(Ontology::Cl),
            "uberon" => Ok(Ontology::Uberon),
            _ => Err(HelperError::InvalidOntology(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_cell: bool,
    pub is_anatomical_entity: bool,
}

impl Classification {
    // Cell types win when both checks hold.
    pub fn target_ontology(&self) -> Option<Ontology> {
        if self.is_cell {
            Some(Ontology::Cl)
        } else if self.is_anatomical_entity {
            Some(Ontology::Uberon)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_item_id_valid() {
        let id: ItemId = "q7868".parse().unwrap();
        assert_eq!(id.as_str(), "Q7868");
    }

    #[test]
    fn parse_item_id_from_page_url() {
        let id: ItemId = "https://www.wikidata.org/wiki/Q101405051?uselang=en"
            .parse()
            .unwrap();
        assert_eq!(id.as_str(), "Q101405051");

        let id: ItemId = "/wiki/Q42".parse().unwrap();
        assert_eq!(id.as_str(), "Q42");
    }

    #[test]
    fn parse_item_id_invalid() {
        let err = "P279".parse::<ItemId>().unwrap_err();
        assert_matches!(err, HelperError::InvalidItemId(_));

        let err = "Q12 . } DROP".parse::<ItemId>().unwrap_err();
        assert_matches!(err, HelperError::InvalidItemId(_));
    }

    #[test]
    fn classification_prefers_cell() {
        let both = Classification {
            is_cell: true,
            is_anatomical_entity: true,
        };
        assert_eq!(both.target_ontology(), Some(Ontology::Cl));
        assert_eq!(Classification::default().target_ontology(), None);
    }
}
