use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::ItemId;
use crate::record::DescriptiveRecord;

pub const OBO_PURL_BASE: &str = "http://purl.obolibrary.org/obo/";
pub const PUBMED_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov/";

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ALIASES: &str = "None";
pub const NO_REFERENCE: &str = "No reference found";
pub const NO_IDS: &str = "None found";

static NAMESPACED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9]*)[:_](\S+)$").expect("curie regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFields {
    pub item_label: String,
    pub aliases: String,
    pub reference_title: String,
    pub pubmed_id: String,
    pub superclasses: String,
    pub superclass_uberon_id: String,
    pub cl_ids: String,
    pub anatomical_locations: String,
    pub anatomical_uberon_id: String,
    pub wikipedia_url: String,
    pub wikidata_link: String,
}

pub fn normalize(record: &DescriptiveRecord, item: &ItemId) -> NormalizedFields {
    let or = |value: &Option<String>, placeholder: &str| {
        value.clone().unwrap_or_else(|| placeholder.to_string())
    };
    let uberon = |value: &Option<String>| {
        value
            .as_deref()
            .map(|value| format_namespaced_id("UBERON", value))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    NormalizedFields {
        item_label: or(&record.item_label, NOT_AVAILABLE),
        aliases: or(&record.aliases, NO_ALIASES),
        reference_title: or(&record.reference_title, NO_REFERENCE),
        pubmed_id: format_pubmed(record.pubmed_id.as_deref()),
        superclasses: or(&record.superclasses, NOT_AVAILABLE),
        superclass_uberon_id: uberon(&record.superclass_uberon_id),
        cl_ids: record
            .cl_ids
            .as_deref()
            .map(format_id_list)
            .unwrap_or_else(|| NO_IDS.to_string()),
        anatomical_locations: or(&record.anatomical_locations, NOT_AVAILABLE),
        anatomical_uberon_id: uberon(&record.anatomical_uberon_id),
        wikipedia_url: or(&record.wikipedia_url, NO_REFERENCE),
        wikidata_link: item.wiki_url(),
    }
}

pub fn format_id_link(id: &str) -> String {
    format!("[{id}]({OBO_PURL_BASE}{})", id.replacen(':', "_", 1))
}

pub fn format_id_list(ids: &str) -> String {
    ids.split(", ")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(format_id_link)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_namespaced_id(namespace: &str, value: &str) -> String {
    let value = value.trim();
    let value = value.strip_prefix(OBO_PURL_BASE).unwrap_or(value);
    let curie = match NAMESPACED_ID.captures(value) {
        Some(caps) => format!("{}:{}", &caps[1], &caps[2]),
        None => format!("{namespace}:{value}"),
    };
    format_id_link(&curie)
}

pub fn format_pubmed(id: Option<&str>) -> String {
    match id {
        Some(id) => format!("[PMID:{id}]({PUBMED_BASE}{id})"),
        None => String::new(),
    }
}

pub fn obo_curie(value: &str) -> String {
    value
        .strip_prefix(OBO_PURL_BASE)
        .and_then(|local| NAMESPACED_ID.captures(local))
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
        .unwrap_or_else(|| value.to_string())
}
