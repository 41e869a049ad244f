use serde::Serialize;

use crate::sparql::Binding;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptiveRecord {
    pub item_label: Option<String>,
    pub aliases: Option<String>,
    pub reference_title: Option<String>,
    pub pubmed_id: Option<String>,
    pub superclasses: Option<String>,
    pub superclass_uberon_id: Option<String>,
    pub cl_ids: Option<String>,
    pub anatomical_locations: Option<String>,
    pub anatomical_uberon_id: Option<String>,
    pub wikipedia_url: Option<String>,
}

impl DescriptiveRecord {
    pub fn from_binding(row: &Binding) -> Self {
        Self {
            item_label: field(row, "itemLabel"),
            aliases: field(row, "aliases"),
            reference_title: field(row, "referenceTitle"),
            pubmed_id: field(row, "pubMedID"),
            superclasses: field(row, "superclasses"),
            superclass_uberon_id: field(row, "superclassUberonId"),
            cl_ids: field(row, "clIds"),
            anatomical_locations: field(row, "anatomicalLocations"),
            anatomical_uberon_id: field(row, "anatomicalUberonId"),
            wikipedia_url: field(row, "wikipediaUrl"),
        }
    }

    // First row only; an item with several labels yields several rows.
    pub fn from_rows(rows: &[Binding]) -> Self {
        rows.first().map(Self::from_binding).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub cl_id: Option<String>,
    pub image: Option<String>,
    pub label: Option<String>,
}

impl ImageRecord {
    pub fn from_binding(row: &Binding) -> Self {
        Self {
            cl_id: field(row, "cl_id"),
            image: field(row, "image"),
            label: field(row, "label"),
        }
    }
}

// GROUP_CONCAT over no values binds "", which carries no more than an unbound variable.
fn field(row: &Binding, name: &str) -> Option<String> {
    row.get(name)
        .map(|binding| binding.value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}
