use crate::domain::Ontology;
use crate::normalize::NormalizedFields;

pub const SOURCE_SCRIPT_URL: &str = "https://www.wikidata.org/wiki/User:TiagoLubiana/cell-ontology.js";

pub fn ntr_body(ontology: Ontology, fields: &NormalizedFields, attribution: &str) -> String {
    match ontology {
        Ontology::Cl => cl_body(fields, attribution),
        Ontology::Uberon => uberon_body(fields, attribution),
    }
}

pub fn ntr_title(label: Option<&str>) -> String {
    format!("[NTR] New Term Request: {}", label.unwrap_or_default())
}

pub fn cl_body(fields: &NormalizedFields, attribution: &str) -> String {
    format!(
        "**Preferred term label**

*{label}*

**Synonyms**
{aliases}

**Definition**
A {superclasses} that... **FILL HERE**

References:
{reference}
{pubmed}
{wikipedia}

**Parent cell type term**
{superclasses}
CL IDs: {cl_ids}

**Anatomical structure where the cell type is found**
{locations}
Uberon IDs: {location_ids}

**Your ORCID**
{attribution}

**Additional notes or concerns**
The draft for this request was autogenerated from Wikidata. For more details, see the [Wikidata item]({wikidata}) or the [source script]({SOURCE_SCRIPT_URL}).
",
        label = fields.item_label,
        aliases = fields.aliases,
        superclasses = fields.superclasses,
        reference = fields.reference_title,
        pubmed = fields.pubmed_id,
        wikipedia = fields.wikipedia_url,
        cl_ids = fields.cl_ids,
        locations = fields.anatomical_locations,
        location_ids = fields.anatomical_uberon_id,
        wikidata = fields.wikidata_link,
    )
}

pub fn uberon_body(fields: &NormalizedFields, attribution: &str) -> String {
    format!(
        "**Preferred term label:**

*{label}*

**Synonyms**
{aliases}

**Definition**
**FILL HERE**

References:
{reference}
{pubmed}
{wikipedia}

**Parent term**
{superclasses}
UBERON ID: {superclass_ids}

**Anatomical structure where the term is found**
{locations}
UBERON ID: {location_ids}

**Your nano-attribution**
{attribution}

**Link back to Wikidata item**
{wikidata}
",
        label = fields.item_label,
        aliases = fields.aliases,
        reference = fields.reference_title,
        pubmed = fields.pubmed_id,
        wikipedia = fields.wikipedia_url,
        superclasses = fields.superclasses,
        superclass_ids = fields.superclass_uberon_id,
        locations = fields.anatomical_locations,
        location_ids = fields.anatomical_uberon_id,
        wikidata = fields.wikidata_link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NormalizedFields {
        NormalizedFields {
            item_label: "label-x".to_string(),
            aliases: "aliases-x".to_string(),
            reference_title: "reference-x".to_string(),
            pubmed_id: "pubmed-x".to_string(),
            superclasses: "superclasses-x".to_string(),
            superclass_uberon_id: "superclass-id-x".to_string(),
            cl_ids: "cl-ids-x".to_string(),
            anatomical_locations: "locations-x".to_string(),
            anatomical_uberon_id: "location-id-x".to_string(),
            wikipedia_url: "wikipedia-x".to_string(),
            wikidata_link: "wikidata-x".to_string(),
        }
    }

    #[test]
    fn every_field_reaches_some_template() {
        let fields = fields();
        let cl = cl_body(&fields, "orcid-x");
        let uberon = uberon_body(&fields, "orcid-x");
        for value in [
            "label-x",
            "aliases-x",
            "reference-x",
            "pubmed-x",
            "superclasses-x",
            "superclass-id-x",
            "cl-ids-x",
            "locations-x",
            "location-id-x",
            "wikipedia-x",
            "wikidata-x",
            "orcid-x",
        ] {
            assert!(
                cl.contains(value) || uberon.contains(value),
                "{value} missing from both templates"
            );
        }
    }

    #[test]
    fn cl_body_carries_provenance_footer() {
        let fields = fields();
        assert!(cl_body(&fields, "orcid-x").contains(SOURCE_SCRIPT_URL));
        assert!(!uberon_body(&fields, "orcid-x").contains(SOURCE_SCRIPT_URL));
    }

    #[test]
    fn both_bodies_list_references() {
        let fields = fields();
        for body in [cl_body(&fields, "orcid-x"), uberon_body(&fields, "orcid-x")] {
            assert!(body.contains("References:\nreference-x\npubmed-x\nwikipedia-x\n"));
        }
    }

    #[test]
    fn title_without_label() {
        assert_eq!(ntr_title(None), "[NTR] New Term Request: ");
        assert_eq!(ntr_title(Some("neuron")), "[NTR] New Term Request: neuron");
    }
}
