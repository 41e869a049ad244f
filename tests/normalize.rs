use wikidata_ontology_requests::domain::ItemId;
use wikidata_ontology_requests::normalize::{
    NO_IDS, NO_REFERENCE, NOT_AVAILABLE, format_id_link, format_id_list, format_namespaced_id,
    format_pubmed, normalize,
};
use wikidata_ontology_requests::record::DescriptiveRecord;

fn display_text(link: &str) -> &str {
    let end = link.find("](").unwrap();
    &link[1..end]
}

#[test]
fn cl_id_list_becomes_two_links() {
    let formatted = format_id_list("CL:0000001, CL:0000002");
    assert_eq!(
        formatted,
        "[CL:0000001](http://purl.obolibrary.org/obo/CL_0000001), \
         [CL:0000002](http://purl.obolibrary.org/obo/CL_0000002)"
    );
}

#[test]
fn link_display_is_idempotent() {
    for id in ["CL:0000001", "UBERON:0002107", "GO:0005634"] {
        let once = format_id_link(id);
        let twice = format_id_link(display_text(&once));
        assert_eq!(display_text(&once), display_text(&twice));
        assert_eq!(once, twice);
    }

    let once = format_namespaced_id("UBERON", "0002107");
    let twice = format_namespaced_id("UBERON", display_text(&once));
    assert_eq!(once, twice);
}

#[test]
fn pubmed_is_empty_when_absent() {
    assert_eq!(format_pubmed(None), "");
    assert_eq!(
        format_pubmed(Some("12345")),
        "[PMID:12345](https://pubmed.ncbi.nlm.nih.gov/12345)"
    );
}

#[test]
fn absent_fields_get_placeholders() {
    let item: ItemId = "Q1".parse().unwrap();
    let fields = normalize(&DescriptiveRecord::default(), &item);

    assert_eq!(fields.item_label, NOT_AVAILABLE);
    assert_eq!(fields.aliases, "None");
    assert_eq!(fields.reference_title, NO_REFERENCE);
    assert_eq!(fields.pubmed_id, "");
    assert_eq!(fields.superclasses, NOT_AVAILABLE);
    assert_eq!(fields.superclass_uberon_id, NOT_AVAILABLE);
    assert_eq!(fields.cl_ids, NO_IDS);
    assert_eq!(fields.anatomical_locations, NOT_AVAILABLE);
    assert_eq!(fields.anatomical_uberon_id, NOT_AVAILABLE);
    assert_eq!(fields.wikipedia_url, NO_REFERENCE);
    assert_eq!(fields.wikidata_link, "https://www.wikidata.org/wiki/Q1");

    for placeholder in [
        &fields.item_label,
        &fields.aliases,
        &fields.reference_title,
        &fields.superclasses,
        &fields.cl_ids,
        &fields.wikipedia_url,
    ] {
        assert!(!placeholder.is_empty());
        assert_ne!(placeholder, "undefined");
        assert_ne!(placeholder, "null");
    }
}

#[test]
fn present_fields_pass_through() {
    let item: ItemId = "Q1".parse().unwrap();
    let record = DescriptiveRecord {
        item_label: Some("neuron".to_string()),
        cl_ids: Some("CL:0000001, CL:0000002".to_string()),
        anatomical_uberon_id: Some("UBERON:0001016".to_string()),
        ..DescriptiveRecord::default()
    };
    let fields = normalize(&record, &item);

    assert_eq!(fields.item_label, "neuron");
    assert!(fields.cl_ids.contains("CL_0000001"));
    assert!(fields.cl_ids.contains("CL_0000002"));
    assert_eq!(
        fields.anatomical_uberon_id,
        "[UBERON:0001016](http://purl.obolibrary.org/obo/UBERON_0001016)"
    );
}
