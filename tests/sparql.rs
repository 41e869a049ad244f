use std::fs;

use assert_matches::assert_matches;

use wikidata_ontology_requests::error::HelperError;
use wikidata_ontology_requests::record::{DescriptiveRecord, ImageRecord};
use wikidata_ontology_requests::sparql::{parse_ask_response, parse_select_response};

#[test]
fn parse_ask_boolean() {
    let body = r#"{"head": {}, "boolean": true}"#;
    assert!(parse_ask_response(body).unwrap());
}

#[test]
fn parse_ask_rejects_select_shape() {
    let err = parse_ask_response(r#"{"results": {"bindings": []}}"#).unwrap_err();
    assert_matches!(err, HelperError::SparqlParse(_));
}

#[test]
fn parse_select_rejects_html_error_page() {
    let err = parse_select_response("<html>Query timeout</html>").unwrap_err();
    assert_matches!(err, HelperError::SparqlParse(_));
}

#[test]
fn parse_select_fixture_into_records() {
    let raw = fs::read_to_string("tests/fixtures/describe_neuron.json").unwrap();
    let rows = parse_select_response(&raw).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["wikipediaUrl"].kind, "uri");

    let record = DescriptiveRecord::from_rows(&rows);
    assert_eq!(record.item_label.as_deref(), Some("interneuron"));
    assert_eq!(record.pubmed_id.as_deref(), Some("27377652"));
    assert_eq!(record.cl_ids.as_deref(), Some("CL:0000540"));
    assert_eq!(record.anatomical_locations, None);
    assert_eq!(record.superclass_uberon_id, None);
}

#[test]
fn parse_image_rows() {
    let rows = parse_select_response(
        r#"{"results": {"bindings": [
            {"cl_id": {"type": "uri", "value": "http://purl.obolibrary.org/obo/CL_0000540"},
             "label": {"xml:lang": "en", "type": "literal", "value": "neuron"}}
        ]}}"#,
    )
    .unwrap();
    let record = ImageRecord::from_binding(&rows[0]);
    assert_eq!(record.label.as_deref(), Some("neuron"));
    assert_eq!(record.image, None);
}
