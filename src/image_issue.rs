use std::fmt;

use serde::Serialize;

use crate::domain::{ItemId, Ontology};
use crate::issue_url::IssueRequest;
use crate::normalize::obo_curie;
use crate::record::ImageRecord;

pub const DEPICTED_BY: &str = "http://xmlns.com/foaf/0.1/depicted_by";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "matches", rename_all = "snake_case")]
pub enum ImageIssueAbort {
    NoMatch,
    Ambiguous(usize),
    NoImage,
}

impl fmt::Display for ImageIssueAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageIssueAbort::NoMatch => {
                write!(f, "No CL match found for this item on Wikidata.")
            }
            ImageIssueAbort::Ambiguous(count) => write!(
                f,
                "No unique CL match found for this item on Wikidata ({count} candidates)."
            ),
            ImageIssueAbort::NoImage => write!(f, "No image found for this item on Wikidata."),
        }
    }
}

pub fn kgcl_command(cl_id: &str, image: &str) -> String {
    format!("Hey ontobot! apply: - create edge {cl_id} <{DEPICTED_BY}> \"{image}\"^^xsd:anyURI")
}

pub fn build_image_issue(
    item: &ItemId,
    rows: &[ImageRecord],
) -> Result<IssueRequest, ImageIssueAbort> {
    let record = match rows {
        [] => return Err(ImageIssueAbort::NoMatch),
        [record] => record,
        _ => return Err(ImageIssueAbort::Ambiguous(rows.len())),
    };
    let Some(image) = record.image.as_deref() else {
        return Err(ImageIssueAbort::NoImage);
    };

    let cl_id = record.cl_id.as_deref().map(obo_curie).unwrap_or_default();
    let label = record.label.as_deref().unwrap_or_default();
    let body = format!(
        "**Request to add a new image axiom with KGCL**

**Wikidata item:** [{label}]({entity})
**CL ID:** {cl_id}
**Image URL:** {image}

```
{command}
```

**Additional notes or concerns:**
This request was autogenerated from Wikidata.
",
        entity = item.entity_url(),
        command = kgcl_command(&cl_id, image),
    );

    Ok(IssueRequest {
        repository: Ontology::Cl.repository(),
        title: format!("[KGCL] New Image Axiom Request for {label}"),
        body,
        labels: vec![
            "KGCL".to_string(),
            "ontobot".to_string(),
            "image axiom request".to_string(),
            "from wikidata".to_string(),
        ],
    })
}
