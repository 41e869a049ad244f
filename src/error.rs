use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HelperError {
    #[error("invalid Wikidata item id: {0}")]
    InvalidItemId(String),

    #[error("invalid ontology: {0}")]
    InvalidOntology(String),

    #[error("invalid language tag: {0}")]
    InvalidLanguage(String),

    #[error("invalid IRI: {0}")]
    InvalidIri(String),

    #[error("query parameter `{0}` was not bound")]
    UnboundParameter(String),

    #[error("SPARQL request failed: {0}")]
    SparqlHttp(String),

    #[error("SPARQL endpoint returned status {status}: {message}")]
    SparqlStatus { status: u16, message: String },

    #[error("failed to parse SPARQL response: {0}")]
    SparqlParse(String),

    #[error("invalid issue URL: {0}")]
    InvalidIssueUrl(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("{0} is neither a cell type nor an anatomical entity")]
    #[diagnostic(help("pass --ontology cl or --ontology uberon to draft a request anyway"))]
    NotApplicable(String),
}
