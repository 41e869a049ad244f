pub mod config;
pub mod domain;
pub mod error;
pub mod image_issue;
pub mod issue_url;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod sparql;
pub mod template;
