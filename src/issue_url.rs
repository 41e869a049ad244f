use std::collections::BTreeMap;

use reqwest::Url;
use serde::Serialize;
use tracing::error;

use crate::domain::Repository;
use crate::error::HelperError;

pub const DEFAULT_ISSUE_HOST: &str = "github.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueField {
    Body,
    Title,
    Labels,
    Template,
    Milestone,
    Assignee,
    Projects,
}

impl IssueField {
    pub fn key(&self) -> &'static str {
        match self {
            IssueField::Body => "body",
            IssueField::Title => "title",
            IssueField::Labels => "labels",
            IssueField::Template => "template",
            IssueField::Milestone => "milestone",
            IssueField::Assignee => "assignee",
            IssueField::Projects => "projects",
        }
    }

    fn expects_list(&self) -> bool {
        matches!(self, IssueField::Labels | IssueField::Projects)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct IssueUrlOptions {
    pub host: String,
    pub user: String,
    pub repo: String,
    params: BTreeMap<IssueField, ParamValue>,
}

impl IssueUrlOptions {
    pub fn new(host: &str, user: &str, repo: &str) -> Self {
        Self {
            host: host.to_string(),
            user: user.to_string(),
            repo: repo.to_string(),
            params: BTreeMap::new(),
        }
    }

    pub fn set(mut self, field: IssueField, value: ParamValue) -> Self {
        self.params.insert(field, value);
        self
    }

    pub fn compose(&self) -> Result<String, HelperError> {
        let base = format!(
            "https://{}/{}/{}/issues/new",
            self.host, self.user, self.repo
        );
        let mut url =
            Url::parse(&base).map_err(|err| HelperError::InvalidIssueUrl(format!("{base}: {err}")))?;

        let mut pairs = Vec::new();
        for (field, value) in &self.params {
            let value = match (value, field.expects_list()) {
                (ParamValue::List(items), _) => items.join(","),
                (ParamValue::Text(text), false) => text.clone(),
                (ParamValue::Text(_), true) => {
                    error!(field = field.key(), "the `{}` option should be a list", field.key());
                    continue;
                }
            };
            pairs.push((field.key(), value));
        }

        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRequest {
    pub repository: Repository,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl IssueRequest {
    pub fn url(&self, host: &str) -> Result<String, HelperError> {
        IssueUrlOptions::new(host, &self.repository.owner, &self.repository.name)
            .set(IssueField::Body, ParamValue::Text(self.body.clone()))
            .set(IssueField::Title, ParamValue::Text(self.title.clone()))
            .set(IssueField::Labels, ParamValue::List(self.labels.clone()))
            .compose()
    }
}
