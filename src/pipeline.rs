use std::thread;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::domain::{Classification, ItemId, Ontology};
use crate::error::HelperError;
use crate::image_issue::{ImageIssueAbort, build_image_issue};
use crate::issue_url::IssueRequest;
use crate::normalize::normalize;
use crate::query::{ReferenceType, descriptive_query, image_query, subclass_query};
use crate::record::{DescriptiveRecord, ImageRecord};
use crate::sparql::{Binding, SparqlClient, ask_or_false, select_or_empty};
use crate::template::{ntr_body, ntr_title};

pub const MAIN_NAMESPACE: i32 = 0;

pub trait HostPage {
    fn item_id(&self) -> &str;
    fn namespace(&self) -> i32;
    fn mount(&self, affordance: &Affordance);
    fn open(&self, url: &str);
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "ontology", rename_all = "snake_case")]
pub enum Command {
    FetchAndTemplate(Ontology),
    CreateImageIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    pub label: String,
    pub command: Command,
}

impl Affordance {
    fn for_command(command: Command) -> Self {
        let label = match command {
            Command::FetchAndTemplate(ontology) => format!("Add a NTR to {ontology}"),
            Command::CreateImageIssue => "Add image to CL".to_string(),
        };
        Self { label, command }
    }
}

pub fn affordances_for(classification: Classification) -> Vec<Affordance> {
    let commands = if classification.is_cell {
        vec![
            Command::FetchAndTemplate(Ontology::Cl),
            Command::CreateImageIssue,
        ]
    } else if classification.is_anatomical_entity {
        vec![Command::FetchAndTemplate(Ontology::Uberon)]
    } else {
        Vec::new()
    };
    commands.into_iter().map(Affordance::for_command).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueLink {
    pub request: IssueRequest,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    OpenIssue(IssueLink),
    Aborted { reason: ImageIssueAbort, message: String },
}

pub struct PipelineHandle<C: SparqlClient> {
    client: C,
    settings: Settings,
    item: ItemId,
    classification: Classification,
    affordances: Vec<Affordance>,
}

pub fn initialize<C: SparqlClient>(
    client: C,
    settings: Settings,
    host: &dyn HostPage,
) -> Result<PipelineHandle<C>, HelperError> {
    let item: ItemId = host.item_id().parse()?;
    let mut handle = PipelineHandle::new(client, settings, item);

    if host.namespace() != MAIN_NAMESPACE {
        info!(item = %handle.item, namespace = host.namespace(), "not in the main namespace");
        return Ok(handle);
    }

    handle.classification = classify(&handle.client, &handle.item);
    handle.affordances = affordances_for(handle.classification);
    info!(
        item = %handle.item,
        is_cell = handle.classification.is_cell,
        is_anatomical_entity = handle.classification.is_anatomical_entity,
        affordances = handle.affordances.len(),
        "classified item"
    );
    for affordance in &handle.affordances {
        host.mount(affordance);
    }
    Ok(handle)
}

pub fn classify<C: SparqlClient + ?Sized>(client: &C, item: &ItemId) -> Classification {
    let check = |reference: ReferenceType, context: &str| match subclass_query(item, reference) {
        Ok(query) => ask_or_false(client, &query, context),
        Err(err) => {
            error!(error = %err, "{context}");
            false
        }
    };

    thread::scope(|scope| {
        let cell = scope.spawn(|| check(ReferenceType::Cell, "error checking subclass of cell"));
        let anatomical = scope.spawn(|| {
            check(
                ReferenceType::AnatomicalEntity,
                "error checking subclass of anatomical entity",
            )
        });
        Classification {
            is_cell: cell.join().unwrap_or(false),
            is_anatomical_entity: anatomical.join().unwrap_or(false),
        }
    })
}

impl<C: SparqlClient> PipelineHandle<C> {
    pub fn new(client: C, settings: Settings, item: ItemId) -> Self {
        Self {
            client,
            settings,
            item,
            classification: Classification::default(),
            affordances: Vec::new(),
        }
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn affordances(&self) -> &[Affordance] {
        &self.affordances
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn execute(&self, command: Command) -> Result<CommandOutcome, HelperError> {
        match command {
            Command::FetchAndTemplate(ontology) => {
                let request = self.draft_term_request(ontology);
                self.open_issue(request)
            }
            Command::CreateImageIssue => match self.draft_image_issue() {
                Ok(request) => self.open_issue(request),
                Err(reason) => {
                    warn!(item = %self.item, %reason, "image issue not drafted");
                    Ok(CommandOutcome::Aborted {
                        reason,
                        message: reason.to_string(),
                    })
                }
            },
        }
    }

    pub fn dispatch(
        &self,
        command: Command,
        host: &dyn HostPage,
    ) -> Result<CommandOutcome, HelperError> {
        let outcome = self.execute(command)?;
        match &outcome {
            CommandOutcome::OpenIssue(link) => host.open(&link.url),
            CommandOutcome::Aborted { message, .. } => host.alert(message),
        }
        Ok(outcome)
    }

    pub fn fetch_record(&self) -> DescriptiveRecord {
        let query = descriptive_query(&self.item, &self.settings.language);
        let rows = self.select_rows(query, "error fetching data");
        DescriptiveRecord::from_rows(&rows)
    }

    pub fn draft_term_request(&self, ontology: Ontology) -> IssueRequest {
        let record = self.fetch_record();
        let fields = normalize(&record, &self.item);
        IssueRequest {
            repository: ontology.repository(),
            title: ntr_title(record.item_label.as_deref()),
            body: ntr_body(ontology, &fields, &self.settings.attribution),
            labels: vec!["new term request".to_string(), "from wikidata".to_string()],
        }
    }

    pub fn draft_image_issue(&self) -> Result<IssueRequest, ImageIssueAbort> {
        let query = image_query(&self.item, &self.settings.language);
        let rows = self.select_rows(query, "error fetching CL ID and image data");
        let records = rows.iter().map(ImageRecord::from_binding).collect::<Vec<_>>();
        build_image_issue(&self.item, &records)
    }

    // A query that cannot be built fails empty, same as one the endpoint rejects.
    fn select_rows(&self, query: Result<String, HelperError>, context: &str) -> Vec<Binding> {
        match query {
            Ok(query) => select_or_empty(&self.client, &query, context),
            Err(err) => {
                error!(item = %self.item, error = %err, "{context}");
                Vec::new()
            }
        }
    }

    fn open_issue(&self, request: IssueRequest) -> Result<CommandOutcome, HelperError> {
        let url = request.url(&self.settings.issue_host)?;
        info!(item = %self.item, repository = %request.repository.name, "drafted issue");
        Ok(CommandOutcome::OpenIssue(IssueLink { request, url }))
    }
}
