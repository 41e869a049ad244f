use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use wikidata_ontology_requests::config::{ConfigLoader, Settings};
use wikidata_ontology_requests::domain::{ItemId, Ontology};
use wikidata_ontology_requests::error::HelperError;
use wikidata_ontology_requests::output::{
    ClassifyResult, JsonOutput, OutputMode, QueryResult,
};
use wikidata_ontology_requests::pipeline::{
    Affordance, Command, CommandOutcome, HostPage, MAIN_NAMESPACE, PipelineHandle, initialize,
};
use wikidata_ontology_requests::query::{
    ReferenceType, descriptive_query, image_query, subclass_query,
};
use wikidata_ontology_requests::sparql::SparqlHttpClient;

#[derive(Parser)]
#[command(name = "wd-ontology")]
#[command(about = "Draft Cell Ontology and UBERON term requests from Wikidata items")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    #[command(about = "Classify an item and list the requests it qualifies for")]
    Classify(ClassifyArgs),
    #[command(about = "Draft a new term request issue")]
    Ntr(NtrArgs),
    #[command(about = "Draft a CL image axiom issue")]
    Image(ItemArgs),
    #[command(about = "Print the SPARQL text used for an item")]
    Query(QueryArgs),
}

#[derive(Args)]
struct ItemArgs {
    item: String,
}

#[derive(Args)]
struct ClassifyArgs {
    item: String,

    #[arg(long, default_value_t = MAIN_NAMESPACE)]
    namespace: i32,
}

#[derive(Args)]
struct NtrArgs {
    item: String,

    #[arg(long)]
    ontology: Option<Ontology>,
}

#[derive(Args)]
struct QueryArgs {
    kind: QueryKind,
    item: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum QueryKind {
    AskCell,
    AskAnatomical,
    Describe,
    Image,
}

struct TerminalHost {
    item: String,
    namespace: i32,
    output_mode: OutputMode,
}

impl HostPage for TerminalHost {
    fn item_id(&self) -> &str {
        &self.item
    }

    fn namespace(&self) -> i32 {
        self.namespace
    }

    fn mount(&self, affordance: &Affordance) {
        if matches!(self.output_mode, OutputMode::Text) {
            println!("[{}]", affordance.label);
        }
    }

    fn open(&self, url: &str) {
        if matches!(self.output_mode, OutputMode::Text) {
            println!("{url}");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report:?}");
            if let Some(error) = report.downcast_ref::<HelperError>() {
                return ExitCode::from(map_exit_code(error));
            }
            ExitCode::from(1)
        }
    }
}

fn map_exit_code(error: &HelperError) -> u8 {
    match error {
        HelperError::NotApplicable(_)
        | HelperError::InvalidItemId(_)
        | HelperError::InvalidOntology(_)
        | HelperError::InvalidLanguage(_) => 2,
        HelperError::SparqlHttp(_)
        | HelperError::SparqlStatus { .. }
        | HelperError::SparqlParse(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let settings = ConfigLoader::resolve(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Classify(args) => run_classify(args, settings, output_mode),
        CliCommand::Ntr(args) => run_ntr(args, settings, output_mode),
        CliCommand::Image(args) => {
            let host = TerminalHost {
                item: args.item,
                namespace: MAIN_NAMESPACE,
                output_mode,
            };
            let handle = handle_without_classification(&host.item, settings)?;
            run_command(&handle, Command::CreateImageIssue, &host, output_mode)
        }
        CliCommand::Query(args) => run_query(args, settings, output_mode),
    }
}

fn run_classify(
    args: ClassifyArgs,
    settings: Settings,
    output_mode: OutputMode,
) -> miette::Result<ExitCode> {
    let host = TerminalHost {
        item: args.item,
        namespace: args.namespace,
        output_mode,
    };
    let client = http_client(&settings)?;
    let handle = initialize(client, settings, &host)?;

    match output_mode {
        OutputMode::Json => {
            JsonOutput::print_classify(&ClassifyResult {
                item: handle.item().clone(),
                classification: handle.classification(),
                affordances: handle.affordances().to_vec(),
            })
            .into_diagnostic()?;
        }
        OutputMode::Text => {
            if handle.affordances().is_empty() {
                println!("{} qualifies for no requests", handle.item());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_ntr(args: NtrArgs, settings: Settings, output_mode: OutputMode) -> miette::Result<ExitCode> {
    let host = TerminalHost {
        item: args.item,
        namespace: MAIN_NAMESPACE,
        output_mode,
    };

    let (handle, ontology) = match args.ontology {
        Some(ontology) => (handle_without_classification(&host.item, settings)?, ontology),
        None => {
            let quiet = TerminalHost {
                item: host.item.clone(),
                namespace: MAIN_NAMESPACE,
                output_mode: OutputMode::Json,
            };
            let client = http_client(&settings)?;
            let handle = initialize(client, settings, &quiet)?;
            let ontology = handle
                .classification()
                .target_ontology()
                .ok_or_else(|| HelperError::NotApplicable(handle.item().to_string()))?;
            (handle, ontology)
        }
    };

    run_command(&handle, Command::FetchAndTemplate(ontology), &host, output_mode)
}

fn run_command(
    handle: &PipelineHandle<SparqlHttpClient>,
    command: Command,
    host: &TerminalHost,
    output_mode: OutputMode,
) -> miette::Result<ExitCode> {
    let outcome = handle.dispatch(command, host)?;
    if matches!(output_mode, OutputMode::Json) {
        JsonOutput::print_outcome(&outcome).into_diagnostic()?;
    }
    match outcome {
        CommandOutcome::OpenIssue(_) => Ok(ExitCode::SUCCESS),
        CommandOutcome::Aborted { .. } => Ok(ExitCode::from(2)),
    }
}

fn run_query(
    args: QueryArgs,
    settings: Settings,
    output_mode: OutputMode,
) -> miette::Result<ExitCode> {
    let item: ItemId = args.item.parse()?;
    let (kind, query) = match args.kind {
        QueryKind::AskCell => ("ask-cell", subclass_query(&item, ReferenceType::Cell)),
        QueryKind::AskAnatomical => (
            "ask-anatomical",
            subclass_query(&item, ReferenceType::AnatomicalEntity),
        ),
        QueryKind::Describe => ("describe", descriptive_query(&item, &settings.language)),
        QueryKind::Image => ("image", image_query(&item, &settings.language)),
    };
    let query = query?;

    match output_mode {
        OutputMode::Json => JsonOutput::print_query(&QueryResult {
            item,
            kind: kind.to_string(),
            query,
        })
        .into_diagnostic()?,
        OutputMode::Text => println!("{query}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn http_client(settings: &Settings) -> miette::Result<SparqlHttpClient> {
    Ok(SparqlHttpClient::new(&settings.endpoint, settings.timeout)?)
}

fn handle_without_classification(
    item: &str,
    settings: Settings,
) -> miette::Result<PipelineHandle<SparqlHttpClient>> {
    let item: ItemId = item.parse()?;
    let client = http_client(&settings)?;
    Ok(PipelineHandle::new(client, settings, item))
}
