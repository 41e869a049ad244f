use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{Classification, ItemId};
use crate::pipeline::{Affordance, CommandOutcome};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResult {
    pub item: ItemId,
    pub classification: Classification,
    pub affordances: Vec<Affordance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub item: ItemId,
    pub kind: String,
    pub query: String,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_classify(result: &ClassifyResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_outcome(result: &CommandOutcome) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_query(result: &QueryResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
