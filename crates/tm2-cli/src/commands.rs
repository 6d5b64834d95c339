use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use tm2_map::SuggestionEngine;
use tm2_remote::{RemoteClient, RemoteConfig};
use tm2_terminology::MappingTable;

use crate::cli::{MatchArgs, SuggestArgs, TableArgs};
use crate::logging::redact_value;
use crate::summary::{print_suggestions, print_table_overview};

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let table = load_table(args.table.as_deref())?;
    let mut engine = SuggestionEngine::new(table);
    if let Some(endpoint) = &args.remote_url {
        let client = build_client(endpoint, args)?;
        engine = engine
            .with_remote(Box::new(client.clone()))
            .with_embedding_source(Box::new(client));
        debug!(endpoint = %endpoint, "remote suggestion service configured");
    }
    info!(query = redact_value(&args.text), "running suggestion pipeline");
    let suggestions = engine.suggest(&args.text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print_suggestions(&suggestions);
    }
    Ok(())
}

pub fn run_match(args: &MatchArgs) -> Result<()> {
    let table = load_table(args.table.as_deref())?;
    let engine = SuggestionEngine::new(table);
    info!(query = redact_value(&args.text), "running local match");
    let suggestions = engine.local_match(&args.text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print_suggestions(&suggestions);
    }
    Ok(())
}

pub fn run_table(args: &TableArgs) -> Result<()> {
    let table = load_table(args.table.as_deref())?;
    if args.json {
        let payload = serde_json::json!({
            "stats": table.stats(),
            "entries": table.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_table_overview(&table);
    }
    Ok(())
}

fn load_table(path: Option<&Path>) -> Result<MappingTable> {
    match path {
        Some(path) => MappingTable::from_path(path)
            .with_context(|| format!("load mapping table {}", path.display())),
        None => Ok(MappingTable::builtin()),
    }
}

fn build_client(endpoint: &str, args: &SuggestArgs) -> Result<RemoteClient> {
    let mut config = RemoteConfig::new(endpoint, Duration::from_secs(args.timeout_secs));
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("TM2_API_KEY").ok());
    if let Some(api_key) = api_key {
        config = config.with_api_key(api_key);
    }
    RemoteClient::new(config).context("build remote client")
}
