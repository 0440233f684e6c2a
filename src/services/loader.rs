use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::api::BackendResult;
use crate::domain::{Club, Event};
use crate::errors::{with_parse_context, with_read_context};

/// Exports hold either a single record or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    load_list(path, "events")
}

pub fn load_event(path: &Path) -> Result<Event> {
    load_json(path, "event")
}

pub fn load_clubs(path: &Path) -> Result<Vec<Club>> {
    load_list(path, "clubs")
}

pub fn load_results(path: &Path) -> Result<Vec<BackendResult>> {
    load_list(path, "results")
}

pub fn load_result(path: &Path) -> Result<BackendResult> {
    load_json(path, "result")
}

fn load_list<T: DeserializeOwned>(path: &Path, data_type: &str) -> Result<Vec<T>> {
    let items: Vec<T> = load_json::<OneOrMany<T>>(path, data_type)?.into();
    info!("Loaded {} {} from {}", items.len(), data_type, path.display());
    Ok(items)
}

fn load_json<T: DeserializeOwned>(path: &Path, data_type: &str) -> Result<T> {
    let display = path.display().to_string();
    let json = with_read_context(fs::read_to_string(path), &display)?;

    let data = with_parse_context(serde_json::from_str(&json), data_type).with_context(|| {
        format!(
            "Invalid JSON in {}. First 200 chars: {}",
            display,
            json.chars().take(200).collect::<String>()
        )
    })?;
    Ok(data)
}
