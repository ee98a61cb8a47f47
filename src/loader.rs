use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::header::USER_AGENT;

use crate::http_client::http_client;
use crate::model::{Dataset, parse_dataset_json};
use crate::state::Delta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }
}

pub fn load_dataset(source: &DataSource, timeout: Duration) -> Result<Dataset> {
    let body = match source {
        DataSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        DataSource::Url(url) => fetch_text(url, timeout)?,
    };
    parse_dataset_json(&body).with_context(|| format!("failed to load {}", source.describe()))
}

fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let client = http_client(timeout)?;
    let resp = client
        .get(url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .with_context(|| format!("request to {url} failed"))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("failed to load {url}: http {status}"));
    }
    resp.text().context("failed reading body")
}

/// One-shot load on a worker thread; the outcome arrives as a single delta.
pub fn spawn_loader(source: DataSource, timeout: Duration, tx: Sender<Delta>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!("[INFO] Loading {}", source.describe())));
        let delta = match load_dataset(&source, timeout) {
            Ok(dataset) => Delta::DataLoaded(Box::new(dataset)),
            Err(err) => Delta::LoadFailed(format!("{err:#}")),
        };
        let _ = tx.send(delta);
    });
}
