use anyhow::{Context, Result};
use serde::Serialize;
use siteswap::api::{Generation, GenerationParameters};
use std::fs;
use std::path::Path;

/// Parameters as they went into the session.
#[derive(Debug, Serialize)]
pub struct ParamsEcho {
    pub period_length: usize,
    pub min_throw: u32,
    pub max_throw: u32,
    pub number_of_objects: u32,
    pub number_of_jugglers: usize,
    pub is_sync_pattern: bool,
    pub is_random_generation: bool,
    pub max_results: usize,
    pub timeout_seconds: u64,
}

impl From<&GenerationParameters> for ParamsEcho {
    fn from(p: &GenerationParameters) -> Self {
        Self {
            period_length: p.period_length,
            min_throw: p.min_throw,
            max_throw: p.max_throw,
            number_of_objects: p.number_of_objects,
            number_of_jugglers: p.number_of_jugglers,
            is_sync_pattern: p.is_sync_pattern,
            is_random_generation: p.is_random_generation,
            max_results: p.max_results,
            timeout_seconds: p.timeout_seconds,
        }
    }
}

/// JSON document of one generation run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub status: String,
    pub elapsed_ms: u64,
    pub steps: u64,
    pub seed: Option<u64>,
    pub params: ParamsEcho,
    pub filters: Vec<String>,
    pub results: Vec<String>,
}

impl Report {
    pub fn new(params: &GenerationParameters, filters: Vec<String>, out: &Generation) -> Self {
        Self {
            status: out.termination.to_string(),
            elapsed_ms: out.elapsed.as_millis() as u64,
            steps: out.steps,
            seed: out.seed,
            params: params.into(),
            filters,
            results: out.results.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Write `report` as pretty JSON, creating the parent directory if needed.
pub fn write_report<P: AsRef<Path>>(path: P, report: &Report) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(report)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
