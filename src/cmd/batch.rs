/*!
`batch.rs`

Implements the `batch` subcommand: build every invocation listed in a job
file. YAML for `.yaml` / `.yml`, JSON for anything else.

Job File Shape:
  subjects_dir: /data/subjects      # optional, for `path` jobs
  jobs:
    - { op: recon, subject: S1, input: /raw/S1.nii.gz, parallel: true, openmp: 8 }
    - { op: convert, input: a.mgz, output: b.nii, out_orientation: RAS }
    - { op: binarize, input: aseg.mgz, output: mask.mgz, min: 0 }
    - { op: path, subject: S1, file: aparc+aseg }

Jobs are built in order; the first failure aborts the batch.

JSON Output Shape:
{
  "status": "ok",
  "file": "jobs.yaml",
  "count": 2,
  "results": [
    { "op": "recon", "command": "recon-all", "args": [...], "line": "..." },
    { "op": "path", "path": "/data/subjects/S1/mri/aparc+aseg.mgz" }
  ]
}
*/

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;

use crate::cmd::shared::{command_json, output_error, resolve_subjects_dir};
use crate::freesurfer::{
    BinarizeOptions, CommandLine, ConvertOptions, FileKind, OutOrientation, ReconOptions,
    ResampleType, Subject, Threshold, binarize, convert, reconstruct,
};
use crate::{log_debug, log_info};

/// CLI arguments for `fs-recon batch <FILE>`
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Job file (YAML or JSON)
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Output JSON instead of one line per job
    #[arg(long)]
    pub json: bool,
}

/* ---- Job File Model ---- */

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    #[serde(default)]
    pub subjects_dir: Option<String>,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Job {
    Recon(ReconJob),
    Convert(ConvertJob),
    Binarize(BinarizeJob),
    Path(PathJob),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconJob {
    pub subject: String,
    pub input: String,
    #[serde(default = "default_all")]
    pub all: bool,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_openmp")]
    pub openmp: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertJob {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub out_orientation: Option<OutOrientation>,
    #[serde(default)]
    pub resample_type: Option<ResampleType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinarizeJob {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub min: Option<Threshold>,
    #[serde(default)]
    pub erode: u32,
    #[serde(default)]
    pub dilate: u32,
    #[serde(default)]
    pub mask: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathJob {
    pub subject: String,
    pub file: FileKind,
    #[serde(default)]
    pub subjects_dir: Option<String>,
}

fn default_all() -> bool {
    ReconOptions::default().all
}

fn default_openmp() -> u32 {
    ReconOptions::default().openmp
}

/// What one job produced.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutput {
    Command(CommandLine),
    Path(PathBuf),
}

impl Job {
    pub fn op(&self) -> &'static str {
        match self {
            Job::Recon(_) => "recon",
            Job::Convert(_) => "convert",
            Job::Binarize(_) => "binarize",
            Job::Path(_) => "path",
        }
    }

    /// Build this job. `subjects_dir` is the file-level default for `path` jobs.
    pub fn build(&self, subjects_dir: Option<&str>) -> Result<JobOutput> {
        let out = match self {
            Job::Recon(j) => {
                let opts = ReconOptions {
                    all: j.all,
                    parallel: j.parallel,
                    openmp: j.openmp,
                };
                JobOutput::Command(reconstruct(&j.subject, &j.input, &opts))
            }
            Job::Convert(j) => {
                let opts = ConvertOptions {
                    out_orientation: j.out_orientation,
                    resample_type: j.resample_type,
                };
                JobOutput::Command(convert(&j.input, &j.output, &opts)?)
            }
            Job::Binarize(j) => {
                let opts = BinarizeOptions {
                    min: j.min,
                    erode: j.erode,
                    dilate: j.dilate,
                    mask: j.mask.clone(),
                };
                JobOutput::Command(binarize(&j.input, &j.output, &opts))
            }
            Job::Path(j) => {
                let own = j.subjects_dir.as_deref().filter(|s| !s.trim().is_empty());
                let sdir = resolve_subjects_dir(own.or(subjects_dir))?;
                JobOutput::Path(Subject::new(sdir, j.subject.as_str()).fname(j.file))
            }
        };
        Ok(out)
    }
}

impl JobOutput {
    pub fn to_line(&self) -> String {
        match self {
            JobOutput::Command(cmd) => cmd.to_shell(),
            JobOutput::Path(p) => p.display().to_string(),
        }
    }

    pub fn to_json(&self, op: &str) -> serde_json::Value {
        let mut v = match self {
            JobOutput::Command(cmd) => command_json(cmd),
            JobOutput::Path(p) => serde_json::json!({ "path": p.display().to_string() }),
        };
        if let Some(map) = v.as_object_mut() {
            map.insert("op".to_string(), serde_json::json!(op));
        }
        v
    }
}

/* ---- Loading ---- */

pub fn parse_job_file(raw: &str, yaml: bool) -> Result<JobFile> {
    if yaml {
        serde_yaml::from_str(raw).context("failed to parse YAML job file")
    } else {
        serde_json::from_str(raw).context("failed to parse JSON job file")
    }
}

pub fn load_job_file(path: &str) -> Result<JobFile> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("failed to read job file: {path}"))?;
    let lower = path.to_ascii_lowercase();
    parse_job_file(&raw, lower.ends_with(".yaml") || lower.ends_with(".yml"))
}

/// Build every job in order, stopping at the first failure.
pub fn build_all(file: &JobFile) -> Result<Vec<(&'static str, JobOutput)>> {
    let mut out = Vec::with_capacity(file.jobs.len());
    for (idx, job) in file.jobs.iter().enumerate() {
        log_debug!("job #{} ({})", idx + 1, job.op());
        let built = job
            .build(file.subjects_dir.as_deref())
            .with_context(|| format!("job #{} ({}) failed", idx + 1, job.op()))?;
        out.push((job.op(), built));
    }
    Ok(out)
}

/* ---- Entry Point ---- */

pub fn execute_batch(args: BatchArgs) -> Result<()> {
    let results = match load_job_file(&args.file).and_then(|f| build_all(&f)) {
        Ok(r) => r,
        Err(e) => return output_error(args.json, &format!("{e:#}")),
    };
    log_info!("built {} job(s) from {}", results.len(), args.file);

    if args.json {
        let items: Vec<serde_json::Value> =
            results.iter().map(|(op, r)| r.to_json(op)).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "file": args.file,
                "count": items.len(),
                "results": items,
            }))?
        );
    } else {
        for (_, r) in &results {
            println!("{}", r.to_line());
        }
    }
    Ok(())
}
