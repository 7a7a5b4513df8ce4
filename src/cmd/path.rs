/*!
`path.rs`

Implements the `path` subcommand: resolve a well-known subject volume.

  fs-recon path aparc+aseg --subject bert --sdir /data/subjects
  SUBJECTS_DIR=/data/subjects fs-recon path T1 -s bert --json

JSON Output Shape:
{
  "status": "ok",
  "subject": "bert",
  "subjects_dir": "/data/subjects",
  "file": "aparc+aseg",
  "path": "/data/subjects/bert/mri/aparc+aseg.mgz"
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::shared::{output_error, resolve_subjects_dir};
use crate::freesurfer::{FileKind, Subject};

/// CLI arguments for `fs-recon path <kind>`
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Subject file kind (T1|aparc+aseg|brain)
    #[arg(value_enum)]
    pub kind: FileKind,

    /// Subject identifier
    #[arg(short = 's', long, value_name = "ID")]
    pub subject: String,

    /// Subjects directory (falls back to SUBJECTS_DIR env var)
    #[arg(long, value_name = "DIR")]
    pub sdir: Option<String>,

    /// Output JSON instead of the bare path
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the path subcommand.
pub fn execute_path(args: PathArgs) -> Result<()> {
    let sdir = match resolve_subjects_dir(args.sdir.as_deref()) {
        Ok(d) => d,
        Err(e) => return output_error(args.json, &e.to_string()),
    };
    let subject = Subject::new(sdir, args.subject);
    let path = subject.fname(args.kind);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "status": "ok",
                "subject": subject.id(),
                "subjects_dir": subject.sdir().display().to_string(),
                "file": args.kind.as_str(),
                "path": path.display().to_string(),
            }))?
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
