/*!
shared.rs - helpers used by every subcommand.

Focus:
  - emit_command / command_json: print a built `CommandLine`
  - output_error: JSON or boxed error, then fail
  - resolve_subjects_dir: --sdir > SUBJECTS_DIR env
*/

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::cmd::format::{Role, StyleOptions, banner, color, emoji};
use crate::freesurfer::CommandLine;
use crate::log_error;

/// Environment variable consulted when no subjects directory is given.
pub const SUBJECTS_DIR_ENV: &str = "SUBJECTS_DIR";

/* ---- Command Output ---- */

/// JSON shape for one built command.
pub fn command_json(cmd: &CommandLine) -> serde_json::Value {
    serde_json::json!({
        "command": cmd.program(),
        "args": cmd.args(),
        "line": cmd.to_shell(),
    })
}

/// Print a command: shell-quoted line, or a JSON status object.
pub fn emit_command(cmd: &CommandLine, json: bool) -> Result<()> {
    if json {
        let mut out = command_json(cmd);
        if let Some(map) = out.as_object_mut() {
            map.insert("status".to_string(), serde_json::json!("ok"));
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", cmd.to_shell());
    }
    Ok(())
}

/* ---- Errors ---- */

/// Report `msg` on stdout (JSON) or as a boxed message, then return it as an error.
pub fn output_error(json: bool, msg: &str) -> Result<()> {
    if json {
        log_error!("{msg}");
        let err = serde_json::json!({ "status": "error", "error": msg });
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Build Error", emoji("error", &style));
        eprintln!("{}", banner(title, None, &style));
        eprintln!("{}", color(Role::Error, msg, &style));
    }
    bail!(msg.to_string())
}

/* ---- Subjects Directory ---- */

/// `explicit` wins; otherwise a non-blank `SUBJECTS_DIR`.
pub fn resolve_subjects_dir(explicit: Option<&str>) -> Result<PathBuf> {
    let env_value = std::env::var(SUBJECTS_DIR_ENV).ok();
    pick_subjects_dir(explicit, env_value.as_deref())
}

pub(crate) fn pick_subjects_dir(explicit: Option<&str>, env_value: Option<&str>) -> Result<PathBuf> {
    let chosen = explicit
        .filter(|s| !s.trim().is_empty())
        .or_else(|| env_value.filter(|s| !s.trim().is_empty()));
    match chosen {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => bail!("no subjects directory: pass --sdir or set {SUBJECTS_DIR_ENV}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freesurfer::{ReconOptions, reconstruct};
    use serde_json::json;

    #[test]
    fn command_json_shape() {
        let cmd = reconstruct("S1", "in.mgz", &ReconOptions::default());
        assert_eq!(
            command_json(&cmd),
            json!({
                "command": "recon-all",
                "args": ["-subjid", "S1", "-i", "in.mgz", "-all"],
                "line": "recon-all -subjid S1 -i in.mgz -all"
            })
        );
    }

    #[test]
    fn subjects_dir_precedence() {
        assert_eq!(
            pick_subjects_dir(Some("/a"), Some("/b")).unwrap(),
            PathBuf::from("/a")
        );
        assert_eq!(
            pick_subjects_dir(None, Some("/b")).unwrap(),
            PathBuf::from("/b")
        );
        assert_eq!(
            pick_subjects_dir(Some("  "), Some("/b")).unwrap(),
            PathBuf::from("/b")
        );
    }

    #[test]
    fn subjects_dir_missing() {
        let err = pick_subjects_dir(None, Some("")).unwrap_err();
        assert!(err.to_string().contains("SUBJECTS_DIR"));
    }

    #[test]
    fn output_error_fails_with_message() {
        let err = output_error(true, "unknown subject file kind: 'wm'").unwrap_err();
        assert!(err.to_string().contains("wm"));
    }
}
