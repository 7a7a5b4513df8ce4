/*!
`list.rs`

Implements the `list` subcommand: print the command registry.

  fs-recon list               all executables + known flag spellings
  fs-recon list mri_convert   logical flag -> literal spelling for one executable
  fs-recon list --json

JSON Output Shape:
{
  "status": "ok",
  "count": 17,
  "executables": [
    { "name": "recon-all", "flags": { "subjid": "-subjid", ... } },
    ...
  ],
  "values": {
    "file_formats": ["mgz", "nii", "nii.gz"],
    "out_orientations": ["RAS"],
    "resample_types": ["nearest", "interpolate"],
    "file_kinds": { "T1": "mri/T1.mgz", ... }
  }
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, banner, color, emoji, table};
use crate::cmd::shared::output_error;
use crate::freesurfer::{Exe, FileFormat, FileKind, OutOrientation, ResampleType};

/// CLI arguments for `fs-recon list [EXE]`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this executable (e.g. recon-all, mri_convert)
    #[arg(value_name = "EXE")]
    pub exe: Option<String>,

    /// Output JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
    let selected: Vec<Exe> = match args.exe.as_deref() {
        Some(name) => match Exe::from_program(name) {
            Some(exe) => vec![exe],
            None => return output_error(args.json, &format!("unknown executable: '{name}'")),
        },
        None => Exe::variants().to_vec(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry_json(&selected))?);
        return Ok(());
    }

    let style = StyleOptions::detect();
    match selected.as_slice() {
        [single] => print_single(*single, &style),
        all => print_all(all, &style),
    }
    Ok(())
}

fn flags_json(exe: Exe) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = exe
        .flags()
        .iter()
        .map(|(logical, literal)| (logical.to_string(), serde_json::json!(literal)))
        .collect();
    serde_json::Value::Object(map)
}

pub fn registry_json(selected: &[Exe]) -> serde_json::Value {
    let executables: Vec<serde_json::Value> = selected
        .iter()
        .map(|e| serde_json::json!({ "name": e.as_str(), "flags": flags_json(*e) }))
        .collect();
    let kinds: serde_json::Map<String, serde_json::Value> = FileKind::variants()
        .iter()
        .map(|k| (k.as_str().to_string(), serde_json::json!(k.relative_path())))
        .collect();

    serde_json::json!({
        "status": "ok",
        "count": executables.len(),
        "executables": executables,
        "values": {
            "file_formats": FileFormat::variants().iter().map(|f| f.as_str()).collect::<Vec<_>>(),
            "out_orientations": [OutOrientation::Ras.as_str()],
            "resample_types": [ResampleType::Nearest.as_str(), ResampleType::Interpolate.as_str()],
            "file_kinds": kinds,
        }
    })
}

fn print_all(selected: &[Exe], style: &StyleOptions) {
    println!(
        "{}",
        banner(
            format!("{} Registry ({})", emoji("list", style), selected.len()),
            Some("executables and flag spellings"),
            style,
        )
    );

    let rows: Vec<Vec<String>> = selected
        .iter()
        .map(|e| {
            let flags = if e.flags().is_empty() {
                "-".to_string()
            } else {
                e.flags()
                    .iter()
                    .map(|(_, lit)| color(Role::Flag, lit, style))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            vec![e.as_str().to_string(), flags]
        })
        .collect();
    println!("{}", table(&["EXECUTABLE", "FLAGS"], &rows, style));

    println!();
    let values = vec![
        vec![
            "file formats".to_string(),
            FileFormat::variants()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ],
        vec![
            "out orientations".to_string(),
            OutOrientation::Ras.as_str().to_string(),
        ],
        vec![
            "resample types".to_string(),
            format!(
                "{}, {}",
                ResampleType::Nearest,
                ResampleType::Interpolate
            ),
        ],
    ];
    println!("{}", table(&["VALUE SET", "MEMBERS"], &values, style));

    println!();
    let kinds: Vec<Vec<String>> = FileKind::variants()
        .iter()
        .map(|k| {
            vec![
                k.as_str().to_string(),
                color(Role::Value, k.relative_path(), style),
            ]
        })
        .collect();
    println!("{}", table(&["FILE KIND", "RELATIVE PATH"], &kinds, style));
}

fn print_single(exe: Exe, style: &StyleOptions) {
    let subtitle = format!("{} flags", exe.flags().len());
    println!(
        "{}",
        banner(
            format!("{} {}", emoji("brain", style), exe),
            Some(subtitle.as_str()),
            style,
        )
    );
    if exe.flags().is_empty() {
        println!(
            "{}",
            color(
                Role::Dim,
                format!("{} no flag spellings registered", emoji("info", style)),
                style
            )
        );
        return;
    }
    let rows: Vec<Vec<String>> = exe
        .flags()
        .iter()
        .map(|(logical, lit)| vec![logical.to_string(), color(Role::Flag, lit, style)])
        .collect();
    println!("{}", table(&["NAME", "FLAG"], &rows, style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        cmd: TestSub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum TestSub {
        List(ListArgs),
    }

    #[test]
    fn clap_parses_optional_exe() {
        let cli = TestCli::try_parse_from(["t", "list", "recon-all", "--json"]).unwrap();
        match cli.cmd {
            TestSub::List(a) => {
                assert_eq!(a.exe.as_deref(), Some("recon-all"));
                assert!(a.json);
            }
        }
    }

    #[test]
    fn registry_json_covers_everything() {
        let v = registry_json(Exe::variants());
        assert_eq!(v["count"], 17);
        let recon = v["executables"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["name"] == "recon-all")
            .unwrap();
        assert_eq!(recon["flags"]["openmp"], "-openmp");
        assert_eq!(v["values"]["file_formats"][2], "nii.gz");
        assert_eq!(v["values"]["file_kinds"]["aparc+aseg"], "mri/aparc+aseg.mgz");
    }

    #[test]
    fn unknown_exe_is_an_error() {
        let args = ListArgs {
            exe: Some("mri_nope".into()),
            json: true,
        };
        assert!(execute_list(args).is_err());
    }
}
