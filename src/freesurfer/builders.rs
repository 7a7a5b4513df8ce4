/*!
Argument builders.

Each builder returns a `CommandLine` whose first token is the executable.
Flags and their values are pushed as adjacent pairs; optional flags are
left out entirely when their controlling parameter is absent or default.

  reconstruct -> recon-all
  convert     -> mri_convert
  binarize    -> mri_binarize
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FsError;
use super::{Exe, FileFormat, OutOrientation, ResampleType};
use super::{mri_binarize, mri_convert, recon_all};

/* ---- Command Line ---- */

/// Ordered token sequence for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new(exe: Exe) -> Self {
        Self {
            tokens: vec![exe.as_str().to_string()],
        }
    }

    /// Bare flag.
    pub fn flag(mut self, flag: &str) -> Self {
        self.tokens.push(flag.to_string());
        self
    }

    /// Bare flag, only when `cond` holds.
    pub fn flag_if(self, cond: bool, flag: &str) -> Self {
        if cond { self.flag(flag) } else { self }
    }

    /// Flag followed by its value.
    pub fn pair(mut self, flag: &str, value: impl ToString) -> Self {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.to_string());
        self
    }

    /// Flag/value pair, only when a value is present.
    pub fn pair_opt<T: ToString>(self, flag: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.pair(flag, v),
            None => self,
        }
    }

    /// Positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.tokens.push(value.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Everything after the program name.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Single shell-quoted line, safe to paste into a POSIX shell.
    pub fn to_shell(&self) -> String {
        shell_words::join(self.tokens())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

/* ---- Threshold ---- */

/// Minimum value for `mri_binarize --min`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Int(i64),
    Real(f64),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Int(v) => write!(f, "{v}"),
            // reals keep a decimal point so 1.0 never collapses to an integer
            Threshold::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Threshold::Real(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Threshold {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Threshold::Int(v));
        }
        s.parse::<f64>()
            .map(Threshold::Real)
            .map_err(|_| FsError::InvalidThreshold(s.to_string()))
    }
}

impl From<i64> for Threshold {
    fn from(v: i64) -> Self {
        Threshold::Int(v)
    }
}

impl From<f64> for Threshold {
    fn from(v: f64) -> Self {
        Threshold::Real(v)
    }
}

/* ---- reconstruct ---- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconOptions {
    /// Run the whole pipeline (`-all`)
    pub all: bool,
    /// Request `-parallel` together with `-openmp <threads>`
    pub parallel: bool,
    /// Thread count, only emitted when `parallel` is set
    pub openmp: u32,
}

impl Default for ReconOptions {
    fn default() -> Self {
        Self {
            all: true,
            parallel: false,
            openmp: 4,
        }
    }
}

/// `recon-all -subjid <id> -i <input> [-all] [-parallel -openmp <n>]`
pub fn reconstruct(subjid: &str, input: &str, opts: &ReconOptions) -> CommandLine {
    let mut cmd = CommandLine::new(Exe::ReconAll)
        .pair(recon_all::SUBJID, subjid)
        .pair(recon_all::INPUT, input)
        .flag_if(opts.all, recon_all::ALL);
    if opts.parallel {
        cmd = cmd
            .flag(recon_all::PARALLEL)
            .pair(recon_all::OPENMP, opts.openmp);
    }
    crate::log_trace!("reconstruct: {}", cmd);
    cmd
}

/* ---- convert ---- */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub out_orientation: Option<OutOrientation>,
    pub resample_type: Option<ResampleType>,
}

/// `mri_convert --in_type <fmt> --out_type <fmt> [..] <in> <out>`
///
/// Formats come from the path extensions; an unrecognised one is an error
/// and nothing is built.
pub fn convert(input: &str, output: &str, opts: &ConvertOptions) -> Result<CommandLine, FsError> {
    let in_type = FileFormat::from_path(input)?;
    let out_type = FileFormat::from_path(output)?;

    let cmd = CommandLine::new(Exe::MriConvert)
        .pair(mri_convert::IN_TYPE, in_type)
        .pair(mri_convert::OUT_TYPE, out_type)
        .pair_opt(mri_convert::OUT_ORIENTATION, opts.out_orientation)
        .pair_opt(mri_convert::RESAMPLE_TYPE, opts.resample_type)
        .arg(input)
        .arg(output);
    crate::log_trace!("convert: {}", cmd);
    Ok(cmd)
}

/* ---- binarize ---- */

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinarizeOptions {
    /// Lower threshold; zero is a real value and still emits `--min`
    pub min: Option<Threshold>,
    pub erode: u32,
    pub dilate: u32,
    pub mask: Option<String>,
}

/// `mri_binarize --i <in> --o <out> [--min v] [--erode n] [--dilate n] [--mask path]`
pub fn binarize(input: &str, output: &str, opts: &BinarizeOptions) -> CommandLine {
    let cmd = CommandLine::new(Exe::MriBinarize)
        .pair(mri_binarize::IN_FILE, input)
        .pair(mri_binarize::OUT_FILE, output)
        .pair_opt(mri_binarize::MIN_VALUE, opts.min)
        .pair_opt(mri_binarize::ERODE, (opts.erode > 0).then_some(opts.erode))
        .pair_opt(mri_binarize::DILATE, (opts.dilate > 0).then_some(opts.dilate))
        .pair_opt(mri_binarize::MASK_FILE, opts.mask.as_deref());
    crate::log_trace!("binarize: {}", cmd);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(cmd: &CommandLine) -> Vec<&str> {
        cmd.tokens().iter().map(String::as_str).collect()
    }

    #[test]
    fn reconstruct_defaults() {
        let cmd = reconstruct("S1", "in.mgz", &ReconOptions::default());
        assert_eq!(
            strs(&cmd),
            ["recon-all", "-subjid", "S1", "-i", "in.mgz", "-all"]
        );
    }

    #[test]
    fn reconstruct_parallel_without_all() {
        let opts = ReconOptions {
            all: false,
            parallel: true,
            openmp: 8,
        };
        let cmd = reconstruct("S1", "in.mgz", &opts);
        assert_eq!(
            strs(&cmd),
            [
                "recon-all",
                "-subjid",
                "S1",
                "-i",
                "in.mgz",
                "-parallel",
                "-openmp",
                "8"
            ]
        );
    }

    #[test]
    fn reconstruct_openmp_needs_parallel() {
        let opts = ReconOptions {
            openmp: 16,
            ..Default::default()
        };
        let cmd = reconstruct("S1", "in.mgz", &opts);
        assert!(!cmd.tokens().iter().any(|t| t == "-openmp"));
        assert!(!cmd.tokens().iter().any(|t| t == "-parallel"));
        assert!(!cmd.tokens().iter().any(|t| t == "16"));
    }

    #[test]
    fn convert_basic() {
        let cmd = convert("a.mgz", "b.nii", &ConvertOptions::default()).unwrap();
        assert_eq!(
            strs(&cmd),
            [
                "mri_convert",
                "--in_type",
                "mgz",
                "--out_type",
                "nii",
                "a.mgz",
                "b.nii"
            ]
        );
    }

    #[test]
    fn convert_orientation_before_paths() {
        let opts = ConvertOptions {
            out_orientation: Some(OutOrientation::Ras),
            ..Default::default()
        };
        let cmd = convert("a.mgz", "b.nii", &opts).unwrap();
        assert_eq!(
            strs(&cmd),
            [
                "mri_convert",
                "--in_type",
                "mgz",
                "--out_type",
                "nii",
                "--out_orientation",
                "RAS",
                "a.mgz",
                "b.nii"
            ]
        );
    }

    #[test]
    fn convert_all_options() {
        let opts = ConvertOptions {
            out_orientation: Some(OutOrientation::Ras),
            resample_type: Some(ResampleType::Nearest),
        };
        let cmd = convert("/in/t1.nii.gz", "/out/t1.mgz", &opts).unwrap();
        assert_eq!(
            strs(&cmd),
            [
                "mri_convert",
                "--in_type",
                "nii.gz",
                "--out_type",
                "mgz",
                "--out_orientation",
                "RAS",
                "--resample_type",
                "nearest",
                "/in/t1.nii.gz",
                "/out/t1.mgz"
            ]
        );
    }

    #[test]
    fn convert_resample_only() {
        let opts = ConvertOptions {
            resample_type: Some(ResampleType::Interpolate),
            ..Default::default()
        };
        let cmd = convert("a.nii", "b.nii", &opts).unwrap();
        assert_eq!(
            cmd.args()[4..],
            ["--resample_type", "interpolate", "a.nii", "b.nii"]
        );
    }

    #[test]
    fn convert_unknown_extension_fails() {
        let err = convert("a.xyz", "b.mgz", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, FsError::InvalidFormat { ref extension, .. } if extension == "xyz"));

        let err = convert("a.mgz", "b", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, FsError::InvalidFormat { ref path, .. } if path == "b"));
    }

    #[test]
    fn binarize_zero_min_is_supplied() {
        let opts = BinarizeOptions {
            min: Some(Threshold::Int(0)),
            ..Default::default()
        };
        let cmd = binarize("i.mgz", "o.mgz", &opts);
        assert_eq!(
            strs(&cmd),
            ["mri_binarize", "--i", "i.mgz", "--o", "o.mgz", "--min", "0"]
        );
    }

    #[test]
    fn binarize_zero_morphology_omitted() {
        let cmd = binarize("i.mgz", "o.mgz", &BinarizeOptions::default());
        assert_eq!(
            strs(&cmd),
            ["mri_binarize", "--i", "i.mgz", "--o", "o.mgz"]
        );
    }

    #[test]
    fn binarize_full_order() {
        let opts = BinarizeOptions {
            min: Some(Threshold::Real(0.5)),
            erode: 1,
            dilate: 2,
            mask: Some("mask.mgz".into()),
        };
        let cmd = binarize("i.mgz", "o.mgz", &opts);
        assert_eq!(
            strs(&cmd),
            [
                "mri_binarize",
                "--i",
                "i.mgz",
                "--o",
                "o.mgz",
                "--min",
                "0.5",
                "--erode",
                "1",
                "--dilate",
                "2",
                "--mask",
                "mask.mgz"
            ]
        );
    }

    #[test]
    fn binarize_dilate_and_mask_only() {
        let opts = BinarizeOptions {
            dilate: 3,
            mask: Some("m.mgz".into()),
            ..Default::default()
        };
        let cmd = binarize("i.mgz", "o.mgz", &opts);
        assert_eq!(cmd.args()[4..], ["--dilate", "3", "--mask", "m.mgz"]);
    }

    #[test]
    fn builders_are_idempotent() {
        let r = ReconOptions {
            parallel: true,
            ..Default::default()
        };
        assert_eq!(reconstruct("S", "x.mgz", &r), reconstruct("S", "x.mgz", &r));

        let c = ConvertOptions {
            out_orientation: Some(OutOrientation::Ras),
            ..Default::default()
        };
        assert_eq!(
            convert("a.mgz", "b.nii", &c).unwrap(),
            convert("a.mgz", "b.nii", &c).unwrap()
        );

        let b = BinarizeOptions {
            min: Some(Threshold::Int(3)),
            erode: 1,
            ..Default::default()
        };
        assert_eq!(binarize("i.mgz", "o.mgz", &b), binarize("i.mgz", "o.mgz", &b));
    }

    #[test]
    fn threshold_rendering() {
        assert_eq!(Threshold::Int(0).to_string(), "0");
        assert_eq!(Threshold::Int(-3).to_string(), "-3");
        assert_eq!(Threshold::Real(1.0).to_string(), "1.0");
        assert_eq!(Threshold::Real(0.25).to_string(), "0.25");
    }

    #[test]
    fn threshold_parsing() {
        assert_eq!("0".parse::<Threshold>(), Ok(Threshold::Int(0)));
        assert_eq!("2.5".parse::<Threshold>(), Ok(Threshold::Real(2.5)));
        assert!(matches!(
            "high".parse::<Threshold>(),
            Err(FsError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn shell_rendering_quotes_spaces() {
        let cmd = binarize("/tmp/my dir/i.mgz", "o.mgz", &BinarizeOptions::default());
        assert_eq!(
            cmd.to_shell(),
            "mri_binarize --i '/tmp/my dir/i.mgz' --o o.mgz"
        );
        assert_eq!(cmd.program(), "mri_binarize");
        assert_eq!(cmd.tokens().len(), 5);
    }

    #[test]
    fn serializes_as_token_array() {
        let cmd = reconstruct("S1", "in.mgz", &ReconOptions::default());
        assert_eq!(
            serde_json::to_value(&cmd).unwrap(),
            serde_json::json!(["recon-all", "-subjid", "S1", "-i", "in.mgz", "-all"])
        );
    }
}
