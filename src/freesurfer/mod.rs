//! Command registry for the FreeSurfer toolkit.
//!
//! Exe -> program name + flag table
//! FileFormat / OutOrientation / ResampleType -> closed value sets
//! Builders live in `builders`, subject path resolution in `subject`.
//!
pub mod builders;
pub mod error;
pub mod subject;

pub use builders::{
    BinarizeOptions, CommandLine, ConvertOptions, ReconOptions, Threshold, binarize, convert,
    reconstruct,
};
pub use error::FsError;
pub use subject::{FileKind, Subject};

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/* ---- Flag Tables ---- */

/// Flags understood by `recon-all`.
pub mod recon_all {
    pub const SUBJID: &str = "-subjid";
    pub const INPUT: &str = "-i";
    pub const ALL: &str = "-all";
    pub const PARALLEL: &str = "-parallel";
    pub const OPENMP: &str = "-openmp";

    pub const FLAGS: &[(&str, &str)] = &[
        ("subjid", SUBJID),
        ("input", INPUT),
        ("all", ALL),
        ("parallel", PARALLEL),
        ("openmp", OPENMP),
    ];
}

/// Flags understood by `mri_convert`.
pub mod mri_convert {
    pub const IN_TYPE: &str = "--in_type";
    pub const OUT_TYPE: &str = "--out_type";
    pub const OUT_ORIENTATION: &str = "--out_orientation";
    pub const RESAMPLE_TYPE: &str = "--resample_type";

    pub const FLAGS: &[(&str, &str)] = &[
        ("in_type", IN_TYPE),
        ("out_type", OUT_TYPE),
        ("out_orientation", OUT_ORIENTATION),
        ("resample_type", RESAMPLE_TYPE),
    ];
}

/// Flags understood by `mri_binarize`.
pub mod mri_binarize {
    pub const IN_FILE: &str = "--i";
    pub const OUT_FILE: &str = "--o";
    pub const MIN_VALUE: &str = "--min";
    pub const ERODE: &str = "--erode";
    pub const DILATE: &str = "--dilate";
    pub const MASK_FILE: &str = "--mask";

    pub const FLAGS: &[(&str, &str)] = &[
        ("in_file", IN_FILE),
        ("out_file", OUT_FILE),
        ("min_value", MIN_VALUE),
        ("erode", ERODE),
        ("dilate", DILATE),
        ("mask_file", MASK_FILE),
    ];
}

/* ---- Executables ---- */

/// Every toolkit executable known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exe {
    BbRegister,
    Freeview,
    MriBinarize,
    MriConvert,
    MriInfo,
    MriPretess,
    MriTessellate,
    MriVol2Vol,
    MriSurf2Surf,
    MriSurf2Vol,
    MriAparc2Aseg,
    MrisCalc,
    MrisConvert,
    MrisExtractMainComponent,
    MrisDecimate,
    MrisSmooth,
    ReconAll,
}

impl Exe {
    /// All registered executables, in catalogue order.
    pub const fn variants() -> &'static [Exe] {
        &[
            Exe::BbRegister,
            Exe::Freeview,
            Exe::MriBinarize,
            Exe::MriConvert,
            Exe::MriInfo,
            Exe::MriPretess,
            Exe::MriTessellate,
            Exe::MriVol2Vol,
            Exe::MriSurf2Surf,
            Exe::MriSurf2Vol,
            Exe::MriAparc2Aseg,
            Exe::MrisCalc,
            Exe::MrisConvert,
            Exe::MrisExtractMainComponent,
            Exe::MrisDecimate,
            Exe::MrisSmooth,
            Exe::ReconAll,
        ]
    }

    /// Literal program name as found on `PATH`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exe::BbRegister => "bbregister",
            Exe::Freeview => "freeview",
            Exe::MriBinarize => "mri_binarize",
            Exe::MriConvert => "mri_convert",
            Exe::MriInfo => "mri_info",
            Exe::MriPretess => "mri_pretess",
            Exe::MriTessellate => "mri_tessellate",
            Exe::MriVol2Vol => "mri_vol2vol",
            Exe::MriSurf2Surf => "mri_surf2surf",
            Exe::MriSurf2Vol => "mri_surf2vol",
            Exe::MriAparc2Aseg => "mri_aparc2aseg",
            Exe::MrisCalc => "mris_calc",
            Exe::MrisConvert => "mris_convert",
            Exe::MrisExtractMainComponent => "mris_extract_main_component",
            Exe::MrisDecimate => "mris_decimate",
            Exe::MrisSmooth => "mris_smooth",
            Exe::ReconAll => "recon-all",
        }
    }

    /// Logical flag name -> literal spelling. Empty for executables we only name.
    pub fn flags(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Exe::ReconAll => recon_all::FLAGS,
            Exe::MriConvert => mri_convert::FLAGS,
            Exe::MriBinarize => mri_binarize::FLAGS,
            _ => &[],
        }
    }

    /// Reverse lookup from the literal program name.
    pub fn from_program(program: &str) -> Option<Self> {
        Exe::variants()
            .iter()
            .copied()
            .find(|e| e.as_str() == program)
    }
}

impl fmt::Display for Exe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ---- Value Sets ---- */

/// Volume file formats recognised by `mri_convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Mgz,
    Nii,
    NiiGz,
}

impl FileFormat {
    pub const fn variants() -> &'static [FileFormat] {
        &[FileFormat::Mgz, FileFormat::Nii, FileFormat::NiiGz]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Mgz => "mgz",
            FileFormat::Nii => "nii",
            FileFormat::NiiGz => "nii.gz",
        }
    }

    /// Derive the format from a path's extension.
    ///
    /// `nii.gz` is checked as a compound extension before the trailing
    /// extension; anything else unrecognised is an `InvalidFormat` error.
    pub fn from_path(path: &str) -> Result<Self, FsError> {
        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let compound = FileFormat::NiiGz.as_str();
        if file_name.len() > compound.len() + 1
            && file_name.ends_with(compound)
            && file_name[..file_name.len() - compound.len()].ends_with('.')
        {
            return Ok(FileFormat::NiiGz);
        }

        let extension = Path::new(&file_name)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extension.as_str() {
            "mgz" => Ok(FileFormat::Mgz),
            "nii" => Ok(FileFormat::Nii),
            _ => Err(FsError::InvalidFormat {
                path: path.to_string(),
                extension,
            }),
        }
    }
}

impl FromStr for FileFormat {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileFormat::variants()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| FsError::UnknownValue {
                what: "file format",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output orientations accepted by `mri_convert --out_orientation`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutOrientation {
    #[value(name = "RAS")]
    Ras,
}

impl OutOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutOrientation::Ras => "RAS",
        }
    }
}

impl FromStr for OutOrientation {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RAS" => Ok(OutOrientation::Ras),
            _ => Err(FsError::UnknownValue {
                what: "output orientation",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OutOrientation {
    type Error = FsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OutOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resampling strategies accepted by `mri_convert --resample_type`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ResampleType {
    Nearest,
    Interpolate,
}

impl ResampleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResampleType::Nearest => "nearest",
            ResampleType::Interpolate => "interpolate",
        }
    }
}

impl FromStr for ResampleType {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(ResampleType::Nearest),
            "interpolate" => Ok(ResampleType::Interpolate),
            _ => Err(FsError::UnknownValue {
                what: "resample type",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ResampleType {
    type Error = FsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ResampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
