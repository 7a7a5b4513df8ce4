/*!
Subject file paths.

A subject lives at `<subjects_dir>/<subject id>/`; well-known volumes sit at
fixed relative paths below it (see `FileKind::relative_path`).
*/

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::FsError;

/// Symbolic name of a per-subject volume.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum FileKind {
    /// Intensity-normalised T1 volume
    #[value(name = "T1", alias = "t1")]
    T1,
    /// Cortical parcellation merged with subcortical segmentation
    #[value(name = "aparc+aseg", alias = "aparc_aseg")]
    AparcAseg,
    /// Skull-stripped brain volume
    #[value(name = "brain")]
    Brain,
}

impl FileKind {
    pub const fn variants() -> &'static [FileKind] {
        &[FileKind::T1, FileKind::AparcAseg, FileKind::Brain]
    }

    /// Path relative to the subject directory.
    pub fn relative_path(&self) -> &'static str {
        match self {
            FileKind::T1 => "mri/T1.mgz",
            FileKind::AparcAseg => "mri/aparc+aseg.mgz",
            FileKind::Brain => "mri/brain.mgz",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::T1 => "T1",
            FileKind::AparcAseg => "aparc+aseg",
            FileKind::Brain => "brain",
        }
    }
}

impl FromStr for FileKind {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T1" | "t1" => Ok(FileKind::T1),
            "aparc+aseg" | "aparc_aseg" => Ok(FileKind::AparcAseg),
            "brain" => Ok(FileKind::Brain),
            other => Err(FsError::UnknownFileKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for FileKind {
    type Error = FsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject under a subjects directory. Neither part is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    sdir: PathBuf,
    subj: String,
}

impl Subject {
    pub fn new(sdir: impl Into<PathBuf>, subj: impl Into<String>) -> Self {
        Self {
            sdir: sdir.into(),
            subj: subj.into(),
        }
    }

    pub fn sdir(&self) -> &Path {
        &self.sdir
    }

    pub fn id(&self) -> &str {
        &self.subj
    }

    /// `sdir/subj`
    pub fn dir(&self) -> PathBuf {
        self.sdir.join(&self.subj)
    }

    /// `sdir/subj/<relative path of kind>`. No existence check.
    pub fn fname(&self, kind: FileKind) -> PathBuf {
        let path = self.dir().join(kind.relative_path());
        crate::log_trace!("resolved {} for {} -> {}", kind, self.subj, path.display());
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_kind() {
        let subj = Subject::new("/data/subjects", "S1");
        for kind in FileKind::variants() {
            let expected = Path::new("/data/subjects")
                .join("S1")
                .join(kind.relative_path());
            assert_eq!(subj.fname(*kind), expected);
        }
    }

    #[test]
    fn relative_paths() {
        let subj = Subject::new("sd", "bert");
        assert_eq!(
            subj.fname(FileKind::AparcAseg),
            PathBuf::from("sd/bert/mri/aparc+aseg.mgz")
        );
        assert_eq!(
            subj.fname(FileKind::T1),
            PathBuf::from("sd/bert/mri/T1.mgz")
        );
        assert_eq!(
            subj.fname(FileKind::Brain),
            PathBuf::from("sd/bert/mri/brain.mgz")
        );
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("t1".parse::<FileKind>(), Ok(FileKind::T1));
        assert_eq!("aparc_aseg".parse::<FileKind>(), Ok(FileKind::AparcAseg));
        assert_eq!(
            " brain ".parse::<FileKind>(),
            Err(FsError::UnknownFileKind(" brain ".into()))
        );
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = "wm".parse::<FileKind>().unwrap_err();
        assert_eq!(err, FsError::UnknownFileKind("wm".into()));
        assert!(err.to_string().contains("unknown subject file kind"));
    }

    #[test]
    fn accessors() {
        let subj = Subject::new("sd", "bert");
        assert_eq!(subj.id(), "bert");
        assert_eq!(subj.sdir(), Path::new("sd"));
        assert_eq!(subj.dir(), PathBuf::from("sd/bert"));
    }
}
