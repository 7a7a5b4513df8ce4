use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FsError {
    #[error("unknown subject file kind: '{0}'")]
    UnknownFileKind(String),

    #[error("invalid format for '{path}': unrecognized extension '{extension}'")]
    InvalidFormat { path: String, extension: String },

    #[error("unknown {what}: '{value}'")]
    UnknownValue { what: &'static str, value: String },

    #[error("invalid threshold: '{0}' is neither an integer nor a real number")]
    InvalidThreshold(String),
}
