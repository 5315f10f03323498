use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Malformed input:\n{}", format_violations(.0))]
    Structure(Vec<Violation>),
    #[error("Validation failed:\n{}", format_violations(.0))]
    Validation(Vec<Violation>),
    #[error("Invalid layout configuration:\n{}", format_violations(.0))]
    Config(Vec<Violation>),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl SheetError {
    /// Every collected problem carried by this error, if it carries any
    pub fn violations(&self) -> &[Violation] {
        match self {
            SheetError::Structure(v) | SheetError::Validation(v) | SheetError::Config(v) => v,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// What part of the input a violation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Shape of the source file (wrong node types, missing keys)
    Structure,
    /// Title, section, subsection or entry content
    Content,
    /// Layout configuration values
    Config,
}

/// A single problem found in the input, located by a human-readable path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Location of the offending value, e.g. `sections[0] "Edit" / entries[2]`
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn structure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Structure,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn content(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Content,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Config,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
