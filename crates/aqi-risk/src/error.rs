use std::fmt;
use std::path::PathBuf;

/// Which of the three fitted artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Scaler,
    LabelEncoder,
    Classifier,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scaler => "scaler",
            Self::LabelEncoder => "label_encoder",
            Self::Classifier => "classifier",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An artifact could not be loaded at startup. Fatal: no predictions are
/// served without all three artifacts.
#[derive(Debug)]
pub enum ArtifactError {
    Io {
        artifact: ArtifactKind,
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        artifact: ArtifactKind,
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Invalid {
        artifact: ArtifactKind,
        reason: String,
    },
}

impl ArtifactError {
    pub fn artifact(&self) -> ArtifactKind {
        match self {
            Self::Io { artifact, .. }
            | Self::Parse { artifact, .. }
            | Self::Invalid { artifact, .. } => *artifact,
        }
    }

    pub(crate) fn invalid(artifact: ArtifactKind, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }

    pub(crate) fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::Parse {
                artifact, source, ..
            } => Self::Parse {
                artifact,
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                artifact,
                path,
                source,
            } => write!(f, "{artifact} artifact {}: {source}", path.display()),
            Self::Parse {
                artifact,
                path: Some(path),
                source,
            } => write!(
                f,
                "{artifact} artifact {} is not valid JSON: {source}",
                path.display()
            ),
            Self::Parse {
                artifact,
                path: None,
                source,
            } => write!(f, "{artifact} artifact is not valid JSON: {source}"),
            Self::Invalid { artifact, reason } => {
                write!(f, "{artifact} artifact is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// A single prediction failed. The request is dropped, the process keeps
/// serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The feature vector's shape or column order disagrees with what an
    /// artifact was fitted on.
    ArtifactMismatch {
        artifact: ArtifactKind,
        detail: String,
    },
    /// The classifier produced a class index the label encoder cannot decode.
    UnknownClassIndex { index: usize, known: usize },
}

impl PredictError {
    pub(crate) fn mismatch(artifact: ArtifactKind, detail: impl Into<String>) -> Self {
        Self::ArtifactMismatch {
            artifact,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArtifactMismatch { artifact, detail } => {
                write!(f, "{artifact} artifact mismatch: {detail}")
            }
            Self::UnknownClassIndex { index, known } => write!(
                f,
                "class index {index} outside label encoder range (0..{known})"
            ),
        }
    }
}

impl std::error::Error for PredictError {}
