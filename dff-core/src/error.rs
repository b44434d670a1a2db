use std::fmt;

#[derive(Debug)]
pub enum DffError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Serialization(String),
    IncompatibleCache { reason: String },
    ExpiredData,
    UnresolvedPosition,
    UnknownRole(String),
    Cache(String),
    Source(String),
}

impl DffError {
    /// True when the error is a missing file rather than an unusable one
    pub fn is_not_found(&self) -> bool {
        matches!(self, DffError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    pub fn is_incompatible(&self) -> bool {
        matches!(self, DffError::IncompatibleCache { .. })
    }
}

impl fmt::Display for DffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DffError::Io(e) => write!(f, "IO error: {}", e),
            DffError::Json(e) => write!(f, "JSON parsing error: {}", e),
            DffError::Serialization(e) => write!(f, "Serialization error: {}", e),
            DffError::IncompatibleCache { reason } => {
                write!(f, "Existing cache is incompatible: {}", reason)
            }
            DffError::ExpiredData => write!(f, "Existing data expired"),
            DffError::UnresolvedPosition => {
                write!(f, "Default game mode requires a concrete position")
            }
            DffError::UnknownRole(role) => write!(f, "Unknown role: {}", role),
            DffError::Cache(e) => write!(f, "Cache error: {}", e),
            DffError::Source(e) => write!(f, "Data source error: {}", e),
        }
    }
}

impl std::error::Error for DffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DffError::Io(e) => Some(e),
            DffError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DffError {
    fn from(err: std::io::Error) -> Self {
        DffError::Io(err)
    }
}

impl From<serde_json::Error> for DffError {
    fn from(err: serde_json::Error) -> Self {
        DffError::Json(err)
    }
}

impl From<bincode::Error> for DffError {
    fn from(err: bincode::Error) -> Self {
        DffError::Serialization(err.to_string())
    }
}
