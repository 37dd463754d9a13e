use std::fmt;

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    Catalog(CatalogError),
    Payload(String),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::Catalog(err) => write!(f, "{}", err),
            EmitError::Payload(msg) => write!(f, "change payload error: {}", msg),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<CatalogError> for EmitError {
    fn from(err: CatalogError) -> Self {
        EmitError::Catalog(err)
    }
}

impl From<serde_json::Error> for EmitError {
    fn from(err: serde_json::Error) -> Self {
        EmitError::Payload(err.to_string())
    }
}
