use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    LockPoisoned(&'static str),
    NotFound { id: u64 },
    /// `create` has no id left to hand out.
    IdsExhausted,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::LockPoisoned(operation) => {
                write!(f, "catalog lock poisoned during {}", operation)
            }
            CatalogError::NotFound { id } => write!(f, "book {} not found", id),
            CatalogError::IdsExhausted => write!(f, "no book ids left to assign"),
        }
    }
}

impl std::error::Error for CatalogError {}
