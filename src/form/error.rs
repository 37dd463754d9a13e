use std::fmt;

use crate::error::CatalogError;

use super::FormField;

/// Required fields left empty, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

impl ValidationError {
    /// The field that should receive focus: the first missing one.
    pub fn focus(&self) -> Option<FormField> {
        self.missing.first().copied()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.missing.iter().map(|field| field.name()).collect();
        write!(f, "required fields missing: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    Validation(ValidationError),
    Catalog(CatalogError),
    /// Submit was requested while no form was open.
    NoForm,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(err) => write!(f, "{}", err),
            FormError::Catalog(err) => write!(f, "{}", err),
            FormError::NoForm => write!(f, "no form is open"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Validation(err) => Some(err),
            FormError::Catalog(err) => Some(err),
            FormError::NoForm => None,
        }
    }
}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::Validation(err)
    }
}

impl From<CatalogError> for FormError {
    fn from(err: CatalogError) -> Self {
        FormError::Catalog(err)
    }
}
