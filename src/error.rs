use std::backtrace::Backtrace;

use crate::solver::engine::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported when a [`Csp`](crate::solver::model::Csp) is constructed
/// from inconsistently shaped input.
///
/// An unsatisfiable problem is *not* an error: the solver reports it as an
/// absent solution. These variants only cover models the engine cannot
/// meaningfully interpret at all.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("expected one domain per variable: {variables} variables but {domains} domains")]
    DomainCountMismatch { variables: usize, domains: usize },

    #[error("variable {0} is declared more than once")]
    DuplicateVariable(VariableId),

    #[error("constraint references undeclared variable {0}")]
    UndeclaredVariable(VariableId),

    #[error("binary constraint anchors both endpoints to variable {0}")]
    SelfReferentialConstraint(VariableId),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<ModelError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<ModelError> for Error {
    fn from(inner: ModelError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// Returns the underlying [`ModelError`].
    pub fn model_error(&self) -> &ModelError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
