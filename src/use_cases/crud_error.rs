use thiserror::Error;

use crate::use_cases::database::DatabaseError;

pub type CrudResult<T> = Result<T, CrudError>;

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("{0}")]
    Validation(String),
    #[error("only the creator of a {0} may change it")]
    NotOwner(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Action on a resource that does not exist.
    #[error("{0} not found")]
    NothingToDelete(&'static str),
    #[error("UserId missing or not valid")]
    UnknownUser,
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl From<DatabaseError> for CrudError {
    fn from(err: DatabaseError) -> Self {
        CrudError::DatabaseError(err.to_string())
    }
}
