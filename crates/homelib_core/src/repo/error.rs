//! Repository error taxonomy and SQLite constraint classification.

use crate::db::DbError;
use crate::model::draft::DraftValidationError;
use crate::model::entity::EntityId;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Draft failed normalization before any SQL ran.
    Validation(DraftValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Update target row does not exist.
    NotFound { table: &'static str, id: EntityId },
    /// Write collided with an existing unique key.
    UniquenessViolation { table: &'static str, detail: String },
    /// Write referenced a row that does not exist.
    ///
    /// `id` is `None` when SQLite reported the failure without naming the row.
    ReferenceError {
        table: &'static str,
        id: Option<EntityId>,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "row {id} not found in `{table}`"),
            Self::UniquenessViolation { table, detail } => {
                write!(f, "duplicate value in `{table}`: {detail}")
            }
            Self::ReferenceError { table, id: Some(id) } => {
                write!(f, "referenced row {id} does not exist in `{table}`")
            }
            Self::ReferenceError { table, id: None } => {
                write!(f, "write to `{table}` references a missing row")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "catalog repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::UniquenessViolation { .. } => None,
            Self::ReferenceError { .. } => None,
            Self::InvalidData(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DraftValidationError> for RepoError {
    fn from(value: DraftValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Classifies a failed write against `table` into a semantic error.
///
/// Unique and primary-key constraint failures become `UniquenessViolation`,
/// foreign-key failures become `ReferenceError`; anything else stays `Db`.
pub(crate) fn map_write_error(err: rusqlite::Error, table: &'static str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return RepoError::UniquenessViolation {
                    table,
                    detail: message.clone().unwrap_or_else(|| failure.to_string()),
                };
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return RepoError::ReferenceError { table, id: None };
            }
            _ => {}
        }
    }
    RepoError::from(err)
}
