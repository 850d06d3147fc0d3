//! Error handling utilities for repositories

use campus_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::RowNotFound => DomainError::EntityNotFound("row".to_string()),
        // a foreign key miss means the entity row does not exist
        SqlxError::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            DomainError::EntityNotFound(db_err.message().to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}
