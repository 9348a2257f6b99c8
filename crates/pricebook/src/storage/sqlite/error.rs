//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.

use pricebook_core::storage::RepositoryError;

const ENTITY: &str = "Offer";

fn map_rusqlite_error(err: &rusqlite::Error, id: Option<&str>) -> RepositoryError {
    let id = || id.unwrap_or("unknown").to_string();

    match err {
        // Duplicate offer_id
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: id(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type: ENTITY,
            id: id(),
        },

        rusqlite::Error::FromSqlConversionFailure(..) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    map_error(err, None)
}

/// Maps a tokio_rusqlite error to a RepositoryError, naming the offer involved.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    id: impl ToString,
) -> RepositoryError {
    map_error(err, Some(&id.to_string()))
}

fn map_error(err: tokio_rusqlite::Error, id: Option<&str>) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
