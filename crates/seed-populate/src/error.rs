//! Error types for the populator.

use seed_core::Table;
use thiserror::Error;

/// Errors that abort a populate run.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// A store read or batch insert failed.
    #[error("{stage} failed: {source:#}")]
    Store {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A generator needs parent rows that do not exist.
    #[error("Cannot generate {entity}: no eligible rows in '{table}'")]
    MissingReferences { entity: &'static str, table: Table },
}

/// Wrap a store error with the stage it happened in.
pub(crate) fn store_error(stage: &'static str) -> impl FnOnce(anyhow::Error) -> PopulateError {
    move |source| PopulateError::Store { stage, source }
}
