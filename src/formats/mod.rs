//! Readers turning raw election exports into engine input.

pub mod json;
pub mod pl_pkw;

use crate::error::ApportionmentError;
use crate::model::election::ConstituencyId;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: String, column: String },
    #[error("{path} row {row}: '{value}' in column '{column}' is not a valid number")]
    InvalidNumber {
        path: String,
        row: usize,
        column: String,
        value: String,
    },
    #[error("{path}: constituency id {id} is not a positive integer")]
    InvalidConstituencyId { path: String, id: i64 },
    #[error("constituency {constituency}: {votes} votes for '{committee}' do not fit in an election file")]
    CountOutOfRange {
        constituency: ConstituencyId,
        committee: String,
        votes: u64,
    },
    #[error(transparent)]
    Data(#[from] ApportionmentError),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
