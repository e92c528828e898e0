use std::error::Error as StdError;

use anyhow::Chain;
use itertools::Itertools;
use reqwest::StatusCode;

/// Failure of a single call to a remote service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Transport failure, including timeouts.
    #[error("failed to call the service")]
    Request(#[from] reqwest::Error),

    #[error("the service responded with `{status}`: {detail}")]
    Rejected { status: StatusCode, detail: String },

    /// The body is not the expected JSON, for example a required field is missing.
    #[error("malformed response")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("the selected file is empty")]
    EmptyFile,

    #[error("failed to analyze the invoice")]
    Service(#[from] ServiceError),
}

#[derive(Debug, thiserror::Error)]
#[error("failed to compare the tariffs")]
pub struct ComparisonError(#[from] pub ServiceError);

/// Display the error followed by all its sources: `outer: inner: root cause`.
pub fn display_chain(error: &(dyn StdError + 'static)) -> String {
    Chain::new(error).join(": ")
}
