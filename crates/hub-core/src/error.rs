//! Error types for domain parsing and import.

use thiserror::Error;

/// A stored or submitted string did not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown channel: {0}")]
    Channel(String),

    #[error("unknown plan: {0}")]
    Plan(String),

    #[error("unknown request status: {0}")]
    RequestStatus(String),

    #[error("unknown urgency: {0}")]
    Urgency(String),

    #[error("unknown FAQ source: {0}")]
    FaqSource(String),
}

/// Errors raised while importing FAQs from CSV.
///
/// The messages are shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("CSV file must have at least a header and one data row")]
    TooFewLines,

    #[error("CSV must contain 'question' and 'answer' columns")]
    MissingColumns,

    #[error("No valid FAQ entries found in CSV")]
    NoEntries,
}
