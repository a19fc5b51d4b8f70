//! Extractors whose failures render as `{"error": ...}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::HubError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HubError))]
pub struct JsonBody<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HubError))]
pub struct QueryParams<T>(pub T);
