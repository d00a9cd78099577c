// src/api/error.rs

use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::{error, warn};
use warp::{http::StatusCode, reject::Reject, Rejection, Reply};

use crate::error::DataError;

/// Body sent for every failed `/api/programs` request.
pub const GENERIC_ERROR: &str = "Failed to load programs";

/// Reasons a request is answered with an error status.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("query parameter {name:?} is not an integer: {value:?}")]
    InvalidInteger { name: &'static str, value: String },

    #[error("page and limit must both be at least 1 (page={page}, limit={limit})")]
    InvalidPage { page: usize, limit: usize },

    #[error("query task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl Reject for RequestError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: message.to_string(),
        }),
        status,
    )
}

/// Turn any rejection into a JSON error body.
///
/// Request failures all collapse into the same 500 body; the cause is only logged.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "Not found"));
    }

    if let Some(e) = err.find::<RequestError>() {
        match e {
            RequestError::Data(_) | RequestError::Task(_) => error!("request failed: {}", e),
            _ => warn!("rejected request: {}", e),
        }
        return Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"));
    }

    error!("unhandled rejection: {:?}", err);
    Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR))
}
