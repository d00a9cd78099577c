// src/api/mod.rs

pub mod error;
pub mod params;

pub use error::{handle_rejection, RequestError, GENERIC_ERROR};
pub use params::ProgramParams;

use serde::Serialize;
use std::{convert::Infallible, sync::Arc, time::Instant};
use tracing::{error, info};
use warp::{reject::Rejection, reply::Reply, Filter};

use crate::config::ServerConfig;
use crate::dataset::ProgramRecord;
use crate::query::{ProgramCatalog, ProgramPage};

/// Everything a request handler needs; built once at startup.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub catalog: ProgramCatalog,
    pub default_limit: usize,
    /// Surface dataset load failures as 500 instead of an empty page.
    pub strict_load: bool,
}

impl ApiState {
    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self {
            catalog: ProgramCatalog::new(&cfg.data_path, cfg.filter_settings()),
            default_limit: cfg.default_limit,
            strict_load: cfg.strict_load,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgramsResponse {
    pub page: usize,
    pub limit: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub data: Vec<ProgramRecord>,
}

fn with_state(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (Arc<ApiState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// `GET /api/programs`, with JSON error bodies, CORS for any origin and request tracing.
pub fn routes(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + Send + Sync + 'static {
    // `query::raw` rejects requests without a query string
    let raw_query = warp::query::raw()
        .or(warp::any().map(String::new))
        .unify();

    let programs = warp::path!("api" / "programs")
        .and(warp::get())
        .and(raw_query)
        .and(with_state(state))
        .and_then(list_programs);

    let cors = warp::cors().allow_any_origin().allow_method("GET");

    programs
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}

async fn list_programs(raw: String, state: Arc<ApiState>) -> Result<impl Reply, Rejection> {
    let start = Instant::now();
    let query = ProgramParams::parse(&raw)
        .into_query(state.default_limit)
        .map_err(warp::reject::custom)?;
    let page = query.page;

    // file read + filtering is synchronous; keep it off the reactor
    let result = tokio::task::spawn_blocking({
        let state = Arc::clone(&state);
        move || state.catalog.query(&query)
    })
    .await
    .map_err(|e| warp::reject::custom(RequestError::Task(e.to_string())))?;

    let ProgramPage {
        records,
        total_count,
    } = match result {
        Ok(found) => found,
        Err(e) if state.strict_load => {
            return Err(warp::reject::custom(RequestError::Data(e)));
        }
        Err(e) => {
            error!(
                path = %state.catalog.data_path().display(),
                "error loading and filtering data: {}", e
            );
            ProgramPage::default()
        }
    };

    info!(
        page = page.page,
        limit = page.limit,
        total_count,
        returned = records.len(),
        elapsed = ?start.elapsed(),
        "served programs"
    );

    Ok(warp::reply::json(&ProgramsResponse {
        page: page.page,
        limit: page.limit,
        total_count,
        total_pages: page.total_pages(total_count),
        data: records,
    }))
}
