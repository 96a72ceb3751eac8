use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    calculator,
    config::Config,
    error::ApiError,
    etuovi::etuovi::Etuovi,
    export::{self, ResultTable, TableStore},
    models::{
        criteria::SearchCriteria,
        property::{FinanceProperty, MetricResult, PropertyRecord},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub etuovi: Arc<Etuovi>,
    tables: TableStore,
}

impl AppState {
    pub fn new(config: Arc<Config>, etuovi: Etuovi) -> AppState {
        AppState {
            config,
            etuovi: Arc::new(etuovi),
            tables: TableStore::new(),
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub records: Vec<PropertyRecord>,
    pub table: String,
}

#[derive(Deserialize)]
pub struct CalculationRequest {
    pub properties: Vec<FinanceProperty>,
}

#[derive(Serialize)]
pub struct MetricFailure {
    pub kohdenumero: String,
    pub detail: String,
}

#[derive(Serialize)]
pub struct CalculationResponse {
    pub results: Vec<MetricResult>,
    pub errors: Vec<MetricFailure>,
    pub table: String,
    pub status: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search_apartments))
        .route("/calculate-metrics", post(calculate_metrics))
        .route("/download/:table", get(download_table))
        .layer(middleware::from_fn(cors_layer))
        .with_state(state)
}

pub async fn start_http_server(
    state: AppState,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) {
    let bind_addr = state
        .config
        .http_bind_address
        .clone()
        .unwrap_or_else(|| "0.0.0.0:8000".to_string());

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind http listener on {}: {}", bind_addr, err));
    let app = router(state);

    info!("Listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .expect("HTTP server crashed");
}

async fn cors_layer(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cors_headers(response.headers_mut());
        *response.status_mut() = StatusCode::NO_CONTENT;
        response
    } else {
        let mut response = next.run(req).await;
        apply_cors_headers(response.headers_mut());
        response
    }
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "velaton backend is running" }))
}

async fn search_apartments(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<serde_json::Value>, ApiError> {
    criteria.validate()?;

    let records = state
        .etuovi
        .search(&criteria, calculator::current_year())
        .await?;

    if records.is_empty() {
        info!("No listings matched the criteria for '{}'", criteria.location);
        return Ok(Json(json!({ "message": "Ei kriteerit täyttäviä kohteita." })));
    }

    let table = state.tables.store("results", ResultTable::Records(records.clone()));
    let response = SearchResponse { records, table };
    Ok(Json(json!(response)))
}

async fn calculate_metrics(
    State(state): State<AppState>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let current_year = calculator::current_year();

    let mut results: Vec<MetricResult> = Vec::new();
    let mut errors: Vec<MetricFailure> = Vec::new();

    for property in &request.properties {
        match calculator::metrics_for(property, current_year) {
            Ok(metrics) => results.push(metrics),
            Err(e) => {
                warn!("Metrics failed for property {}: {}", property.kohdenumero, e);
                errors.push(MetricFailure {
                    kohdenumero: property.kohdenumero.clone(),
                    detail: e.to_string(),
                });
            }
        }
    }

    if results.is_empty() && !errors.is_empty() {
        return Err(ApiError::Calculation(
            "no property in the request produced metrics".to_string(),
        ));
    }

    let table = state.tables.store("metrics", ResultTable::Metrics(results.clone()));
    Ok(Json(CalculationResponse {
        results,
        errors,
        table,
        status: "success".to_string(),
    }))
}

async fn download_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Response, ApiError> {
    // Downloading consumes the entry; the map holds nothing for requests
    // whose results have already been served.
    let snapshot = state
        .tables
        .take(&table)
        .ok_or_else(|| ApiError::TableNotFound(table.clone()))?;

    let bytes = export::workbook_bytes(&snapshot)?;
    let path = export::persist(&table, &bytes, &state.config.export_dir)?;
    info!("Exported table '{}' to {}", table, path.display());

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{table}.xlsx\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
