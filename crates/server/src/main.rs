// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use sailplan_api::{
    ApiError, CabinGroupingRequest, CabinGroupingResponse, ImportReport, Role, SupplementInfo,
    SupplementQuery, SupplementUpdateRequest, SyncReport, SyncRequest, SyncStatusResponse,
    delete_sailing, get_supplement_info, import_supplements_csv, query_cabin_groups,
    reconcile_supplements, sync_status, update_supplement,
};
use sailplan_persistence::Persistence;

/// Sailplan Server - HTTP server for the vessel-schedule backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, behind a mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for the cabin-grouping endpoint.
#[derive(Debug, Deserialize)]
struct CabinGroupingQuery {
    /// Port of loading code.
    #[serde(rename = "polCd")]
    pol_cd: String,
    /// Port of discharge code.
    #[serde(rename = "podCd")]
    pod_cd: String,
}

/// Request body for the supplement edit endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateSupplementApiRequest {
    /// The role of the actor.
    actor_role: String,
    /// The supplement key and new operator values.
    #[serde(flatten)]
    update: SupplementUpdateRequest,
}

/// Request body for the CSV import endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImportSupplementsApiRequest {
    /// The role of the actor.
    actor_role: String,
    /// The CSV document to import.
    csv: String,
    /// Validate and report without persisting.
    #[serde(default)]
    dry_run: bool,
}

/// Request body for the batch reconciliation endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReconcileApiRequest {
    /// The role of the actor.
    actor_role: String,
    /// Explicit sailing IDs to reconcile; absent means all active.
    #[serde(default)]
    sailing_ids: Option<Vec<i64>>,
    /// Report what would change without mutating state.
    #[serde(default)]
    dry_run: bool,
    /// Rewrite identity-adjacent fields even when unchanged.
    #[serde(default)]
    force_update: bool,
}

/// Request body for the sailing delete endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeleteSailingApiRequest {
    /// The role of the actor.
    actor_role: String,
}

/// Response for the sailing delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeleteSailingApiResponse {
    /// The deleted sailing's ID.
    sailing_id: i64,
    /// Number of empty supplements removed by the cleanup path.
    supplements_deleted: usize,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "operator" => Ok(Role::Operator),
        "viewer" => Ok(Role::Viewer),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!(
                "Invalid role: '{role_str}'. Must be 'admin', 'operator', or 'viewer'"
            ),
        }),
    }
}

/// Handler for GET `/schedules/cabin-groups` endpoint.
///
/// Returns the shared-cabin groups for one route at its latest data
/// version. A route with no data yields an empty group list, not an
/// error.
async fn handle_cabin_groups(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CabinGroupingQuery>,
) -> Result<Json<CabinGroupingResponse>, HttpError> {
    info!(pol = %query.pol_cd, pod = %query.pod_cd, "Handling cabin grouping request");

    let request: CabinGroupingRequest = CabinGroupingRequest {
        pol_cd: query.pol_cd,
        pod_cd: query.pod_cd,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CabinGroupingResponse =
        query_cabin_groups(&mut persistence, Role::Viewer, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/supplements` endpoint.
///
/// Exact-key lookup of one carrier supplement.
async fn handle_get_supplement(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SupplementQuery>,
) -> Result<Json<SupplementInfo>, HttpError> {
    info!(carrier = %query.carrier_cd, vessel = %query.vessel, "Handling supplement lookup");

    let mut persistence = app_state.persistence.lock().await;
    let info: SupplementInfo = get_supplement_info(&mut persistence, Role::Viewer, &query)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for PUT `/supplements` endpoint.
///
/// Applies an operator edit to a supplement's commercial fields.
async fn handle_update_supplement(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateSupplementApiRequest>,
) -> Result<Json<SupplementInfo>, HttpError> {
    info!(
        role = %req.actor_role,
        carrier = %req.update.carrier_cd,
        vessel = %req.update.vessel,
        "Handling supplement update request"
    );

    let role: Role = parse_role(&req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let info: SupplementInfo = update_supplement(&mut persistence, role, &req.update)?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for POST `/supplements/import` endpoint.
///
/// Bulk-imports operator supplement data from a CSV document.
async fn handle_import_supplements(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ImportSupplementsApiRequest>,
) -> Result<Json<ImportReport>, HttpError> {
    info!(role = %req.actor_role, dry_run = req.dry_run, "Handling supplement CSV import");

    let role: Role = parse_role(&req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let report: ImportReport =
        import_supplements_csv(&mut persistence, role, &req.csv, req.dry_run)?;
    drop(persistence);

    Ok(Json(report))
}

/// Handler for POST `/sync/supplements` endpoint.
///
/// Runs batch supplement reconciliation.
async fn handle_reconcile(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ReconcileApiRequest>,
) -> Result<Json<SyncReport>, HttpError> {
    info!(
        role = %req.actor_role,
        dry_run = req.dry_run,
        force_update = req.force_update,
        "Handling batch reconciliation request"
    );

    let role: Role = parse_role(&req.actor_role)?;
    let request: SyncRequest = SyncRequest {
        sailing_ids: req.sailing_ids,
        dry_run: req.dry_run,
        force_update: req.force_update,
    };

    let mut persistence = app_state.persistence.lock().await;
    let report: SyncReport = reconcile_supplements(&mut persistence, role, &request)?;
    drop(persistence);

    Ok(Json(report))
}

/// Handler for GET `/sync/supplements/status` endpoint.
///
/// Reports supplement sync coverage statistics.
async fn handle_sync_status(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<SyncStatusResponse>, HttpError> {
    info!("Handling sync status request");

    let mut persistence = app_state.persistence.lock().await;
    let status: SyncStatusResponse = sync_status(&mut persistence, Role::Viewer)?;
    drop(persistence);

    Ok(Json(status))
}

/// Handler for DELETE `/sailings/{id}` endpoint.
///
/// Deletes a sailing and runs the supplement cleanup path.
async fn handle_delete_sailing(
    AxumState(app_state): AxumState<AppState>,
    Path(sailing_id): Path<i64>,
    Json(req): Json<DeleteSailingApiRequest>,
) -> Result<Json<DeleteSailingApiResponse>, HttpError> {
    info!(role = %req.actor_role, sailing_id, "Handling sailing delete request");

    let role: Role = parse_role(&req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let supplements_deleted: usize = delete_sailing(&mut persistence, role, sailing_id)?;
    drop(persistence);

    Ok(Json(DeleteSailingApiResponse {
        sailing_id,
        supplements_deleted,
    }))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/schedules/cabin-groups", get(handle_cabin_groups))
        .route(
            "/supplements",
            get(handle_get_supplement).put(handle_update_supplement),
        )
        .route("/supplements/import", post(handle_import_supplements))
        .route("/sync/supplements", post(handle_reconcile))
        .route("/sync/supplements/status", get(handle_sync_status))
        .route("/sailings/{id}", delete(handle_delete_sailing))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Sailplan Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
