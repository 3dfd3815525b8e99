use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::{layout_table, TableLayout};
use crate::seating::models::{Table, TableShape};
use crate::seating::summary::SeatingSummary;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TableListResponse {
    pub tables: Vec<Table>,
    pub summary: SeatingSummary,
}

#[derive(Deserialize)]
pub struct CreateTableRequest {
    pub id: String,
    pub shape: TableShape,
    pub capacity: i64,
}

#[derive(Deserialize)]
pub struct AssignSeatsRequest {
    pub seats: Vec<String>,
}

/// GET /api/v1/tables
pub async fn handle_list_tables(
    State(state): State<AppState>,
) -> Result<Json<TableListResponse>, AppError> {
    let engine = state.seating.lock().await;
    Ok(Json(TableListResponse {
        tables: engine.tables().to_vec(),
        summary: engine.summary(),
    }))
}

/// POST /api/v1/tables/reload
pub async fn handle_reload_tables(
    State(state): State<AppState>,
) -> Result<Json<TableListResponse>, AppError> {
    let mut engine = state.seating.lock().await;
    let tables = engine.load_all().await?.to_vec();
    Ok(Json(TableListResponse {
        tables,
        summary: engine.summary(),
    }))
}

/// POST /api/v1/tables
pub async fn handle_create_table(
    State(state): State<AppState>,
    Json(req): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<Table>), AppError> {
    let mut engine = state.seating.lock().await;
    let table = engine
        .create_table(&req.id, req.shape, req.capacity)
        .await?
        .clone();
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/v1/tables/:id/seats
pub async fn handle_assign_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AssignSeatsRequest>,
) -> Result<Json<Table>, AppError> {
    let mut engine = state.seating.lock().await;
    let table = engine.assign_seats(&id, req.seats).await?.clone();
    Ok(Json(table))
}

/// DELETE /api/v1/tables/:id
pub async fn handle_delete_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut engine = state.seating.lock().await;
    engine.delete_table(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/tables/:id/layout
pub async fn handle_table_layout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TableLayout>, AppError> {
    let engine = state.seating.lock().await;
    let table = engine
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Table '{id}' not found")))?;
    Ok(Json(layout_table(table)))
}
