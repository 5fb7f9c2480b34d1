use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::downloader;
use crate::proposal::Proposal;
use crate::sheet::{self, SheetData};

pub struct AppState {
    proposals: Mutex<Vec<Proposal>>,
}

#[derive(Deserialize)]
struct SaveQuery {
    filename: String,
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

#[derive(Serialize)]
struct CreateResponse {
    status: String,
    id: Option<String>,
    message: Option<String>,
}

pub async fn run(addr: &str, initial: Vec<Proposal>) -> Result<(), Box<dyn std::error::Error>> {
    // Setup app state
    let app_state = Arc::new(AppState {
        proposals: Mutex::new(initial),
    });

    // Build router
    let app = Router::new()
        .route("/api/proposals", get(list_proposals).post(create_proposal))
        .route("/api/sheet", get(get_sheet_data))
        .route("/api/sheet/matrix", get(get_sheet_matrix))
        .route("/api/export/csv", get(export_csv))
        .route("/api/export/xlsx", get(export_xlsx))
        .route("/api/save", post(save_snapshot))
        .route("/api/load", post(load_snapshot))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_proposals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let proposals = state.proposals.lock().unwrap();
    Json(proposals.clone())
}

async fn create_proposal(
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<Proposal>,
) -> impl IntoResponse {
    if !payload.has_valid_abm() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(CreateResponse {
                status: "error".to_string(),
                id: None,
                message: Some(format!("Invalid ABM code: {:?}", payload.abm_code)),
            }),
        );
    }

    if payload.id.is_empty() {
        payload.id = uuid::Uuid::new_v4().to_string();
    }
    if payload.created_at.is_none() {
        payload.created_at = Some(chrono::Utc::now());
    }

    let id = payload.id.clone();
    let mut proposals = state.proposals.lock().unwrap();
    proposals.push(payload);
    log::info!("Stored proposal {} ({} total)", id, proposals.len());

    (
        StatusCode::CREATED,
        Json(CreateResponse {
            status: "ok".to_string(),
            id: Some(id),
            message: None,
        }),
    )
}

async fn get_sheet_data(State(state): State<Arc<AppState>>) -> Json<SheetData> {
    let proposals = state.proposals.lock().unwrap();
    Json(sheet::generate_sheet(&proposals))
}

async fn get_sheet_matrix(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let proposals = state.proposals.lock().unwrap();
    let data = sheet::generate_sheet(&proposals);
    Json(sheet::format_for_sheets(&data))
}

async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let proposals = state.proposals.lock().unwrap();
    let data = sheet::generate_sheet(&proposals);

    match downloader::to_csv(&data) {
        Ok(csv) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
            .header(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"propostas.csv\"",
            )
            .body(axum::body::Body::from(csv))
            .unwrap(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn export_xlsx(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let proposals = state.proposals.lock().unwrap();
    let data = sheet::generate_sheet(&proposals);

    match downloader::to_xlsx(&data) {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            )
            .header(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"propostas.xlsx\"",
            )
            .body(axum::body::Body::from(Bytes::from(bytes)))
            .unwrap(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn save_snapshot(
    Query(params): Query<SaveQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let proposals = state.proposals.lock().unwrap();

    match crate::saving::save_snapshot(&proposals, &params.filename) {
        Ok(_) => Json(StatusResponse {
            status: "ok".to_string(),
            message: None,
        })
        .into_response(),
        Err(e) => Json(StatusResponse {
            status: "error".to_string(),
            message: Some(e.to_string()),
        })
        .into_response(),
    }
}

async fn load_snapshot(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Process the multipart form data
    let mut file_data = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let field_name = field.name().unwrap_or("unknown").to_string();

        if field_name == "snapshot" {
            file_data = field.bytes().await.unwrap_or_default().to_vec();
        }
    }

    if file_data.is_empty() {
        return Json(StatusResponse {
            status: "error".to_string(),
            message: Some("No file data received".to_string()),
        })
        .into_response();
    }

    // Try to deserialize the proposal store
    match snapshot_from_memory(&file_data) {
        Ok(loaded) => {
            let count = loaded.len();
            let mut proposals = state.proposals.lock().unwrap();
            *proposals = loaded;
            log::info!("Loaded snapshot with {} proposals", count);

            Json(StatusResponse {
                status: "ok".to_string(),
                message: None,
            })
            .into_response()
        }
        Err(e) => Json(StatusResponse {
            status: "error".to_string(),
            message: Some(format!("Failed to load snapshot: {}", e)),
        })
        .into_response(),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_string(&StatusResponse {
                status: "error".to_string(),
                message: Some(message.to_string()),
            })
            .unwrap(),
        ))
        .unwrap()
}

// Helper function to deserialize a proposal store from a memory buffer
fn snapshot_from_memory(buffer: &[u8]) -> std::io::Result<Vec<Proposal>> {
    use bincode::deserialize_from;
    use flate2::read::GzDecoder;
    use std::io::Cursor;

    let cursor = Cursor::new(buffer);
    let decoder = GzDecoder::new(cursor);
    let mut reader = std::io::BufReader::new(decoder);

    let proposals: Vec<Proposal> = deserialize_from(&mut reader)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(proposals)
}
