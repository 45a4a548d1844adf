// src/web/handlers/job_handlers.rs
use crate::extraction::JobRecord;
use crate::web::types::{AppState, ErrorResponse};

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub type ApiError = Custom<Json<ErrorResponse>>;

pub async fn parse_job_handler(
    url: Option<String>,
    state: &State<AppState>,
) -> Result<Json<JobRecord>, ApiError> {
    let url = match url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        Some(url) => url,
        None => {
            warn!("Parse job request without a URL");
            return Err(Custom(
                Status::BadRequest,
                Json(ErrorResponse::new("Missing job URL", "MISSING_URL")),
            ));
        }
    };

    info!("Parsing job posting: {}", url);

    match state.parser.extract_job(&url).await {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            error!("Failed to fetch job posting {}: {:#}", url, e);
            Err(Custom(
                Status::BadGateway,
                Json(
                    ErrorResponse::new(format!("{:#}", e), "FETCH_ERROR").with_suggestions(vec![
                        "Verify the job URL is publicly accessible".to_string(),
                        "The posting may require authentication or no longer exist".to_string(),
                    ]),
                ),
            ))
        }
    }
}
