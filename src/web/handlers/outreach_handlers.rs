// src/web/handlers/outreach_handlers.rs
use super::job_handlers::ApiError;
use crate::config::OutreachConfig;
use crate::outreach::{draft_messages, DraftedMessage, Profile};
use crate::web::types::{AppState, DraftMessagesRequest, ErrorResponse, SearchProfilesRequest};

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn search_profiles_handler(
    request: Json<SearchProfilesRequest>,
    state: &State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let request = request.into_inner();

    match state
        .search
        .search_profiles(&request.title, &request.company, &request.location)
        .await
    {
        Ok(profiles) => Ok(Json(profiles)),
        Err(e) => {
            error!("Profile search failed: {:#}", e);
            Err(Custom(
                Status::BadGateway,
                Json(ErrorResponse::new(format!("{:#}", e), "SEARCH_ERROR")),
            ))
        }
    }
}

pub async fn draft_messages_handler(
    request: Json<DraftMessagesRequest>,
    state: &State<AppState>,
) -> Json<Vec<DraftedMessage>> {
    let request = request.into_inner();
    let config = OutreachConfig {
        sender_name: state.outreach.sender_name.clone(),
        intro: request.intro.or_else(|| state.outreach.intro.clone()),
    };

    info!("Drafting messages for {} profiles", request.profiles.len());
    Json(draft_messages(&request.profiles, &config))
}
