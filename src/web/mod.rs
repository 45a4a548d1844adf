// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::extraction::JobRecord;
use crate::outreach::{DraftedMessage, Profile};
use anyhow::Result;
use handlers::ApiError;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/parse-job?<url>")]
pub async fn parse_job_get(
    url: Option<String>,
    state: &State<AppState>,
) -> Result<Json<JobRecord>, ApiError> {
    handlers::parse_job_handler(url, state).await
}

#[post("/parse-job", data = "<request>")]
pub async fn parse_job_post(
    request: Option<Json<ParseJobRequest>>,
    state: &State<AppState>,
) -> Result<Json<JobRecord>, ApiError> {
    let url = request.and_then(|r| r.into_inner().url);
    handlers::parse_job_handler(url, state).await
}

#[post("/search-profiles", data = "<request>")]
pub async fn search_profiles(
    request: Json<SearchProfilesRequest>,
    state: &State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    handlers::search_profiles_handler(request, state).await
}

#[post("/draft-messages", data = "<request>")]
pub async fn draft_messages(
    request: Json<DraftMessagesRequest>,
    state: &State<AppState>,
) -> Json<Vec<DraftedMessage>> {
    handlers::draft_messages_handler(request, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    Json("OK")
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(
        ErrorResponse::new("Invalid request format", "BAD_REQUEST").with_suggestions(vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ]),
    )
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Request body did not match the expected shape",
        "UNPROCESSABLE_ENTITY",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(
        ErrorResponse::new("Internal server error", "INTERNAL_ERROR").with_suggestions(vec![
            "Try again in a few moments".to_string(),
        ]),
    )
}

pub fn build_rocket(state: AppState, port: u16) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount(
            "/api",
            routes![
                parse_job_get,
                parse_job_post,
                search_profiles,
                draft_messages,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(state: AppState, port: u16) -> Result<()> {
    info!("Starting job agent API server on http://0.0.0.0:{}", port);

    build_rocket(state, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutreachConfig;
    use crate::core::{LanguageModel, PageFetcher};
    use crate::extraction::{JobParser, PromptTemplate};
    use crate::outreach::ProfileSearch;
    use async_trait::async_trait;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use std::sync::Arc;

    struct FixedPage;

    #[async_trait]
    impl PageFetcher for FixedPage {
        async fn fetch(&self, _url: &str) -> anyhow::Result<String> {
            Ok("<html><head><title>Web Developer</title></head><body></body></html>".to_string())
        }
    }

    struct ProseModel;

    #[async_trait]
    impl LanguageModel for ProseModel {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok("Sorry, I can't help with that.".to_string())
        }
    }

    async fn client() -> Client {
        let state = AppState {
            parser: JobParser::new(
                Arc::new(FixedPage),
                Arc::new(ProseModel),
                PromptTemplate::default(),
                8000,
            ),
            search: ProfileSearch::new("http://127.0.0.1:9/search.json", None).unwrap(),
            outreach: OutreachConfig::default(),
        };
        Client::tracked(build_rocket(state, 0)).await.unwrap()
    }

    #[rocket::async_test]
    async fn test_parse_job_requires_url() {
        let client = client().await;

        let response = client.get("/api/parse-job").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Missing job URL");

        let response = client
            .post("/api/parse-job")
            .header(ContentType::JSON)
            .body(r#"{"url": "  "}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[rocket::async_test]
    async fn test_parse_job_returns_record() {
        let client = client().await;

        let response = client
            .post("/api/parse-job")
            .header(ContentType::JSON)
            .body(r#"{"url": "https://jobs.lever.co/initech/abc"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let record: JobRecord = response.into_json().await.unwrap();
        assert_eq!(record.title, "Web Developer");
        assert_eq!(record.company, "Initech");
        assert_eq!(record.location, "");
    }

    #[rocket::async_test]
    async fn test_draft_messages_route() {
        let client = client().await;

        let response = client
            .post("/api/draft-messages")
            .header(ContentType::JSON)
            .body(
                r#"{"profiles": [{"title": "Jane Doe - SWE", "url": "https://linkedin.com/in/jane",
                    "query_type": "individual_contributor", "company": "Acme"}]}"#,
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let drafted: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(drafted[0]["url"], "https://linkedin.com/in/jane");
        assert!(drafted[0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Hi Jane Doe,"));
    }
}
