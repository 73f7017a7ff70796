//! # API REST
//!
//! HTTP surface for doclist.
//!
//! Handles:
//! - the server-rendered listing page (`GET /`), whose URL query string is the filter state
//! - JSON endpoints for the derived view, specialty facets and search suggestions
//! - OpenAPI/Swagger documentation and CORS
//!
//! All filtering, sorting and query-string handling is delegated to `doclist-core`.

#![warn(rust_2018_idioms)]

pub mod render;

use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    HealthRes, HealthService, ListDoctorsRes, SpecialtiesRes, Suggestion, SuggestionsRes,
};
use doclist_core::{query, Directory, ListingPage};

/// Application state shared across handlers
///
/// Holds the write-once directory. Handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, listing_page, list_doctors, list_specialties, list_suggestions),
    components(schemas(
        HealthRes,
        ListDoctorsRes,
        SpecialtiesRes,
        Suggestion,
        SuggestionsRes,
        doclist_core::DoctorRecord,
        doclist_types::Clinic,
        doclist_types::ClinicAddress,
    ))
)]
pub struct ApiDoc;

/// Build the doclist router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(listing_page))
        .route("/health", get(health))
        .route("/doctors", get(list_doctors))
        .route("/specialties", get(list_specialties))
        .route("/suggestions", get(list_suggestions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Reports liveness and whether the directory fetch is still pending.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.directory.is_loading()))
}

#[utoipa::path(
    get,
    path = "/",
    params(
        ("consultationType" = Option<String>, Query, description = "`Video Consult` or `In Clinic`"),
        ("specialties" = Option<String>, Query, description = "Comma-separated specialty names"),
        ("feesSort" = Option<String>, Query, description = "`asc` or `desc`"),
        ("experienceSort" = Option<String>, Query, description = "`asc` or `desc`"),
        ("search" = Option<String>, Query, description = "Case-insensitive name search"),
    ),
    responses(
        (status = 200, description = "Rendered listing page", body = String, content_type = "text/html"),
        (status = 303, description = "Redirect to the canonical query string")
    )
)]
/// Server-rendered listing page
///
/// The query string is the filter specification. A request whose query string is not in
/// canonical form (empty parameters, repeated `specialties`, malformed values, unsorted
/// specialties) is redirected to the canonical URL so the address bar always mirrors the
/// filters actually applied.
#[axum::debug_handler]
async fn listing_page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let raw = raw.unwrap_or_default();
    let page = ListingPage::open(&state.directory, &raw);

    if !query::is_canonical(&raw) {
        tracing::debug!("redirecting {:?} to {}", raw, page.location());
        return Redirect::to(&page.location()).into_response();
    }

    Html(render::listing_page(&page)).into_response()
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(
        ("consultationType" = Option<String>, Query, description = "`Video Consult` or `In Clinic`"),
        ("specialties" = Option<String>, Query, description = "Comma-separated specialty names"),
        ("feesSort" = Option<String>, Query, description = "`asc` or `desc`"),
        ("experienceSort" = Option<String>, Query, description = "`asc` or `desc`"),
        ("search" = Option<String>, Query, description = "Case-insensitive name search"),
    ),
    responses(
        (status = 200, description = "Filtered and sorted doctors", body = ListDoctorsRes)
    )
)]
/// List doctors matching the filter query
///
/// Malformed parameters fall back to their defaults; the response carries the canonical query
/// string that was actually applied.
#[axum::debug_handler]
async fn list_doctors(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<ListDoctorsRes> {
    let page = ListingPage::open(&state.directory, raw.as_deref().unwrap_or_default());

    Json(ListDoctorsRes {
        loading: page.is_loading(),
        query: page.query().to_string(),
        total: page.raw().len(),
        doctors: page.view().iter().map(|doctor| (*doctor).clone()).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/specialties",
    responses(
        (status = 200, description = "Distinct specialty names", body = SpecialtiesRes)
    )
)]
/// List the specialty facets of the directory
#[axum::debug_handler]
async fn list_specialties(State(state): State<AppState>) -> Json<SpecialtiesRes> {
    let specialties = doclist_core::facets::specialty_facets(state.directory.records())
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(SpecialtiesRes { specialties })
}

#[utoipa::path(
    get,
    path = "/suggestions",
    params(
        ("search" = Option<String>, Query, description = "Partial doctor name (at least 2 characters)")
    ),
    responses(
        (status = 200, description = "Up to three matching doctor names", body = SuggestionsRes)
    )
)]
/// Suggest doctor names for a partial search
#[axum::debug_handler]
async fn list_suggestions(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<SuggestionsRes> {
    let page = ListingPage::open(&state.directory, raw.as_deref().unwrap_or_default());
    let suggestions = page.suggestions().into_iter().map(Suggestion::from).collect();
    Json(SuggestionsRes { suggestions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use doclist_core::DoctorRecord;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn records() -> Vec<DoctorRecord> {
        doclist_types::decode_directory(
            r#"[
                { "id": "a", "name": "Dr. Priya Shah", "fees": "₹200", "experience": "5 Years",
                  "specialities": [{ "name": "Dentist" }], "video_consult": true },
                { "id": "b", "name": "Dr. Arjun Mehta", "fees": "₹100", "experience": "10 Years",
                  "specialities": [{ "name": "General Physician" }], "in_clinic": true }
            ]"#
            .as_bytes(),
        )
        .unwrap()
    }

    fn app(directory: Directory) -> Router {
        router(AppState::new(Arc::new(directory)))
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_reports_loading() {
        let (status, _, body) = send(app(Directory::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let res: HealthRes = serde_json::from_str(&body).unwrap();
        assert!(res.ok);
        assert!(res.loading);
    }

    #[tokio::test]
    async fn doctors_endpoint_applies_filters() {
        let (status, _, body) = send(app(Directory::loaded(records())), "/doctors?feesSort=asc").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["loading"], false);
        assert_eq!(json["query"], "feesSort=asc");
        assert_eq!(json["total"], 2);
        assert_eq!(json["doctors"][0]["id"], "b");
        assert_eq!(json["doctors"][1]["id"], "a");
    }

    #[tokio::test]
    async fn doctors_endpoint_ignores_malformed_parameters() {
        let (_, _, body) = send(
            app(Directory::loaded(records())),
            "/doctors?consultationType=Phone&search=priya",
        )
        .await;

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["query"], "search=priya");
        assert_eq!(json["doctors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_redirects_to_canonical_query() {
        let (status, headers, _) = send(
            app(Directory::loaded(records())),
            "/?search=&specialties=General+Physician&specialties=Dentist&feesSort=up",
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            headers.get(header::LOCATION).unwrap(),
            "/?specialties=Dentist%2CGeneral+Physician"
        );
    }

    #[tokio::test]
    async fn listing_redirects_stray_question_mark() {
        let (status, headers, _) =
            send(app(Directory::loaded(records())), "/??feesSort=asc").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(header::LOCATION).unwrap(), "/?feesSort=asc");
    }

    #[tokio::test]
    async fn listing_renders_canonical_query() {
        let (status, _, body) = send(
            app(Directory::loaded(records())),
            "/?consultationType=In+Clinic",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("data-testid=\"doctor-card\"").count(), 1);
        assert!(body.contains("Dr. Arjun Mehta"));
    }

    #[tokio::test]
    async fn specialties_and_suggestions() {
        let (_, _, body) = send(app(Directory::loaded(records())), "/specialties").await;
        let res: SpecialtiesRes = serde_json::from_str(&body).unwrap();
        assert_eq!(res.specialties, vec!["Dentist", "General Physician"]);

        let (_, _, body) = send(app(Directory::loaded(records())), "/suggestions?search=ar").await;
        let res: SuggestionsRes = serde_json::from_str(&body).unwrap();
        assert_eq!(res.suggestions.len(), 1);
        assert_eq!(res.suggestions[0].name, "Dr. Arjun Mehta");
    }
}
