// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use ratebook_api::{
    ApiError, FormatInfo, ImportHistoryResponse, ImportRatesRequest, ImportRatesResponse,
    ListFormatsResponse, ListRateConfigsResponse, QuoteShipmentRequest, QuoteSkidsRequest,
    RateConfigResponse, RateQuoteResponse, RemoveRatesResponse, TemplateResponse,
    ValidateRatesRequest, ValidateRatesResponse, get_format, get_import_history, get_rate_config,
    get_template, import_rates, list_formats, list_rate_configs, quote_shipment, quote_skids,
    remove_rates, validate_rates,
};
use ratebook_audit::{Actor, Cause};
use ratebook_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Ratebook Server - HTTP server for carrier rate normalization
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// Writers are serialized through the mutex; the last import wins.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// API request for importing rate files.
///
/// Carries the audit context in addition to the rate upload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImportRatesApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    carrier_id: String,
    /// The pricing format key.
    format: String,
    config_name: String,
    currency: String,
    /// CSV text keyed by template part.
    files: BTreeMap<String, String>,
}

/// API request for removing a carrier's rates.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RemoveRatesApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Individual validation errors, when an upload failed validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    errors: Vec<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } | ApiError::InvalidCsvFormat { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ValidationFailed { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ResourceNotFound { .. } | ApiError::RateUnavailable { .. } => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let errors: Vec<String> = match &err {
            ApiError::ValidationFailed { errors } => errors.clone(),
            _ => Vec::new(),
        };
        Self {
            status,
            message: err.to_string(),
            errors,
        }
    }
}

fn audit_context(actor_id: String, cause_id: String, cause_description: String) -> (Actor, Cause) {
    (
        Actor::new(actor_id, String::from("user")),
        Cause::new(cause_id, cause_description),
    )
}

/// Handler for GET `/formats` endpoint.
#[allow(clippy::unused_async)]
async fn handle_list_formats() -> Json<ListFormatsResponse> {
    Json(list_formats())
}

/// Handler for GET `/formats/{format}` endpoint.
#[allow(clippy::unused_async)]
async fn handle_get_format(Path(format): Path<String>) -> Result<Json<FormatInfo>, HttpError> {
    Ok(Json(get_format(&format)?))
}

/// Handler for GET `/templates/{format}/{part}` endpoint.
///
/// Returns the template for one part of a format, including its CSV text.
#[allow(clippy::unused_async)]
async fn handle_get_template(
    Path((format, part)): Path<(String, String)>,
) -> Result<Json<TemplateResponse>, HttpError> {
    Ok(Json(get_template(&format, &part)?))
}

/// Handler for POST `/rates/validate` endpoint.
#[allow(clippy::unused_async)]
async fn handle_validate_rates(
    Json(req): Json<ValidateRatesRequest>,
) -> Result<Json<ValidateRatesResponse>, HttpError> {
    info!(format = %req.format, files = req.files.len(), "Handling validate_rates request");
    Ok(Json(validate_rates(&req)?))
}

/// Handler for POST `/rates/import` endpoint.
///
/// Replaces the carrier's rate configuration.
async fn handle_import_rates(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ImportRatesApiRequest>,
) -> Result<Json<ImportRatesResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        carrier_id = %req.carrier_id,
        format = %req.format,
        "Handling import_rates request"
    );

    let (actor, cause) = audit_context(req.actor_id, req.cause_id, req.cause_description);
    let import_request: ImportRatesRequest = ImportRatesRequest {
        carrier_id: req.carrier_id,
        format: req.format,
        config_name: req.config_name,
        currency: req.currency,
        files: req.files,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportRatesResponse =
        import_rates(&mut persistence, import_request, actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/rates` endpoint.
async fn handle_list_rate_configs(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListRateConfigsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_rate_configs(&mut persistence)?))
}

/// Handler for GET `/rates/{carrier_id}` endpoint.
async fn handle_get_rate_config(
    AxumState(app_state): AxumState<AppState>,
    Path(carrier_id): Path<String>,
) -> Result<Json<RateConfigResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_rate_config(&mut persistence, &carrier_id)?))
}

/// Handler for DELETE `/rates/{carrier_id}` endpoint.
///
/// Returns the carrier to manual rating.
async fn handle_remove_rates(
    AxumState(app_state): AxumState<AppState>,
    Path(carrier_id): Path<String>,
    Json(req): Json<RemoveRatesApiRequest>,
) -> Result<Json<RemoveRatesResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        carrier_id = %carrier_id,
        "Handling remove_rates request"
    );

    let (actor, cause) = audit_context(req.actor_id, req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(remove_rates(
        &mut persistence,
        &carrier_id,
        actor,
        cause,
    )?))
}

/// Handler for GET `/rates/{carrier_id}/history` endpoint.
async fn handle_get_import_history(
    AxumState(app_state): AxumState<AppState>,
    Path(carrier_id): Path<String>,
) -> Result<Json<ImportHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_import_history(&mut persistence, &carrier_id)?))
}

/// Handler for POST `/quote` endpoint.
async fn handle_quote_shipment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<QuoteShipmentRequest>,
) -> Result<Json<RateQuoteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(quote_shipment(&mut persistence, &req)?))
}

/// Handler for POST `/quote/skids` endpoint.
async fn handle_quote_skids(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<QuoteSkidsRequest>,
) -> Result<Json<RateQuoteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(quote_skids(&mut persistence, &req)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/formats", get(handle_list_formats))
        .route("/formats/{format}", get(handle_get_format))
        .route("/templates/{format}/{part}", get(handle_get_template))
        .route("/rates/validate", post(handle_validate_rates))
        .route("/rates/import", post(handle_import_rates))
        .route("/rates", get(handle_list_rate_configs))
        .route(
            "/rates/{carrier_id}",
            get(handle_get_rate_config).delete(handle_remove_rates),
        )
        .route("/rates/{carrier_id}/history", get(handle_get_import_history))
        .route("/quote", post(handle_quote_shipment))
        .route("/quote/skids", post(handle_quote_skids))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Ratebook Server");

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

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use tower::ServiceExt;

    const MAPPING_CSV: &str = "City,Province,Terminal_Code,Terminal_Name\n\
Kitchener,ON,KIT,Kitchener Terminal\n\
Toronto,ON,TOR,Toronto Terminal\n\
Montreal,QC,MTL,Montreal Terminal\n";

    const RATES_CSV: &str = "Origin_Terminal,Destination_Terminal,Weight_Min,Weight_Max,Rate_Type,Rate_Value,Min_Charge,Fuel_Surcharge,Transit_Days\n\
KIT,TOR,0,500,PER_100LBS,78.11,125,0,1\n\
KIT,TOR,501,1000,PER_100LBS,42.05,275,0,1\n";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    fn create_import_request(carrier_id: &str, rates_csv: &str) -> ImportRatesApiRequest {
        let mut files: BTreeMap<String, String> = BTreeMap::new();
        files.insert(String::from("terminal_mapping"), MAPPING_CSV.to_string());
        files.insert(String::from("terminal_rates"), rates_csv.to_string());
        ImportRatesApiRequest {
            actor_id: String::from("rates-admin"),
            cause_id: String::from("ticket-42"),
            cause_description: String::from("Spring tariff"),
            carrier_id: carrier_id.to_string(),
            format: String::from("terminal_weight_based"),
            config_name: String::from("2026 Tariff"),
            currency: String::from("CAD"),
            files,
        }
    }

    fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_formats() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get_request("/formats")).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let formats: ListFormatsResponse = body_json(response).await;
        assert_eq!(formats.formats.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_format_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get_request("/formats/per_pallet")).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let error: ErrorResponse = body_json(response).await;
        assert!(error.error);
    }

    #[tokio::test]
    async fn test_get_template() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(get_request("/templates/zone_matrix/zone_matrix"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let template: TemplateResponse = body_json(response).await;
        assert_eq!(template.file_name, "zone_matrix_zone_matrix.csv");
    }

    #[tokio::test]
    async fn test_validate_reports_errors_with_ok_status() {
        let app: Router = build_router(create_test_app_state());
        let mut files: BTreeMap<String, String> = BTreeMap::new();
        files.insert(
            String::from("skid_rates"),
            String::from("Skid_Count,Rate,Fuel_Surcharge\n30,185,20\n"),
        );
        let request: ValidateRatesRequest = ValidateRatesRequest {
            format: String::from("skid_based"),
            files,
        };

        let response = app
            .oneshot(json_request("POST", "/rates/validate", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let report: ValidateRatesResponse = body_json(response).await;
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_import_then_quote() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/rates/import",
                &create_import_request("CARRIER-1", RATES_CSV),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let imported: ImportRatesResponse = body_json(response).await;
        assert_eq!(imported.total_records, 5);

        let quote_request: QuoteShipmentRequest = QuoteShipmentRequest {
            carrier_id: String::from("CARRIER-1"),
            origin_city: String::from("Kitchener"),
            origin_province: String::from("ON"),
            destination_city: String::from("Toronto"),
            destination_province: String::from("ON"),
            weight: 300.0,
        };
        let response = app
            .oneshot(json_request("POST", "/quote", &quote_request))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let quote: RateQuoteResponse = body_json(response).await;
        assert!((quote.total_charge - 234.33).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_import_returns_unprocessable_with_errors() {
        let app: Router = build_router(create_test_app_state());
        let rates: String = format!("{RATES_CSV}KIT,TOR,400,600,PER_100LBS,50,100,0,1\n");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/rates/import",
                &create_import_request("CARRIER-1", &rates),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.errors.len(), 1);
        assert!(error.errors[0].contains("overlaps"));

        let response = app.oneshot(get_request("/rates/CARRIER-1")).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_rates_then_history() {
        let app: Router = build_router(create_test_app_state());

        app.clone()
            .oneshot(json_request(
                "POST",
                "/rates/import",
                &create_import_request("CARRIER-1", RATES_CSV),
            ))
            .await
            .unwrap();

        let remove: RemoveRatesApiRequest = RemoveRatesApiRequest {
            actor_id: String::from("rates-admin"),
            cause_id: String::from("ticket-43"),
            cause_description: String::from("Carrier contract ended"),
        };
        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/rates/CARRIER-1", &remove))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/rates/CARRIER-1/history"))
            .await
            .unwrap();
        let history: ImportHistoryResponse = body_json(response).await;
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[1].reason, "Carrier contract ended");

        let response = app.oneshot(get_request("/rates")).await.unwrap();
        let listing: ListRateConfigsResponse = body_json(response).await;
        assert!(listing.configs.is_empty());
    }

    #[tokio::test]
    async fn test_quote_for_manual_carrier_returns_not_found() {
        let app: Router = build_router(create_test_app_state());
        let request: QuoteSkidsRequest = QuoteSkidsRequest {
            carrier_id: String::from("CARRIER-9"),
            skid_count: 2,
            total_weight: None,
        };

        let response = app
            .oneshot(json_request("POST", "/quote/skids", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_carrier_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(json_request(
                "POST",
                "/rates/import",
                &create_import_request(" ", RATES_CSV),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_carrier_id_matching_action_route_is_rejected() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/rates/import",
                &create_import_request("validate", RATES_CSV),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let error: ErrorResponse = body_json(response).await;
        assert!(error.message.contains("reserved"));

        let response = app.oneshot(get_request("/rates")).await.unwrap();
        let listing: ListRateConfigsResponse = body_json(response).await;
        assert!(listing.configs.is_empty());
    }
}
