use axum::{
	Form, Json, Router,
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mpc_domain::CardType;
use mpc_service::{Error, LegacySettings, NewCardsPage, SearchResults};
use mpc_storage::CardDocument;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/2/searchResults", post(search_results))
		.route("/search", post(legacy_search))
		.route("/cardbacks", get(cardbacks))
		.route("/new/{source_key}", get(new_cards))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LegacySearchForm {
	pub drive_order: Option<String>,
	pub fuzzy_search: Option<String>,
	#[serde(default)]
	pub query: String,
	pub card_type: Option<String>,
}

pub const MAX_NEW_CARDS_PAGE: u64 = 10_000;

#[derive(Debug, Deserialize)]
pub struct NewCardsParams {
	#[serde(default)]
	pub page: u64,
}
impl NewCardsParams {
	pub fn page(&self) -> u64 {
		self.page.min(MAX_NEW_CARDS_PAGE)
	}
}

#[derive(Debug, Serialize)]
pub struct HitsResponse {
	pub hits: Vec<CardDocument>,
}

async fn health(State(state): State<AppState>) -> StatusCode {
	if state.service.ping().await { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE }
}

async fn search_results(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Json<SearchResults>, ApiError> {
	let body: Value = serde_json::from_slice(&body).map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "malformed_input", format!("Invalid JSON: {err}."))
	})?;
	let results = state.service.search(&body).await?;

	Ok(Json(results))
}

async fn legacy_search(
	State(state): State<AppState>,
	Form(form): Form<LegacySearchForm>,
) -> Result<Json<HitsResponse>, ApiError> {
	let card_type = match form.card_type.as_deref() {
		None => CardType::Card,
		Some(value) => value.parse::<CardType>().map_err(|err| {
			json_error(StatusCode::BAD_REQUEST, "malformed_input", err.to_string())
		})?,
	};
	let settings =
		LegacySettings::from_form(form.drive_order.as_deref(), form.fuzzy_search.as_deref());
	let hits = state.service.legacy_search(&settings, &form.query, card_type).await?;

	Ok(Json(HitsResponse { hits }))
}

async fn cardbacks(State(state): State<AppState>) -> Result<Json<HitsResponse>, ApiError> {
	let hits = state.service.all_cardbacks().await?;

	Ok(Json(HitsResponse { hits }))
}

async fn new_cards(
	State(state): State<AppState>,
	Path(source_key): Path<String>,
	Query(params): Query<NewCardsParams>,
) -> Result<Json<NewCardsPage>, ApiError> {
	let page = state.service.list_new(&source_key, params.page()).await?;

	Ok(Json(page))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let (status, code) = match &err {
			Error::MalformedInput { .. } => (StatusCode::BAD_REQUEST, "malformed_input"),
			Error::MissingQueries => (StatusCode::BAD_REQUEST, "missing_queries"),
			Error::IndexUnavailable { .. } =>
				(StatusCode::SERVICE_UNAVAILABLE, "index_unavailable"),
			Error::ConnectionTimedOut => (StatusCode::GATEWAY_TIMEOUT, "connection_timed_out"),
			Error::Index { .. } => (StatusCode::BAD_GATEWAY, "index_error"),
		};

		if status.is_server_error() {
			tracing::warn!(error = %err, error_code = code, "Search request failed.");
		}

		json_error(status, code, err.to_string())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
