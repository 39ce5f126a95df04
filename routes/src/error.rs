use axum::http::StatusCode;
use depot::{ledger::LedgerError, transition::TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("{0}")]
	Depot(#[from] depot::Error),

	// wrapper error to return arbitraty status codes
	#[error("{0}")]
	Status(StatusCode),
}

impl ApiError {
	pub fn bad_request() -> Self {
		Self::Status(StatusCode::BAD_REQUEST)
	}

	pub fn not_found() -> Self {
		Self::Status(StatusCode::NOT_FOUND)
	}

	pub fn unauthorized() -> Self {
		Self::Status(StatusCode::UNAUTHORIZED)
	}
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<StatusCode> for ApiError {
	fn from(value: StatusCode) -> Self {
		ApiError::Status(value)
	}
}

impl From<LedgerError> for ApiError {
	fn from(value: LedgerError) -> Self {
		ApiError::Depot(value.into())
	}
}

impl From<TransitionError> for ApiError {
	fn from(value: TransitionError) -> Self {
		ApiError::Depot(value.into())
	}
}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		tracing::debug!("emitting error response: {self:?}");
		let descr = self.to_string();
		let err = match self {
			ApiError::Status(status) => return status.into_response(),
			ApiError::Depot(err) => err,
		};
		match err {
			depot::Error::Database(e) => (
				StatusCode::SERVICE_UNAVAILABLE,
				axum::Json(serde_json::json!({
					"error": "database",
					"description": descr,
					"inner": format!("{e:#?}"),
				}))
			).into_response(),
			depot::Error::Ledger(LedgerError::RowNotFound(row)) => (
				StatusCode::NOT_FOUND,
				axum::Json(serde_json::json!({
					"error": "ledger",
					"reason": "RowNotFound",
					"row": row,
					"description": descr,
				}))
			).into_response(),
			depot::Error::Ledger(e) => (
				StatusCode::UNPROCESSABLE_ENTITY,
				axum::Json(serde_json::json!({
					"error": "ledger",
					"reason": e.reason(),
					"description": descr,
					"current": e.current_total(),
				}))
			).into_response(),
			depot::Error::Transition(TransitionError::MissingRentalField(field) | TransitionError::NegativeRent(field)) => (
				StatusCode::UNPROCESSABLE_ENTITY,
				axum::Json(serde_json::json!({
					"error": "transition",
					"field": field.to_string(),
					"description": descr,
				}))
			).into_response(),
			depot::Error::NotFound(what, id) => (
				StatusCode::NOT_FOUND,
				axum::Json(serde_json::json!({
					"error": "not_found",
					"kind": what,
					"id": id,
					"description": descr,
				}))
			).into_response(),
			depot::Error::NotOwned(equipment) => (
				StatusCode::CONFLICT,
				axum::Json(serde_json::json!({
					"error": "not_owned",
					"equipment": equipment,
					"description": descr,
				}))
			).into_response(),
			depot::Error::InUse(what, id, _) => (
				StatusCode::CONFLICT,
				axum::Json(serde_json::json!({
					"error": "in_use",
					"kind": what,
					"id": id,
					"description": descr,
				}))
			).into_response(),
			depot::Error::Field(field, _) => (
				StatusCode::BAD_REQUEST,
				axum::Json(serde_json::json!({
					"error": "field",
					"field": field,
					"description": descr,
				}))
			).into_response(),
		}
	}
}
