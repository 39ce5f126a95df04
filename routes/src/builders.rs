use axum::{http::StatusCode, response::IntoResponse};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Pagination {
	pub offset: Option<u64>,
	pub batch: Option<u64>,
}

impl Pagination {
	/// offset and limit, batch size bounded by configuration
	pub fn bounds(&self, ctx: &depot::Context) -> (u64, u64) {
		(self.offset.unwrap_or(0), ctx.cfg().page_size(self.batch))
	}
}

/// freshly created resource, served as `201 Created`
pub struct Created<T>(pub T);

impl<T: serde::Serialize> IntoResponse for Created<T> {
	fn into_response(self) -> axum::response::Response {
		(StatusCode::CREATED, axum::Json(self.0)).into_response()
	}
}
