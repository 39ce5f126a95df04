use axum::{extract::{FromRef, FromRequestParts}, http::request::Parts};
use depot::traits::Administrable;

use crate::ApiError;

pub const COMPANY_HEADER: &str = "X-Company";

/// Company every request acts on behalf of. Authentication happens upstream, by the time a
/// request reaches us the header names a company the caller is allowed to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenant(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Tenant
where
	depot::Context: FromRef<S>,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let ctx = depot::Context::from_ref(state);

		let company = parts
			.headers
			.get(COMPANY_HEADER)
			.ok_or_else(ApiError::unauthorized)?
			.to_str()
			.map_err(|_| ApiError::bad_request())?
			.trim()
			.parse::<i64>()
			.map_err(|_| ApiError::bad_request())?;

		match ctx.find_company(company).await {
			Ok(company) => Ok(Tenant(company.internal)),
			Err(depot::Error::NotFound(..)) => {
				tracing::debug!("refusing request for unknown company #{company}");
				Err(ApiError::unauthorized())
			},
			Err(e) => Err(e.into()),
		}
	}
}
