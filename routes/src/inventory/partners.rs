use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use depot::{model, traits::{directory::{NewPartner, PartnerUpdate}, Directory}, Context};

use crate::{builders::{Created, Pagination}, Tenant};

pub async fn list(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Query(page): Query<Pagination>,
) -> crate::ApiResult<Json<Vec<model::partner::Model>>> {
	let (offset, limit) = page.bounds(&ctx);
	Ok(Json(ctx.list_partners(company, offset, limit).await?))
}

pub async fn view(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<Json<model::partner::Model>> {
	Ok(Json(ctx.find_partner(company, id).await?))
}

pub async fn create(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Json(new): Json<NewPartner>,
) -> crate::ApiResult<Created<model::partner::Model>> {
	Ok(Created(ctx.create_partner(company, new).await?))
}

pub async fn edit(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
	Json(update): Json<PartnerUpdate>,
) -> crate::ApiResult<Json<model::partner::Model>> {
	Ok(Json(ctx.update_partner(company, id, update).await?))
}

pub async fn delete(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<StatusCode> {
	ctx.delete_partner(company, id).await?;
	Ok(StatusCode::NO_CONTENT)
}
