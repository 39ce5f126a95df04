use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use depot::{model, traits::{directory::{NewSupplier, SupplierUpdate}, Directory}, Context};

use crate::{builders::{Created, Pagination}, Tenant};

pub async fn list(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Query(page): Query<Pagination>,
) -> crate::ApiResult<Json<Vec<model::supplier::Model>>> {
	let (offset, limit) = page.bounds(&ctx);
	Ok(Json(ctx.list_suppliers(company, offset, limit).await?))
}

pub async fn view(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<Json<model::supplier::Model>> {
	Ok(Json(ctx.find_supplier(company, id).await?))
}

pub async fn create(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Json(new): Json<NewSupplier>,
) -> crate::ApiResult<Created<model::supplier::Model>> {
	Ok(Created(ctx.create_supplier(company, new).await?))
}

pub async fn edit(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
	Json(update): Json<SupplierUpdate>,
) -> crate::ApiResult<Json<model::supplier::Model>> {
	Ok(Json(ctx.update_supplier(company, id, update).await?))
}

pub async fn delete(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<StatusCode> {
	ctx.delete_supplier(company, id).await?;
	Ok(StatusCode::NO_CONTENT)
}
