use axum::{extract::{Path, Query, State}, Json};
use depot::{model, traits::Inventory, transition::{EquipmentUpdate, NewEquipment}, Context};

use crate::{builders::{Created, Pagination}, Tenant};

/// parsed from the same query string as [`Pagination`]
#[derive(Debug, Default, serde::Deserialize)]
pub struct EquipmentFilter {
	/// include archived equipment too
	#[serde(default)]
	pub archived: bool,
}

pub async fn list(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Query(filter): Query<EquipmentFilter>,
	Query(page): Query<Pagination>,
) -> crate::ApiResult<Json<Vec<model::equipment::Model>>> {
	let (offset, limit) = page.bounds(&ctx);
	Ok(Json(ctx.list_equipment(company, filter.archived, offset, limit).await?))
}

pub async fn view(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<Json<model::equipment::Model>> {
	Ok(Json(ctx.find_equipment(company, id).await?))
}

pub async fn create(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Json(new): Json<NewEquipment>,
) -> crate::ApiResult<Created<model::equipment::Model>> {
	Ok(Created(ctx.create_equipment(company, new).await?))
}

pub async fn edit(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
	Json(update): Json<EquipmentUpdate>,
) -> crate::ApiResult<Json<model::equipment::Model>> {
	Ok(Json(ctx.update_equipment(company, id, update).await?))
}

pub async fn archive(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<Json<model::equipment::Model>> {
	Ok(Json(ctx.archive_equipment(company, id).await?))
}
