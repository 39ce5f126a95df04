use axum::{extract::{Path, State}, http::StatusCode, Json};
use depot::{
	ledger::{self, IntoPercentage, PercentageInput},
	model,
	selector::{Ledger, LedgerEntry},
	traits::{ledger::PERCENTAGE_SCALE, Ledgered},
	Context,
};
use rust_decimal::Decimal;

use crate::{builders::Created, Tenant};

/// Ledger of one equipment as clients display it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LedgerView {
	pub equipment: i64,
	pub entries: Vec<LedgerEntry>,
	pub partners_total: Decimal,
	pub company_share: Decimal,
	/// company share rounded to two decimals, e.g. "33.34"
	pub company_share_display: String,
	pub consistent: bool,
}

impl From<Ledger> for LedgerView {
	fn from(value: Ledger) -> Self {
		let company_share = value.company_share();
		LedgerView {
			equipment: value.equipment,
			partners_total: value.partners_total(),
			company_share,
			company_share_display: ledger::format_share(company_share),
			consistent: value.is_consistent(),
			entries: value.entries,
		}
	}
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewShare {
	pub partner: i64,
	pub percentage: PercentageInput,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ShareUpdate {
	pub percentage: PercentageInput,
}

/// Dry run of either a new share (`partner`) or a change to an existing row (`row`).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ShareCheck {
	#[serde(default)]
	pub partner: Option<i64>,
	#[serde(default)]
	pub row: Option<i64>,
	pub percentage: PercentageInput,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckOutcome {
	pub valid: bool,
	pub percentage: Decimal,
}

pub async fn view(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
) -> crate::ApiResult<Json<LedgerView>> {
	Ok(Json(ctx.ledger(company, id).await?.into()))
}

pub async fn add(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
	Json(share): Json<NewShare>,
) -> crate::ApiResult<Created<model::equipment_partner::Model>> {
	let percentage = share.percentage.into_percentage()?;
	Ok(Created(ctx.add_share(company, id, share.partner, percentage).await?))
}

pub async fn check(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path(id): Path<i64>,
	Json(check): Json<ShareCheck>,
) -> crate::ApiResult<Json<CheckOutcome>> {
	let percentage = check.percentage.into_percentage()?;
	match (check.row, check.partner) {
		(Some(row), _) => ctx.check_share_update(company, id, row, percentage).await?,
		(None, Some(partner)) => ctx.check_share(company, id, partner, percentage).await?,
		(None, None) => return Err(crate::ApiError::bad_request()),
	}
	Ok(Json(CheckOutcome { valid: true, percentage: percentage.round_dp(PERCENTAGE_SCALE) }))
}

pub async fn edit(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path((id, row)): Path<(i64, i64)>,
	Json(update): Json<ShareUpdate>,
) -> crate::ApiResult<Json<model::equipment_partner::Model>> {
	let percentage = update.percentage.into_percentage()?;
	Ok(Json(ctx.update_share(company, id, row, percentage).await?))
}

pub async fn remove(
	State(ctx): State<Context>,
	Tenant(company): Tenant,
	Path((id, row)): Path<(i64, i64)>,
) -> crate::ApiResult<StatusCode> {
	ctx.remove_share(company, id, row).await?;
	Ok(StatusCode::NO_CONTENT)
}
