use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait};

use crate::{ledger::{self, Stake}, model};

/// Ledger row joined with its partner name, what clients get to display.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, serde::Serialize, serde::Deserialize)]
pub struct LedgerEntry {
	pub internal: i64,
	pub equipment: i64,
	pub partner: i64,
	pub partner_name: String,
	pub percentage: Decimal,
	pub created: chrono::DateTime<chrono::Utc>,
}

impl Stake for LedgerEntry {
	fn row_id(&self) -> i64 { self.internal }
	fn partner_id(&self) -> i64 { self.partner }
	fn percentage(&self) -> Decimal { self.percentage }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
	pub equipment: i64,
	pub entries: Vec<LedgerEntry>,
}

impl Ledger {
	pub async fn fetch(equipment: i64, db: &impl ConnectionTrait) -> Result<Self, DbErr> {
		let entries = model::equipment_partner::Entity::find()
			.filter(model::equipment_partner::Column::Equipment.eq(equipment))
			.join(JoinType::InnerJoin, model::equipment_partner::Relation::Partners.def())
			.select_only()
			.columns([
				model::equipment_partner::Column::Internal,
				model::equipment_partner::Column::Equipment,
				model::equipment_partner::Column::Partner,
				model::equipment_partner::Column::Percentage,
				model::equipment_partner::Column::Created,
			])
			.column_as(model::partner::Column::Name, "partner_name")
			.order_by_asc(model::equipment_partner::Column::Internal)
			.into_model::<LedgerEntry>()
			.all(db)
			.await?;

		Ok(Ledger { equipment, entries })
	}

	pub fn partners_total(&self) -> Decimal {
		ledger::partners_total(&self.entries)
	}

	pub fn company_share(&self) -> Decimal {
		ledger::company_share(&self.entries)
	}

	pub fn is_consistent(&self) -> bool {
		ledger::violations(&self.entries).is_empty()
	}
}

/// bare ledger rows of one equipment, without joining partners
pub async fn ledger_rows(equipment: i64, db: &impl ConnectionTrait) -> Result<Vec<model::equipment_partner::Model>, DbErr> {
	model::equipment_partner::Entity::find()
		.filter(model::equipment_partner::Column::Equipment.eq(equipment))
		.order_by_asc(model::equipment_partner::Column::Internal)
		.all(db)
		.await
}
