use sea_orm::entity::prelude::*;

/// One ledger row: `partner` owns `percentage` of `equipment`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "equipment_partners")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub internal: i64,
	pub equipment: i64,
	pub partner: i64,
	#[sea_orm(column_type = "Decimal(Some((5, 2)))")]
	pub percentage: Decimal,
	pub created: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::equipment::Entity",
		from = "Column::Equipment",
		to = "super::equipment::Column::Internal",
		on_update = "Cascade",
		on_delete = "Cascade"
	)]
	Equipment,
	#[sea_orm(
		belongs_to = "super::partner::Entity",
		from = "Column::Partner",
		to = "super::partner::Column::Internal",
		on_update = "Cascade",
		on_delete = "Restrict"
	)]
	Partners,
}

impl Related<super::equipment::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Equipment.def()
	}
}

impl Related<super::partner::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Partners.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
