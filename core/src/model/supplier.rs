use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub internal: i64,
	pub company: i64,
	pub name: String,
	pub contact: Option<String>,
	pub created: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::company::Entity",
		from = "Column::Company",
		to = "super::company::Column::Internal",
		on_update = "Cascade",
		on_delete = "Cascade"
	)]
	Companies,
	#[sea_orm(has_many = "super::equipment::Entity")]
	Equipment,
}

impl Related<super::company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Companies.def()
	}
}

impl Related<super::equipment::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Equipment.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
