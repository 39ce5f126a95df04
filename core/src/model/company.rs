use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub internal: i64,
	#[sea_orm(unique)]
	pub name: String,
	pub created: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::equipment::Entity")]
	Equipment,
	#[sea_orm(has_many = "super::partner::Entity")]
	Partners,
	#[sea_orm(has_many = "super::supplier::Entity")]
	Suppliers,
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

impl Related<super::supplier::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Suppliers.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
