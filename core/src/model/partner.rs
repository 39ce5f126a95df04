use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub internal: i64,
	pub company: i64,
	pub name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
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
	#[sea_orm(has_many = "super::equipment_partner::Entity")]
	EquipmentPartners,
}

impl Related<super::company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Companies.def()
	}
}

impl Related<super::equipment_partner::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::EquipmentPartners.def()
	}
}

impl Related<super::equipment::Entity> for Entity {
	fn to() -> RelationDef {
		super::equipment_partner::Relation::Equipment.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::equipment_partner::Relation::Partners.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}
