use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, serde::Serialize, serde::Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum OwnershipType {
	/// company property, can be shared with partners
	#[sea_orm(string_value = "owned")]
	Owned,
	/// leased from a supplier, carries rental costs instead of partners
	#[sea_orm(string_value = "rented")]
	Rented,
}

impl std::fmt::Display for OwnershipType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OwnershipType::Owned => write!(f, "owned"),
			OwnershipType::Rented => write!(f, "rented"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, serde::Serialize, serde::Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
	#[sea_orm(string_value = "active")]
	Active,
	#[sea_orm(string_value = "archived")]
	Archived,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize, serde::Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub internal: i64,
	pub company: i64,
	pub name: String,
	pub ownership_type: OwnershipType,
	pub status: EquipmentStatus,
	pub supplier: Option<i64>,
	#[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
	pub monthly_rent: Option<Decimal>,
	#[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
	pub daily_rent: Option<Decimal>,
	pub created: ChronoDateTimeUtc,
	pub updated: ChronoDateTimeUtc,
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
	#[sea_orm(
		belongs_to = "super::supplier::Entity",
		from = "Column::Supplier",
		to = "super::supplier::Column::Internal",
		on_update = "Cascade",
		on_delete = "Restrict"
	)]
	Suppliers,
	#[sea_orm(has_many = "super::equipment_partner::Entity")]
	EquipmentPartners,
}

impl Related<super::company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Companies.def()
	}
}

impl Related<super::supplier::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Suppliers.def()
	}
}

impl Related<super::equipment_partner::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::EquipmentPartners.def()
	}
}

impl Related<super::partner::Entity> for Entity {
	fn to() -> RelationDef {
		super::equipment_partner::Relation::Partners.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::equipment_partner::Relation::Equipment.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
	pub fn is_owned(&self) -> bool {
		matches!(self.ownership_type, OwnershipType::Owned)
	}

	pub fn is_archived(&self) -> bool {
		matches!(self.status, EquipmentStatus::Archived)
	}
}
