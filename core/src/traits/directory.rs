use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::model;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct NewSupplier {
	pub name: String,
	#[serde(default)]
	pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SupplierUpdate {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct NewPartner {
	pub name: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct PartnerUpdate {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
}

fn valid_name(name: String) -> crate::Result<String> {
	let trimmed = name.trim();
	if trimmed.is_empty() {
		return Err(crate::Error::Field("name", "cannot be empty"));
	}
	Ok(trimmed.to_string())
}

/// Suppliers and partners of a company. Rows of other companies behave as missing.
#[async_trait::async_trait]
pub trait Directory {
	async fn list_suppliers(&self, company: i64, offset: u64, limit: u64) -> crate::Result<Vec<model::supplier::Model>>;
	async fn find_supplier(&self, company: i64, supplier: i64) -> crate::Result<model::supplier::Model>;
	async fn create_supplier(&self, company: i64, new: NewSupplier) -> crate::Result<model::supplier::Model>;
	async fn update_supplier(&self, company: i64, supplier: i64, update: SupplierUpdate) -> crate::Result<model::supplier::Model>;
	async fn delete_supplier(&self, company: i64, supplier: i64) -> crate::Result<()>;

	async fn list_partners(&self, company: i64, offset: u64, limit: u64) -> crate::Result<Vec<model::partner::Model>>;
	async fn find_partner(&self, company: i64, partner: i64) -> crate::Result<model::partner::Model>;
	async fn create_partner(&self, company: i64, new: NewPartner) -> crate::Result<model::partner::Model>;
	async fn update_partner(&self, company: i64, partner: i64, update: PartnerUpdate) -> crate::Result<model::partner::Model>;
	async fn delete_partner(&self, company: i64, partner: i64) -> crate::Result<()>;
}

#[async_trait::async_trait]
impl Directory for crate::Context {
	async fn list_suppliers(&self, company: i64, offset: u64, limit: u64) -> crate::Result<Vec<model::supplier::Model>> {
		Ok(
			model::supplier::Entity::find()
				.filter(model::supplier::Column::Company.eq(company))
				.order_by_asc(model::supplier::Column::Name)
				.offset(offset)
				.limit(limit)
				.all(self.db())
				.await?
		)
	}

	async fn find_supplier(&self, company: i64, supplier: i64) -> crate::Result<model::supplier::Model> {
		model::supplier::Entity::find_by_id(supplier)
			.filter(model::supplier::Column::Company.eq(company))
			.one(self.db())
			.await?
			.ok_or(crate::Error::not_found("supplier", supplier))
	}

	async fn create_supplier(&self, company: i64, new: NewSupplier) -> crate::Result<model::supplier::Model> {
		let supplier = model::supplier::ActiveModel {
			internal: NotSet,
			company: Set(company),
			name: Set(valid_name(new.name)?),
			contact: Set(new.contact),
			created: Set(chrono::Utc::now()),
		}
			.insert(self.db())
			.await?;

		tracing::debug!("company #{company} created supplier #{}", supplier.internal);
		Ok(supplier)
	}

	async fn update_supplier(&self, company: i64, supplier: i64, update: SupplierUpdate) -> crate::Result<model::supplier::Model> {
		let mut model : model::supplier::ActiveModel = self.find_supplier(company, supplier).await?.into();
		if let Some(name) = update.name {
			model.name = Set(valid_name(name)?);
		}
		if let Some(contact) = update.contact {
			model.contact = Set(Some(contact));
		}
		Ok(model.update(self.db()).await?)
	}

	async fn delete_supplier(&self, company: i64, supplier: i64) -> crate::Result<()> {
		self.find_supplier(company, supplier).await?;

		let renting = model::equipment::Entity::find()
			.filter(model::equipment::Column::Supplier.eq(supplier))
			.count(self.db())
			.await?;

		if renting > 0 {
			return Err(crate::Error::InUse("supplier", supplier, "rented equipment"));
		}

		model::supplier::Entity::delete_by_id(supplier)
			.exec(self.db())
			.await?;

		tracing::debug!("company #{company} deleted supplier #{supplier}");
		Ok(())
	}

	async fn list_partners(&self, company: i64, offset: u64, limit: u64) -> crate::Result<Vec<model::partner::Model>> {
		Ok(
			model::partner::Entity::find()
				.filter(model::partner::Column::Company.eq(company))
				.order_by_asc(model::partner::Column::Name)
				.offset(offset)
				.limit(limit)
				.all(self.db())
				.await?
		)
	}

	async fn find_partner(&self, company: i64, partner: i64) -> crate::Result<model::partner::Model> {
		model::partner::Entity::find_by_id(partner)
			.filter(model::partner::Column::Company.eq(company))
			.one(self.db())
			.await?
			.ok_or(crate::Error::not_found("partner", partner))
	}

	async fn create_partner(&self, company: i64, new: NewPartner) -> crate::Result<model::partner::Model> {
		let partner = model::partner::ActiveModel {
			internal: NotSet,
			company: Set(company),
			name: Set(valid_name(new.name)?),
			email: Set(new.email),
			phone: Set(new.phone),
			created: Set(chrono::Utc::now()),
		}
			.insert(self.db())
			.await?;

		tracing::debug!("company #{company} created partner #{}", partner.internal);
		Ok(partner)
	}

	async fn update_partner(&self, company: i64, partner: i64, update: PartnerUpdate) -> crate::Result<model::partner::Model> {
		let current = self.find_partner(company, partner).await?;
		let mut model : model::partner::ActiveModel = current.into();
		if let Some(name) = update.name {
			model.name = Set(valid_name(name)?);
		}
		if let Some(email) = update.email {
			model.email = Set(Some(email));
		}
		if let Some(phone) = update.phone {
			model.phone = Set(Some(phone));
		}
		let updated = model.update(self.db()).await?;

		// ledgers show partner names
		let shares = model::equipment_partner::Entity::find()
			.filter(model::equipment_partner::Column::Partner.eq(partner))
			.select_only()
			.column(model::equipment_partner::Column::Equipment)
			.into_tuple::<i64>()
			.all(self.db())
			.await?;
		for equipment in shares {
			self.invalidate_ledger(equipment);
		}

		Ok(updated)
	}

	async fn delete_partner(&self, company: i64, partner: i64) -> crate::Result<()> {
		self.find_partner(company, partner).await?;

		let shares = model::equipment_partner::Entity::find()
			.filter(model::equipment_partner::Column::Partner.eq(partner))
			.count(self.db())
			.await?;

		if shares > 0 {
			return Err(crate::Error::InUse("partner", partner, "equipment shares"));
		}

		model::partner::Entity::delete_by_id(partner)
			.exec(self.db())
			.await?;

		tracing::debug!("company #{company} deleted partner #{partner}");
		Ok(())
	}
}
