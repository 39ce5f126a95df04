use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait};

use crate::{
	ext::AnyQuery,
	model::{self, equipment::{EquipmentStatus, OwnershipType}},
	transition::{self, EquipmentUpdate, NewEquipment},
};

/// Loads an equipment of `company`, optionally holding a row lock until the transaction ends.
pub(crate) async fn company_equipment(
	db: &impl ConnectionTrait,
	company: i64,
	equipment: i64,
	lock: bool,
) -> crate::Result<model::equipment::Model> {
	let mut select = model::equipment::Entity::find_by_id(equipment)
		.filter(model::equipment::Column::Company.eq(company));

	if lock {
		select = select.lock_exclusive();
	}

	select
		.one(db)
		.await?
		.ok_or(crate::Error::not_found("equipment", equipment))
}

async fn check_supplier(db: &impl ConnectionTrait, company: i64, supplier: Option<i64>) -> crate::Result<()> {
	let Some(supplier) = supplier else { return Ok(()) };
	let exists = model::supplier::Entity::find_by_id(supplier)
		.filter(model::supplier::Column::Company.eq(company))
		.any(db)
		.await?;
	if !exists {
		return Err(crate::Error::not_found("supplier", supplier));
	}
	Ok(())
}

#[async_trait::async_trait]
pub trait Inventory {
	async fn list_equipment(&self, company: i64, archived: bool, offset: u64, limit: u64) -> crate::Result<Vec<model::equipment::Model>>;

	async fn find_equipment(&self, company: i64, equipment: i64) -> crate::Result<model::equipment::Model>;

	async fn create_equipment(&self, company: i64, new: NewEquipment) -> crate::Result<model::equipment::Model>;

	/// Edits an equipment, applying ownership transitions. Switching to rented removes all
	/// partner shares within the same transaction.
	async fn update_equipment(&self, company: i64, equipment: i64, update: EquipmentUpdate) -> crate::Result<model::equipment::Model>;

	async fn archive_equipment(&self, company: i64, equipment: i64) -> crate::Result<model::equipment::Model>;
}

#[async_trait::async_trait]
impl Inventory for crate::Context {
	async fn list_equipment(&self, company: i64, archived: bool, offset: u64, limit: u64) -> crate::Result<Vec<model::equipment::Model>> {
		let mut select = model::equipment::Entity::find()
			.filter(model::equipment::Column::Company.eq(company));

		if !archived {
			select = select.filter(model::equipment::Column::Status.eq(EquipmentStatus::Active));
		}

		Ok(
			select
				.order_by_asc(model::equipment::Column::Name)
				.offset(offset)
				.limit(limit)
				.all(self.db())
				.await?
		)
	}

	async fn find_equipment(&self, company: i64, equipment: i64) -> crate::Result<model::equipment::Model> {
		company_equipment(self.db(), company, equipment, false).await
	}

	async fn create_equipment(&self, company: i64, new: NewEquipment) -> crate::Result<model::equipment::Model> {
		if new.name.trim().is_empty() {
			return Err(crate::Error::Field("name", "cannot be empty"));
		}
		if matches!(new.ownership_type, OwnershipType::Rented) {
			check_supplier(self.db(), company, new.supplier).await?;
		}

		let equipment = new
			.into_active_model(company)?
			.insert(self.db())
			.await?;

		tracing::debug!("company #{company} created {} equipment #{}", equipment.ownership_type, equipment.internal);
		Ok(equipment)
	}

	async fn update_equipment(&self, company: i64, equipment: i64, update: EquipmentUpdate) -> crate::Result<model::equipment::Model> {
		if let Some(ref name) = update.name {
			if name.trim().is_empty() {
				return Err(crate::Error::Field("name", "cannot be empty"));
			}
		}

		let txn = self.db().begin().await?;

		let current = company_equipment(&txn, company, equipment, true).await?;
		let plan = transition::plan(&current, &update)?;

		if matches!(plan.to, OwnershipType::Rented) {
			check_supplier(&txn, company, update.supplier.or(current.supplier)).await?;
		}

		if plan.remove_partners {
			let removed = model::equipment_partner::Entity::delete_many()
				.filter(model::equipment_partner::Column::Equipment.eq(equipment))
				.exec(&txn)
				.await?;
			tracing::info!("equipment #{equipment} is now rented, removed {} partner shares", removed.rows_affected);
		}

		if plan.clear_rental {
			tracing::info!("equipment #{equipment} is now owned, cleared rental terms");
		}

		let updated = plan
			.apply(current, update)
			.update(&txn)
			.await?;

		txn.commit().await?;

		if plan.remove_partners {
			self.invalidate_ledger(equipment);
		}

		Ok(updated)
	}

	async fn archive_equipment(&self, company: i64, equipment: i64) -> crate::Result<model::equipment::Model> {
		let current = company_equipment(self.db(), company, equipment, false).await?;
		if current.is_archived() {
			return Ok(current);
		}

		let mut model : model::equipment::ActiveModel = current.into();
		model.status = Set(EquipmentStatus::Archived);
		model.updated = Set(chrono::Utc::now());
		let archived = model.update(self.db()).await?;

		tracing::debug!("company #{company} archived equipment #{equipment}");
		Ok(archived)
	}
}
