use sea_orm_migration::prelude::*;

mod m20241001_000001_create_companies_suppliers_partners;
mod m20241001_000002_create_equipment;
mod m20241001_000003_create_equipment_partners;
mod m20241014_000001_add_equipment_status_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
	fn migrations() -> Vec<Box<dyn MigrationTrait>> {
		vec![
			Box::new(m20241001_000001_create_companies_suppliers_partners::Migration),
			Box::new(m20241001_000002_create_equipment::Migration),
			Box::new(m20241001_000003_create_equipment_partners::Migration),
			Box::new(m20241014_000001_add_equipment_status_index::Migration),
		]
	}
}

pub use sea_orm_migration::MigratorTrait;
