use sea_orm_migration::prelude::*;

use super::m20241001_000001_create_companies_suppliers_partners::{Companies, Suppliers};

#[derive(DeriveIden)]
pub enum Equipment {
	Table,
	Internal,
	Company,
	Name,
	OwnershipType,
	Status,
	Supplier,
	MonthlyRent,
	DailyRent,
	Created,
	Updated,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(Equipment::Table)
					.comment("physical assets, either owned by the company or rented from a supplier")
					.col(
						ColumnDef::new(Equipment::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(Equipment::Company).big_integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-equipment-company")
							.from(Equipment::Table, Equipment::Company)
							.to(Companies::Table, Companies::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Cascade)
					)
					.col(ColumnDef::new(Equipment::Name).string().not_null())
					.col(ColumnDef::new(Equipment::OwnershipType).string_len(16).not_null().default("owned"))
					.col(ColumnDef::new(Equipment::Status).string_len(16).not_null().default("active"))
					.col(ColumnDef::new(Equipment::Supplier).big_integer().null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-equipment-supplier")
							.from(Equipment::Table, Equipment::Supplier)
							.to(Suppliers::Table, Suppliers::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Restrict)
					)
					.col(ColumnDef::new(Equipment::MonthlyRent).decimal_len(12, 2).null())
					.col(ColumnDef::new(Equipment::DailyRent).decimal_len(12, 2).null())
					.col(ColumnDef::new(Equipment::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.col(ColumnDef::new(Equipment::Updated).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_index(Index::create().name("index-equipment-company").table(Equipment::Table).col(Equipment::Company).to_owned())
			.await?;

		manager
			.create_index(Index::create().name("index-equipment-supplier").table(Equipment::Table).col(Equipment::Supplier).to_owned())
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(Equipment::Table).to_owned())
			.await?;

		Ok(())
	}
}
