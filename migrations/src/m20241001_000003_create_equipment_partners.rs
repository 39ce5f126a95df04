use sea_orm_migration::prelude::*;

use super::m20241001_000001_create_companies_suppliers_partners::Partners;
use super::m20241001_000002_create_equipment::Equipment;

#[derive(DeriveIden)]
pub enum EquipmentPartners {
	Table,
	Internal,
	Equipment,
	Partner,
	Percentage,
	Created,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(EquipmentPartners::Table)
					.comment("partner ownership ledger, remainder up to 100% is the company share")
					.col(
						ColumnDef::new(EquipmentPartners::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(EquipmentPartners::Equipment).big_integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-equipment-partners-equipment")
							.from(EquipmentPartners::Table, EquipmentPartners::Equipment)
							.to(Equipment::Table, Equipment::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Cascade)
					)
					.col(ColumnDef::new(EquipmentPartners::Partner).big_integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-equipment-partners-partner")
							.from(EquipmentPartners::Table, EquipmentPartners::Partner)
							.to(Partners::Table, Partners::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Restrict)
					)
					.col(
						ColumnDef::new(EquipmentPartners::Percentage)
							.decimal_len(5, 2)
							.not_null()
							// the total per equipment can't be expressed here, it is checked under lock on write
							.check(Expr::col(EquipmentPartners::Percentage).between(1, 99))
					)
					.col(ColumnDef::new(EquipmentPartners::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.unique()
					.name("index-equipment-partners-equipment-partner")
					.table(EquipmentPartners::Table)
					.col(EquipmentPartners::Equipment)
					.col(EquipmentPartners::Partner)
					.to_owned()
			)
			.await?;

		manager
			.create_index(Index::create().name("index-equipment-partners-partner").table(EquipmentPartners::Table).col(EquipmentPartners::Partner).to_owned())
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(EquipmentPartners::Table).to_owned())
			.await?;

		Ok(())
	}
}
