use sea_orm_migration::prelude::*;

use super::m20241001_000002_create_equipment::Equipment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_index(
				Index::create()
					.name("index-equipment-company-status")
					.table(Equipment::Table)
					.col(Equipment::Company)
					.col(Equipment::Status)
					.to_owned()
				)
			.await?;
		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_index(Index::drop().name("index-equipment-company-status").table(Equipment::Table).to_owned())
			.await?;
		Ok(())
	}
}
