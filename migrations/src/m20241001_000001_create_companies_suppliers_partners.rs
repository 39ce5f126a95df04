use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Companies {
	Table,
	Internal,
	Name,
	Created,
}

#[derive(DeriveIden)]
pub enum Suppliers {
	Table,
	Internal,
	Company,
	Name,
	Contact,
	Created,
}

#[derive(DeriveIden)]
pub enum Partners {
	Table,
	Internal,
	Company,
	Name,
	Email,
	Phone,
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
					.table(Companies::Table)
					.comment("tenants, every other row belongs to one of these")
					.col(
						ColumnDef::new(Companies::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(Companies::Name).string().not_null().unique_key())
					.col(ColumnDef::new(Companies::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(Suppliers::Table)
					.comment("who rented equipment is leased from")
					.col(
						ColumnDef::new(Suppliers::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(Suppliers::Company).big_integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-suppliers-company")
							.from(Suppliers::Table, Suppliers::Company)
							.to(Companies::Table, Companies::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Cascade)
					)
					.col(ColumnDef::new(Suppliers::Name).string().not_null())
					.col(ColumnDef::new(Suppliers::Contact).string().null())
					.col(ColumnDef::new(Suppliers::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_index(Index::create().name("index-suppliers-company").table(Suppliers::Table).col(Suppliers::Company).to_owned())
			.await?;

		manager
			.create_table(
				Table::create()
					.table(Partners::Table)
					.comment("people or entities which may own a share of company equipment")
					.col(
						ColumnDef::new(Partners::Internal)
							.big_integer()
							.not_null()
							.primary_key()
							.auto_increment()
					)
					.col(ColumnDef::new(Partners::Company).big_integer().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fkey-partners-company")
							.from(Partners::Table, Partners::Company)
							.to(Companies::Table, Companies::Internal)
							.on_update(ForeignKeyAction::Cascade)
							.on_delete(ForeignKeyAction::Cascade)
					)
					.col(ColumnDef::new(Partners::Name).string().not_null())
					.col(ColumnDef::new(Partners::Email).string().null())
					.col(ColumnDef::new(Partners::Phone).string().null())
					.col(ColumnDef::new(Partners::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
					.to_owned()
			)
			.await?;

		manager
			.create_index(Index::create().name("index-partners-company").table(Partners::Table).col(Partners::Company).to_owned())
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(Partners::Table).to_owned())
			.await?;

		manager
			.drop_table(Table::drop().table(Suppliers::Table).to_owned())
			.await?;

		manager
			.drop_table(Table::drop().table(Companies::Table).to_owned())
			.await?;

		Ok(())
	}
}
