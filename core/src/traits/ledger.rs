use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

use crate::{
	ledger::{self, LedgerError, Stake},
	model,
	selector::{self, Ledger},
	traits::inventory::company_equipment,
};

/// stored percentages carry two decimal places, values are rounded only after validation
pub const PERCENTAGE_SCALE: u32 = 2;

async fn company_partner(db: &impl ConnectionTrait, company: i64, partner: i64) -> crate::Result<model::partner::Model> {
	model::partner::Entity::find_by_id(partner)
		.filter(model::partner::Column::Company.eq(company))
		.one(db)
		.await?
		.ok_or(crate::Error::not_found("partner", partner))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
	/// stored rows break one of the ledger invariants
	Violation {
		equipment: i64,
		error: LedgerError,
	},
	/// ledger rows left on equipment which is not owned anymore
	Orphaned {
		equipment: i64,
		rows: Vec<i64>,
	},
}

impl std::fmt::Display for AuditFinding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AuditFinding::Violation { equipment, error } =>
				write!(f, "equipment #{equipment}: {error}"),
			AuditFinding::Orphaned { equipment, rows } =>
				write!(f, "equipment #{equipment}: rented but still has {} partner shares {rows:?}", rows.len()),
		}
	}
}

/// Ledger operations. Every write runs in one transaction which locks the equipment row,
/// re-reads the ledger and validates against it, so two concurrent writers can't both
/// pass their checks against the same stale total.
#[async_trait::async_trait]
pub trait Ledgered {
	async fn ledger(&self, company: i64, equipment: i64) -> crate::Result<Ledger>;

	/// validates a new share without writing anything
	async fn check_share(&self, company: i64, equipment: i64, partner: i64, percentage: Decimal) -> crate::Result<()>;

	/// validates a share change without writing anything
	async fn check_share_update(&self, company: i64, equipment: i64, row: i64, percentage: Decimal) -> crate::Result<()>;

	async fn add_share(&self, company: i64, equipment: i64, partner: i64, percentage: Decimal) -> crate::Result<model::equipment_partner::Model>;

	async fn update_share(&self, company: i64, equipment: i64, row: i64, percentage: Decimal) -> crate::Result<model::equipment_partner::Model>;

	async fn remove_share(&self, company: i64, equipment: i64, row: i64) -> crate::Result<()>;

	/// scans every stored ledger, with `fix` orphaned rows on rented equipment are deleted
	async fn audit(&self, fix: bool) -> crate::Result<Vec<AuditFinding>>;
}

#[async_trait::async_trait]
impl Ledgered for crate::Context {
	async fn ledger(&self, company: i64, equipment: i64) -> crate::Result<Ledger> {
		company_equipment(self.db(), company, equipment, false).await?;

		let ledger = self.ledgers()
			.get_or_fetch(equipment, || Ledger::fetch(equipment, self.db()))
			.await?;

		if let Err(e) = ledger::checked_company_share(&ledger.entries) {
			if self.cfg().ledger.strict_company_share {
				return Err(e.into());
			}
			tracing::warn!("inconsistent ledger for equipment #{equipment}: {e}");
		}

		Ok(ledger)
	}

	async fn check_share(&self, company: i64, equipment: i64, partner: i64, percentage: Decimal) -> crate::Result<()> {
		let target = company_equipment(self.db(), company, equipment, false).await?;
		if !target.is_owned() {
			return Err(crate::Error::NotOwned(equipment));
		}
		company_partner(self.db(), company, partner).await?;
		let rows = selector::ledger_rows(equipment, self.db()).await?;
		ledger::can_add(&rows, partner, percentage)?;
		Ok(())
	}

	async fn check_share_update(&self, company: i64, equipment: i64, row: i64, percentage: Decimal) -> crate::Result<()> {
		company_equipment(self.db(), company, equipment, false).await?;
		let rows = selector::ledger_rows(equipment, self.db()).await?;
		ledger::can_update(&rows, row, percentage)?;
		Ok(())
	}

	async fn add_share(&self, company: i64, equipment: i64, partner: i64, percentage: Decimal) -> crate::Result<model::equipment_partner::Model> {
		let txn = self.db().begin().await?;

		let target = company_equipment(&txn, company, equipment, true).await?;
		if !target.is_owned() {
			return Err(crate::Error::NotOwned(equipment));
		}

		company_partner(&txn, company, partner).await?;

		let rows = selector::ledger_rows(equipment, &txn).await?;
		ledger::can_add(&rows, partner, percentage)?;
		let percentage = percentage.round_dp(PERCENTAGE_SCALE);

		let share = model::equipment_partner::ActiveModel {
			internal: NotSet,
			equipment: Set(equipment),
			partner: Set(partner),
			percentage: Set(percentage),
			created: Set(chrono::Utc::now()),
		}
			.insert(&txn)
			.await?;

		txn.commit().await?;
		self.invalidate_ledger(equipment);

		tracing::info!("partner #{partner} now owns {percentage}% of equipment #{equipment}");
		Ok(share)
	}

	async fn update_share(&self, company: i64, equipment: i64, row: i64, percentage: Decimal) -> crate::Result<model::equipment_partner::Model> {
		let txn = self.db().begin().await?;

		company_equipment(&txn, company, equipment, true).await?;

		let rows = selector::ledger_rows(equipment, &txn).await?;
		ledger::can_update(&rows, row, percentage)?;
		let percentage = percentage.round_dp(PERCENTAGE_SCALE);

		let Some(current) = rows.into_iter().find(|r| r.row_id() == row) else {
			return Err(LedgerError::RowNotFound(row).into());
		};

		let mut share : model::equipment_partner::ActiveModel = current.into();
		share.percentage = Set(percentage);
		let share = share.update(&txn).await?;

		txn.commit().await?;
		self.invalidate_ledger(equipment);

		tracing::info!("partner #{} share of equipment #{equipment} set to {percentage}%", share.partner);
		Ok(share)
	}

	async fn remove_share(&self, company: i64, equipment: i64, row: i64) -> crate::Result<()> {
		let txn = self.db().begin().await?;

		company_equipment(&txn, company, equipment, true).await?;

		let rows = selector::ledger_rows(equipment, &txn).await?;
		ledger::can_remove(&rows, row)?;

		model::equipment_partner::Entity::delete_by_id(row)
			.exec(&txn)
			.await?;

		txn.commit().await?;
		self.invalidate_ledger(equipment);

		tracing::info!("removed ledger row #{row} from equipment #{equipment}");
		Ok(())
	}

	async fn audit(&self, fix: bool) -> crate::Result<Vec<AuditFinding>> {
		let mut by_equipment : BTreeMap<i64, Vec<model::equipment_partner::Model>> = BTreeMap::new();
		for row in model::equipment_partner::Entity::find()
			.order_by_asc(model::equipment_partner::Column::Internal)
			.all(self.db())
			.await?
		{
			by_equipment.entry(row.equipment).or_default().push(row);
		}

		let mut findings = Vec::new();

		for (equipment, rows) in by_equipment {
			let owned = model::equipment::Entity::find_by_id(equipment)
				.one(self.db())
				.await?
				.is_some_and(|e| e.is_owned());

			if !owned {
				let ids : Vec<i64> = rows.iter().map(Stake::row_id).collect();
				if fix {
					let removed = model::equipment_partner::Entity::delete_many()
						.filter(model::equipment_partner::Column::Equipment.eq(equipment))
						.exec(self.db())
						.await?;
					self.invalidate_ledger(equipment);
					tracing::info!("removed {} orphaned shares from equipment #{equipment}", removed.rows_affected);
				}
				findings.push(AuditFinding::Orphaned { equipment, rows: ids });
				continue;
			}

			for error in ledger::violations(&rows) {
				findings.push(AuditFinding::Violation { equipment, error });
			}
		}

		Ok(findings)
	}
}
