use crate::{ledger::LedgerError, transition::TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum DepotError {
	#[error("database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("{0}")]
	Ledger(#[from] LedgerError),

	#[error("{0}")]
	Transition(#[from] TransitionError),

	#[error("{0} #{1} not found")]
	NotFound(&'static str, i64),

	#[error("equipment #{0} is not owned, it cannot be shared with partners")]
	NotOwned(i64),

	#[error("{0} #{1} is still referenced by {2}, remove those first")]
	InUse(&'static str, i64, &'static str),

	#[error("invalid field '{0}': {1}")]
	Field(&'static str, &'static str),
}

impl DepotError {
	pub fn not_found(what: &'static str, id: i64) -> Self {
		Self::NotFound(what, id)
	}
}

pub type DepotResult<T> = Result<T, DepotError>;
