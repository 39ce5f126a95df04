use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};

use crate::{cache::Store, config::Config, selector::Ledger};

#[derive(Clone)]
pub struct Context(Arc<ContextInner>);
struct ContextInner {
	db: DatabaseConnection,
	config: Config,
	ledgers: Store<i64, Ledger>,
}

impl Context {
	pub async fn new(db: DatabaseConnection, config: Config) -> Result<Self, DbErr> {
		db.ping().await?;

		let ledgers = if config.ledger.cache {
			Store::new()
		} else {
			tracing::info!("ledger cache disabled, every read hits the database");
			Store::disabled()
		};

		Ok(Context(Arc::new(ContextInner { db, config, ledgers })))
	}

	pub fn db(&self) -> &DatabaseConnection {
		&self.0.db
	}

	pub fn cfg(&self) -> &Config {
		&self.0.config
	}

	pub fn ledgers(&self) -> &Store<i64, Ledger> {
		&self.0.ledgers
	}

	/// to be called after every committed write touching this equipment's ledger
	pub fn invalidate_ledger(&self, equipment: i64) {
		if self.0.ledgers.mark_stale(&equipment) {
			tracing::debug!("marked ledger of equipment #{equipment} stale");
		}
	}
}
