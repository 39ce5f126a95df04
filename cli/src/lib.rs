mod register;
pub use register::*;

mod audit;
pub use audit::*;

mod share;
pub use share::*;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum CliCommand {
	/// register a new company, every other record belongs to one
	RegisterCompany {
		/// company name, must be unique
		name: String,
	},

	/// check every stored ownership ledger for inconsistencies
	Audit {
		#[arg(long, default_value_t = false)]
		/// delete partner shares left on rented equipment
		fix: bool,
	},

	/// show partners and company share of one equipment
	Share {
		/// equipment internal id
		equipment: i64,

		/// company owning the equipment
		#[arg(long, short)]
		company: i64,
	},
}

pub async fn run(ctx: depot::Context, command: CliCommand) -> Result<(), Box<dyn std::error::Error>> {
	tracing::info!("running cli task: {command:?}");
	match command {
		CliCommand::RegisterCompany { name } =>
			Ok(register_company(ctx, name).await?),
		CliCommand::Audit { fix } =>
			Ok(audit(ctx, fix).await?),
		CliCommand::Share { equipment, company } =>
			Ok(share(ctx, company, equipment).await?),
	}
}
