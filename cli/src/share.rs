use depot::{ledger, traits::{Inventory, Ledgered}};

pub async fn share(ctx: depot::Context, company: i64, equipment: i64) -> Result<(), depot::Error> {
	let target = ctx.find_equipment(company, equipment).await?;
	let ledger = ctx.ledger(company, equipment).await?;

	println!("#{} {} ({})", target.internal, target.name, target.ownership_type);
	for entry in &ledger.entries {
		println!("  row #{}\t{}\t{}%", entry.internal, entry.partner_name, ledger::format_share(entry.percentage));
	}
	println!("  company\t{}%", ledger::format_share(ledger.company_share()));

	Ok(())
}
