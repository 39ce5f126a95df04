use depot::traits::Ledgered;

pub async fn audit(ctx: depot::Context, fix: bool) -> Result<(), depot::Error> {
	let findings = ctx.audit(fix).await?;

	if findings.is_empty() {
		tracing::info!("all ledgers are consistent");
		return Ok(());
	}

	for finding in &findings {
		println!("{finding}");
	}

	if fix {
		tracing::info!("audit found {} problems, orphaned shares were removed", findings.len());
	} else {
		tracing::warn!("audit found {} problems, run with --fix to remove orphaned shares", findings.len());
	}

	Ok(())
}
