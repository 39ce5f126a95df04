use depot::traits::Administrable;

pub async fn register_company(ctx: depot::Context, name: String) -> Result<(), depot::Error> {
	let name = name.trim().to_string();
	if name.is_empty() {
		return Err(depot::Error::Field("name", "cannot be empty"));
	}

	let company = ctx.register_company(name).await?;
	println!("{}\t{}", company.internal, company.name);
	Ok(())
}
