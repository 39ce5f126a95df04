use sea_orm::{ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, EntityTrait, QueryFilter};

#[async_trait::async_trait]
pub trait Administrable {
	async fn register_company(&self, name: String) -> crate::Result<crate::model::company::Model>;

	async fn find_company(&self, company: i64) -> crate::Result<crate::model::company::Model>;
}

#[async_trait::async_trait]
impl Administrable for crate::Context {
	async fn register_company(&self, name: String) -> crate::Result<crate::model::company::Model> {
		if let Some(existing) = crate::model::company::Entity::find()
			.filter(crate::model::company::Column::Name.eq(&name))
			.one(self.db())
			.await?
		{
			tracing::warn!("company '{name}' already registered as #{}", existing.internal);
			return Ok(existing);
		}

		let company = crate::model::company::ActiveModel {
			internal: NotSet,
			name: Set(name),
			created: Set(chrono::Utc::now()),
		}
			.insert(self.db())
			.await?;

		tracing::info!("registered company #{}: {}", company.internal, company.name);
		Ok(company)
	}

	async fn find_company(&self, company: i64) -> crate::Result<crate::model::company::Model> {
		crate::model::company::Entity::find_by_id(company)
			.one(self.db())
			.await?
			.ok_or(crate::Error::not_found("company", company))
	}
}
