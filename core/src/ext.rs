pub trait LoggableError {
	fn info_failed(self, msg: &str);
	fn warn_failed(self, msg: &str);
}

impl<T, E: std::error::Error> LoggableError for Result<T, E> {
	fn info_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::info!("{} : {}", msg, e);
		}
	}

	fn warn_failed(self, msg: &str) {
		if let Err(e) = self {
			tracing::warn!("{} : {}", msg, e);
		}
	}
}

#[async_trait::async_trait]
pub trait AnyQuery {
	async fn any<C: sea_orm::ConnectionTrait>(self, db: &C) -> Result<bool, sea_orm::DbErr>;
}

#[async_trait::async_trait]
impl<T : sea_orm::EntityTrait> AnyQuery for sea_orm::Select<T> {
	async fn any<C: sea_orm::ConnectionTrait>(self, db: &C) -> Result<bool, sea_orm::DbErr> {
		Ok(self.one(db).await?.is_some())
	}
}
