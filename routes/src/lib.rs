use tower_http::classify::{SharedClassifier, StatusInRangeAsFailures};

pub mod auth;
pub use auth::Tenant;

pub mod error;
pub use error::{ApiError, ApiResult};

pub mod builders;

pub mod inventory;
pub use inventory::InventoryRouter;

pub fn router(ctx: depot::Context) -> axum::Router {
	use tower_http::{cors::CorsLayer, trace::TraceLayer};

	axum::Router::new()
		.inventory_routes()
		.layer(
			// ledger refusals come back as 4xx, trace them as failures too
			TraceLayer::new(SharedClassifier::new(StatusInRangeAsFailures::new(400..=999)))
				.make_span_with(|req: &axum::http::Request<_>| {
					tracing::span!(
						tracing::Level::INFO,
						"request",
						method = %req.method(),
						uri = %req.uri(),
						status_code = tracing::field::Empty,
					)
				})
		)
		.layer(CorsLayer::permissive())
		.with_state(ctx)
}

pub async fn serve(ctx: depot::Context, bind: String, shutdown: impl ShutdownToken) -> Result<(), std::io::Error> {
	tracing::info!("serving {} api routes on {bind}", ctx.cfg().instance.name);

	let router = router(ctx);

	let listener = tokio::net::TcpListener::bind(bind).await?;
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown.event())
		.await?;

	Ok(())
}

pub trait ShutdownToken: Sync + Send + 'static {
	fn event(self) -> impl std::future::Future<Output = ()> + std::marker::Send;
}
