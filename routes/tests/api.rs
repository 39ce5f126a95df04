use axum::{body::Body, http::{Request, StatusCode}};
use depot::{model::equipment::OwnershipType, traits::{directory::NewPartner, Administrable, Directory, Inventory}, transition::NewEquipment};
use depot_migrations::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use tower::ServiceExt;

struct Setup {
	ctx: depot::Context,
	router: axum::Router,
	company: i64,
	equipment: i64,
	alice: i64,
	bob: i64,
}

async fn setup() -> Setup {
	let mut opts = ConnectOptions::new("sqlite::memory:");
	opts
		.max_connections(1)
		.min_connections(1)
		.sqlx_logging(false);

	let db = Database::connect(opts).await.expect("failed connecting to in-memory sqlite");
	depot_migrations::Migrator::up(&db, None).await.expect("failed applying migrations");
	let ctx = depot::Context::new(db, depot::Config::default()).await.expect("failed creating context");

	let company = ctx.register_company("acme".into()).await.unwrap().internal;
	let equipment = ctx.create_equipment(company, NewEquipment {
		name: "bulldozer".into(),
		ownership_type: OwnershipType::Owned,
		supplier: None,
		monthly_rent: None,
		daily_rent: None,
	}).await.unwrap().internal;
	let alice = ctx.create_partner(company, NewPartner { name: "alice".into(), email: None, phone: None }).await.unwrap().internal;
	let bob = ctx.create_partner(company, NewPartner { name: "bob".into(), email: None, phone: None }).await.unwrap().internal;

	Setup { router: depot_routes::router(ctx.clone()), ctx, company, equipment, alice, bob }
}

async fn call(router: &axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
	let body = if bytes.is_empty() {
		serde_json::Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap()
	};
	(status, body)
}

fn json(method: &str, uri: &str, company: i64, body: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header("X-Company", company.to_string())
		.header("Content-Type", "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

fn decimal(value: &serde_json::Value) -> Decimal {
	match value {
		serde_json::Value::String(s) => s.parse().unwrap(),
		serde_json::Value::Number(n) => n.to_string().parse().unwrap(),
		other => panic!("not a decimal: {other}"),
	}
}

#[tokio::test]
async fn requests_without_company_are_refused() {
	let Setup { router, equipment, .. } = setup().await;

	let req = Request::builder()
		.uri(format!("/equipment/{equipment}/partners"))
		.body(Body::empty())
		.unwrap();
	let (status, _) = call(&router, req).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);

	let req = Request::builder()
		.uri(format!("/equipment/{equipment}/partners"))
		.header("X-Company", "9999")
		.body(Body::empty())
		.unwrap();
	let (status, _) = call(&router, req).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ledger_refusals_carry_reason_and_current_total() {
	let Setup { router, company, equipment, alice, bob, .. } = setup().await;
	let uri = format!("/equipment/{equipment}/partners");

	let (status, _) = call(&router, json("POST", &uri, company, serde_json::json!({ "partner": alice, "percentage": 30 }))).await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, body) = call(&router, json("POST", &uri, company, serde_json::json!({ "partner": bob, "percentage": "71" }))).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "ledger");
	assert_eq!(body["reason"], "ExceedsTotal");
	assert_eq!(decimal(&body["current"]), Decimal::from(30));

	let (status, body) = call(&router, json("POST", &format!("{uri}/check"), company, serde_json::json!({ "partner": bob, "percentage": 150 }))).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["reason"], "OutOfRange");

	let (status, body) = call(&router, json("POST", &format!("{uri}/check"), company, serde_json::json!({ "partner": bob, "percentage": "seventy" }))).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["reason"], "InvalidPercentage");

	let (status, body) = call(&router, json("POST", &format!("{uri}/check"), company, serde_json::json!({ "partner": bob, "percentage": 70 }))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["valid"], true);

	let (status, _) = call(&router, json("POST", &uri, company, serde_json::json!({ "partner": bob, "percentage": 70 }))).await;
	assert_eq!(status, StatusCode::CREATED);

	let req = Request::builder()
		.uri(&uri)
		.header("X-Company", company.to_string())
		.body(Body::empty())
		.unwrap();
	let (status, body) = call(&router, req).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["entries"].as_array().map(Vec::len), Some(2));
	assert_eq!(body["company_share_display"], "0.00");
	assert_eq!(body["consistent"], true);
}

#[tokio::test]
async fn renting_needs_terms_and_clears_partners() {
	let Setup { router, company, equipment, alice, .. } = setup().await;
	let uri = format!("/equipment/{equipment}");

	let (status, _) = call(&router, json("POST", &format!("{uri}/partners"), company, serde_json::json!({ "partner": alice, "percentage": 40 }))).await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, body) = call(&router, json("PATCH", &uri, company, serde_json::json!({ "ownership_type": "rented" }))).await;
	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(body["error"], "transition");
	assert_eq!(body["field"], "supplier");

	let (status, supplier) = call(&router, json("POST", "/suppliers", company, serde_json::json!({ "name": "rentals inc" }))).await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, body) = call(&router, json("PATCH", &uri, company, serde_json::json!({
		"ownership_type": "rented",
		"supplier": supplier["internal"],
		"monthly_rent": "1200.00",
		"daily_rent": 60,
	}))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["ownership_type"], "rented");

	let (status, body) = call(&router, json("POST", &format!("{uri}/partners"), company, serde_json::json!({ "partner": alice, "percentage": 10 }))).await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["error"], "not_owned");
}

#[tokio::test]
async fn other_tenants_see_nothing() {
	let Setup { ctx, router, company, equipment, alice, .. } = setup().await;
	let intruder = ctx.register_company("globex".into()).await.unwrap().internal;

	let (status, body) = call(&router, json("POST", &format!("/equipment/{equipment}/partners"), company, serde_json::json!({ "partner": alice, "percentage": 25 }))).await;
	assert_eq!(status, StatusCode::CREATED);
	let row = body["internal"].as_i64().unwrap();

	let req = Request::builder()
		.uri(format!("/equipment/{equipment}"))
		.header("X-Company", intruder.to_string())
		.body(Body::empty())
		.unwrap();
	let (status, body) = call(&router, req).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["kind"], "equipment");

	let req = Request::builder()
		.uri(format!("/equipment/{equipment}/partners/{row}"))
		.method("DELETE")
		.header("X-Company", intruder.to_string())
		.body(Body::empty())
		.unwrap();
	let (status, _) = call(&router, req).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = call(&router, json("POST", "/suppliers", intruder, serde_json::json!({ "name": "  " }))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["field"], "name");

	let req = Request::builder()
		.uri(format!("/equipment/{equipment}/partners/{row}"))
		.method("DELETE")
		.header("X-Company", company.to_string())
		.body(Body::empty())
		.unwrap();
	let (status, _) = call(&router, req).await;
	assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn equipment_list_filters_and_pages() {
	let Setup { ctx, router, company, equipment, .. } = setup().await;
	ctx.create_equipment(company, NewEquipment {
		name: "crane".into(),
		ownership_type: OwnershipType::Owned,
		supplier: None,
		monthly_rent: None,
		daily_rent: None,
	}).await.unwrap();
	ctx.archive_equipment(company, equipment).await.unwrap();

	let list = |query: &str| Request::builder()
		.uri(format!("/equipment{query}"))
		.header("X-Company", company.to_string())
		.body(Body::empty())
		.unwrap();

	let (status, body) = call(&router, list("")).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().map(Vec::len), Some(1));
	assert_eq!(body[0]["name"], "crane");

	let (status, body) = call(&router, list("?archived=true")).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().map(Vec::len), Some(2));

	let (status, body) = call(&router, list("?archived=true&batch=1&offset=1")).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().map(Vec::len), Some(1));
	// ordered by name, bulldozer first
	assert_eq!(body[0]["name"], "crane");
}
