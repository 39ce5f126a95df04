pub mod suppliers;
pub mod partners;
pub mod equipment;
pub mod ledger;

use axum::{routing::{get, patch, post}, Router};

pub trait InventoryRouter {
	fn inventory_routes(self) -> Self;
}

impl InventoryRouter for Router<depot::Context> {
	fn inventory_routes(self) -> Self {
		use crate::inventory as inv;

		self
			// directory
			.route("/suppliers", get(inv::suppliers::list).post(inv::suppliers::create))
			.route("/suppliers/:id", get(inv::suppliers::view).patch(inv::suppliers::edit).delete(inv::suppliers::delete))
			.route("/partners", get(inv::partners::list).post(inv::partners::create))
			.route("/partners/:id", get(inv::partners::view).patch(inv::partners::edit).delete(inv::partners::delete))
			// equipment
			.route("/equipment", get(inv::equipment::list).post(inv::equipment::create))
			.route("/equipment/:id", get(inv::equipment::view).patch(inv::equipment::edit))
			.route("/equipment/:id/archive", post(inv::equipment::archive))
			// ownership ledger
			.route("/equipment/:id/partners", get(inv::ledger::view).post(inv::ledger::add))
			.route("/equipment/:id/partners/check", post(inv::ledger::check))
			.route("/equipment/:id/partners/:row", patch(inv::ledger::edit).delete(inv::ledger::remove))
	}
}
