//! What changes when an equipment switches between owned and rented.
//!
//! Rented equipment must always carry its supplier and both rents. Becoming owned clears
//! them. Becoming rented removes every partner share in the same transaction as the update,
//! so no ledger row ever points at equipment which is no longer owned.

use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::model::equipment::{self, OwnershipType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalField {
	Supplier,
	MonthlyRent,
	DailyRent,
}

impl std::fmt::Display for RentalField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RentalField::Supplier => write!(f, "supplier"),
			RentalField::MonthlyRent => write!(f, "monthly_rent"),
			RentalField::DailyRent => write!(f, "daily_rent"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
	#[error("rented equipment requires field '{0}'")]
	MissingRentalField(RentalField),

	#[error("field '{0}' cannot be negative")]
	NegativeRent(RentalField),
}

/// Rental terms as they would stand after a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalTerms {
	pub supplier: Option<i64>,
	pub monthly_rent: Option<Decimal>,
	pub daily_rent: Option<Decimal>,
}

impl RentalTerms {
	pub fn require(&self) -> Result<(), TransitionError> {
		if self.supplier.is_none() {
			return Err(TransitionError::MissingRentalField(RentalField::Supplier));
		}
		match self.monthly_rent {
			None => return Err(TransitionError::MissingRentalField(RentalField::MonthlyRent)),
			Some(x) if x.is_sign_negative() && !x.is_zero() => return Err(TransitionError::NegativeRent(RentalField::MonthlyRent)),
			Some(_) => {},
		}
		match self.daily_rent {
			None => Err(TransitionError::MissingRentalField(RentalField::DailyRent)),
			Some(x) if x.is_sign_negative() && !x.is_zero() => Err(TransitionError::NegativeRent(RentalField::DailyRent)),
			Some(_) => Ok(()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct NewEquipment {
	pub name: String,
	pub ownership_type: OwnershipType,
	#[serde(default)]
	pub supplier: Option<i64>,
	#[serde(default)]
	pub monthly_rent: Option<Decimal>,
	#[serde(default)]
	pub daily_rent: Option<Decimal>,
}

impl NewEquipment {
	/// Validates rental terms and builds the row to insert. Rental fields sent along with
	/// owned equipment are dropped.
	pub fn into_active_model(self, company: i64) -> Result<equipment::ActiveModel, TransitionError> {
		let terms = match self.ownership_type {
			OwnershipType::Owned => RentalTerms::default(),
			OwnershipType::Rented => {
				let terms = RentalTerms {
					supplier: self.supplier,
					monthly_rent: self.monthly_rent,
					daily_rent: self.daily_rent,
				};
				terms.require()?;
				terms
			},
		};

		let now = chrono::Utc::now();
		Ok(equipment::ActiveModel {
			internal: NotSet,
			company: Set(company),
			name: Set(self.name),
			ownership_type: Set(self.ownership_type),
			status: Set(equipment::EquipmentStatus::Active),
			supplier: Set(terms.supplier),
			monthly_rent: Set(terms.monthly_rent),
			daily_rent: Set(terms.daily_rent),
			created: Set(now),
			updated: Set(now),
		})
	}
}

/// Partial edit, absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct EquipmentUpdate {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub ownership_type: Option<OwnershipType>,
	#[serde(default)]
	pub supplier: Option<i64>,
	#[serde(default)]
	pub monthly_rent: Option<Decimal>,
	#[serde(default)]
	pub daily_rent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
	pub from: OwnershipType,
	pub to: OwnershipType,
	/// rented -> owned: supplier and rents become null
	pub clear_rental: bool,
	/// owned -> rented: every ledger row of the equipment goes away
	pub remove_partners: bool,
	terms: RentalTerms,
}

impl TransitionPlan {
	pub fn is_transition(&self) -> bool {
		self.from != self.to
	}

	/// Turns the plan into the row update. Does not touch ledger rows, callers must honor
	/// [`TransitionPlan::remove_partners`] inside the same transaction.
	pub fn apply(&self, current: equipment::Model, update: EquipmentUpdate) -> equipment::ActiveModel {
		let mut model : equipment::ActiveModel = current.into();

		if let Some(name) = update.name {
			model.name = Set(name);
		}

		if self.is_transition() {
			model.ownership_type = Set(self.to);
		}

		match self.to {
			OwnershipType::Owned => if self.clear_rental {
				model.supplier = Set(None);
				model.monthly_rent = Set(None);
				model.daily_rent = Set(None);
			},
			OwnershipType::Rented => {
				model.supplier = Set(self.terms.supplier);
				model.monthly_rent = Set(self.terms.monthly_rent);
				model.daily_rent = Set(self.terms.daily_rent);
			},
		}

		model.updated = Set(chrono::Utc::now());
		model
	}
}

/// Decides what an edit implies for the ownership side of an equipment.
pub fn plan(current: &equipment::Model, update: &EquipmentUpdate) -> Result<TransitionPlan, TransitionError> {
	let from = current.ownership_type;
	let to = update.ownership_type.unwrap_or(from);

	let terms = match to {
		OwnershipType::Owned => RentalTerms::default(),
		OwnershipType::Rented => {
			let terms = RentalTerms {
				supplier: update.supplier.or(current.supplier),
				monthly_rent: update.monthly_rent.or(current.monthly_rent),
				daily_rent: update.daily_rent.or(current.daily_rent),
			};
			terms.require()?;
			terms
		},
	};

	Ok(TransitionPlan {
		from, to, terms,
		clear_rental: from == OwnershipType::Rented && to == OwnershipType::Owned,
		remove_partners: from == OwnershipType::Owned && to == OwnershipType::Rented,
	})
}
