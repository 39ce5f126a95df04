//! Partner ownership ledger rules.
//!
//! An owned equipment can be shared among partners. Every ledger row holds between 1% and
//! 99% and all rows of one equipment sum to at most 100%; whatever is left is the company
//! share, which is never stored and always derived from the rows.
//!
//! Everything here is pure: callers load the rows, ask whether a change is admissible, and
//! only then write. The same checks run client side (through the dry-run route) and server
//! side (inside the ledger transaction, see [`crate::traits::Ledgered`]).

use rust_decimal::Decimal;

pub const MIN_PERCENTAGE: Decimal = Decimal::ONE;
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(99, 0, 0, false, 0);
pub const FULL_OWNERSHIP: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
	#[error("invalid percentage '{0}': not a finite number")]
	InvalidPercentage(String),

	#[error("percentage {}% out of range, must be between 1% and 99%", .0.normalize())]
	OutOfRange(Decimal),

	#[error("partner #{0} already holds a share of this equipment")]
	DuplicatePartner(i64),

	#[error("total would exceed 100% (current: {}%)", .current.normalize())]
	ExceedsTotal {
		current: Decimal,
		proposed: Decimal,
	},

	#[error("ledger row #{0} not found")]
	RowNotFound(i64),

	#[error("company share is negative ({}%), ledger is inconsistent", .0.normalize())]
	NegativeCompanyShare(Decimal),
}

impl LedgerError {
	/// stable identifier, sent to clients alongside the message
	pub fn reason(&self) -> &'static str {
		match self {
			LedgerError::InvalidPercentage(_) => "InvalidPercentage",
			LedgerError::OutOfRange(_) => "OutOfRange",
			LedgerError::DuplicatePartner(_) => "DuplicatePartner",
			LedgerError::ExceedsTotal { .. } => "ExceedsTotal",
			LedgerError::RowNotFound(_) => "RowNotFound",
			LedgerError::NegativeCompanyShare(_) => "NegativeCompanyShare",
		}
	}

	/// current partner total, only known for failures caused by the total
	pub fn current_total(&self) -> Option<Decimal> {
		match self {
			LedgerError::ExceedsTotal { current, .. } => Some(*current),
			_ => None,
		}
	}
}

/// Anything that can stand in for a ledger row: stored models, joined views, plain rows.
pub trait Stake {
	fn row_id(&self) -> i64;
	fn partner_id(&self) -> i64;
	fn percentage(&self) -> Decimal;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LedgerRow {
	pub internal: i64,
	pub partner: i64,
	pub percentage: Decimal,
}

impl Stake for LedgerRow {
	fn row_id(&self) -> i64 { self.internal }
	fn partner_id(&self) -> i64 { self.partner }
	fn percentage(&self) -> Decimal { self.percentage }
}

impl Stake for crate::model::equipment_partner::Model {
	fn row_id(&self) -> i64 { self.internal }
	fn partner_id(&self) -> i64 { self.partner }
	fn percentage(&self) -> Decimal { self.percentage }
}

/// Conversion from whatever the user typed into a percentage.
pub trait IntoPercentage {
	fn into_percentage(self) -> Result<Decimal, LedgerError>;
}

impl IntoPercentage for Decimal {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		Ok(self)
	}
}

impl IntoPercentage for &str {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		let cleaned = self.trim().trim_end_matches('%').trim_end();
		cleaned
			.parse::<Decimal>()
			.map_err(|_| LedgerError::InvalidPercentage(self.to_string()))
	}
}

impl IntoPercentage for &String {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		self.as_str().into_percentage()
	}
}

impl IntoPercentage for f64 {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		if !self.is_finite() {
			return Err(LedgerError::InvalidPercentage(self.to_string()));
		}
		Decimal::try_from(self)
			.map_err(|_| LedgerError::InvalidPercentage(self.to_string()))
	}
}

impl IntoPercentage for i64 {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		Ok(Decimal::from(self))
	}
}

/// Percentage as it arrives in a request body, either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum PercentageInput {
	Number(f64),
	Text(String),
}

impl IntoPercentage for PercentageInput {
	fn into_percentage(self) -> Result<Decimal, LedgerError> {
		match self {
			PercentageInput::Number(x) => x.into_percentage(),
			PercentageInput::Text(x) => x.as_str().into_percentage(),
		}
	}
}

/// sum of all partner percentages
pub fn partners_total(rows: &[impl Stake]) -> Decimal {
	rows.iter().map(Stake::percentage).sum()
}

fn in_range(percentage: impl IntoPercentage) -> Result<Decimal, LedgerError> {
	let percentage = percentage.into_percentage()?;
	if percentage < MIN_PERCENTAGE || percentage > MAX_PERCENTAGE {
		return Err(LedgerError::OutOfRange(percentage));
	}
	Ok(percentage)
}

/// Can `partner` be added to this ledger with `percentage`?
///
/// Checks run in a fixed order: parse, range, duplicate partner, total. The first failure
/// wins, so a duplicate partner proposing 150% reports `OutOfRange`.
pub fn can_add(rows: &[impl Stake], partner: i64, percentage: impl IntoPercentage) -> Result<(), LedgerError> {
	let percentage = in_range(percentage)?;

	if rows.iter().any(|r| r.partner_id() == partner) {
		return Err(LedgerError::DuplicatePartner(partner));
	}

	let current = partners_total(rows);
	if current + percentage > FULL_OWNERSHIP {
		return Err(LedgerError::ExceedsTotal { current, proposed: percentage });
	}

	Ok(())
}

/// Can ledger row `row` be changed to `percentage`?
///
/// The row's own current share is left out of the total before adding the new value.
pub fn can_update(rows: &[impl Stake], row: i64, percentage: impl IntoPercentage) -> Result<(), LedgerError> {
	let percentage = in_range(percentage)?;

	if !rows.iter().any(|r| r.row_id() == row) {
		return Err(LedgerError::RowNotFound(row));
	}

	let others : Decimal = rows
		.iter()
		.filter(|r| r.row_id() != row)
		.map(Stake::percentage)
		.sum();

	if others + percentage > FULL_OWNERSHIP {
		return Err(LedgerError::ExceedsTotal { current: others, proposed: percentage });
	}

	Ok(())
}

pub fn can_remove(rows: &[impl Stake], row: i64) -> Result<(), LedgerError> {
	if rows.iter().any(|r| r.row_id() == row) {
		Ok(())
	} else {
		Err(LedgerError::RowNotFound(row))
	}
}

/// `100 - Σ partners`, deliberately not clamped: a negative value means the stored ledger
/// already breaks the total invariant.
pub fn company_share(rows: &[impl Stake]) -> Decimal {
	FULL_OWNERSHIP - partners_total(rows)
}

pub fn checked_company_share(rows: &[impl Stake]) -> Result<Decimal, LedgerError> {
	let share = company_share(rows);
	if share.is_sign_negative() && !share.is_zero() {
		return Err(LedgerError::NegativeCompanyShare(share));
	}
	Ok(share)
}

/// display form, always two decimal places
pub fn format_share(share: Decimal) -> String {
	format!("{:.2}", share.round_dp(2))
}

/// Every invariant violation found in an already stored ledger, used by audits.
pub fn violations(rows: &[impl Stake]) -> Vec<LedgerError> {
	let mut out = Vec::new();
	let mut seen = std::collections::BTreeSet::new();

	for row in rows {
		let p = row.percentage();
		if p < MIN_PERCENTAGE || p > MAX_PERCENTAGE {
			out.push(LedgerError::OutOfRange(p));
		}
		if !seen.insert(row.partner_id()) {
			out.push(LedgerError::DuplicatePartner(row.partner_id()));
		}
	}

	if let Err(e) = checked_company_share(rows) {
		out.push(e);
	}

	out
}

#[cfg(test)]
mod test {
	use rust_decimal::Decimal;
	use rust_decimal_macros::dec;

	use super::*;

	const PARTNER_A: i64 = 10;
	const PARTNER_B: i64 = 20;
	const PARTNER_C: i64 = 30;

	fn row(internal: i64, partner: i64, percentage: Decimal) -> LedgerRow {
		LedgerRow { internal, partner, percentage }
	}

	#[test]
	fn empty_ledger_belongs_entirely_to_company() {
		let rows : Vec<LedgerRow> = vec![];
		assert_eq!(company_share(&rows), dec!(100));
		assert_eq!(can_add(&rows, PARTNER_A, dec!(30)), Ok(()));
	}

	#[test]
	fn adding_past_one_hundred_reports_current_total() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		let err = can_add(&rows, PARTNER_B, dec!(71)).unwrap_err();
		assert_eq!(err, LedgerError::ExceedsTotal { current: dec!(30), proposed: dec!(71) });
		assert_eq!(err.reason(), "ExceedsTotal");
		assert_eq!(err.current_total(), Some(dec!(30)));
		assert_eq!(err.to_string(), "total would exceed 100% (current: 30%)");
	}

	#[test]
	fn filling_up_to_exactly_one_hundred_is_allowed() {
		let mut rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_add(&rows, PARTNER_B, dec!(70)), Ok(()));
		rows.push(row(2, PARTNER_B, dec!(70)));
		assert_eq!(company_share(&rows), dec!(0));
		assert_eq!(checked_company_share(&rows), Ok(dec!(0)));
	}

	#[test]
	fn same_partner_cannot_be_added_twice() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_add(&rows, PARTNER_A, dec!(10)), Err(LedgerError::DuplicatePartner(PARTNER_A)));
	}

	#[test]
	fn update_ignores_own_previous_share() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_update(&rows, 1, dec!(99)), Ok(()));
	}

	#[test]
	fn update_counts_other_partners() {
		let rows = vec![row(1, PARTNER_A, dec!(30)), row(2, PARTNER_B, dec!(50))];
		assert_eq!(can_update(&rows, 1, dec!(50)), Ok(()));
		assert_eq!(
			can_update(&rows, 1, dec!(51)),
			Err(LedgerError::ExceedsTotal { current: dec!(50), proposed: dec!(51) }),
		);
	}

	#[test]
	fn update_of_missing_row_fails() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_update(&rows, 7, dec!(10)), Err(LedgerError::RowNotFound(7)));
		assert_eq!(can_remove(&rows, 7), Err(LedgerError::RowNotFound(7)));
		assert_eq!(can_remove(&rows, 1), Ok(()));
	}

	#[test]
	fn bounds_are_inclusive_between_one_and_ninety_nine() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_add(&rows, PARTNER_C, dec!(0)), Err(LedgerError::OutOfRange(dec!(0))));
		assert_eq!(can_add(&rows, PARTNER_C, dec!(100)), Err(LedgerError::OutOfRange(dec!(100))));
		assert_eq!(can_add(&rows, PARTNER_C, dec!(0.99)), Err(LedgerError::OutOfRange(dec!(0.99))));
		assert_eq!(can_add(&rows, PARTNER_C, dec!(1)), Ok(()));

		let empty : Vec<LedgerRow> = vec![];
		assert_eq!(can_add(&empty, PARTNER_C, dec!(99)), Ok(()));
		assert_eq!(can_update(&rows, 1, dec!(99.5)), Err(LedgerError::OutOfRange(dec!(99.5))));
	}

	#[test]
	fn range_is_checked_before_duplicates() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_add(&rows, PARTNER_A, dec!(150)), Err(LedgerError::OutOfRange(dec!(150))));
	}

	#[test]
	fn user_input_is_parsed() {
		let rows = vec![row(1, PARTNER_A, dec!(30))];
		assert_eq!(can_add(&rows, PARTNER_B, "25"), Ok(()));
		assert_eq!(can_add(&rows, PARTNER_B, " 12.5% "), Ok(()));
		assert_eq!(
			can_add(&rows, PARTNER_B, "thirty"),
			Err(LedgerError::InvalidPercentage("thirty".to_string())),
		);
		assert_eq!(can_add(&rows, PARTNER_B, "").unwrap_err().reason(), "InvalidPercentage");
		assert_eq!(can_add(&rows, PARTNER_B, f64::NAN).unwrap_err().reason(), "InvalidPercentage");
		assert_eq!(can_add(&rows, PARTNER_B, f64::INFINITY).unwrap_err().reason(), "InvalidPercentage");
		assert_eq!(can_add(&rows, PARTNER_B, 40.0), Ok(()));
		assert_eq!(can_add(&rows, PARTNER_B, 71i64).unwrap_err().reason(), "ExceedsTotal");
	}

	#[test]
	fn request_bodies_accept_numbers_and_text() {
		let number : PercentageInput = serde_json::from_str("30").unwrap();
		let text : PercentageInput = serde_json::from_str("\"12.5\"").unwrap();
		let garbage : PercentageInput = serde_json::from_str("\"lots\"").unwrap();
		assert_eq!(number.into_percentage(), Ok(dec!(30)));
		assert_eq!(text.into_percentage(), Ok(dec!(12.5)));
		assert_eq!(garbage.into_percentage().unwrap_err().reason(), "InvalidPercentage");
	}

	#[test]
	fn fractional_shares_do_not_drift() {
		let rows = vec![
			row(1, PARTNER_A, dec!(33.33)),
			row(2, PARTNER_B, dec!(33.33)),
			row(3, PARTNER_C, dec!(33.33)),
		];
		assert_eq!(company_share(&rows), dec!(0.01));
		assert_eq!(format_share(company_share(&rows)), "0.01");
		assert_eq!(can_add(&rows, 40, dec!(1)).unwrap_err().reason(), "ExceedsTotal");
	}

	#[test]
	fn adding_then_removing_restores_company_share() {
		let mut rows = vec![row(1, PARTNER_A, dec!(12.5))];
		let before = company_share(&rows);

		assert_eq!(can_add(&rows, PARTNER_B, dec!(40)), Ok(()));
		rows.push(row(2, PARTNER_B, dec!(40)));
		assert_eq!(company_share(&rows), before - dec!(40));

		assert_eq!(can_remove(&rows, 2), Ok(()));
		rows.retain(|r| r.internal != 2);
		assert_eq!(company_share(&rows), before);
	}

	#[test]
	fn sequence_of_approved_additions_never_breaks_total() {
		let mut rows = Vec::new();
		let mut next = 1;
		for proposed in [dec!(25), dec!(40), dec!(30), dec!(10), dec!(5), dec!(1)] {
			if can_add(&rows, next * 10, proposed).is_ok() {
				rows.push(row(next, next * 10, proposed));
			}
			next += 1;
			assert!(partners_total(&rows) <= FULL_OWNERSHIP);
		}
		assert_eq!(partners_total(&rows), dec!(100));
		assert!(violations(&rows).is_empty());
	}

	#[test]
	fn inconsistent_ledger_is_surfaced_not_clamped() {
		let rows = vec![row(1, PARTNER_A, dec!(60)), row(2, PARTNER_B, dec!(60))];
		assert_eq!(company_share(&rows), dec!(-20));
		assert_eq!(checked_company_share(&rows), Err(LedgerError::NegativeCompanyShare(dec!(-20))));
		assert_eq!(violations(&rows), vec![LedgerError::NegativeCompanyShare(dec!(-20))]);
	}

	#[test]
	fn audit_reports_range_and_duplicates() {
		let rows = vec![row(1, PARTNER_A, dec!(0)), row(2, PARTNER_A, dec!(20))];
		assert_eq!(
			violations(&rows),
			vec![LedgerError::OutOfRange(dec!(0)), LedgerError::DuplicatePartner(PARTNER_A)],
		);
	}

	#[test]
	fn shares_display_with_two_decimals() {
		assert_eq!(format_share(dec!(100)), "100.00");
		assert_eq!(format_share(dec!(12.345)), "12.34");
		assert_eq!(format_share(dec!(-5)), "-5.00");
	}
}
