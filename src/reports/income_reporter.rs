/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::investment::account::Accounts;
use crate::investment::activity::{Activity, ActivityKind};
use crate::reports::table::Table;
use crate::util::amount::Dollars;
use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Taxable interest and dividends for one year, summed by payer, for
/// 1040 Schedule B parts I and II.
pub struct IncomeReporter {
	interest: Vec<(String, Decimal)>,
	dividends: Vec<(String, Decimal)>,
}

impl IncomeReporter {
	pub fn new(activities: &[Activity], accounts: &Accounts, year: i32) -> Self {
		let mut interest: BTreeMap<String, Decimal> = BTreeMap::new();
		let mut dividends: BTreeMap<String, Decimal> = BTreeMap::new();

		for activity in activities {
			if activity.date.year() != year
				|| !accounts.is_taxable(&activity.account)
			{
				continue;
			}

			let payers = match &activity.kind {
				ActivityKind::Interest => &mut interest,
				ActivityKind::Dividend => &mut dividends,
				ActivityKind::Other(kind) => {
					debug!(
						"{}: not reporting {} activity from {}",
						activity.symbol.as_deref().unwrap_or("-"),
						kind,
						activity.name
					);
					continue;
				},
			};
			*payers.entry(activity.name.clone()).or_default() += activity.amount;
		}

		Self {
			interest: by_payer(interest),
			dividends: by_payer(dividends),
		}
	}

	/// Interest per payer, ordered by name without regard to case
	pub fn interest(&self) -> &[(String, Decimal)] {
		&self.interest
	}

	/// Dividends per payer, ordered by name without regard to case
	pub fn dividends(&self) -> &[(String, Decimal)] {
		&self.dividends
	}

	pub fn tables(&self) -> Vec<Table> {
		vec![
			table("Part I - Interest", self.interest()),
			table("Part II - Ordinary Dividends", self.dividends()),
		]
	}
}

fn by_payer(totals: BTreeMap<String, Decimal>) -> Vec<(String, Decimal)> {
	let mut payers: Vec<(String, Decimal)> = totals.into_iter().collect();
	payers.sort_by_cached_key(|(name, _)| name.to_lowercase());
	payers
}

fn table(title: &str, payers: &[(String, Decimal)]) -> Table {
	let mut table = Table::new(title, 2);
	table.right_align(vec![1]);
	table.add_header(vec!["Payer", "Amount"]);
	table.add_separator();

	for (payer, amount) in payers {
		table.add_row(vec![payer.clone(), Dollars(*amount).to_string()]);
	}

	let total: Decimal = payers.iter().map(|(_, amount)| amount).sum();
	table.add_partial_separator(vec![1]);
	table.add_row(vec!["Total".to_string(), Dollars(total).to_string()]);

	table
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::investment::account::Account;
	use chrono::NaiveDate;

	fn activity(
		year: i32,
		account: &str,
		name: &str,
		kind: &str,
		cents: i64,
	) -> Activity {
		Activity {
			date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
			account: account.to_string(),
			name: name.to_string(),
			symbol: None,
			kind: ActivityKind::from_str(kind),
			amount: Decimal::new(cents, 2),
		}
	}

	fn reporter() -> IncomeReporter {
		let accounts = Accounts::new(
			&[Account {
				number: "R-1".into(),
				name: "Trad IRA".into(),
			}],
			&["IRA".to_string()],
		);

		let activities = vec![
			activity(2023, "X-1", "bank b", "interest", 1000),
			activity(2023, "X-1", "Bank A", "interest", 525),
			activity(2023, "X-1", "bank b", "interest", 1),
			activity(2023, "X-1", "Abc Corp", "dividend", 1250),
			activity(2023, "R-1", "Abc Corp", "dividend", 9999),
			activity(2022, "X-1", "Bank A", "interest", 700),
			activity(2023, "X-1", "Broker", "fee", 300),
		];

		IncomeReporter::new(&activities, &accounts, 2023)
	}

	#[test]
	fn test_sums_by_payer() {
		let reporter = reporter();

		assert_eq!(
			reporter.interest(),
			&[
				("Bank A".to_string(), Decimal::new(525, 2)),
				("bank b".to_string(), Decimal::new(1001, 2)),
			]
		);
		assert_eq!(
			reporter.dividends(),
			&[("Abc Corp".to_string(), Decimal::new(1250, 2))]
		);
	}

	#[test]
	fn test_tables() {
		let tables = reporter().tables();
		let interest = tables[0].render_text();
		assert!(interest.contains("Total     15.26"));
		assert!(!interest.contains("Broker"));

		let dividends = tables[1].render_text();
		assert!(dividends.contains("Abc Corp    12.50"));
		assert!(!dividends.contains("99.99"));
	}
}
