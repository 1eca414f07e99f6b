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
use crate::investment::matcher::MatchedGroup;
use crate::investment::term::Term;
use crate::reports::table::Table;
use crate::util::amount::Dollars;
use crate::util::date::days_between;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

/// Unsold lots and how long each has been held, in every account.
pub struct PositionReporter {
	positions: Vec<Position>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Position {
	pub term: Term,
	pub symbol: String,
	pub account: String,
	pub n_shares: u64,
	pub acquired: NaiveDate,
	pub days_held: i64,
	pub cost: Decimal,
}

impl PositionReporter {
	/// Lots bought after `as_of` haven't been held yet, and are left out.
	pub fn new(groups: &[MatchedGroup], as_of: &NaiveDate) -> Self {
		let mut positions = vec![];

		for group in groups {
			for lot in &group.open {
				let acquired = lot.trade_date();
				if &acquired > as_of {
					debug!(
						"{}: lot of {} bought {} is after {}",
						group.key,
						lot.n_shares(),
						acquired,
						as_of
					);
					continue;
				}

				positions.push(Position {
					term: Term::classify(&acquired, as_of),
					symbol: group.key.symbol().to_string(),
					account: group.key.account().to_string(),
					n_shares: lot.n_shares(),
					acquired,
					days_held: days_between(&acquired, as_of),
					cost: lot.total(),
				});
			}
		}

		Self { positions }
	}

	pub fn positions(&self) -> &[Position] {
		&self.positions
	}

	pub fn tables(&self) -> Vec<Table> {
		let mut table = Table::new("Open positions", 7);
		table.right_align(vec![3, 5, 6]);
		table.add_header(vec![
			"Term", "Symbol", "Account", "Shares", "Acquired", "Days", "Cost",
		]);
		table.add_separator();

		for p in self.positions() {
			table.add_row(vec![
				p.term.to_string(),
				p.symbol.clone(),
				p.account.clone(),
				p.n_shares.to_string(),
				p.acquired.to_string(),
				p.days_held.to_string(),
				Dollars(p.cost).to_string(),
			]);
		}

		let total: Decimal = self.positions().iter().map(|p| p.cost).sum();
		table.add_partial_separator(vec![6]);
		table.add_row(vec![
			"".to_string(),
			"".to_string(),
			"".to_string(),
			"".to_string(),
			"".to_string(),
			"".to_string(),
			Dollars(total).to_string(),
		]);

		vec![table]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::investment::history::TradeHistories;
	use crate::investment::matcher::LotMatcher;
	use crate::investment::transaction::{Side, Transaction};

	fn tx(
		symbol: &str,
		side: Side,
		date: (i32, u32, u32),
		n_shares: u64,
		total: i64,
	) -> Transaction {
		Transaction::new(
			symbol,
			"X-1",
			side,
			NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
			n_shares,
			Decimal::from(total),
		)
		.unwrap()
	}

	#[test]
	fn test_open_positions() {
		let trades = vec![
			tx("ABC", Side::Buy, (2022, 1, 1), 100, 1000),
			tx("ABC", Side::Sell, (2023, 6, 1), 40, 800),
			tx("QQQ", Side::Buy, (2023, 11, 1), 10, 3000),
			tx("SOLD", Side::Buy, (2022, 1, 1), 5, 50),
			tx("SOLD", Side::Sell, (2022, 2, 1), 5, 60),
			tx("NEW", Side::Buy, (2024, 2, 1), 1, 10),
		];
		let histories =
			TradeHistories::from_trades(&trades, &["stock".to_string()]);
		let groups = LotMatcher::new().match_all(&histories).unwrap();
		let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

		let reporter = PositionReporter::new(&groups, &as_of);

		assert_eq!(
			reporter.positions(),
			&[
				Position {
					term: Term::Long,
					symbol: "ABC".into(),
					account: "X-1".into(),
					n_shares: 60,
					acquired: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
					days_held: 730,
					cost: Decimal::from(600),
				},
				Position {
					term: Term::Short,
					symbol: "QQQ".into(),
					account: "X-1".into(),
					n_shares: 10,
					acquired: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
					days_held: 61,
					cost: Decimal::from(3000),
				},
			]
		);

		let text = reporter.tables()[0].render_text();
		assert!(text.contains("3600.00"));
		assert!(!text.contains("SOLD"));
		assert!(!text.contains("NEW"));
	}

	#[test]
	fn test_lot_sold_after_as_of_is_still_open() {
		let trades = vec![
			tx("ABC", Side::Buy, (2022, 1, 1), 100, 1000),
			tx("ABC", Side::Buy, (2022, 3, 1), 20, 300),
			tx("ABC", Side::Sell, (2022, 6, 1), 20, 250),
			tx("ABC", Side::Sell, (2024, 6, 1), 100, 2000),
		];
		let histories =
			TradeHistories::from_trades(&trades, &["stock".to_string()]);
		let as_of = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

		let held = histories.through(&as_of);
		let groups = LotMatcher::new().match_all(&held).unwrap();
		let reporter = PositionReporter::new(&groups, &as_of);

		let positions = reporter.positions();
		assert_eq!(positions.len(), 2);
		assert_eq!(positions[0].n_shares, 80);
		assert_eq!(positions[0].cost, Decimal::from(800));
		assert_eq!(positions[0].days_held, 365);
		assert_eq!(positions[0].term, Term::Short);
		assert_eq!(positions[1].n_shares, 20);
		assert_eq!(positions[1].cost, Decimal::from(300));
	}
}
