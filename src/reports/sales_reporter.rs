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
use crate::investment::matcher::MatchedGroup;
use crate::investment::term::Term;
use crate::reports::table::Table;
use crate::util::amount::Dollars;
use crate::util::date::format_us;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Realized gains for one tax year, laid out like Form 8949: one table of
/// short-term sales and one of long-term sales. Only sales from taxable
/// accounts are included.
pub struct SalesReporter {
	sales: Vec<Sale>,
}

struct Sale {
	term: Term,
	description: String,
	acquired: NaiveDate,
	sold: NaiveDate,
	proceeds: Decimal,
	cost: Decimal,
	gain: Decimal,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Totals {
	pub proceeds: Decimal,
	pub cost: Decimal,
	pub gain: Decimal,
}

impl SalesReporter {
	pub fn new(groups: &[MatchedGroup], accounts: &Accounts, year: i32) -> Self {
		let mut sales = vec![];

		for group in groups {
			if !accounts.is_taxable(group.key.account()) {
				continue;
			}

			for pair in &group.pairs {
				let sold = pair.sell.trade_date();
				if sold.year() != year {
					continue;
				}

				let acquired = pair.buy.trade_date();
				sales.push(Sale {
					term: Term::classify(&acquired, &sold),
					description: format!(
						"{} sh. {}",
						pair.n_shares(),
						pair.buy.source().name()
					),
					acquired,
					sold,
					proceeds: pair.proceeds(),
					cost: pair.cost(),
					gain: pair.gain(),
				});
			}
		}

		Self { sales }
	}

	pub fn totals(&self, term: Term) -> Totals {
		self.sales
			.iter()
			.filter(|s| s.term == term)
			.fold(Totals::default(), |mut totals, s| {
				totals.proceeds += s.proceeds;
				totals.cost += s.cost;
				totals.gain += s.gain;
				totals
			})
	}

	pub fn tables(&self) -> Vec<Table> {
		vec![
			self.table(Term::Short, "Part I - Short-term sales"),
			self.table(Term::Long, "Part II - Long-term sales"),
		]
	}

	fn table(&self, term: Term, title: &str) -> Table {
		let mut table = Table::new(title, 8);
		table.right_align(vec![3, 4, 7]);
		table.add_header(vec![
			"Description",
			"Acquired",
			"Date Sold",
			"Proceeds",
			"Cost",
			"(f)",
			"(g)",
			"Gain or (Loss)",
		]);
		table.add_separator();

		for sale in self.sales.iter().filter(|s| s.term == term) {
			table.add_row(vec![
				sale.description.clone(),
				format_us(&sale.acquired),
				format_us(&sale.sold),
				Dollars(sale.proceeds).to_string(),
				Dollars(sale.cost).to_string(),
				"".to_string(),
				"".to_string(),
				Dollars(sale.gain).to_string(),
			]);
		}

		let totals = self.totals(term);
		table.add_partial_separator(vec![3, 4, 7]);
		table.add_row(vec![
			"Totals".to_string(),
			"".to_string(),
			"".to_string(),
			Dollars(totals.proceeds).to_string(),
			Dollars(totals.cost).to_string(),
			"".to_string(),
			"".to_string(),
			Dollars(totals.gain).to_string(),
		]);

		table
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::investment::account::Account;
	use crate::investment::history::TradeHistories;
	use crate::investment::matcher::LotMatcher;
	use crate::investment::transaction::{Side, Transaction};

	fn tx(
		symbol: &str,
		account: &str,
		side: Side,
		date: (i32, u32, u32),
		n_shares: u64,
		total: i64,
	) -> Transaction {
		Transaction::new(
			symbol,
			account,
			side,
			NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
			n_shares,
			Decimal::from(total),
		)
		.unwrap()
		.with_name(&format!("{} Inc", symbol))
	}

	fn trades() -> Vec<Transaction> {
		vec![
			// held long-term, sold in two pieces
			tx("ABC", "X-1", Side::Buy, (2021, 3, 1), 100, 1000),
			tx("ABC", "X-1", Side::Sell, (2023, 2, 1), 60, 900),
			tx("ABC", "X-1", Side::Sell, (2023, 6, 1), 40, 640),
			// short-term, one sale across two buys, one at a loss
			tx("XYZ", "X-1", Side::Buy, (2023, 1, 10), 50, 500),
			tx("XYZ", "X-1", Side::Buy, (2023, 2, 10), 50, 700),
			tx("XYZ", "X-1", Side::Sell, (2023, 9, 1), 100, 1300),
			// tax-deferred account
			tx("DEF", "R-1", Side::Buy, (2022, 1, 1), 10, 100),
			tx("DEF", "R-1", Side::Sell, (2023, 1, 1), 10, 200),
			// sold in another year
			tx("GHI", "X-1", Side::Buy, (2020, 1, 1), 10, 100),
			tx("GHI", "X-1", Side::Sell, (2022, 1, 1), 10, 200),
		]
	}

	fn accounts() -> Accounts {
		Accounts::new(
			&[
				Account {
					number: "X-1".into(),
					name: "Brokerage".into(),
				},
				Account {
					number: "R-1".into(),
					name: "Roth IRA".into(),
				},
			],
			&["IRA".to_string()],
		)
	}

	fn count(reporter: &SalesReporter, term: Term) -> usize {
		reporter.sales.iter().filter(|s| s.term == term).count()
	}

	fn reporter() -> SalesReporter {
		let histories =
			TradeHistories::from_trades(&trades(), &["stock".to_string()]);
		let groups = LotMatcher::new().match_all(&histories).unwrap();
		SalesReporter::new(&groups, &accounts(), 2023)
	}

	#[test]
	fn test_totals_by_term() {
		let reporter = reporter();

		assert_eq!(count(&reporter, Term::Short), 2);
		assert_eq!(
			reporter.totals(Term::Short),
			Totals {
				proceeds: Decimal::from(1300),
				cost: Decimal::from(1200),
				gain: Decimal::from(100),
			}
		);

		assert_eq!(count(&reporter, Term::Long), 2);
		assert_eq!(
			reporter.totals(Term::Long),
			Totals {
				proceeds: Decimal::from(1540),
				cost: Decimal::from(1000),
				gain: Decimal::from(540),
			}
		);
	}

	#[test]
	fn test_tables() {
		let tables = reporter().tables();
		assert_eq!(tables.len(), 2);

		let short = tables[0].render_text();
		assert!(short.starts_with("Part I - Short-term sales\n"));
		assert!(short.contains("50 sh. XYZ Inc"));
		assert!(short.contains("01/10/2023"));
		assert!(short.contains("(50.00)"));
		assert!(!short.contains("DEF"));
		assert!(!short.contains("GHI"));

		let long = tables[1].render_text();
		assert!(long.contains("60 sh. ABC Inc"));
		assert!(long.contains("40 sh. ABC Inc"));
		assert!(long.contains("540.00"));
		assert_eq!(long.matches(" sh. ").count(), 2);
	}

	#[test]
	fn test_empty_year() {
		let histories =
			TradeHistories::from_trades(&trades(), &["stock".to_string()]);
		let groups = LotMatcher::new().match_all(&histories).unwrap();
		let reporter = SalesReporter::new(&groups, &accounts(), 2019);

		assert_eq!(reporter.totals(Term::Short), Totals::default());
		assert_eq!(count(&reporter, Term::Long), 0);
		// just the totals row
		let short = reporter.tables()[0].render_text();
		assert!(!short.contains(" sh. "));
		assert!(short.trim_end().ends_with("0.00"));
	}
}
