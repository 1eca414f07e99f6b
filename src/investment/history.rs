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
use crate::investment::transaction::{GroupKey, Side, Transaction};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// The buys and sells of one symbol in one account, each in the order they
/// were received. That order is expected to be chronological; nothing here
/// re-sorts it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TradeHistory {
	buys: Vec<Transaction>,
	sells: Vec<Transaction>,
}

impl TradeHistory {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn push(&mut self, transaction: Transaction) {
		match transaction.side() {
			Side::Buy => self.buys.push(transaction),
			Side::Sell => self.sells.push(transaction),
		}
	}

	pub fn buys(&self) -> &[Transaction] {
		&self.buys
	}

	pub fn sells(&self) -> &[Transaction] {
		&self.sells
	}
}

/// Trade histories for every symbol and account, iterated in key order so
/// that reports come out the same on every run.
#[derive(Debug, Default)]
pub struct TradeHistories {
	histories: BTreeMap<GroupKey, TradeHistory>,
}

impl TradeHistories {
	/// Groups the trades whose asset class is one of `capital_assets`
	/// (compared case-insensitively). Other trades are dropped.
	pub fn from_trades(
		trades: &[Transaction],
		capital_assets: &[String],
	) -> Self {
		let mut histories: BTreeMap<GroupKey, TradeHistory> = BTreeMap::new();

		for trade in trades {
			let is_capital = capital_assets
				.iter()
				.any(|asset| asset.eq_ignore_ascii_case(trade.trade_type()));
			if !is_capital {
				continue;
			}

			histories
				.entry(trade.key())
				.or_insert_with(TradeHistory::new)
				.push(trade.clone());
		}

		for (key, history) in &histories {
			debug!(
				"trade history for {}: {} buys, {} sells",
				key,
				history.buys.len(),
				history.sells.len()
			);
		}

		Self { histories }
	}

	/// The trades made on or before `date`, so that matching sees only the
	/// sells that had happened by then. Groups left with no trades are
	/// dropped.
	pub fn through(&self, date: &NaiveDate) -> Self {
		let mut histories = BTreeMap::new();

		for (key, history) in &self.histories {
			let mut held = TradeHistory::new();
			for trade in history.buys.iter().chain(&history.sells) {
				if &trade.trade_date() <= date {
					held.push(trade.clone());
				}
			}

			if held.buys.is_empty() && held.sells.is_empty() {
				debug!("{}: no trades on or before {}", key, date);
				continue;
			}
			histories.insert(key.clone(), held);
		}

		Self { histories }
	}

	pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &TradeHistory)> {
		self.histories.iter()
	}

	pub fn len(&self) -> usize {
		self.histories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.histories.is_empty()
	}
}
