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
use crate::investment::history::{TradeHistories, TradeHistory};
use crate::investment::transaction::{GroupKey, Transaction};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use thiserror::Error;

/// The portion of a recorded transaction consumed by one match, or the part
/// of a purchase still held. Borrows the original, which is never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotFragment<'a> {
	source: &'a Transaction,
	n_shares: u64,
	total: Decimal,
}

impl<'a> LotFragment<'a> {
	pub fn source(&self) -> &'a Transaction {
		self.source
	}

	pub fn n_shares(&self) -> u64 {
		self.n_shares
	}

	pub fn total(&self) -> Decimal {
		self.total
	}

	pub fn trade_date(&self) -> NaiveDate {
		self.source.trade_date()
	}
}

/// A sold quantity paired with the purchase it came from. Both sides always
/// hold the same number of shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair<'a> {
	pub buy: LotFragment<'a>,
	pub sell: LotFragment<'a>,
}

impl MatchedPair<'_> {
	pub fn n_shares(&self) -> u64 {
		self.sell.n_shares
	}

	pub fn proceeds(&self) -> Decimal {
		self.sell.total
	}

	pub fn cost(&self) -> Decimal {
		self.buy.total
	}

	pub fn gain(&self) -> Decimal {
		self.sell.total - self.buy.total
	}
}

/// Everything that matching produced for one symbol and account.
#[derive(Debug)]
pub struct MatchedGroup<'a> {
	pub key: &'a GroupKey,

	/// In the order they were resolved, which is chronological
	pub pairs: Vec<MatchedPair<'a>>,

	/// Purchased shares that no sale consumed
	pub open: Vec<LotFragment<'a>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
	#[error("No purchase found for {unmatched} sh. sold in {key} ({sell})")]
	UnmatchedSell {
		key: GroupKey,
		sell: Transaction,
		/// Shares of the sell left over once purchases ran out
		unmatched: u64,
	},

	#[error("Trades for {key} are not in chronological order at {transaction}")]
	OutOfOrder {
		key: GroupKey,
		transaction: Transaction,
	},
}

/// The working copy of a transaction while it is being consumed. The unit
/// price is fixed the first time the transaction is split, from its
/// original total, so later splits don't drift as the remainder shrinks.
struct Remainder<'a> {
	source: &'a Transaction,
	n_shares: u64,
	total: Decimal,
	unit_price: Option<Decimal>,
}

impl<'a> Remainder<'a> {
	fn new(source: &'a Transaction) -> Self {
		Self {
			source,
			n_shares: source.n_shares(),
			total: source.total(),
			unit_price: None,
		}
	}

	/// Takes `n_shares` off the front as a fragment. Must be fewer shares
	/// than remain.
	fn split(mut self, n_shares: u64) -> (LotFragment<'a>, Self) {
		let source = self.source;
		let unit_price =
			*self.unit_price.get_or_insert_with(|| source.unit_price());

		let fragment = LotFragment {
			source,
			n_shares,
			total: unit_price * Decimal::from(n_shares),
		};

		self.n_shares -= n_shares;
		self.total = unit_price * Decimal::from(self.n_shares);

		(fragment, self)
	}

	fn into_fragment(self) -> LotFragment<'a> {
		LotFragment {
			source: self.source,
			n_shares: self.n_shares,
			total: self.total,
		}
	}
}

/// Pairs sells with earlier buys, first in first out, within each symbol
/// and account.
///
/// Buys and sells must be supplied in chronological order. That is not
/// checked unless the matcher is made `validating`, in which case an
/// out-of-order history fails before anything is matched.
#[derive(Clone, Debug, Default)]
pub struct LotMatcher {
	validate_order: bool,
}

impl LotMatcher {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn validating(mut self, validate_order: bool) -> Self {
		self.validate_order = validate_order;
		self
	}

	/// Matches one symbol and account. Fails if any sell has no purchase
	/// left to match against; leftover purchases are not an error, and are
	/// returned as the open position.
	pub fn match_group<'a>(
		&self,
		key: &'a GroupKey,
		history: &'a TradeHistory,
	) -> Result<MatchedGroup<'a>, MatchError> {
		if self.validate_order {
			check_order(key, history.buys())?;
			check_order(key, history.sells())?;
		}

		let mut buys = history.buys().iter();
		let mut sells = history.sells().iter();

		let mut pending_buy: Option<Remainder> = None;
		let mut pending_sell: Option<Remainder> = None;

		let mut pairs = vec![];

		loop {
			let sell = match pending_sell
				.take()
				.or_else(|| sells.next().map(Remainder::new))
			{
				Some(sell) => sell,
				None => break,
			};

			let buy = match pending_buy
				.take()
				.or_else(|| buys.next().map(Remainder::new))
			{
				Some(buy) => buy,
				None => {
					return Err(MatchError::UnmatchedSell {
						key: key.clone(),
						sell: sell.source.clone(),
						unmatched: sell.n_shares,
					})
				},
			};

			let pair = match buy.n_shares.cmp(&sell.n_shares) {
				Ordering::Equal => MatchedPair {
					buy: buy.into_fragment(),
					sell: sell.into_fragment(),
				},
				Ordering::Greater => {
					let (fragment, rest) = buy.split(sell.n_shares);
					pending_buy = Some(rest);
					MatchedPair {
						buy: fragment,
						sell: sell.into_fragment(),
					}
				},
				Ordering::Less => {
					let (fragment, rest) = sell.split(buy.n_shares);
					pending_sell = Some(rest);
					MatchedPair {
						buy: buy.into_fragment(),
						sell: fragment,
					}
				},
			};

			debug!(
				"{}: matched {} sh. bought {} for {} with sale {} for {}",
				key,
				pair.n_shares(),
				pair.buy.trade_date(),
				pair.cost(),
				pair.sell.trade_date(),
				pair.proceeds()
			);
			pairs.push(pair);
		}

		let open = pending_buy
			.into_iter()
			.chain(buys.map(Remainder::new))
			.map(Remainder::into_fragment)
			.collect();

		Ok(MatchedGroup { key, pairs, open })
	}

	/// Matches every group in key order, stopping at the first failure.
	pub fn match_all<'a>(
		&self,
		histories: &'a TradeHistories,
	) -> Result<Vec<MatchedGroup<'a>>, MatchError> {
		histories
			.iter()
			.map(|(key, history)| self.match_group(key, history))
			.collect()
	}

	/// Matches every group in key order. Groups that fail are logged and
	/// left out of the result.
	pub fn match_lenient<'a>(
		&self,
		histories: &'a TradeHistories,
	) -> Vec<MatchedGroup<'a>> {
		histories
			.iter()
			.filter_map(|(key, history)| {
				match self.match_group(key, history) {
					Ok(group) => Some(group),
					Err(e) => {
						warn!("Skipping {}: {}", key, e);
						None
					},
				}
			})
			.collect()
	}
}

fn check_order(
	key: &GroupKey,
	transactions: &[Transaction],
) -> Result<(), MatchError> {
	for pair in transactions.windows(2) {
		if pair[1].trade_date() < pair[0].trade_date() {
			return Err(MatchError::OutOfOrder {
				key: key.clone(),
				transaction: pair[1].clone(),
			});
		}
	}
	Ok(())
}
