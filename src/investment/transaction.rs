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
use anyhow::{bail, Error};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Asset class assumed for trade confirmations that don't name one
pub const DEFAULT_TRADE_TYPE: &str = "stock";

/// A buy or sell confirmation as recorded in the store. Immutable once
/// constructed; matching works on fragments that borrow from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
	symbol: String,

	/// Human-readable security name, used on report descriptions
	name: String,

	account: String,
	trade_type: String,
	side: Side,
	trade_date: NaiveDate,

	n_shares: u64, // always positive

	/// Total cost for a buy, or total proceeds for a sell, for all shares
	total: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	Buy,
	Sell,
}

impl Transaction {
	pub fn new(
		symbol: &str,
		account: &str,
		side: Side,
		trade_date: NaiveDate,
		n_shares: u64,
		total: Decimal,
	) -> Result<Self, Error> {
		if symbol.trim().is_empty() {
			bail!("Transaction has no symbol")
		}
		if account.trim().is_empty() {
			bail!("Transaction for {} has no account", symbol)
		}
		if n_shares == 0 {
			bail!("Transaction for {} cannot have zero shares", symbol)
		}

		Ok(Self {
			symbol: symbol.trim().to_string(),
			name: symbol.trim().to_string(),
			account: account.trim().to_string(),
			trade_type: DEFAULT_TRADE_TYPE.to_string(),
			side,
			trade_date,
			n_shares,
			total,
		})
	}

	/// Sets the descriptive name. Blank names leave the symbol in place.
	pub fn with_name(mut self, name: &str) -> Self {
		if !name.trim().is_empty() {
			self.name = name.trim().to_string();
		}
		self
	}

	pub fn with_trade_type(mut self, trade_type: &str) -> Self {
		self.trade_type = trade_type.trim().to_string();
		self
	}

	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn account(&self) -> &str {
		&self.account
	}

	pub fn trade_type(&self) -> &str {
		&self.trade_type
	}

	pub fn side(&self) -> Side {
		self.side
	}

	pub fn trade_date(&self) -> NaiveDate {
		self.trade_date
	}

	pub fn n_shares(&self) -> u64 {
		self.n_shares
	}

	pub fn total(&self) -> Decimal {
		self.total
	}

	/// The implied per-share price of the whole transaction
	pub fn unit_price(&self) -> Decimal {
		self.total / Decimal::from(self.n_shares)
	}

	pub fn key(&self) -> GroupKey {
		GroupKey::new(self.symbol(), self.account())
	}
}

impl fmt::Display for Transaction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {} {} sh. {} in {} for {}",
			self.trade_date,
			self.side,
			self.n_shares,
			self.symbol,
			self.account,
			self.total
		)
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Buy => write!(f, "buy"),
			Side::Sell => write!(f, "sell"),
		}
	}
}

/// Scopes a matching run: lots are only ever matched within the same
/// symbol held in the same account.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
	symbol: String,
	account: String,
}

impl GroupKey {
	pub fn new(symbol: &str, account: &str) -> Self {
		Self {
			symbol: symbol.to_string(),
			account: account.to_string(),
		}
	}

	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn account(&self) -> &str {
		&self.account
	}
}

impl fmt::Display for GroupKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.symbol, self.account)
	}
}
