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
use crate::investment::account::Account;
use crate::investment::activity::{Activity, ActivityKind};
use crate::investment::transaction::{Side, Transaction, DEFAULT_TRADE_TYPE};
use crate::parsing::filesystem::Filesystem;
use crate::util::date::parse_date;
use anyhow::{Context, Error};
use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Everything loaded from the investment store, in the order the store
/// lists it.
#[derive(Debug, Default)]
pub struct Store {
	pub accounts: Vec<Account>,
	pub trades: Vec<Transaction>,
	pub activities: Vec<Activity>,
}

impl Store {
	pub fn load(fs: &Filesystem, file_path: &str) -> Result<Self, Error> {
		let content = fs.read_to_string(file_path)?;
		let store = Self::from_json(&content)
			.with_context(|| format!("failed to load store {}", file_path))?;

		info!(
			"Loaded {} accounts, {} trade confirmations, {} activities from {}",
			store.accounts.len(),
			store.trades.len(),
			store.activities.len(),
			file_path
		);
		Ok(store)
	}

	pub fn from_json(content: &str) -> Result<Self, Error> {
		let file: StoreFile = serde_json::from_str(content)?;

		let accounts = file
			.accounts
			.into_iter()
			.map(|a| Account {
				number: a.number,
				name: a.name,
			})
			.collect();

		let trades = file
			.trade_confirmations
			.into_iter()
			.enumerate()
			.map(|(i, record)| {
				record.into_transaction().with_context(|| {
					format!("trade confirmation #{} is invalid", i + 1)
				})
			})
			.collect::<Result<Vec<_>, Error>>()?;

		let activities = file
			.activities
			.into_iter()
			.map(ActivityRecord::into_activity)
			.collect();

		Ok(Self {
			accounts,
			trades,
			activities,
		})
	}
}

// -------------
// -- RECORDS --
// -------------

#[derive(Deserialize, Default)]
#[serde(default)]
struct StoreFile {
	accounts: Vec<AccountRecord>,
	trade_confirmations: Vec<TradeRecord>,
	activities: Vec<ActivityRecord>,
}

#[derive(Deserialize)]
struct AccountRecord {
	#[serde(deserialize_with = "deserialize_string_or_number")]
	number: String,
	name: String,
}

#[derive(Deserialize)]
struct TradeRecord {
	symbol: String,
	name: Option<String>,

	#[serde(deserialize_with = "deserialize_string_or_number")]
	account: String,

	trade_type: Option<String>,

	#[serde(deserialize_with = "deserialize_flag")]
	is_buy: bool,

	#[serde(deserialize_with = "deserialize_date")]
	trade_date: NaiveDate,

	n_shares: u64,
	total: Decimal,
}

impl TradeRecord {
	fn into_transaction(self) -> Result<Transaction, Error> {
		let side = if self.is_buy { Side::Buy } else { Side::Sell };

		let transaction = Transaction::new(
			&self.symbol,
			&self.account,
			side,
			self.trade_date,
			self.n_shares,
			self.total,
		)?
		.with_name(self.name.as_deref().unwrap_or_default())
		.with_trade_type(
			self.trade_type.as_deref().unwrap_or(DEFAULT_TRADE_TYPE),
		);

		Ok(transaction)
	}
}

#[derive(Deserialize)]
struct ActivityRecord {
	#[serde(deserialize_with = "deserialize_date")]
	activity_date: NaiveDate,

	#[serde(deserialize_with = "deserialize_string_or_number")]
	account: String,

	name: String,
	symbol: Option<String>,
	activity_type: String,
	amount: Decimal,
}

impl ActivityRecord {
	fn into_activity(self) -> Activity {
		Activity {
			date: self.activity_date,
			account: self.account,
			name: self.name,
			symbol: self.symbol,
			kind: ActivityKind::from_str(&self.activity_type),
			amount: self.amount,
		}
	}
}

// Spreadsheet exports are loose about types: account numbers can come out
// as numbers, and booleans as 0/1 or 0.0/1.0.

fn deserialize_string_or_number<'de, D>(
	deserializer: D,
) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	match value {
		serde_json::Value::String(s) => Ok(s),
		serde_json::Value::Number(num) => Ok(num.to_string()),
		_ => Err(serde::de::Error::custom("expected a string or number")),
	}
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	match value {
		serde_json::Value::Bool(b) => Ok(b),
		serde_json::Value::Number(num) => match num.as_f64() {
			Some(n) if n == 0.0 => Ok(false),
			Some(n) if n == 1.0 => Ok(true),
			_ => Err(serde::de::Error::custom("expected 0 or 1")),
		},
		_ => Err(serde::de::Error::custom("expected a boolean or 0/1")),
	}
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let s = String::deserialize(deserializer)?;
	parse_date(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_json() {
		let store = Store::from_json(
			r#"{
				"accounts": [{"number": 1234, "name": "Brokerage"}],
				"trade_confirmations": [
					{"symbol": "ABC", "name": "Abc Corp", "account": 1234,
					 "trade_type": "stock", "is_buy": 1,
					 "trade_date": "2021-03-01 00:00:00",
					 "n_shares": 100, "total": "1000.00"},
					{"symbol": "ABC", "account": "1234", "is_buy": false,
					 "trade_date": "2023-02-01", "n_shares": 60, "total": 900}
				],
				"activities": [
					{"activity_date": "2023-03-01", "account": "1234",
					 "name": "Bank A", "activity_type": "interest",
					 "amount": "10.25"}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(
			store.accounts,
			vec![Account {
				number: "1234".into(),
				name: "Brokerage".into()
			}]
		);

		assert_eq!(store.trades.len(), 2);
		let buy = &store.trades[0];
		assert_eq!(buy.side(), Side::Buy);
		assert_eq!(buy.name(), "Abc Corp");
		assert_eq!(buy.account(), "1234");
		assert_eq!(
			buy.trade_date(),
			NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
		);
		assert_eq!(buy.total(), Decimal::new(100000, 2));

		let sell = &store.trades[1];
		assert_eq!(sell.side(), Side::Sell);
		assert_eq!(sell.name(), "ABC");
		assert_eq!(sell.trade_type(), DEFAULT_TRADE_TYPE);
		assert_eq!(sell.total(), Decimal::from(900));

		assert_eq!(store.activities.len(), 1);
		assert_eq!(store.activities[0].kind, ActivityKind::Interest);
		assert_eq!(store.activities[0].amount, Decimal::new(1025, 2));
		assert_eq!(store.activities[0].symbol, None);
	}

	#[test]
	fn test_empty_store() {
		let store = Store::from_json("{}").unwrap();
		assert!(store.accounts.is_empty());
		assert!(store.trades.is_empty());
		assert!(store.activities.is_empty());
	}

	#[test]
	fn test_rejects_bad_records() {
		let zero_shares = r#"{"trade_confirmations": [
			{"symbol": "ABC", "account": "X", "is_buy": true,
			 "trade_date": "2023-01-01", "n_shares": 0, "total": "0"}
		]}"#;
		let err = Store::from_json(zero_shares).unwrap_err();
		assert!(err.to_string().contains("#1"));

		let bad_flag = r#"{"trade_confirmations": [
			{"symbol": "ABC", "account": "X", "is_buy": 2,
			 "trade_date": "2023-01-01", "n_shares": 1, "total": "1"}
		]}"#;
		assert!(Store::from_json(bad_flag).is_err());

		let bad_date = r#"{"trade_confirmations": [
			{"symbol": "ABC", "account": "X", "is_buy": true,
			 "trade_date": "01/02/2023", "n_shares": 1, "total": "1"}
		]}"#;
		assert!(Store::from_json(bad_date).is_err());
	}

	#[test]
	fn test_float_flags() {
		let trades = r#"{"trade_confirmations": [
			{"symbol": "ABC", "account": "X", "is_buy": 1.0,
			 "trade_date": "2023-01-01", "n_shares": 1, "total": "1"},
			{"symbol": "ABC", "account": "X", "is_buy": 0.0,
			 "trade_date": "2023-01-02", "n_shares": 1, "total": "2"}
		]}"#;
		let store = Store::from_json(trades).unwrap();
		assert_eq!(store.trades[0].side(), Side::Buy);
		assert_eq!(store.trades[1].side(), Side::Sell);

		let half = r#"{"trade_confirmations": [
			{"symbol": "ABC", "account": "X", "is_buy": 0.5,
			 "trade_date": "2023-01-01", "n_shares": 1, "total": "1"}
		]}"#;
		assert!(Store::from_json(half).is_err());
	}
}
