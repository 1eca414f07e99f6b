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
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Non-trade account activity: interest, dividends, and anything else a
/// brokerage statement lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
	pub date: NaiveDate,
	pub account: String,

	/// The payer, as it should appear on Schedule B
	pub name: String,
	pub symbol: Option<String>,

	pub kind: ActivityKind,
	pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivityKind {
	Interest,
	Dividend,
	Other(String),
}

impl ActivityKind {
	pub fn from_str(kind: &str) -> Self {
		match kind.trim().to_ascii_lowercase().as_str() {
			"interest" => ActivityKind::Interest,
			"dividend" => ActivityKind::Dividend,
			other => ActivityKind::Other(other.to_string()),
		}
	}
}
