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
use rust_decimal::Decimal;
use std::fmt;

/// A dollar value for display on reports. Rounds to cents, and shows
/// negative values in parentheses the way tax worksheets do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dollars(pub Decimal);

impl fmt::Display for Dollars {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let cents = self.0.round_dp(2);
		if cents.is_sign_negative() && !cents.is_zero() {
			write!(f, "({:.2})", -cents)
		} else {
			write!(f, "{:.2}", cents.abs())
		}
	}
}
