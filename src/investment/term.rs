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
use crate::util::date::{days_between, days_in_year};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Holding period classification for capital gains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Term {
	Short,
	Long,
}

impl Term {
	/// A holding is long-term once it has been held for more days than
	/// there are in the year it was disposed of (or measured in).
	pub fn classify(acquired: &NaiveDate, disposed: &NaiveDate) -> Term {
		if days_between(acquired, disposed) <= days_in_year(disposed.year()) {
			Term::Short
		} else {
			Term::Long
		}
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Term::Short => write!(f, "short"),
			Term::Long => write!(f, "long"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn test_classify() {
		let bought = date(2022, 6, 1);

		assert_eq!(Term::classify(&bought, &date(2022, 12, 1)), Term::Short);
		// exactly 365 days, disposed in a 365-day year
		assert_eq!(Term::classify(&bought, &date(2023, 6, 1)), Term::Short);
		assert_eq!(Term::classify(&bought, &date(2023, 6, 2)), Term::Long);
	}

	#[test]
	fn test_classify_leap_year_disposal() {
		let bought = date(2023, 3, 1);

		// 366 days, but 2024 has 366 days
		assert_eq!(Term::classify(&bought, &date(2024, 3, 1)), Term::Short);
		assert_eq!(Term::classify(&bought, &date(2024, 3, 2)), Term::Long);
	}

	#[test]
	fn test_display() {
		assert_eq!(Term::Short.to_string(), "short");
		assert_eq!(Term::Long.to_string(), "long");
	}
}
