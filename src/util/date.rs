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
use anyhow::{anyhow, Error};
use chrono::{Local, NaiveDate};

/// Parses a date in the "YYYY-mm-dd" format. Anything after the first space
/// is ignored, so date-times exported from a spreadsheet or database
/// ("2024-03-01 00:00:00") resolve to their calendar date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, Error> {
	let date_part = date_str.trim().split(' ').next().unwrap_or_default();

	NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
		.map_err(|e| anyhow!("invalid date '{}': {}", date_str, e))
}

pub fn is_leap_year(year: i32) -> bool {
	(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_year(year: i32) -> i64 {
	if is_leap_year(year) {
		366
	} else {
		365
	}
}

/// Number of calendar days from one date to another; negative if `to`
/// precedes `from`.
pub fn days_between(from: &NaiveDate, to: &NaiveDate) -> i64 {
	(*to - *from).num_days()
}

/// The "mm/dd/YYYY" style used on US tax forms
pub fn format_us(date: &NaiveDate) -> String {
	date.format("%m/%d/%Y").to_string()
}

pub fn today() -> NaiveDate {
	Local::now().date_naive()
}
