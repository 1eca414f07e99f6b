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
use log::debug;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
	pub number: String,
	pub name: String,
}

/// Account lookup for reports. An account is taxable unless its name
/// contains one of the tax-deferred markers (e.g. "IRA").
pub struct Accounts {
	names: HashMap<String, String>, // number -> name
	tax_deferred_markers: Vec<String>,
}

impl Accounts {
	pub fn new(accounts: &[Account], tax_deferred_markers: &[String]) -> Self {
		Self {
			names: accounts
				.iter()
				.map(|a| (a.number.clone(), a.name.clone()))
				.collect(),
			tax_deferred_markers: tax_deferred_markers.to_vec(),
		}
	}

	pub fn name(&self, number: &str) -> Option<&str> {
		self.names.get(number).map(String::as_str)
	}

	/// Accounts missing from the store are treated as taxable, so that
	/// nothing is left off a tax report by omission.
	pub fn is_taxable(&self, number: &str) -> bool {
		match self.name(number) {
			Some(name) => !self
				.tax_deferred_markers
				.iter()
				.any(|marker| name.contains(marker.as_str())),
			None => {
				debug!("account {} is not on file; assuming taxable", number);
				true
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

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

	#[test]
	fn test_is_taxable() {
		let accounts = accounts();
		assert!(accounts.is_taxable("X-1"));
		assert!(!accounts.is_taxable("R-1"));
		assert!(accounts.is_taxable("unknown"));
	}

	#[test]
	fn test_name() {
		let accounts = accounts();
		assert_eq!(accounts.name("R-1"), Some("Roth IRA"));
		assert_eq!(accounts.name("nope"), None);
	}
}
