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
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub data: Option<Data>,
	pub tax: Option<Tax>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Data {
	/// Location of the store file, used when none is given on the command
	/// line. A leading "~/" is expanded to the home directory.
	pub file: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tax {
	/// Trade types that count as capital assets, as defined by the IRS
	pub capital_assets: Vec<String>,

	/// Accounts whose names contain any of these are left off tax reports
	pub tax_deferred_markers: Vec<String>,
}

impl Default for Tax {
	fn default() -> Self {
		Self {
			capital_assets: vec![
				"bond".to_string(),
				"preferred stock".to_string(),
				"stock".to_string(),
			],
			tax_deferred_markers: vec!["IRA".to_string()],
		}
	}
}

impl Config {
	pub fn tax(&self) -> Tax {
		self.tax.clone().unwrap_or_default()
	}

	pub fn data_file(&self) -> Option<&str> {
		self.data.as_ref().and_then(|d| d.file.as_deref())
	}
}
