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
use crate::config::config_file::Config;
use anyhow::{anyhow, Context, Error};
use dirs::home_dir;
use log::debug;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

pub struct Filesystem {
	home: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self { home: home_dir() }
	}

	pub fn read_to_string(&self, file_path: &str) -> Result<String, Error> {
		let path = self.expand(file_path)?;
		fs::read_to_string(&path)
			.with_context(|| format!("failed to read {}", path.display()))
	}

	/// Resolves a leading "~/" against the home directory.
	pub fn expand(&self, file_path: &str) -> Result<PathBuf, Error> {
		match file_path.strip_prefix("~/") {
			Some(rest) => {
				let home = self
					.home
					.as_ref()
					.ok_or_else(|| anyhow!("Unable to determine home directory"))?;
				Ok(home.join(rest))
			},
			None => Ok(PathBuf::from(file_path)),
		}
	}

	/// Fetches the config from the given path, or the default path if none.
	/// The default config file is created empty if it doesn't exist yet; a
	/// custom path that doesn't exist is an error.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => self.expand("~/.config/taxr/config.toml")?,
			Some(p) => self.expand(p)?,
		};

		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(&config_path)?;
			debug!("created empty config at {}", config_path.display());
		}

		let content = fs::read_to_string(&config_path).with_context(|| {
			format!("failed to read config {}", config_path.display())
		})?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_expand() {
		let filesystem = Filesystem {
			home: Some(PathBuf::from("/home/someone")),
		};
		assert_eq!(
			filesystem.expand("~/data/investments.json").unwrap(),
			PathBuf::from("/home/someone/data/investments.json")
		);
		assert_eq!(
			filesystem.expand("data/investments.json").unwrap(),
			PathBuf::from("data/investments.json")
		);

		let homeless = Filesystem { home: None };
		assert!(homeless.expand("~/x").is_err());
		assert!(homeless.expand("/tmp/x").is_ok());
	}

	#[test]
	fn test_missing_custom_config_fails() {
		let filesystem = Filesystem::new();
		let path = "/nonexistent/taxr/config.toml".to_string();
		assert!(filesystem.get_config(Some(&path)).is_err());
	}
}
