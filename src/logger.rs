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

//! Routes the `log` macros to stderr, so that stdout carries nothing but
//! the report itself.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}

		match record.level() {
			Level::Info => eprintln!("{}", record.args()),
			level => eprintln!(
				"[{}] {}",
				level.as_str().to_lowercase(),
				record.args()
			),
		}
	}

	fn flush(&self) {}
}

/// Installs the global logger. Can only be called once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
	log::set_logger(&LOGGER)?;
	log::set_max_level(level);
	Ok(())
}
