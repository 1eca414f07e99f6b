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
use crate::investment::account::Accounts;
use crate::investment::history::TradeHistories;
use crate::investment::matcher::{LotMatcher, MatchedGroup};
use crate::parsing::filesystem::Filesystem;
use crate::parsing::store::Store;
use crate::reports::document::{Document, OutputFormat};
use crate::reports::income_reporter::IncomeReporter;
use crate::reports::position_reporter::PositionReporter;
use crate::reports::sales_reporter::SalesReporter;
use crate::util::date::{parse_date, today};
use anyhow::{bail, Error};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueEnum};
use log::{debug, warn, LevelFilter};

mod config;
mod investment;
mod logger;
mod parsing;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "taxr",
	version = "1.0",
	about = "Tax and position reports for a personal investment store"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The report to render
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Specifies the store file (default: data.file from the config)
	#[arg(short)]
	file: Option<String>,

	/// The tax year to report on (default: last year)
	#[arg(short, long)]
	year: Option<i32>,

	/// Measure open position ages as of this date (YYYY-MM-DD; default: today)
	#[arg(long)]
	as_of: Option<String>,

	/// Custom config file location (default: ~/.config/taxr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Render reports as HTML instead of plain text
	#[arg(long)]
	html: bool,

	/// Skip symbols whose sales can't be matched to purchases, rather than
	/// failing the whole report
	#[arg(long)]
	lenient: bool,

	/// Fail if any symbol's trades are not in chronological order
	#[arg(long)]
	strict_order: bool,

	/// Output debug info
	#[arg(short, long)]
	debug: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(year) = self.year {
			if !(1900..=9999).contains(&year) {
				bail!("Year must be between 1900 and 9999");
			}
		}

		if let Some(as_of) = &self.as_of {
			parse_date(as_of)?;
		}

		Ok(())
	}

	fn format(&self) -> OutputFormat {
		if self.html {
			OutputFormat::Html
		} else {
			OutputFormat::Text
		}
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Sales,  // form 8949
	Income, // 1040 schedule b
	Tax,    // both of the above
	Age,    // open positions
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	logger::init(if args.debug {
		LevelFilter::Debug
	} else {
		LevelFilter::Info
	})?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let path = store_path(&args, &config)?;
	let store = Store::load(&fs, &path)?;

	let tax = config.tax();
	let accounts = Accounts::new(&store.accounts, &tax.tax_deferred_markers);
	let histories = TradeHistories::from_trades(&store.trades, &tax.capital_assets);
	if histories.is_empty() {
		warn!("No capital asset trades in {}", path);
	} else {
		debug!("{} symbol and account groups to match", histories.len());
	}

	let year = args.year.unwrap_or_else(|| today().year() - 1);

	let document = match args.command {
		Directive::Sales => {
			let mut document =
				Document::new(&format!("Form 8949 details for {}", year));
			let groups = match_trades(&args, &histories)?;
			document.extend(SalesReporter::new(&groups, &accounts, year).tables());
			document
		},
		Directive::Income => {
			let mut document = Document::new(&format!(
				"1040 Schedule B details for {}",
				year
			));
			document.extend(
				IncomeReporter::new(&store.activities, &accounts, year).tables(),
			);
			document
		},
		Directive::Tax => {
			let mut document =
				Document::new(&format!("Tax details for {}", year));
			let groups = match_trades(&args, &histories)?;
			document.extend(
				IncomeReporter::new(&store.activities, &accounts, year).tables(),
			);
			document.extend(SalesReporter::new(&groups, &accounts, year).tables());
			document
		},
		Directive::Age => {
			let as_of = as_of(&args)?;
			let mut document =
				Document::new(&format!("Open positions as of {}", as_of));
			// later sells must not close lots that were still held then
			let held = histories.through(&as_of);
			let groups = match_trades(&args, &held)?;
			document.extend(PositionReporter::new(&groups, &as_of).tables());
			document
		},
	};

	print!("{}", document.render(args.format()));
	Ok(())
}

/// The command line takes precedence over the config
fn store_path(args: &Cli, config: &Config) -> Result<String, Error> {
	match (&args.file, config.data_file()) {
		(Some(file), _) => Ok(file.clone()),
		(None, Some(file)) => Ok(file.to_string()),
		(None, None) => {
			bail!("No store file given; pass -f or set data.file in the config")
		},
	}
}

fn as_of(args: &Cli) -> Result<NaiveDate, Error> {
	match &args.as_of {
		Some(date) => parse_date(date),
		None => Ok(today()),
	}
}

/// Matches every symbol and account. Unmatched sells fail the run unless
/// running leniently, in which case the affected symbols are skipped.
fn match_trades<'a>(
	args: &Cli,
	histories: &'a TradeHistories,
) -> Result<Vec<MatchedGroup<'a>>, Error> {
	let matcher = LotMatcher::new().validating(args.strict_order);

	if args.lenient {
		Ok(matcher.match_lenient(histories))
	} else {
		Ok(matcher.match_all(histories)?)
	}
}
