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
use crate::reports::table::{escape_html, Table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
	Text,
	Html,
}

/// A headed sequence of report tables, rendered as a whole.
pub struct Document {
	heading: String,
	tables: Vec<Table>,
}

const HTML_HEAD: &str = "<html>
<head>
<style>
table, th, td {
    border: 1px solid black;
}
</style>
</head>
<body>
";

impl Document {
	pub fn new(heading: &str) -> Self {
		Self {
			heading: heading.to_string(),
			tables: vec![],
		}
	}

	pub fn extend(&mut self, tables: impl IntoIterator<Item = Table>) {
		self.tables.extend(tables);
	}

	pub fn render(&self, format: OutputFormat) -> String {
		match format {
			OutputFormat::Text => {
				let mut out = format!(
					"{}\n{}\n",
					self.heading,
					"=".repeat(self.heading.chars().count())
				);
				for table in &self.tables {
					out.push('\n');
					out.push_str(&table.render_text());
				}
				out
			},
			OutputFormat::Html => {
				let mut out = HTML_HEAD.to_string();
				out.push_str(&format!(
					"<h2>{}</h2>\n",
					escape_html(&self.heading)
				));
				for table in &self.tables {
					out.push_str(&table.render_html());
				}
				out.push_str("</body>\n</html>\n");
				out
			},
		}
	}
}
