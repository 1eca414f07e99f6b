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

/// A titled table of single-line rows, rendered either as aligned plain
/// text or as an HTML `<table>`. Separators only exist in the text form.
pub struct Table {
	title: String,
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
	PartialSeparator(Vec<bool>), // indicates columns by index
}

impl Table {
	pub fn new(title: &str, column_count: usize) -> Self {
		Self {
			title: title.to_string(),
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Adds a partial separator row for selected columns.
	pub fn add_partial_separator(&mut self, indices: Vec<usize>) {
		let mut cols = vec![false; self.column_count];
		for i in indices {
			cols[i] = true;
		}
		self.rows.push(Row::PartialSeparator(cols));
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn render_text(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in self.columns(cells) {
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		let mut lines = vec![self.title.clone()];
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self
					.columns(cells)
					.map(|(i, value)| center_align(value, max_widths[i]))
					.collect::<Vec<_>>()
					.join(" | "),
				Row::Data(cells) => self
					.columns(cells)
					.map(|(i, value)| {
						if self.right_align[i] {
							format!("{:>width$}", value, width = max_widths[i])
						} else {
							format!("{:<width$}", value, width = max_widths[i])
						}
					})
					.collect::<Vec<_>>()
					.join("   "),
				Row::Separator => {
					let total_width = max_widths.iter().sum::<usize>()
						+ (3 * self.column_count.saturating_sub(1));
					"-".repeat(total_width)
				},
				Row::PartialSeparator(cols) => cols
					.iter()
					.enumerate()
					.map(|(i, draw)| {
						let fill = if *draw { "-" } else { " " };
						fill.repeat(max_widths[i])
					})
					.collect::<Vec<_>>()
					.join("   "),
			};
			lines.push(line.trim_end().to_string());
		}

		lines.join("\n") + "\n"
	}

	pub fn render_html(&self) -> String {
		let mut html = String::from("<table>\n");
		html.push_str(&format!(
			"<tr><th colspan=\"{}\">{}</th></tr>\n",
			self.column_count,
			escape_html(&self.title)
		));

		for row in &self.rows {
			match row {
				Row::Header(cells) => {
					html.push_str("<tr>");
					for (_, value) in self.columns(cells) {
						html.push_str(&format!("<th>{}</th>", escape_html(value)));
					}
					html.push_str("</tr>\n");
				},
				Row::Data(cells) => {
					html.push_str("<tr>");
					for (i, value) in self.columns(cells) {
						let align = if self.right_align[i] {
							" align=\"right\""
						} else {
							""
						};
						let value = if value.is_empty() {
							"&nbsp;".to_string()
						} else {
							escape_html(value)
						};
						html.push_str(&format!("<td{}>{}</td>", align, value));
					}
					html.push_str("</tr>\n");
				},
				Row::Separator | Row::PartialSeparator(_) => {},
			}
		}

		html.push_str("</table>\n");
		html
	}

	/// Cells paired with their column index, ignoring any beyond the
	/// declared column count.
	fn columns<'a>(
		&self,
		cells: &'a [String],
	) -> impl Iterator<Item = (usize, &'a str)> {
		cells
			.iter()
			.take(self.column_count)
			.map(String::as_str)
			.enumerate()
	}
}

fn center_align(value: &str, width: usize) -> String {
	let len = value.chars().count();
	if len >= width {
		return value.to_string();
	}
	let total_padding = width - len;
	let left_padding = total_padding / 2;
	let right_padding = total_padding - left_padding;

	format!(
		"{}{}{}",
		" ".repeat(left_padding),
		value,
		" ".repeat(right_padding)
	)
}

pub fn escape_html(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}
