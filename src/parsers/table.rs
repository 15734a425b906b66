use crate::error::{Result, ScrapeError};
use crate::parsers::html::{Document, Element};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Column names of the comparison table, index column first
pub const COLUMNS: [&str; 3] = ["Description", "Mars", "Earth"];

/// One row of the Mars/Earth comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRow {
    pub description: String,
    pub mars: String,
    pub earth: String,
}

/// The comparison table, indexed by `Description`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactTable {
    pub rows: Vec<FactRow>,
}

impl FactTable {
    /// Parse the first `<table>` of a page into the fixed three-column schema.
    ///
    /// Leading rows made only of `<th>` cells are treated as the header and
    /// dropped. Fails when the page has no table or the table is not three
    /// columns wide.
    pub fn from_html(markup: &str) -> Result<Self> {
        let doc = Document::parse(markup);
        let table = doc
            .select_one("table")?
            .ok_or_else(|| ScrapeError::Fetch("no table found".to_string()))?;

        let mut width = 0;
        let mut data_rows: Vec<Vec<String>> = Vec::new();
        for row in table.select_all("tr")? {
            let cells = row.select_all("th, td")?;
            if cells.is_empty() {
                continue;
            }
            width = width.max(cells.len());

            if data_rows.is_empty() && is_header_row(&cells) {
                ::log::trace!("Skipping table header row");
                continue;
            }
            data_rows.push(cells.iter().map(Element::clean_text).collect());
        }

        if width != COLUMNS.len() {
            return Err(ScrapeError::Fetch(format!(
                "expected {} columns, found {}",
                COLUMNS.len(),
                width
            )));
        }

        let rows = data_rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(COLUMNS.len(), String::new());
                let mut cells = cells.into_iter();
                FactRow {
                    description: cells.next().unwrap_or_default(),
                    mars: cells.next().unwrap_or_default(),
                    earth: cells.next().unwrap_or_default(),
                }
            })
            .collect();

        Ok(Self { rows })
    }

    /// Render as an HTML table fragment with `Description` as the index column
    pub fn to_html(&self, classes: &str) -> String {
        let mut class_attr = String::from("dataframe");
        if !classes.trim().is_empty() {
            class_attr.push(' ');
            class_attr.push_str(classes.trim());
        }

        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "<table border=\"1\" class=\"{}\">", class_attr);
        out.push_str("  <thead>\n");
        out.push_str("    <tr style=\"text-align: right;\">\n");
        out.push_str("      <th></th>\n");
        for column in &COLUMNS[1..] {
            let _ = writeln!(out, "      <th>{}</th>", column);
        }
        out.push_str("    </tr>\n");
        out.push_str("    <tr>\n");
        let _ = writeln!(out, "      <th>{}</th>", COLUMNS[0]);
        out.push_str("      <th></th>\n      <th></th>\n");
        out.push_str("    </tr>\n");
        out.push_str("  </thead>\n");
        out.push_str("  <tbody>\n");
        for row in &self.rows {
            out.push_str("    <tr>\n");
            let _ = writeln!(out, "      <th>{}</th>", escape_html(&row.description));
            let _ = writeln!(out, "      <td>{}</td>", escape_html(&row.mars));
            let _ = writeln!(out, "      <td>{}</td>", escape_html(&row.earth));
            out.push_str("    </tr>\n");
        }
        out.push_str("  </tbody>\n");
        out.push_str("</table>");
        out
    }

    pub fn get(&self, description: &str) -> Option<&FactRow> {
        self.rows.iter().find(|row| row.description == description)
    }
}

fn is_header_row(cells: &[Element<'_>]) -> bool {
    cells.iter().all(|cell| cell.tag_name() == "th")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
