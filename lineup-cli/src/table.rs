//! Roster rendering
//!
//! Grid layout:
//! - `+---+` rules between rows, `+===+` under the header
//! - numeric columns right aligned, text left aligned
//! - every column in the order of the source table

use lineup_core::{PlayerRecord, Roster};
use serde_json::{Map, Value};

/// Header cells get this much room beyond their text
const HEADER_PADDING: usize = 2;

/// Render the roster as a grid table
pub fn render_grid(headers: &[String], roster: &Roster<'_>) -> String {
    let rows: Vec<Vec<&str>> = roster.players().map(|p| row_cells(headers, p)).collect();
    grid(headers, &rows)
}

/// The roster as a JSON array of objects, keys in column order
pub fn players_json(headers: &[String], roster: &Roster<'_>) -> Value {
    let players: Vec<Value> = roster
        .players()
        .map(|p| {
            let object: Map<String, Value> = headers
                .iter()
                .map(|h| (h.clone(), Value::String(p.get(h).unwrap_or_default().to_string())))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(players)
}

fn row_cells<'a>(headers: &[String], player: &'a PlayerRecord) -> Vec<&'a str> {
    headers.iter().map(|h| player.get(h).unwrap_or_default()).collect()
}

fn grid(headers: &[String], rows: &[Vec<&str>]) -> String {
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| Column::measure(h, rows.iter().map(|r| r[i])))
        .collect();

    let mut out = String::new();
    out.push_str(&rule(&columns, '-'));
    out.push_str(&line(&columns, headers.iter().map(String::as_str)));
    out.push_str(&rule(&columns, '='));
    for row in rows {
        out.push_str(&line(&columns, row.iter().copied()));
        out.push_str(&rule(&columns, '-'));
    }
    out
}

struct Column {
    width: usize,
    numeric: bool,
}

impl Column {
    fn measure<'a>(header: &str, cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        let widest_cell = cells.clone().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut values = cells.peekable();
        let numeric = values.peek().is_some() && values.all(is_number);

        Self {
            width: widest_cell.max(header.chars().count() + HEADER_PADDING),
            numeric,
        }
    }

    fn pad(&self, text: &str) -> String {
        if self.numeric {
            format!("{:>width$}", text, width = self.width)
        } else {
            format!("{:<width$}", text, width = self.width)
        }
    }
}

fn is_number(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok()
}

fn rule(columns: &[Column], fill: char) -> String {
    let mut out = String::from("+");
    for column in columns {
        out.extend(std::iter::repeat(fill).take(column.width + 2));
        out.push('+');
    }
    out.push('\n');
    out
}

fn line<'a>(columns: &[Column], cells: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::from("|");
    for (column, cell) in columns.iter().zip(cells) {
        out.push(' ');
        out.push_str(&column.pad(cell));
        out.push_str(" |");
    }
    out.push('\n');
    out
}
