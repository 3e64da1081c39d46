//! Output formatting for the CLI.

use std::time::Duration;

use console::{measure_text_width, pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressStyle};
use stockroom_model::{RowAction, RowStatus, RowView, TableView, ViewMode};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table with a bold header line and columns sized to content.
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if self.json {
            return;
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }

        let header: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad_str(h, *w, Alignment::Left, None).into_owned())
            .collect();
        println!("  {}", style(header.join("  ")).bold());

        for row in rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| pad_str(cell, *w, Alignment::Left, None).into_owned())
                .collect();
            println!("  {}", line.join("  "));
        }
    }

    /// Print an inventory table under its title, or its JSON form.
    pub fn inventory(&self, table: &TableView) {
        if self.json {
            self.json(table);
            return;
        }

        self.header(table.title);
        if table.rows.is_empty() {
            self.info("No rows");
        } else {
            self.table(&table.headers, &table_cells(table));
        }

        for (id, error) in &table.errors {
            self.warn(&format!("Row {}: {}", id, error));
        }
    }

    /// Create a spinner for a backend round trip.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(spinner_style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Status badge for a row in the "all" view.
pub fn status_badge(status: RowStatus) -> String {
    match status {
        RowStatus::Active => style(status.label()).green().to_string(),
        RowStatus::Deleted => style(status.label()).dim().to_string(),
    }
}

/// Cells for every row, in header order.
pub fn table_cells(table: &TableView) -> Vec<Vec<String>> {
    table.rows.iter().map(|row| row_cells(row, table.view)).collect()
}

fn row_cells(row: &RowView, view: ViewMode) -> Vec<String> {
    let mut cells = vec![
        row.id.to_string(),
        row.warehouse_id.to_string(),
        row.sku.clone(),
        row.product_name.to_string(),
        row.description.clone(),
        row.quantity.to_string(),
        row.unit.to_string(),
    ];
    let comments = row.comments.clone().unwrap_or_default();

    match view {
        ViewMode::Active => cells.extend([
            action_cell(row, RowAction::Edit),
            action_cell(row, RowAction::Delete),
        ]),
        ViewMode::Deleted => cells.extend([comments, action_cell(row, RowAction::Restore)]),
        ViewMode::All => {
            let actions: Vec<&str> = row.actions.iter().map(|a| a.as_str()).collect();
            cells.extend([
                row.status.map(status_badge).unwrap_or_default(),
                comments,
                actions.join("/"),
            ]);
        }
    }
    cells
}

fn action_cell(row: &RowView, action: RowAction) -> String {
    if row.allows(action) {
        action.as_str().to_string()
    } else {
        String::new()
    }
}
