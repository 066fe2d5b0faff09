//! Terminal output for the `luxe` binary.
//!
//! Human-readable lines go to stdout behind a colored marker. With `--json`
//! they are suppressed so stdout carries a single JSON document; errors are
//! still reported, as `{"error": ...}` on stderr.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use luxe_commerce::checkout::CheckoutStatus;
use luxe_commerce::Money;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn info(&self, msg: &str) {
        self.line(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.line(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Fixed-width table with a dimmed header row.
    pub fn table(&self, header: &[&str], rows: &[Vec<String>], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", style(pad_row(header.iter().copied(), widths)).dim());
        for row in rows {
            println!("  {}", pad_row(row.iter().map(String::as_str), widths));
        }
    }

    /// Subtotal, shipping and total block; zero shipping reads as FREE.
    pub fn totals(&self, subtotal: &Money, shipping: &Money, total: &Money) {
        if self.json {
            return;
        }
        let shipping = if shipping.is_zero() {
            style("FREE".to_string()).green().to_string()
        } else {
            shipping.display()
        };
        self.kv("Subtotal", &subtotal.display());
        self.kv("Shipping", &shipping);
        self.kv("Total", &style(total.display()).bold().to_string());
    }

    /// Spinner for a provider round-trip; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    fn line(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }
}

fn pad_row<'a>(cols: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells: Vec<String> = cols
        .zip(widths)
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect();
    cells.join("  ").trim_end().to_string()
}

/// Colored label for a checkout outcome.
pub fn status_badge(status: CheckoutStatus) -> String {
    match status {
        CheckoutStatus::Completed => style(status.as_str()).green().to_string(),
        CheckoutStatus::Failed => style(status.as_str()).red().to_string(),
        CheckoutStatus::Cancelled => style(status.as_str()).dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_row() {
        let row = pad_row(["gel", "Crimson Gel", "$18.50"].into_iter(), &[6, 14, 8]);
        assert_eq!(row, "gel     Crimson Gel     $18.50");
    }
}
