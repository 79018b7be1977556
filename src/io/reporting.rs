// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::SimulationOutcome;
use crate::simulation::stats::SeriesStats;
use std::path::Path;
use tracing::info;

/// Formats a currency amount with thousands separators and two decimals,
/// without the leading `$`.
pub fn format_amount(value: f64) -> String {
    let abs_cents = (value.abs() * 100.0).round() as u64;
    let dollars = abs_cents / 100;
    let cents = abs_cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && abs_cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents:02}")
}

/// `$930,000.00 ± 1,234.56`
pub fn format_estimate(stats: &SeriesStats) -> String {
    format!(
        "${} ± {}",
        format_amount(stats.mean),
        format_amount(stats.standard_error)
    )
}

/// Human-readable summary of a run, one line per item.
pub fn summary_lines(outcome: &SimulationOutcome, initial_budget: f64) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Mean Total Cost (Purchase Model): {}",
            format_estimate(&outcome.purchase)
        ),
        format!(
            "Mean Total Cost (Hire Model):     {}",
            format_estimate(&outcome.hire)
        ),
    ];

    let difference = outcome.hire.mean - outcome.purchase.mean;
    let cheaper = if difference > 0.0 {
        "Purchase"
    } else if difference < 0.0 {
        "Hire"
    } else {
        "Neither"
    };
    lines.push(format!(
        "Cheaper on average: {cheaper} (by ${})",
        format_amount(difference.abs())
    ));
    lines.push(format!(
        "Initial budget: ${} | trials: {} | seed: {}",
        format_amount(initial_budget),
        outcome.trials,
        outcome.seed
    ));
    lines
}

/// Writes the per-trial samples to a CSV file (`trial,purchase_total,hire_total`).
pub fn write_samples_csv<P: AsRef<Path>>(path: P, outcome: &SimulationOutcome) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in outcome.records() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(
        rows = outcome.trials,
        path = %path.display(),
        "exported trial samples"
    );
    Ok(())
}
