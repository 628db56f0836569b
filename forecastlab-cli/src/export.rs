//! Reporting and export — console summaries and the CSV bin table.

use anyhow::{Context, Result};
use forecastlab_core::domain::{Dataset, QuantileSet, Scaling};
use forecastlab_core::engine::{DistributionSummary, SliderFit};

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a dataset as CSV, one row per bin.
///
/// Columns: bin, location (internal right edge), value (location in question
/// units), pmf and cdf (both as shares of the whole distribution, so open-bound
/// tails are accounted for).
pub fn export_bins_csv(dataset: &Dataset, scaling: &Scaling) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bin", "location", "value", "pmf", "cdf"])?;

    let pmf = dataset.absolute_pmf();
    let cdf = dataset.absolute_cdf();
    for (i, (p, c)) in pmf.iter().zip(&cdf).enumerate() {
        let location = dataset.bin_location(i);
        wtr.write_record([
            &i.to_string(),
            &format!("{location:.6}"),
            &format!("{:.6}", scaling.scale_internal(location)),
            &format!("{p:.9}"),
            &format!("{c:.9}"),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Console output ─────────────────────────────────────────────────

pub fn print_summary(mode: &str, summary: &DistributionSummary, bins: usize) {
    println!();
    println!("=== Distribution ({mode} input, {bins} bins) ===");
    println!(
        "Lower 25%:      {:.4}  (axis {:.4})",
        summary.nominal.lower25, summary.quartiles.lower25
    );
    println!(
        "Median:         {:.4}  (axis {:.4})",
        summary.nominal.median, summary.quartiles.median
    );
    println!(
        "Upper 75%:      {:.4}  (axis {:.4})",
        summary.nominal.upper75, summary.quartiles.upper75
    );
    println!(
        "Mean (inbound): {:.4}  (axis {:.4})",
        summary.nominal.mean, summary.mean
    );
    if summary.lower_tail > 0.0 || summary.upper_tail > 0.0 {
        println!();
        println!("Below range:    {:.2}%", summary.lower_tail * 100.0);
        println!("Above range:    {:.2}%", summary.upper_tail * 100.0);
    }
}

pub fn print_quantiles(quantiles: &QuantileSet, scaling: &Scaling) {
    println!();
    println!("{:<10} {:>12} {:>14}", "Quantile", "Probability", "Value");
    println!("{}", "-".repeat(38));
    for q in quantiles.quantiles(scaling) {
        println!(
            "{:<10} {:>12.4} {:>14.4}",
            format!("{:?}", q.kind),
            q.probability,
            q.value
        );
    }
}

pub fn print_fit(fit: &SliderFit) {
    println!();
    println!("{:<4} {:>8} {:>8} {:>8} {:>8}", "#", "left", "center", "right", "weight");
    println!("{}", "-".repeat(40));
    for (i, c) in fit.components.iter().enumerate() {
        println!(
            "{:<4} {:>8.4} {:>8.4} {:>8.4} {:>8.3}",
            i, c.left, c.center, c.right, c.weight
        );
    }
    println!();
    println!("Residual:       {:.3e}", fit.residual);
    println!("Iterations:     {}", fit.iterations);
    println!("Converged:      {}", fit.converged);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_one_row_per_bin() {
        let d = Dataset::uniform(4, false, false);
        let csv = export_bins_csv(&d, &Scaling::linear(0.0, 8.0)).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "bin,location,value,pmf,cdf");
        assert_eq!(lines[2], "1,0.500000,4.000000,0.250000000,0.500000000");
    }

    #[test]
    fn csv_cdf_includes_lower_tail() {
        let d = Dataset::from_mass(vec![0.4, 0.4], 0.2, 0.0, true, false);
        let csv = export_bins_csv(&d, &Scaling::linear(0.0, 1.0)).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        let first_cdf: f64 = rows[0][4].parse().unwrap();
        assert!((first_cdf - 0.6).abs() < 1e-6);
        let last_cdf: f64 = rows[1][4].parse().unwrap();
        assert!((last_cdf - 1.0).abs() < 1e-6);
    }
}
