//! Semicolon-delimited sweep report grid: one row per quota setting, one
//! column per bias setting, each cell the mean score for that (quota, bias)
//! pair. Row labels carry the share of seats *not* reserved by the cap,
//! `100 * (1 - quota)`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::sweep::CellResult;

/// Write the pivoted grid to any writer. Results must cover the full
/// quota × bias grid (the sweep driver always produces it); a hole in the
/// grid is an error, not an empty cell.
pub fn write_report<W: Write>(writer: W, results: &[CellResult]) -> Result<(), String> {
    let quotas = unique_in_order(results.iter().map(|cell| cell.quota_fraction));
    let biases = unique_in_order(results.iter().map(|cell| cell.bias_factor));
    if quotas.is_empty() || biases.is_empty() {
        return Err("nothing to report: no sweep cells".to_string());
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    let mut header = Vec::with_capacity(1 + biases.len());
    header.push("Quota".to_string());
    for &bias in &biases {
        header.push(format!("Bias={}", trim_float(bias)));
    }
    csv_writer
        .write_record(&header)
        .map_err(|err| format!("unable to write report header: {err}"))?;

    for &quota in &quotas {
        let mut row = Vec::with_capacity(1 + biases.len());
        row.push(format!("{} %", trim_float(100.0 * (1.0 - quota))));
        for &bias in &biases {
            let cell = results
                .iter()
                .find(|cell| cell.quota_fraction == quota && cell.bias_factor == bias)
                .ok_or_else(|| {
                    format!("missing sweep cell for quota={quota}, bias={bias}")
                })?;
            row.push(cell.mean_score.to_string());
        }
        csv_writer
            .write_record(&row)
            .map_err(|err| format!("unable to write report row: {err}"))?;
    }

    csv_writer
        .flush()
        .map_err(|err| format!("unable to flush report: {err}"))
}

pub fn write_report_file(path: &str, results: &[CellResult]) -> Result<(), String> {
    let file =
        File::create(Path::new(path)).map_err(|err| format!("unable to create '{path}': {err}"))?;
    write_report(file, results)
}

/// First-seen order, exact-value dedup. The values come verbatim from the
/// scenario's grid vectors, so float equality is the right comparison.
fn unique_in_order(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

/// Fixed-precision format with trailing zeros stripped, so grid labels stay
/// readable even when `1 - quota` carries float noise.
fn trim_float(value: f64) -> String {
    let fixed = format!("{value:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(quota: f64, bias: f64, mean: f64) -> CellResult {
        CellResult {
            quota_fraction: quota,
            bias_factor: bias,
            mean_score: mean,
            repetitions: 10,
        }
    }

    #[test]
    fn report_pivots_cells_into_grid() {
        let results = vec![
            cell(0.5, 0.01, 0.25),
            cell(0.5, 1.0, 0.5),
            cell(0.7, 0.01, 0.75),
            cell(0.7, 1.0, 1.0),
        ];
        let mut buffer = Vec::new();
        write_report(&mut buffer, &results).expect("report should write");
        let text = String::from_utf8(buffer).expect("report is utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Quota;Bias=0.01;Bias=1");
        assert_eq!(lines[1], "50 %;0.25;0.5");
        assert_eq!(lines[2], "30 %;0.75;1");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn quota_labels_strip_float_noise() {
        // 100 * (1 - 0.7) is not exactly 30 in binary floating point.
        assert_eq!(trim_float(100.0 * (1.0 - 0.7)), "30");
        assert_eq!(trim_float(0.01), "0.01");
        assert_eq!(trim_float(1.0), "1");
    }

    #[test]
    fn missing_cell_is_an_error() {
        let results = vec![cell(0.5, 0.01, 0.25), cell(0.7, 1.0, 1.0)];
        let err = write_report(Vec::new(), &results).unwrap_err();
        assert!(err.contains("missing sweep cell"), "unexpected message: {err}");
    }

    #[test]
    fn empty_results_are_an_error() {
        let err = write_report(Vec::new(), &[]).unwrap_err();
        assert!(err.contains("no sweep cells"), "unexpected message: {err}");
    }
}
