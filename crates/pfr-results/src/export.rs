//! CSV export of chart series.

use std::fs;
use std::path::Path;

use crate::ResultsResult;
use crate::types::ChartPoint;

pub const CSV_HEADER: &str = "z_m,temperature_k,concentration_mol_m3";

pub fn chart_series_csv(points: &[ChartPoint]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for p in points {
        csv.push_str(&format!("{},{},{}\n", p.position, p.temperature, p.concentration));
    }
    csv
}

pub fn write_chart_series_csv(path: &Path, points: &[ChartPoint]) -> ResultsResult<()> {
    fs::write(path, chart_series_csv(points))?;
    Ok(())
}
