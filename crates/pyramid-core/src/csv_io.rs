// File: crates/pyramid-core/src/csv_io.rs
// Summary: Wide CSV input (age column + one column per series) and bar-series CSV output.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::chart::ChartSeries;
use crate::error::{PyramidError, Result};
use crate::series::Dataset;
use crate::types::{AgeBand, AgeDomain};

const AGE_HEADERS: [&str; 4] = ["age", "age_band", "band", "x"];

/// Read a wide table: one age column (band lower bounds) and one column per named series.
/// The domain is inferred from the age column, which must be evenly spaced.
pub fn read_wide_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    let age_col = headers
        .iter()
        .position(|h| AGE_HEADERS.contains(&h.to_lowercase().as_str()))
        .ok_or_else(|| {
            PyramidError::dataset(format!("no age column found (expected one of {AGE_HEADERS:?})"))
        })?;

    let series_cols: Vec<usize> = (0..headers.len()).filter(|&i| i != age_col).collect();
    if series_cols.is_empty() {
        return Err(PyramidError::dataset("no series columns next to the age column"));
    }

    let mut ages: Vec<AgeBand> = Vec::new();
    let mut columns: Vec<Vec<u64>> = vec![Vec::new(); series_cols.len()];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        // Header is line 1.
        let line = row + 2;
        let cell = |i: usize| rec.get(i).unwrap_or("");

        let age = cell(age_col);
        ages.push(age.parse::<AgeBand>().map_err(|_| {
            PyramidError::dataset(format!("line {line}, column '{}': '{age}' is not an age band", headers[age_col]))
        })?);

        for (column, &i) in columns.iter_mut().zip(&series_cols) {
            let raw = cell(i);
            let value = raw.parse::<u64>().map_err(|_| {
                PyramidError::dataset(format!(
                    "line {line}, column '{}': '{raw}' is not a non-negative integer",
                    headers[i]
                ))
            })?;
            column.push(value);
        }
    }

    let domain = AgeDomain::from_bands(&ages)?;
    let mut dataset = Dataset::new(domain);
    for (column, &i) in columns.into_iter().zip(&series_cols) {
        if dataset.insert(headers[i].clone(), column).is_some() {
            return Err(PyramidError::dataset(format!("duplicate series column '{}'", headers[i])));
        }
    }
    debug!(bands = domain.count, series = dataset.series.len(), "read wide CSV dataset");
    Ok(dataset)
}

pub fn load_wide_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref())?;
    read_wide_csv(file)
}

/// Write one row per bar: `x_start,y_start,x_end,y_end,label`.
pub fn write_chart_csv<W: Write>(series: &ChartSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["x_start", "y_start", "x_end", "y_end", "label"])?;
    for p in series.points() {
        wtr.write_record([
            p.x_start.to_string(),
            p.y_start.to_string(),
            p.x_end.to_string(),
            p.y_end.to_string(),
            p.label.unwrap_or_default().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
