//! CSV ingestion for feature matrices and label vectors.
//!
//! Files are headerless and comma separated: one sample per row, one
//! numeric value per field for features, a single class id per row for
//! labels.

use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};

/// Load a feature matrix, one row per sample.
///
/// All rows must have the same number of fields.
pub fn load_features_csv<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("opening feature file {}", path.display()))?;

    let mut data = Vec::new();
    let mut n_features = None;

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading row {}", row))?;
        let values: Vec<f64> = record
            .iter()
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("row {}: bad feature value {:?}", row, field))
            })
            .collect::<Result<_>>()?;

        match n_features {
            None => n_features = Some(values.len()),
            Some(expected) if expected != values.len() => {
                bail!(
                    "row {} has {} fields, expected {}",
                    row,
                    values.len(),
                    expected
                );
            }
            _ => {}
        }
        data.push(values);
    }

    let n_samples = data.len();
    let n_features = n_features.unwrap_or(0);
    if n_samples == 0 || n_features == 0 {
        bail!("feature file {} is empty", path.display());
    }

    Array2::from_shape_vec(
        (n_samples, n_features),
        data.into_iter().flatten().collect(),
    )
    .context("assembling feature matrix")
}

/// Load a label vector, one class id per row (first field).
pub fn load_labels_csv<P: AsRef<Path>>(path: P) -> Result<Array1<usize>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("opening label file {}", path.display()))?;

    let mut labels = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading row {}", row))?;
        let field = match record.get(0) {
            Some(f) => f,
            None => bail!("row {} is empty", row),
        };
        let label = field
            .trim()
            .parse::<usize>()
            .with_context(|| format!("row {}: bad class id {:?}", row, field))?;
        labels.push(label);
    }

    if labels.is_empty() {
        bail!("label file {} is empty", path.display());
    }

    Ok(Array1::from_vec(labels))
}
