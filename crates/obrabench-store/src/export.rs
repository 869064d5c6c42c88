//! Calculation export: the contributing samples behind an index.

use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use obrabench_core::{ExportConfig, IndexSummary, tables};
use tracing::info;

use crate::StoreError;
use crate::delimited::{render_delimited, utf8};

/// One row per contributing sample.
pub fn export_batch(summary: &IndexSummary, format: &ExportConfig) -> Result<RecordBatch, StoreError> {
    let samples = &summary.samples;
    let num = |v: f64| format.locale.format(v, format.decimals);

    let columns: Vec<ArrayRef> = vec![
        utf8(samples.iter().map(|s| s.entry.control_id.clone())),
        utf8(samples.iter().map(|s| s.entry.organization.clone())),
        utf8(samples.iter().map(|s| s.entry.description.clone())),
        utf8(samples.iter().map(|s| num(s.entry.price))),
        utf8(samples.iter().map(|s| num(s.entry.area))),
        utf8(samples.iter().map(|s| num(s.index))),
    ];

    Ok(RecordBatch::try_new(
        Arc::new(tables::export_schema()),
        columns,
    )?)
}

/// Render the export as delimited text.
pub fn render_export(summary: &IndexSummary, format: &ExportConfig) -> Result<String, StoreError> {
    let batch = export_batch(summary, format)?;
    Ok(String::from_utf8(render_delimited(&batch, format.delimiter)?)?)
}

/// Write the export to `path`.
pub fn write_export(
    path: &Path,
    summary: &IndexSummary,
    format: &ExportConfig,
) -> Result<(), StoreError> {
    std::fs::write(path, render_export(summary, format)?)?;
    info!(path = %path.display(), samples = summary.samples.len(), "wrote calculation export");
    Ok(())
}
