//! Terminal rendering for working sets, index summaries, and extraction runs.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use obrabench_core::{AreaExtractor, ExportConfig, IndexSummary, NumberLocale, WorkingSet};

const MAX_DESCRIPTION_CHARS: usize = 60;

// ── Working set ──

/// Print the fetched contracts as a table, one row per record.
pub fn print_working_set(set: &WorkingSet, format: &ExportConfig) -> anyhow::Result<()> {
    let rows = set.rows();
    let num = |v: f64| format.locale.format_grouped(v, format.decimals);

    let schema = Schema::new(vec![
        Field::new("Controle PNCP", DataType::Utf8, false),
        Field::new("Data", DataType::Utf8, false),
        Field::new("Órgão", DataType::Utf8, false),
        Field::new("Descrição", DataType::Utf8, false),
        Field::new("Valor (R$)", DataType::Utf8, false),
        Field::new("Área (m²)", DataType::Utf8, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        column(rows.iter().map(|r| r.record.control_id.clone())),
        column(rows.iter().map(|r| r.record.display_date())),
        column(rows.iter().map(|r| shorten(r.record.organization_name(), 30))),
        column(rows.iter().map(|r| shorten(r.record.description(), MAX_DESCRIPTION_CHARS))),
        column(rows.iter().map(|r| num(r.record.unit_price))),
        column(rows.iter().map(|r| {
            if r.suggested_area > 0.0 {
                num(r.suggested_area)
            } else {
                "-".to_string()
            }
        })),
    ];
    let batch = RecordBatch::try_new(Arc::new(schema), columns)?;

    println!("{}", pretty_format_batches(&[batch])?);
    let with_area = rows.iter().filter(|r| r.suggested_area > 0.0).count();
    println!(
        "{} contracts, {} with an area found in the description. Check the suggested areas before using them.",
        rows.len(),
        with_area
    );
    Ok(())
}

// ── Index ──

/// Print mean, median, and sample count as a card.
pub fn print_summary(summary: &IndexSummary, locale: &NumberLocale) {
    let r = &summary.result;
    println!("=== Market index (R$/m²) ===");
    println!("  {:<26} {}", "Mean", money_per_m2(r.mean, locale));
    println!("  {:<26} {}", "Median (safer)", money_per_m2(r.median, locale));
    println!(
        "  {:<26} {} contracts ({} selected)",
        "Samples used", r.count, summary.selected
    );
    println!();
}

/// Print the contributing samples.
pub fn print_samples(summary: &IndexSummary, format: &ExportConfig) -> anyhow::Result<()> {
    let num = |v: f64| format.locale.format_grouped(v, format.decimals);
    let samples = &summary.samples;

    let schema = Schema::new(vec![
        Field::new("Órgão", DataType::Utf8, false),
        Field::new("Descrição", DataType::Utf8, false),
        Field::new("Valor (R$)", DataType::Utf8, false),
        Field::new("Área (m²)", DataType::Utf8, false),
        Field::new("Índice (R$/m²)", DataType::Utf8, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        column(samples.iter().map(|s| shorten(&s.entry.organization, 30))),
        column(samples.iter().map(|s| shorten(&s.entry.description, MAX_DESCRIPTION_CHARS))),
        column(samples.iter().map(|s| num(s.entry.price))),
        column(samples.iter().map(|s| num(s.entry.area))),
        column(samples.iter().map(|s| num(s.index))),
    ];
    let batch = RecordBatch::try_new(Arc::new(schema), columns)?;

    println!("Samples considered:");
    println!("{}", pretty_format_batches(&[batch])?);
    Ok(())
}

// ── Extraction ──

/// One line per text: chosen area (or "-"), then the text.
pub fn print_extraction(extractor: &AreaExtractor, text: &str, all: bool, format: &ExportConfig) {
    let area = extractor.extract(text);
    let shown = if area > 0.0 {
        format.locale.format_grouped(area, format.decimals)
    } else {
        "-".to_string()
    };

    if all {
        let candidates: Vec<String> = extractor
            .candidates(text)
            .iter()
            .map(|v| format.locale.format_grouped(*v, format.decimals))
            .collect();
        println!("{shown}\t[{}]\t{text}", candidates.join(" | "));
    } else {
        println!("{shown}\t{text}");
    }
}

// ── Helpers ──

fn money_per_m2(value: f64, locale: &NumberLocale) -> String {
    format!("R$ {}/m²", locale.format_grouped(value, 2))
}

/// Truncate to `max` characters, marking the cut with "...".
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn column(values: impl Iterator<Item = String>) -> ArrayRef {
    Arc::new(StringArray::from(values.collect::<Vec<_>>()))
}
