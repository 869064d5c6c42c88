//! Index pipeline: working table → curation → aggregation → export.

use std::path::PathBuf;

use anyhow::{Context, bail};
use obrabench_core::{Aggregation, Config, NumberLocale, WorkingSet, aggregate};
use obrabench_store::{read_working_set, write_export, write_working_set};
use tracing::warn;

use crate::display;

pub struct BenchmarkParams {
    pub table: PathBuf,
    pub select: Vec<String>,
    pub select_all: bool,
    /// `CONTROL_ID=VALUE` overrides.
    pub areas: Vec<String>,
    pub save: bool,
    pub export: PathBuf,
}

/// Read the working table, apply curation flags, and report the index.
pub fn run_benchmark(config: &Config, params: &BenchmarkParams) -> anyhow::Result<Aggregation> {
    let mut set = read_working_set(&params.table, &config.export)
        .with_context(|| format!("reading {}", params.table.display()))?;
    apply_curation(&mut set, params, &config.export.locale)?;

    if params.save {
        write_working_set(&params.table, &set, &config.export)
            .with_context(|| format!("saving {}", params.table.display()))?;
    }

    let outcome = aggregate(&set.curated_entries());
    match &outcome {
        Aggregation::NothingSelected => {
            println!(
                "No rows selected. Mark rows with Usar=sim in {} or pass --select.",
                params.table.display()
            );
        }
        Aggregation::NoValidSamples { selected } => {
            println!(
                "{selected} rows selected, but their Área (m²) is zero. Fill in the area to compute the index."
            );
        }
        Aggregation::Index(summary) => {
            display::print_summary(summary, &config.export.locale);
            display::print_samples(summary, &config.export)?;
            write_export(&params.export, summary, &config.export)
                .with_context(|| format!("writing {}", params.export.display()))?;
            println!("Calculation written to {}", params.export.display());
        }
    }
    Ok(outcome)
}

/// Apply `--select-all`, `--select` and `--area` to the working set.
fn apply_curation(
    set: &mut WorkingSet,
    params: &BenchmarkParams,
    locale: &NumberLocale,
) -> anyhow::Result<()> {
    if params.select_all {
        set.select_all(true);
    }
    for id in &params.select {
        let id = id.trim();
        if !set.select(id, true) {
            warn!(control_id = id, "no row with this control id");
        }
    }
    for spec in &params.areas {
        let (id, area) = parse_area_override(spec, locale)?;
        if !set.set_area(&id, area) {
            warn!(control_id = %id, "no row with this control id");
        }
    }
    Ok(())
}

/// Parse `CONTROL_ID=VALUE`; the value uses the regional numeral format.
fn parse_area_override(spec: &str, locale: &NumberLocale) -> anyhow::Result<(String, f64)> {
    let Some((id, value)) = spec.rsplit_once('=') else {
        bail!("area override must be CONTROL_ID=VALUE, got {spec:?}");
    };
    let Some(area) = locale.parse(value) else {
        bail!("invalid area {value:?} for {id}");
    };
    Ok((id.trim().to_string(), area))
}
