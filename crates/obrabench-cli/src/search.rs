//! Search pipeline: PNCP query → price filter → area suggestion → working table.

use std::path::PathBuf;

use anyhow::Context;
use obrabench_core::{AreaExtractor, Config, WorkingSet};
use obrabench_store::write_working_set;
use obrabench_sync::{Category, PncpClient, SearchQuery};

use crate::display;

pub struct SearchParams {
    pub term: String,
    pub from_year: i32,
    pub to_year: i32,
    pub category: Category,
    pub page_size: u32,
    pub out: PathBuf,
}

/// Run one search and write the working table. Returns the number of rows
/// written (zero when nothing was found and no file was written).
pub async fn run_search(config: &Config, params: &SearchParams) -> anyhow::Result<usize> {
    let extractor = AreaExtractor::new(&config.extractor).context("building area extractor")?;
    let query = SearchQuery::for_years(&params.term, params.from_year, params.to_year)?
        .with_category(params.category)
        .with_page_size(params.page_size);

    let client = PncpClient::new(&config.source).context("building PNCP client")?;
    let records = client.search_or_empty(&query).await;
    let set = WorkingSet::from_records(records, &extractor);

    if set.is_empty() {
        println!("No contracts found. Try broader search terms.");
        return Ok(0);
    }

    display::print_working_set(&set, &config.export)?;
    write_working_set(&params.out, &set, &config.export)
        .with_context(|| format!("writing {}", params.out.display()))?;

    println!();
    println!(
        "Working table written to {}. Mark rows with Usar=sim, correct Área (m²), then run:",
        params.out.display()
    );
    println!("  obrabench index {}", params.out.display());
    Ok(set.len())
}
