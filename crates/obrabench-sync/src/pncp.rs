//! HTTP client for the PNCP contract-item search endpoint.

use std::time::Duration;

use chrono::NaiveDate;
use obrabench_core::{ContractItemRecord, SourceConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid year range: {from}..={to}")]
    YearRange { from: i32, to: i32 },
}

/// Goods/services filter (`materialOuServico`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Goods,
    #[default]
    Services,
    Any,
}

impl Category {
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Goods => "M",
            Self::Services => "S",
            Self::Any => "",
        }
    }
}

/// One search: inclusive date range, free text, category and page size.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub term: String,
    pub category: Category,
    pub page_size: u32,
}

impl SearchQuery {
    /// Jan 1 of `from_year` through Dec 31 of `to_year`.
    pub fn for_years(term: &str, from_year: i32, to_year: i32) -> Result<Self, SyncError> {
        let range = || SyncError::YearRange {
            from: from_year,
            to: to_year,
        };
        if from_year > to_year {
            return Err(range());
        }
        let start = NaiveDate::from_ymd_opt(from_year, 1, 1).ok_or_else(range)?;
        let end = NaiveDate::from_ymd_opt(to_year, 12, 31).ok_or_else(range)?;
        Ok(Self {
            start,
            end,
            term: term.to_string(),
            category: Category::default(),
            page_size: SourceConfig::default().page_size,
        })
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pagina", "1".to_string()),
            ("tamanhoPagina", self.page_size.to_string()),
            ("dataInclusaoPncpInicial", self.start.format("%Y-%m-%d").to_string()),
            ("dataInclusaoPncpFinal", self.end.format("%Y-%m-%d").to_string()),
            ("q", self.term.clone()),
            ("materialOuServico", self.category.as_param().to_string()),
        ]
    }
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    resultado: Vec<ContractItemRecord>,
}

/// Client for the PNCP open-data item search. Fetches the first page only.
pub struct PncpClient {
    client: reqwest::Client,
    base_url: String,
}

impl PncpClient {
    /// Create a client for the given endpoint URL (trailing slash ignored).
    pub fn new(config: &SourceConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run one search and return the first page of records.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ContractItemRecord>, SyncError> {
        info!(
            url = %self.base_url,
            term = %query.term,
            start = %query.start,
            end = %query.end,
            "searching PNCP contract items"
        );
        let resp = self
            .client
            .get(&self.base_url)
            .query(&query.params())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let page: SearchPage = serde_json::from_str(&body)?;
        info!(count = page.resultado.len(), "fetched contract items");
        Ok(page.resultado)
    }

    /// Like [`search`](Self::search), but any failure is logged and becomes
    /// an empty result: callers only distinguish "found" from "nothing found".
    pub async fn search_or_empty(&self, query: &SearchQuery) -> Vec<ContractItemRecord> {
        match self.search(query).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "PNCP search failed; treating as no results");
                Vec::new()
            }
        }
    }
}
