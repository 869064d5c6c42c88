//! Contract-item records as returned by the PNCP open-data API.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

const PNCP_CONTRACT_URL: &str = "https://pncp.gov.br/app/contratacoes";
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const GOOGLE_SNIPPET_CHARS: usize = 50;

/// One contract item. Immutable once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractItemRecord {
    /// Stable PNCP control number, e.g. "12345678000190-1-000042/2024".
    #[serde(rename = "numeroControlePncp", default)]
    pub control_id: String,

    /// Free-text description. Non-string values read as missing.
    #[serde(
        rename = "descricaoResumida",
        default,
        deserialize_with = "lenient_text"
    )]
    pub description: Option<String>,

    /// Unit price. Numeric strings are coerced; anything else is `0.0`.
    #[serde(
        rename = "valorUnitarioResultado",
        default,
        deserialize_with = "lenient_price"
    )]
    pub unit_price: f64,

    #[serde(rename = "orgaoEntidade", default)]
    pub organization: Option<Organization>,

    /// ISO date or datetime string.
    #[serde(rename = "dataResultado", default)]
    pub result_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "razaoSocial", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
}

impl ContractItemRecord {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn organization_name(&self) -> &str {
        self.organization
            .as_ref()
            .and_then(|o| o.name.as_deref())
            .unwrap_or_default()
    }

    /// Link to the contracting process on the PNCP portal.
    pub fn pncp_link(&self) -> String {
        format!("{PNCP_CONTRACT_URL}/{}", self.control_id)
    }

    /// Google search for the tender PDF on government sites, seeded with the
    /// first characters of the description.
    pub fn google_link(&self) -> String {
        let snippet: String = self.description().chars().take(GOOGLE_SNIPPET_CHARS).collect();
        let query = format!("site:gov.br filetype:pdf \"{snippet}\"");
        match Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", query.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => GOOGLE_SEARCH_URL.to_string(),
        }
    }

    /// Result date as `dd/mm/YYYY`, or the raw value if it is not ISO.
    pub fn display_date(&self) -> String {
        let raw = self.result_date.as_deref().unwrap_or_default();
        raw.get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Coerce a JSON price to `f64`: numbers pass through, numeric strings are
/// parsed, everything else (null, garbage, non-finite) becomes `0.0`.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}

/// Accept only JSON strings; numbers, objects and the like read as `None`
/// instead of failing the whole page.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
