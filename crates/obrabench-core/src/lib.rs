pub mod area;
pub mod config;
mod error;
pub mod index;
pub mod locale;
pub mod record;
pub mod schema;
pub mod session;

pub use area::{AreaExtractor, extract_area};
pub use config::{Config, ExportConfig, ExtractorConfig, SourceConfig};
pub use error::CoreError;
pub use index::{AggregateResult, Aggregation, CuratedEntry, IndexSample, IndexSummary, aggregate};
pub use locale::NumberLocale;
pub use record::{ContractItemRecord, Organization};
pub use schema::tables;
pub use session::{WorkingRow, WorkingSet};
