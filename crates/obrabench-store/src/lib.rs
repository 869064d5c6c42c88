//! Storage layer: the working table and calculation export as delimited text.

pub mod delimited;
mod error;
pub mod export;
pub mod table;

pub use delimited::{parse_delimited, render_delimited};
pub use error::StoreError;
pub use export::{export_batch, render_export, write_export};
pub use table::{read_working_set, working_set_from_batches, working_set_to_batch, write_working_set};
