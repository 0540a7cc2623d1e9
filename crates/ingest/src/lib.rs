//! Upload ingestion pipeline for MemVault.
//!
//! One call to [`IngestionPipeline::ingest`] takes a raw byte stream and a
//! declared category through sniffing, validation, blob upload, and
//! metadata persistence, returning the persisted [`FileRecord`](memvault_core::FileRecord)
//! or a typed failure. Partial failure is exposed, never hidden: a
//! rejected upload persists nothing, a catalog failure triggers a
//! compensating blob delete, and an orphaned blob is reported as its own
//! error variant.

mod error;
mod pipeline;
mod request;

pub use error::{IngestError, ValidationError};
pub use pipeline::{DeleteReport, IngestionPipeline, PhaseResult};
pub use request::IngestRequest;
