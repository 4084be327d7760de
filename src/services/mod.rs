//! Service layer for coacquire business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! Services emit progress events over channels and never print.

pub mod enrich;
pub mod http_client;

#[allow(unused_imports)]
pub use enrich::{EnrichConfig, EnrichEvent, EnrichResult, EnrichService, RecordOutcome};
#[allow(unused_imports)]
pub use http_client::HttpClient;
