//! SRD enrichment adapters
//!
//! `DndApiClient` hydrates catalog records from the public 5e SRD API behind
//! a shared token bucket. `OfflineEnricher` leaves every record untouched and
//! is used when enrichment is switched off.

mod client;
mod offline;
mod rate_limiter;

pub use client::{slug, DndApiClient, DndApiError};
pub use offline::OfflineEnricher;
pub use rate_limiter::RateLimiter;
