//! dispatch-core: the record store behind the `dsp` incident ticket log.
//!
//! Operators record an incident identifier and an assigned agent; the store
//! timestamps and persists the entry, suppresses duplicate same-day
//! tickets, and [`stats::tally`] derives per-agent daily/monthly counts.
//! One JSON document per calendar month is the single source of truth.
//!
//! # Conventions
//!
//! - **Errors**: typed [`StoreError`] at the store boundary; callers
//!   compose with `anyhow` where appropriate.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod backing;
pub mod error;
pub mod model;
pub mod stats;
pub mod store;

pub use backing::{Backing, FileBacking, RawRecord};
pub use error::{ErrorCode, StoreError};
pub use model::{Record, TIMESTAMP_FORMAT, validate_incident};
pub use stats::{AgentTallies, tally};
pub use store::Store;
