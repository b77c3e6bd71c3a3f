//! whoisnorm — flattens heterogeneous WHOIS lookup results into stable
//! per-domain records ready to be published on a message bus.
//!
//! ```text
//! parsers ──► normalizer ──► processed ──► scope ──► output
//! ```
//!
//! [`normalizer::normalize`] is the pure core: it never fails and never
//! performs I/O. Everything else is plumbing for the `whoisnorm` binary.

pub mod coerce;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod output;
pub mod parsers;
pub mod processed;
pub mod record;
pub mod scope;

pub use normalizer::{Records, normalize};
pub use record::{DescriptiveField, NormalizedRecord, RawLookupResult, RawValue, Timestamp};
