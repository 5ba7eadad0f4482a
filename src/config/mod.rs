//! Configuration module
//!
//! Runtime configuration comes from an optional TOML file (every field has
//! a default, so the binary runs without one) plus the static jurisdiction
//! table that maps state abbreviations to their Justia URL slugs.

mod jurisdictions;
mod parser;
mod types;

pub use jurisdictions::{
    lookup_jurisdiction, DatasetKind, JobSpec, Jurisdiction, CODES_BASE_URL, JUSTIA_BASE_URL,
    REGULATIONS_BASE_URL,
};
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, FetchConfig, OutputConfig};
