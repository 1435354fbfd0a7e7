// Email Finder - bulk domain email discovery
//
// Seeds (pasted domains, CSV files, broken JSON dumps) are normalized and
// looked up one at a time against Hunter.io. Every seed yields exactly one
// result, successful or failed, and results can be exported as CSV/JSON.

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod lookup;
pub mod normalize;
pub mod summary;
pub mod testing;
pub mod types;

pub use batch::{BatchDriver, BatchOptions, BatchOutcome, BatchProgress};
pub use config::Config;
pub use error::{FinderError, Result};
pub use export::{write_exports, ExportPaths};
pub use ingest::{load_seed_file, parse_multi_array, seeds_from_lines, LoadedSeeds, SeedFormat};
pub use lookup::{HunterLookup, Lookup, LookupRequest};
pub use normalize::normalize_domain;
pub use summary::BatchSummary;
pub use types::{EmailRecord, EmailType, LookupOutcome, LookupResult, SeedRecord};
