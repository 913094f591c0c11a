//! Check `.env` files against an `.env.example` template.
//!
//! [`parse_str`] and [`parse_file`] turn loose `KEY=VALUE` text into an
//! [`EnvMap`]. [`compare`] classifies the keys of an actual map against an
//! optional template into missing, empty, extra and present keys.
//! [`EnvChecker`] wires both together for files on disk.
//!
//! In a template, a value of exactly `required` ([`REQUIRED_MARKER`]) means
//! the actual value must not be empty. Any other template value is
//! informational only.
//!
//! [`CheckMode::Advisory`] is the default and never marks a report invalid
//! because of missing or empty keys; use [`CheckMode::Strict`] to fail on them.

mod checker;
mod compare;
mod error;
mod model;
mod parser;
mod report;

pub use checker::{DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE, EnvChecker, check_env};
pub use compare::{Actual, compare};
pub use error::Error;
pub use model::{CheckMode, CheckReport, Entry, EnvMap, REQUIRED_MARKER, Requirement};
pub use parser::{parse_bytes, parse_file, parse_reader, parse_str};
pub use report::TextReport;
