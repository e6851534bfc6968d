//! Directory scanning engine
//!
//! Classification, filtering, per-file counting and the concurrent walker
//! that ties them together.

pub mod cancel;
pub mod classify;
pub mod counter;
pub mod error;
pub mod filter;
pub mod walker;

pub use cancel::CancellationToken;
pub use classify::{Classification, classify};
pub use counter::FileCounter;
pub use error::{Result, ScanError};
pub use filter::{FilterEngine, parse_pattern_list};
pub use walker::{enumerate, walk};
