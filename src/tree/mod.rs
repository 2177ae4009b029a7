//! Directory tree scanning
//!
//! `TreeScanner` walks a root directory and yields `Entry` values lazily,
//! depth first. Hidden names and excluded folders are filtered before a
//! directory is descended into.

mod config;
mod entry;
mod filter;
mod scanner;
mod utils;

pub use config::{DEFAULT_TRUNCATE_LIMIT, ScanConfig};
pub use entry::{Entry, EntryKind};
pub use filter::{HIDDEN_MARKER, NameFilter};
pub use scanner::{Scan, TreeScanner};
pub use utils::{ELLIPSIS, entry_name, truncate_name};
