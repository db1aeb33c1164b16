mod filename;
mod query;

pub use filename::{ArchiveFileName, BgpType, FileNameError};
pub use query::{query, QueryError, QueryRequest, QueryResponse};

/// Vendor codes that appear in archive file names.
pub const VENDOR_CODES: &[&str] = &["lw"];

/// Peer codes that appear in archive file names.
pub const PEER_NAMES: &[&str] = &[
    "amsix",
    "decix",
    "franceix",
    "linx",
    "marseix",
    "mskix",
    "nlix",
    "swissix",
    "chinatel",
    "cogent",
    "dtag",
    "gtt",
    "hurricane",
    "level3",
    "ntt",
    "pccw",
    "rostel",
    "seabone",
    "swisscom",
    "telia",
];
