use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Format of the capture timestamp embedded in archive file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Number of underscore-delimited segments a well-formed name carries.
const MIN_SEGMENTS: usize = 8;
/// Index of the vendor code segment.
const VENDOR_SEGMENT: usize = 4;
/// Index of the peer code segment.
const PEER_SEGMENT: usize = 6;
/// Index of the record type segment.
const BGP_TYPE_SEGMENT: usize = 7;

/// Record type of an archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgpType {
    /// A full routing table snapshot.
    Rib,
    /// An incremental routing update capture.
    Update,
}

impl FromStr for BgpType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rib" => Ok(BgpType::Rib),
            "update" => Ok(BgpType::Update),
            _ => Err("Unknown BGP record type"),
        }
    }
}

impl fmt::Display for BgpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BgpType::Rib => write!(f, "rib"),
            BgpType::Update => write!(f, "update"),
        }
    }
}

/// Structured fields decoded from an archive file name.
///
/// Archive files are named
/// `<YYYYMMDD>_<HHMM>_<..>_<..>_<vendor>_<..>_<peer>_<type>.<ext>` and every
/// field is read from its fixed position. The file contents are never
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFileName {
    /// Capture timestamp, minute precision.
    pub timestamp: NaiveDateTime,
    /// Vendor code, e.g. `lw`.
    pub vendor: String,
    /// Peer code, e.g. `decix`.
    pub peer_name: String,
    /// Record type of the capture.
    pub bgp_type: BgpType,
}

impl ArchiveFileName {
    /// Decode `name` against the archive naming convention.
    pub fn parse(name: &str) -> Result<Self, FileNameError> {
        let segments = name.split('_').collect::<Vec<_>>();
        if segments.len() < MIN_SEGMENTS {
            return Err(FileNameError::TooFewSegments {
                found: segments.len(),
            });
        }

        let timestamp = NaiveDateTime::parse_from_str(
            &format!("{}_{}", segments[0], segments[1]),
            TIMESTAMP_FORMAT,
        )?;

        // The last segment still carries the file extension.
        let type_code = match segments[BGP_TYPE_SEGMENT].split_once('.') {
            Some((code, _)) => code,
            None => segments[BGP_TYPE_SEGMENT],
        };
        let bgp_type = type_code.parse().map_err(|_| FileNameError::RecordType {
            code: type_code.to_string(),
        })?;

        Ok(Self {
            timestamp,
            vendor: segments[VENDOR_SEGMENT].to_string(),
            peer_name: segments[PEER_SEGMENT].to_string(),
            bgp_type,
        })
    }
}

/// An error type for [`ArchiveFileName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileNameError {
    #[error("Expected at least {} underscore-delimited segments, found {found}", MIN_SEGMENTS)]
    TooFewSegments { found: usize },
    #[error("Invalid capture timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("Unknown record type code: {code}")]
    RecordType { code: String },
}
