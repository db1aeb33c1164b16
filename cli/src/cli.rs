use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mrt_archive::{BgpType, QueryRequest, PEER_NAMES, VENDOR_CODES};

/// Accepted formats for the time window flags.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
/// A bare date is accepted as midnight at the start of that day.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Directory that is scanned for MRT archive files
    #[arg(short = 'i', long, default_value = ".")]
    pub mrt_input_path: PathBuf,

    /// Directory that holds the scenario record and its copied archive
    /// files, created if missing
    #[arg(short = 'o', long)]
    pub scenario_output_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new scenario record through interactive prompts
    Init,
    /// Search the archive for files matching the filter and report them
    Query {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Attach matching update files to an existing scenario
    Append {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Filter flags shared by the `query` and `append` commands.
#[derive(Args)]
pub struct FilterArgs {
    /// Start of the time window (inclusive), e.g. 2024-01-01T00:00
    #[arg(short = 's', long, value_parser = parse_datetime)]
    pub start_datetime: NaiveDateTime,

    /// End of the time window (exclusive)
    #[arg(short = 'e', long, value_parser = parse_datetime)]
    pub end_datetime: NaiveDateTime,

    /// Acceptable vendor code, repeat the flag for more than one
    #[arg(short = 'v', long, value_parser = parse_vendor, required = true)]
    pub vendor: Vec<String>,

    /// Acceptable peer code, repeat the flag for more than one
    #[arg(short = 'p', long, value_parser = parse_peer_name, required = true)]
    pub peer_name: Vec<String>,

    /// Acceptable record type, `rib` or `update`
    #[arg(short = 'b', long, value_parser = parse_bgp_type, required = true)]
    pub bgp_type: Vec<BgpType>,
}

impl FilterArgs {
    /// Build the archive query request described by these flags.
    pub fn to_request(&self) -> QueryRequest {
        QueryRequest {
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            vendor: self.vendor.clone(),
            peer_name: self.peer_name.clone(),
            bgp_type: self.bgp_type.clone(),
        }
    }
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(datetime);
        }
    }

    Err(format!(
        "'{value}' is not a valid datetime, expected e.g. 2024-01-01T16:30"
    ))
}

fn parse_vendor(value: &str) -> Result<String, String> {
    if VENDOR_CODES.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' is not a known vendor, expected one of: {}",
            VENDOR_CODES.join(", ")
        ))
    }
}

fn parse_peer_name(value: &str) -> Result<String, String> {
    if PEER_NAMES.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' is not a known peer, expected one of: {}",
            PEER_NAMES.join(", ")
        ))
    }
}

fn parse_bgp_type(value: &str) -> Result<BgpType, String> {
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a record type, expected one of: rib, update"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_datetime_with_and_without_seconds() {
        assert_eq!(
            parse_datetime("2024-05-14T16:30"),
            parse_datetime("2024-05-14T16:30:00")
        );
        assert!(parse_datetime("2024-05-14T16:30:45").is_ok());
    }

    #[test]
    fn test_should_parse_bare_date_as_midnight() {
        assert_eq!(parse_datetime("2024-05-14T00:00"), parse_datetime("2024-05-14"));
    }

    #[test]
    fn test_should_reject_malformed_datetime() {
        assert!(parse_datetime("14.05.2024 16:30").is_err());
    }

    #[test]
    fn test_should_reject_unknown_vendor() {
        assert!(parse_vendor("lw").is_ok());
        assert!(parse_vendor("acme").is_err());
    }

    #[test]
    fn test_should_reject_unknown_peer() {
        assert!(parse_peer_name("decix").is_ok());
        assert!(parse_peer_name("unknownix").is_err());
    }

    #[test]
    fn test_should_parse_query_command_line() {
        let args = CliArgs::try_parse_from([
            "mrt-scenario",
            "-i",
            "/archive",
            "-o",
            "/scenario",
            "query",
            "-s",
            "2024-01-01",
            "-e",
            "2024-01-02T00:00",
            "-v",
            "lw",
            "-p",
            "decix",
            "-p",
            "amsix",
            "-b",
            "rib",
            "-b",
            "update",
        ])
        .expect("Failed to parse command line");

        assert_eq!(PathBuf::from("/archive"), args.mrt_input_path);
        assert_eq!(PathBuf::from("/scenario"), args.scenario_output_path);
        match args.command {
            Command::Query { filter } => {
                let request = filter.to_request();
                assert_eq!(vec!["lw".to_string()], request.vendor);
                assert_eq!(vec!["decix".to_string(), "amsix".to_string()], request.peer_name);
                assert_eq!(vec![BgpType::Rib, BgpType::Update], request.bgp_type);
                assert!(request.start_datetime < request.end_datetime);
            }
            _ => panic!("Expected the query command"),
        }
    }

    #[test]
    fn test_should_default_mrt_input_path_to_current_directory() {
        let args = CliArgs::try_parse_from(["mrt-scenario", "-o", "/scenario", "init"])
            .expect("Failed to parse command line");

        assert_eq!(PathBuf::from("."), args.mrt_input_path);
    }

    #[test]
    fn test_should_require_filter_flags() {
        let result = CliArgs::try_parse_from([
            "mrt-scenario",
            "-o",
            "/scenario",
            "query",
            "-s",
            "2024-01-01",
            "-e",
            "2024-01-02",
        ]);

        assert!(result.is_err());
    }
}
