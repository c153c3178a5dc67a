//! Error handling for the portcheck scanner
//!
//! Input and configuration problems are fatal and surface through this type
//! before any scanning starts. Per-target connection failures are never
//! errors; they are reported as a `closed` result.

use thiserror::Error;

/// Main error type for portcheck operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Targets file is empty or missing its header row")]
    EmptyInput,

    #[error("Invalid header {found:?}: expected \"host,port\" or \"name,host,port\"")]
    InvalidHeader { found: String },

    #[error("Row at line {line} has {found} columns, expected {expected}")]
    InvalidRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid host address {value:?} at line {line}: {reason}")]
    InvalidAddress {
        line: u64,
        value: String,
        reason: String,
    },

    #[error("Invalid port {value:?} at line {line}: {reason}")]
    InvalidPort {
        line: u64,
        value: String,
        reason: String,
    },

    #[error("Probe failure: {0}")]
    ProbeError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_error_message_names_both_schemas() {
        let err = ScanError::InvalidHeader {
            found: "host,ports".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("host,ports"));
        assert!(message.contains("\"host,port\""));
        assert!(message.contains("\"name,host,port\""));
    }

    #[test]
    fn test_row_error_reports_line_and_counts() {
        let err = ScanError::InvalidRow {
            line: 3,
            expected: 2,
            found: 5,
        };
        assert_eq!(err.to_string(), "Row at line 3 has 5 columns, expected 2");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ScanError = io.into();
        assert!(matches!(err, ScanError::IoError(_)));
    }
}
