//! Target file input
//!
//! Reads scan targets from CSV. Two schemas are accepted, distinguished by
//! the header row: `host,port` or `name,host,port`. The path `-` reads from
//! standard input. Every validation problem is reported before any scanning
//! can start; rows are never silently skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ScanError;
use crate::scanner::Target;

const HOST_PORT_HEADER: [&str; 2] = ["host", "port"];
const NAMED_HEADER: [&str; 3] = ["name", "host", "port"];

/// Which of the two accepted CSV schemas a targets file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSchema {
    /// `host,port`
    HostPort,
    /// `name,host,port`
    NamedHostPort,
}

impl TargetSchema {
    /// Header fields for this schema
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            TargetSchema::HostPort => &HOST_PORT_HEADER,
            TargetSchema::NamedHostPort => &NAMED_HEADER,
        }
    }

    /// Number of columns a data row must have
    pub fn columns(&self) -> usize {
        self.header().len()
    }
}

/// A parsed targets file: targets in input order plus the schema in use
#[derive(Debug, Clone)]
pub struct TargetFile {
    pub targets: Vec<Target>,
    pub schema: TargetSchema,
}

/// Read and validate targets from a CSV file path, `-` meaning stdin
pub fn read_targets_path(path: &str) -> crate::Result<TargetFile> {
    if path == "-" {
        read_targets(io::stdin())
    } else {
        let file = File::open(path)?;
        read_targets(file)
    }
}

/// Read and validate targets from any reader
///
/// The header must be exactly one of the two accepted field lists, every
/// data row must have the schema's column count, and every host and port
/// must parse. The first problem found is returned as an error. Whitespace
/// around fields is trimmed.
pub fn read_targets<R: Read>(input: R) -> crate::Result<TargetFile> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ScanError::EmptyInput),
    };
    let schema = match_schema(&header)?;

    let mut targets = Vec::new();
    for record in records {
        let record = record?;
        targets.push(parse_row(&record, schema)?);
    }

    Ok(TargetFile { targets, schema })
}

fn match_schema(header: &StringRecord) -> crate::Result<TargetSchema> {
    for schema in [TargetSchema::HostPort, TargetSchema::NamedHostPort] {
        if header.iter().eq(schema.header().iter().copied()) {
            return Ok(schema);
        }
    }

    Err(ScanError::InvalidHeader {
        found: header.iter().collect::<Vec<_>>().join(","),
    })
}

fn parse_row(record: &StringRecord, schema: TargetSchema) -> crate::Result<Target> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() != schema.columns() {
        return Err(ScanError::InvalidRow {
            line,
            expected: schema.columns(),
            found: record.len(),
        });
    }

    let (name, host_field, port_field) = match schema {
        TargetSchema::HostPort => (None, &record[0], &record[1]),
        TargetSchema::NamedHostPort => (Some(record[0].to_string()), &record[1], &record[2]),
    };

    let host = parse_host(host_field, line)?;
    let port = port_field
        .parse::<u16>()
        .map_err(|e| ScanError::InvalidPort {
            line,
            value: port_field.to_string(),
            reason: e.to_string(),
        })?;

    Ok(Target { name, host, port })
}

/// Parse a host address
///
/// A literal dot selects IPv4, anything else IPv6. A dotted string that is
/// not valid IPv4 is an address error, never retried as IPv6. Heuristic, not
/// a contract: it also rejects IPv6 literals with an embedded IPv4 tail such
/// as `::ffff:1.2.3.4`.
fn parse_host(value: &str, line: u64) -> crate::Result<IpAddr> {
    let parsed = if value.contains('.') {
        value.parse::<Ipv4Addr>().map(IpAddr::V4)
    } else {
        value.parse::<Ipv6Addr>().map(IpAddr::V6)
    };

    parsed.map_err(|e| ScanError::InvalidAddress {
        line,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
