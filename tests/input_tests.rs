//! Integration tests for target file parsing and validation

use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tempfile::NamedTempFile;

use portcheck::{
    input::{read_targets, read_targets_path, TargetSchema},
    ScanError,
};

fn temp_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_host_port_schema() {
    let file = temp_csv(&["host,port", "192.168.1.10,22", "::1,8080"]);

    let parsed = read_targets_path(file.path().to_str().unwrap()).unwrap();

    assert_eq!(parsed.schema, TargetSchema::HostPort);
    assert_eq!(parsed.targets.len(), 2);

    assert_eq!(parsed.targets[0].name, None);
    assert_eq!(
        parsed.targets[0].host,
        IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10))
    );
    assert_eq!(parsed.targets[0].port, 22);

    assert_eq!(parsed.targets[1].host, IpAddr::V6(Ipv6Addr::LOCALHOST));
    assert_eq!(parsed.targets[1].port, 8080);
}

#[test]
fn test_named_schema() {
    let file = temp_csv(&[
        "name,host,port",
        "web,10.0.0.1,443",
        "db,10.0.0.2,5432",
    ]);

    let parsed = read_targets_path(file.path().to_str().unwrap()).unwrap();

    assert_eq!(parsed.schema, TargetSchema::NamedHostPort);
    assert_eq!(parsed.targets.len(), 2);
    assert_eq!(parsed.targets[0].name.as_deref(), Some("web"));
    assert_eq!(parsed.targets[1].name.as_deref(), Some("db"));
    assert_eq!(parsed.targets[1].port, 5432);
}

#[test]
fn test_fields_are_trimmed() {
    let file = temp_csv(&["name , host , port", " web , 127.0.0.1 , 80 "]);

    let parsed = read_targets_path(file.path().to_str().unwrap()).unwrap();

    assert_eq!(parsed.schema, TargetSchema::NamedHostPort);
    assert_eq!(parsed.targets[0].name.as_deref(), Some("web"));
    assert_eq!(parsed.targets[0].host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(parsed.targets[0].port, 80);
}

#[test]
fn test_empty_file_is_rejected() {
    let file = NamedTempFile::new().unwrap();

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::EmptyInput)));
}

#[test]
fn test_wrong_header_is_rejected() {
    let file = temp_csv(&["host,ports", "127.0.0.1,80"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidHeader { .. })));
}

#[test]
fn test_header_match_is_case_sensitive() {
    let file = temp_csv(&["Host,Port", "127.0.0.1,80"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidHeader { .. })));
}

#[test]
fn test_column_count_mismatch_is_rejected() {
    let file = temp_csv(&["host,port", "127.0.0.1,80", "127.0.0.1,80,extra"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    match result {
        Err(ScanError::InvalidRow {
            line,
            expected,
            found,
        }) => {
            assert_eq!(line, 3);
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("expected InvalidRow, got {:?}", other),
    }
}

#[test]
fn test_dotted_invalid_address_does_not_fall_back_to_ipv6() {
    let file = temp_csv(&["host,port", "999.1.2.3,80"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidAddress { .. })));

    let file = temp_csv(&["host,port", "1.2.3.4.5,80"]);
    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidAddress { .. })));
}

#[test]
fn test_ipv4_mapped_ipv6_literal_is_rejected() {
    // The dot heuristic routes anything dotted through the IPv4 parser.
    let file = temp_csv(&["host,port", "::ffff:1.2.3.4,80"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidAddress { .. })));
}

#[test]
fn test_hostname_is_rejected() {
    let file = temp_csv(&["host,port", "example.com,80"]);

    let result = read_targets_path(file.path().to_str().unwrap());
    assert!(matches!(result, Err(ScanError::InvalidAddress { .. })));
}

#[test]
fn test_bad_port_is_rejected() {
    for port in ["70000", "-1", "http", ""] {
        let row = format!("127.0.0.1,{}", port);
        let file = temp_csv(&["host,port", &row]);

        let result = read_targets_path(file.path().to_str().unwrap());
        assert!(
            matches!(result, Err(ScanError::InvalidPort { .. })),
            "port {:?} should be rejected",
            port
        );
    }
}

#[test]
fn test_port_zero_is_valid() {
    let file = temp_csv(&["host,port", "127.0.0.1,0"]);

    let parsed = read_targets_path(file.path().to_str().unwrap()).unwrap();
    assert_eq!(parsed.targets[0].port, 0);
}

#[test]
fn test_header_only_file_yields_no_targets() {
    let file = temp_csv(&["host,port"]);

    let parsed = read_targets_path(file.path().to_str().unwrap()).unwrap();
    assert_eq!(parsed.schema, TargetSchema::HostPort);
    assert!(parsed.targets.is_empty());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = read_targets_path("/nonexistent/targets.csv");
    assert!(matches!(result, Err(ScanError::IoError(_))));
}

#[test]
fn test_reading_from_in_memory_input() {
    // The same reader backs stdin when the path is `-`.
    let data = b"host,port\n127.0.0.1,22\n127.0.0.1,80\n";

    let parsed = read_targets(&data[..]).unwrap();
    assert_eq!(parsed.targets.len(), 2);
    assert_eq!(parsed.targets[1].port, 80);
}
