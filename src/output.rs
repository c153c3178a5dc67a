//! Result output
//!
//! Emits one CSV header line followed by one row per record. Rows are
//! flushed through to the sink as each record arrives, so a consumer piping
//! the output sees results as scans complete rather than in one batch at the
//! end.

use csv::Writer;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::input::TargetSchema;
use crate::scanner::ScanRecord;

/// Column appended to the input schema for the scan outcome
const RESULT_COLUMN: &str = "result";

/// Incremental CSV writer for scan records
///
/// The row layout mirrors the input schema: `host,port,result`, or
/// `name,host,port,result` for named target files.
pub struct ResultWriter<W: io::Write> {
    writer: Writer<W>,
    schema: TargetSchema,
}

impl<W: io::Write> ResultWriter<W> {
    pub fn new(sink: W, schema: TargetSchema) -> Self {
        Self {
            writer: Writer::from_writer(sink),
            schema,
        }
    }

    /// Write the header row
    pub fn write_header(&mut self) -> crate::Result<()> {
        let mut fields: Vec<&str> = self.schema.header().to_vec();
        fields.push(RESULT_COLUMN);
        self.writer.write_record(&fields)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write one record and flush it through to the sink
    pub fn write_record(&mut self, record: &ScanRecord) -> crate::Result<()> {
        let host = record.target.host.to_string();
        let port = record.target.port.to_string();
        let state = record.state.to_string();

        match self.schema {
            TargetSchema::HostPort => {
                self.writer.write_record([host.as_str(), &port, &state])?;
            }
            TargetSchema::NamedHostPort => {
                let name = record.target.name.as_deref().unwrap_or("");
                self.writer.write_record([name, &host, &port, &state])?;
            }
        }
        self.writer.flush()?;

        Ok(())
    }
}

/// Open the output sink: a file when a path is given, stdout otherwise
pub fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn io::Write>> {
    match path {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}
