pub mod aggregate;
pub mod error;
pub mod input;
pub mod records_iterator;
pub mod variant;

use log::{debug, info, warn};
use std::path::Path;

use crate::aggregate::{integer_field, RunningAggregate};
pub use crate::error::{Error, ErrorKind, ParseError, Result};
use crate::records_iterator::Records;

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    /// INFO key to average.
    pub field: String,
    /// Decompression threads; 1 decompresses on the calling thread.
    pub threads: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            field: "AN".to_string(),
            threads: 1,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Records decoded.
    pub records: u64,
    /// Records without an integer value for the field.
    pub skipped: u64,
    pub count: u64,
    pub sum: f64,
    pub mean: f64,
}

/// Average INFO/`options.field` over every record of the bgzipped VCF at `path`.
///
/// Records htslib cannot decode do not stop the scan; once the whole file has
/// been read the first of them is returned as [`Error::Parse`]. Container and
/// header errors abort before any record is read.
pub fn summarize<P: AsRef<Path>>(path: P, options: &Options) -> Result<Summary> {
    let path = path.as_ref();
    let records = Records::new(input::open(path, options.threads)?);
    debug!(
        "read header of {}: {} contigs, {} samples",
        path.display(),
        records.header().contig_count(),
        records.header().sample_count()
    );
    if records.header().info_type(options.field.as_bytes()).is_err() {
        warn!(
            "INFO/{} is not declared in the header; htslib reads it as a string so no record will count",
            options.field
        );
    }

    let mut agg = RunningAggregate::new();
    let mut n_records = 0u64;
    let mut first_error: Option<ParseError> = None;
    let mut n_errors = 0usize;

    for item in records {
        match item {
            Ok(record) => {
                n_records += 1;
                if let Some(v) = integer_field(&record, &options.field) {
                    agg.observe(v);
                }
            }
            Err(e) => {
                warn!("skipping malformed record: {}", e);
                n_errors += 1;
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(first) = first_error {
        return Err(Error::Parse {
            first,
            count: n_errors,
        });
    }

    let mean = agg.finalize(&options.field)?;
    let summary = Summary {
        records: n_records,
        skipped: n_records - agg.count(),
        count: agg.count(),
        sum: agg.sum(),
        mean,
    };
    info!(
        "{} records, {} with integer INFO/{} (sum {}), {} skipped",
        summary.records, summary.count, options.field, summary.sum, summary.skipped
    );
    Ok(summary)
}
