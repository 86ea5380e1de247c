use std::path::PathBuf;

/// Result type used throughout vcfmean.
pub type Result<T> = std::result::Result<T, Error>;

/// A data record htslib could not decode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("record {record}: {message}")]
pub struct ParseError {
    /// 1-based ordinal of the data record, header lines not counted.
    pub record: u64,
    pub message: String,
}

impl ParseError {
    pub fn new(record: u64, message: impl Into<String>) -> Self {
        ParseError {
            record,
            message: message.into(),
        }
    }
}

/// Every way a run can fail. Any of these aborts the run with no mean printed.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input path could not be opened.
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading the container header failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// htslib could not start its decompression threads.
    #[error("htslib error: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),

    /// The file is not a BGZF container or its first block header is cut short.
    #[error("invalid BGZF container: {0}")]
    Container(String),

    /// htslib could not read a VCF header from the decompressed stream.
    #[error("invalid VCF header: {0}")]
    Header(String),

    /// One or more data lines were malformed. Reported after the whole scan.
    #[error("{count} malformed record(s), first at {first}")]
    Parse { first: ParseError, count: usize },

    /// No record carried an integer value for the field.
    #[error("no record has an integer value for INFO/{field}; the mean is undefined")]
    DivisionUndefined { field: String },
}

/// Coarse classification of [`Error`] used for exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Parse,
    DivisionUndefined,
}

impl ErrorKind {
    /// Process exit status for this kind. 2 is left to clap for usage errors.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Io => 3,
            ErrorKind::Format => 4,
            ErrorKind::Parse => 5,
            ErrorKind::DivisionUndefined => 6,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } | Error::Io(_) | Error::Htslib(_) => ErrorKind::Io,
            Error::Container(_) | Error::Header(_) => ErrorKind::Format,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::DivisionUndefined { .. } => ErrorKind::DivisionUndefined,
        }
    }
}
