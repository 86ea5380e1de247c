use rust_htslib::bcf::{self, Read};

use crate::error::ParseError;
use crate::variant::VariantRecord;

// htslib reports a broken stream as a failed record on every read; a run this
// long of failures with nothing decoded in between is treated as end of input.
const MAX_CONSECUTIVE_FAILURES: u32 = 1000;

/// Forward-only iterator over the records of an opened VCF. htslib has
/// already read and validated the header when the reader was opened.
pub struct Records {
    reader: bcf::Reader,
    ordinal: u64,
    consecutive_failures: u32,
    done: bool,
}

impl Records {
    pub fn new(reader: bcf::Reader) -> Self {
        Records {
            reader,
            ordinal: 0,
            consecutive_failures: 0,
            done: false,
        }
    }

    pub fn header(&self) -> &bcf::header::HeaderView {
        self.reader.header()
    }
}

impl Iterator for Records {
    type Item = Result<VariantRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = self.reader.empty_record();
        let result = match self.reader.read(&mut record) {
            None => {
                self.done = true;
                return None;
            }
            Some(result) => result,
        };
        self.ordinal += 1;
        match result {
            Ok(()) => {
                self.consecutive_failures = 0;
                Some(Ok(VariantRecord::new(record)))
            }
            Err(e) => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    self.done = true;
                    return Some(Err(ParseError::new(
                        self.ordinal,
                        format!("stream unreadable after {} failed reads: {}", MAX_CONSECUTIVE_FAILURES, e),
                    )));
                }
                Some(Err(ParseError::new(self.ordinal, e.to_string())))
            }
        }
    }
}
