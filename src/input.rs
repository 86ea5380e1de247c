use log::debug;
use rust_htslib::bcf::{self, Read};
use std::fs::File;
use std::io::{self, Read as IoRead};
use std::path::Path;

use crate::error::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const DEFLATE: u8 = 8;
const FEXTRA: u8 = 4;
// ID1 ID2 CM FLG MTIME(4) XFL OS XLEN(2)
const FIXED_HEADER_LEN: usize = 12;

/// Open `path` as a bgzipped VCF and read its header.
///
/// The first block header is checked on our own handle, which is closed
/// again before htslib opens the path itself: `bcf::Reader` only takes a
/// path. Once the container check has passed, any failure from htslib means
/// the decompressed stream does not start with a VCF header, and is reported
/// as [`Error::Header`]. With `threads > 1` decompression runs on htslib
/// worker threads; records still arrive in file order.
pub fn open<P: AsRef<Path>>(path: P, threads: usize) -> Result<bcf::Reader> {
    let path = path.as_ref();
    {
        let mut file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        check_block_header(&mut file)?;
    }

    let mut reader =
        bcf::Reader::from_path(path).map_err(|e| Error::Header(e.to_string()))?;
    if reader.header().inner.is_null() {
        return Err(Error::Header(format!(
            "no VCF header could be read from {}",
            path.display()
        )));
    }
    if threads > 1 {
        reader.set_threads(threads)?;
        debug!("decompressing {} with {} threads", path.display(), threads);
    }
    Ok(reader)
}

/// Validate the gzip member header of the first block, including the `BC`
/// extra subfield that marks it as BGZF. Reads at most the header.
pub fn check_block_header<R: IoRead>(r: &mut R) -> Result<()> {
    let mut fixed = [0u8; FIXED_HEADER_LEN];
    read_header_bytes(r, &mut fixed)?;

    if fixed[..2] != GZIP_MAGIC {
        return Err(Error::Container("missing gzip magic bytes".to_string()));
    }
    if fixed[2] != DEFLATE {
        return Err(Error::Container(format!(
            "unsupported compression method {}",
            fixed[2]
        )));
    }
    if fixed[3] & FEXTRA == 0 {
        return Err(Error::Container(
            "gzip member has no extra field; file is gzip but not bgzip".to_string(),
        ));
    }

    let xlen = u16::from_le_bytes([fixed[10], fixed[11]]) as usize;
    let mut extra = vec![0u8; xlen];
    read_header_bytes(r, &mut extra)?;

    let mut rest = &extra[..];
    while rest.len() >= 4 {
        let (si1, si2) = (rest[0], rest[1]);
        let slen = u16::from_le_bytes([rest[2], rest[3]]) as usize;
        if rest.len() < 4 + slen {
            break;
        }
        if si1 == b'B' && si2 == b'C' {
            if slen != 2 {
                return Err(Error::Container(format!(
                    "BC subfield has length {}, expected 2",
                    slen
                )));
            }
            return Ok(());
        }
        rest = &rest[4 + slen..];
    }
    Err(Error::Container(
        "no BC subfield in the first block; file is gzip but not bgzip".to_string(),
    ))
}

fn read_header_bytes<R: IoRead>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            Error::Container("truncated block header".to_string())
        }
        _ => Error::Io(e),
    })
}
