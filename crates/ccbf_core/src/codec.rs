//! Filter file format & IO
//!
//! Header (BE, 16 bytes):
//!   magic[4]       = "CCBF"
//!   version[2]     = 1
//!   hash_rounds[2] = K, widened from u8
//!   bit_count[8]   = logical bit space
//!
//! Body: packed bitmap, LSB first. Writers emit ceil(bit_count / 8) bytes;
//! readers require at least floor(bit_count / 8) and zero-fill the rest.

use crate::consts::{HDR_SIZE, MAGIC, VERSION};
use crate::errors::{CcbfError, Result};
use crate::filter::BloomFilter;
use byteorder::{BigEndian as BE, ByteOrder, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub fn encode<W: Write>(bf: &BloomFilter, mut w: W) -> Result<()> {
    w.write_all(MAGIC)?;
    w.write_u16::<BE>(VERSION)?;
    w.write_u16::<BE>(bf.hash_rounds() as u16)?;
    w.write_u64::<BE>(bf.bit_count())?;
    w.write_all(bf.bitmap())?;
    w.flush()?;
    Ok(())
}

pub fn to_bytes(bf: &BloomFilter) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HDR_SIZE + bf.bitmap().len());
    encode(bf, &mut out)?;
    Ok(out)
}

pub fn decode<R: Read>(mut r: R) -> Result<BloomFilter> {
    let mut hdr = [0u8; HDR_SIZE];
    let got = read_full(&mut r, &mut hdr)?;
    if got < HDR_SIZE { return Err(CcbfError::TruncatedHeader { got }); }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&hdr[0..4]);
    if &magic != MAGIC { return Err(CcbfError::BadMagic { found: magic }); }
    let version = BE::read_u16(&hdr[4..6]);
    if version != VERSION { return Err(CcbfError::UnsupportedVersion { found: version }); }
    let hash_rounds = BE::read_u16(&hdr[6..8]);
    let bit_count = BE::read_u64(&hdr[8..16]);
    tracing::debug!(hash_rounds, bit_count, "filter header ok");

    let min_len = bit_count / 8;
    let max_len = bit_count.div_ceil(8);
    let mut bitmap = Vec::new();
    let got = r.take(max_len).read_to_end(&mut bitmap)? as u64;
    if got < min_len {
        return Err(CcbfError::TruncatedBody { expected: min_len, got });
    }
    Ok(BloomFilter::from_parts(hash_rounds as u8, bit_count, bitmap))
}

/// Write to `path` atomically: temp file in the same directory, then rename.
pub fn save(bf: &BloomFilter, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path_final = path.as_ref().to_path_buf();
    let dir = match path_final.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new().prefix("ccbf_").tempfile_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        encode(bf, &mut w)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&path_final)?;
    tracing::info!(path = %path_final.display(), bytes = HDR_SIZE + bf.bitmap().len(), "filter saved");
    Ok(path_final)
}

pub fn load(path: impl AsRef<Path>) -> Result<BloomFilter> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| CcbfError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let bf = decode(BufReader::new(f))?;
    tracing::info!(path = %path.display(), k = bf.hash_rounds(), m = bf.bit_count(), "filter loaded");
    Ok(bf)
}

/// Like `read_exact`, but reports how much arrived before EOF.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match r.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn header(magic: &[u8; 4], version: u16, k: u16, m: u64) -> Vec<u8> {
        let mut v = magic.to_vec();
        v.extend_from_slice(&version.to_be_bytes());
        v.extend_from_slice(&k.to_be_bytes());
        v.extend_from_slice(&m.to_be_bytes());
        v
    }

    #[test]
    fn zero_filter_layout() {
        let bf = BloomFilter::new(4, 64);
        let mut buf = Vec::new();
        encode(&bf, &mut buf).unwrap();
        assert_eq!(buf.len(), 24);
        assert_eq!(&buf[0..4], b"CCBF");
        assert_eq!(&buf[4..6], &[0, 1]);
        assert_eq!(&buf[6..8], &[0, 4]);
        assert_eq!(&buf[8..16], &64u64.to_be_bytes());
        assert!(buf[16..].iter().all(|&b| b == 0));
        assert_eq!(buf, to_bytes(&bf).unwrap());

        let back = decode(&buf[..]).unwrap();
        assert_eq!(back.hash_rounds(), 4);
        assert_eq!(back.bit_count(), 64);
        assert_eq!(back.bitmap(), &[0u8; 8]);
        assert_eq!(back.inserted(), 0);
    }

    #[test]
    fn roundtrip_keeps_bits() {
        let mut bf = BloomFilter::create(500.0, 0.01);
        for w in ["alpha", "beta", "gamma"] { bf.insert(w.as_bytes()); }
        let back = decode(&to_bytes(&bf).unwrap()[..]).unwrap();
        assert_eq!(back.bitmap(), bf.bitmap());
        assert!(back.query(b"beta"));
        assert_eq!(back.inserted(), 0);
    }

    #[test]
    fn short_header() {
        let err = decode(&b"CCBF\x00\x01"[..]).unwrap_err();
        assert!(matches!(err, CcbfError::TruncatedHeader { got: 6 }));
    }

    #[test]
    fn wrong_magic() {
        let mut buf = header(b"XXBF", 1, 4, 64);
        buf.extend_from_slice(&[0u8; 8]);
        assert!(matches!(decode(&buf[..]).unwrap_err(), CcbfError::BadMagic { found } if &found == b"XXBF"));
    }

    #[test]
    fn wrong_version() {
        let mut buf = header(b"CCBF", 2, 4, 64);
        buf.extend_from_slice(&[0u8; 8]);
        assert!(matches!(decode(&buf[..]).unwrap_err(), CcbfError::UnsupportedVersion { found: 2 }));
    }

    #[test]
    fn short_body() {
        let mut buf = header(b"CCBF", 1, 4, 64);
        buf.extend_from_slice(&[0u8; 5]);
        assert!(matches!(
            decode(&buf[..]).unwrap_err(),
            CcbfError::TruncatedBody { expected: 8, got: 5 }
        ));
    }

    #[test]
    fn floor_sized_body_loads() {
        // 9585 bits: floor = 1198 bytes, ceil = 1199.
        let mut buf = header(b"CCBF", 1, 6, 9585);
        buf.extend(std::iter::repeat(0xAAu8).take(1198));
        let bf = decode(&buf[..]).unwrap();
        assert_eq!(bf.bitmap().len(), 1199);
        assert_eq!(bf.bitmap()[1198], 0);
        assert_eq!(bf.bitmap()[0], 0xAA);
    }

    #[test]
    fn wide_hash_rounds_narrow_to_u8() {
        let mut buf = header(b"CCBF", 1, 0x0106, 64);
        buf.extend_from_slice(&[0u8; 8]);
        let bf = decode(&buf[..]).unwrap();
        assert_eq!(bf.hash_rounds(), 6);
        assert_eq!(bf.bit_count(), 64);
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut buf = header(b"CCBF", 1, 4, 64);
        buf.extend_from_slice(&[1u8; 12]);
        let bf = decode(&buf[..]).unwrap();
        assert_eq!(bf.bitmap(), &[1u8; 8]);
    }

    #[test]
    fn save_load_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("words.bf");
        let mut bf = BloomFilter::create(100.0, 0.01);
        bf.insert(b"hello");
        save(&bf, &path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), (HDR_SIZE + bf.bitmap().len()) as u64);
        let back = load(&path).unwrap();
        assert!(back.query(b"hello"));
        assert_eq!(back.bitmap(), bf.bitmap());
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let tmp = tempdir().unwrap();
        let err = load(tmp.path().join("nope.bf")).unwrap_err();
        assert!(matches!(err, CcbfError::SourceUnavailable { .. }));
    }
}
