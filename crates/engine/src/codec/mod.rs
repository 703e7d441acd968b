//! Binary region snapshot format.
//!
//! All integers are little-endian. Strings are a 7-bit variable-length
//! byte count followed by UTF-8 bytes. The region stream as a whole is
//! gzip-compressed; the record encoders below work on the raw stream.

pub mod entity;
pub mod region;
pub mod tile;

use std::io::{self, Read, Write};

use crate::error::CodecError;

pub use region::{
    BUFFER_SIZE, decode_region, encode_region, load_region_file, read_region, save_region_file,
    write_region,
};

/// Map an I/O failure to a codec error, treating end-of-stream as truncation
/// of the record named by `what`.
pub(crate) fn truncated(what: &'static str) -> impl Fn(io::Error) -> CodecError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::Truncated { what }
        } else {
            CodecError::Io(e)
        }
    }
}

// ── Readers ──────────────────────────────────────────────────────────────

fn read_array<const N: usize, R: Read>(r: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
    Ok(read_array::<1, _>(r)?[0])
}

pub(crate) fn read_i16<R: Read>(r: &mut R) -> io::Result<i16> {
    read_array(r).map(i16::from_le_bytes)
}

pub(crate) fn read_u16<R: Read>(r: &mut R) -> io::Result<u16> {
    read_array(r).map(u16::from_le_bytes)
}

pub(crate) fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    read_array(r).map(i32::from_le_bytes)
}

/// Read a non-negative element count.
pub(crate) fn read_count<R: Read>(r: &mut R, what: &'static str) -> Result<usize, CodecError> {
    let count = read_i32(r).map_err(truncated(what))?;
    usize::try_from(count).map_err(|_| CodecError::InvalidCount {
        what,
        count: count as i64,
    })
}

/// Read a length-prefixed UTF-8 string.
pub(crate) fn read_string<R: Read>(r: &mut R, what: &'static str) -> Result<String, CodecError> {
    let mut len: u32 = 0;
    let mut shift = 0;
    loop {
        let byte = read_u8(r).map_err(truncated(what))?;
        len |= ((byte & 0x7F) as u32) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift > 28 {
            return Err(CodecError::InvalidCount {
                what,
                count: len as i64,
            });
        }
    }
    let mut bytes = Vec::new();
    r.take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(truncated(what))?;
    if bytes.len() != len as usize {
        return Err(CodecError::Truncated { what });
    }
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidString)
}

// ── Writers ──────────────────────────────────────────────────────────────

pub(crate) fn write_u8<W: Write>(w: &mut W, v: u8) -> io::Result<()> {
    w.write_all(&[v])
}

pub(crate) fn write_i16<W: Write>(w: &mut W, v: i16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub(crate) fn write_u16<W: Write>(w: &mut W, v: u16) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub(crate) fn write_i32<W: Write>(w: &mut W, v: i32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

/// Element counts are stored as `i32`.
pub(crate) fn write_count<W: Write>(w: &mut W, len: usize, what: &'static str) -> Result<(), CodecError> {
    let count = i32::try_from(len).map_err(|_| CodecError::InvalidCount {
        what,
        count: len as i64,
    })?;
    Ok(write_i32(w, count)?)
}

pub(crate) fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    let mut len = s.len() as u32;
    while len >= 0x80 {
        write_u8(w, (len as u8) | 0x80)?;
        len >>= 7;
    }
    write_u8(w, len as u8)?;
    w.write_all(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_length_prefix_is_variable_width() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hi").unwrap();
        assert_eq!(buf, vec![2, b'h', b'i']);

        let long = "x".repeat(300);
        let mut buf = Vec::new();
        write_string(&mut buf, &long).unwrap();
        assert_eq!(&buf[..2], &[0xAC, 0x02]);
        assert_eq!(read_string(&mut buf.as_slice(), "sign").unwrap(), long);
    }

    #[test]
    fn short_string_is_truncation() {
        let bytes = [5u8, b'a', b'b'];
        let err = read_string(&mut &bytes[..], "sign").unwrap_err();
        assert!(matches!(err, CodecError::Truncated { what: "sign" }));
    }

    #[test]
    fn negative_count_rejected() {
        let bytes = (-3i32).to_le_bytes();
        let err = read_count(&mut &bytes[..], "sign list").unwrap_err();
        assert!(matches!(err, CodecError::InvalidCount { count: -3, .. }));
    }
}
