//! Container reader: splits a raw buffer into header and binary segment.

use crate::error::{FormatError, Result};
use crate::header::Header;
use tracing::debug;

/// Size of the big-endian length prefix.
const LENGTH_PREFIX: usize = 4;

/// Zero-copy, random-access view of the container's binary segment.
///
/// All table-descriptor offsets in the header are relative to the start of
/// this view; the header region's base offset has already been subtracted.
#[derive(Debug, Clone, Copy)]
pub struct BinarySegment<'a> {
    bytes: &'a [u8],
}

impl<'a> BinarySegment<'a> {
    /// Total length of the segment in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read one big-endian `u32` at `offset`.
    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        let end = offset.checked_add(4).ok_or(FormatError::Truncated {
            offset,
            len: 4,
            available: self.bytes.len(),
        })?;
        let bytes = self
            .bytes
            .get(offset..end)
            .ok_or(FormatError::Truncated {
                offset,
                len: 4,
                available: self.bytes.len(),
            })?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read `count` consecutive big-endian `u32` values starting at `offset`.
    ///
    /// Bounds are checked before anything is allocated, so a corrupt count
    /// cannot drive a huge allocation.
    pub fn read_u32_slice(&self, offset: usize, count: usize) -> Result<Vec<u32>> {
        let truncated = || FormatError::Truncated {
            offset,
            len: count.saturating_mul(4),
            available: self.bytes.len(),
        };
        let byte_len = count.checked_mul(4).ok_or_else(truncated)?;
        let end = offset.checked_add(byte_len).ok_or_else(truncated)?;
        let bytes = self.bytes.get(offset..end).ok_or_else(truncated)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// A parsed container: typed header plus the binary segment it indexes.
///
/// The container borrows the input buffer; nothing is copied out of it and
/// nothing is mutated after parsing.
#[derive(Debug)]
pub struct Container<'a> {
    header: Header,
    segment: BinarySegment<'a>,
}

impl<'a> Container<'a> {
    /// Parse a raw container buffer.
    ///
    /// Reads the 4-byte big-endian header length `L`, parses bytes
    /// `[4, 4+L)` as a JSON [`Header`], and exposes the remainder as the
    /// binary segment.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < LENGTH_PREFIX {
            return Err(FormatError::Truncated {
                offset: 0,
                len: LENGTH_PREFIX,
                available: bytes.len(),
            });
        }
        let header_len =
            u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let header_end = LENGTH_PREFIX
            .checked_add(header_len)
            .filter(|end| *end <= bytes.len())
            .ok_or(FormatError::Truncated {
                offset: LENGTH_PREFIX,
                len: header_len,
                available: bytes.len(),
            })?;

        let header_str = std::str::from_utf8(&bytes[LENGTH_PREFIX..header_end])?;
        let header: Header = serde_json::from_str(header_str)?;

        debug!(
            header_bytes = header_len,
            segment_bytes = bytes.len() - header_end,
            modules = header.modules.len(),
            sources = header.sources.len(),
            "Container parsed"
        );

        Ok(Self {
            header,
            segment: BinarySegment {
                bytes: &bytes[header_end..],
            },
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn segment(&self) -> BinarySegment<'a> {
        self.segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_bytes(header: &str, segment: &[u8]) -> Vec<u8> {
        let mut bytes = (header.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(segment);
        bytes
    }

    #[test]
    fn test_parse_splits_header_and_segment() {
        let bytes = container_bytes(r#"{"modules":[]}"#, &[0, 0, 0, 7]);
        let container = Container::parse(&bytes).unwrap();
        assert!(container.header().modules.is_empty());
        assert_eq!(container.segment().len(), 4);
        assert_eq!(container.segment().read_u32(0).unwrap(), 7);
    }

    #[test]
    fn test_parse_empty_segment() {
        let bytes = container_bytes("{}", &[]);
        let container = Container::parse(&bytes).unwrap();
        assert!(container.segment().is_empty());
    }

    #[test]
    fn test_parse_rejects_short_buffer() {
        let result = Container::parse(&[0, 0]);
        assert!(matches!(result, Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_parse_rejects_length_past_end() {
        // Claims a 100-byte header but only 2 bytes follow the prefix.
        let mut bytes = 100u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"{}");
        let result = Container::parse(&bytes);
        assert!(matches!(result, Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let bytes = container_bytes("not json", &[]);
        let result = Container::parse(&bytes);
        assert!(matches!(result, Err(FormatError::HeaderJson(_))));
    }

    #[test]
    fn test_segment_read_out_of_bounds() {
        let bytes = container_bytes("{}", &[1, 2]);
        let container = Container::parse(&bytes).unwrap();
        let result = container.segment().read_u32(0);
        assert!(matches!(result, Err(FormatError::Truncated { .. })));
    }
}
