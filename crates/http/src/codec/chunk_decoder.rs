//! Chunked-transfer segment decoding.
//!
//! Message-oriented transports deliver each chunk-encoded unit as one
//! self-contained frame: `SIZE-LINE CRLF DATA CRLF`. [`decode_chunk`] strips
//! the size line and the trailing terminator and yields the inner data span,
//! borrowed from the input.

use crate::ensure;
use crate::protocol::ChunkError;
use crate::utils::find_crlf;

/// Smallest well-formed segment: one size byte, its CRLF, and the trailing
/// CRLF around zero data bytes.
const MIN_CHUNK_SIZE: usize = 5;

/// Decodes one chunk-encoded segment, returning the data span strictly
/// between the size line's CRLF and the trailing CRLF.
///
/// The size line is consumed structurally only: its decoded numeric value is
/// never compared against the length of the returned span, so a size field
/// that disagrees with the framing is still accepted as long as the CRLF
/// boundaries are present.
pub fn decode_chunk(segment: &[u8]) -> Result<&[u8], ChunkError> {
    ensure!(
        segment.len() >= MIN_CHUNK_SIZE,
        ChunkError::malformed(format!("segment of {} bytes is below the {MIN_CHUNK_SIZE} byte minimum", segment.len()))
    );

    let size_end = find_crlf(segment).ok_or_else(|| ChunkError::malformed("size line is not CRLF terminated"))?;

    let data_begin = size_end + 2;
    ensure!(data_begin < segment.len(), ChunkError::malformed("no data region after the size line"));

    let data_end = segment.len() - 2;
    ensure!(&segment[data_end..] == b"\r\n", ChunkError::malformed("segment is not CRLF terminated"));

    Ok(&segment[data_begin..data_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_chunk_data() {
        let data = decode_chunk(b"F\r\n-fifteen bytes-\r\n").unwrap();
        assert_eq!(data, b"-fifteen bytes-");
        assert_eq!(data.len(), 15);
    }

    #[test]
    fn size_value_is_not_validated_against_data_length() {
        // size line says 0xFF, data is 5 bytes; the framing wins
        let data = decode_chunk(b"FF\r\nhello\r\n").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn empty_data_region_is_valid() {
        let data = decode_chunk(b"0\r\n\r\n").unwrap();
        assert_eq!(data, b"");
    }

    #[test]
    fn size_line_without_crlf_is_malformed() {
        assert!(matches!(decode_chunk(b"1ffThisisnotvalid\r\n"), Err(ChunkError::Malformed { .. })));
    }

    #[test]
    fn undersized_segment_is_malformed() {
        assert!(matches!(decode_chunk(b"\r\n\r\n"), Err(ChunkError::Malformed { .. })));
        assert!(matches!(decode_chunk(b""), Err(ChunkError::Malformed { .. })));
    }

    #[test]
    fn missing_trailing_crlf_is_malformed() {
        assert!(matches!(decode_chunk(b"5\r\nhello"), Err(ChunkError::Malformed { .. })));
        assert!(matches!(decode_chunk(b"5\r\nhello\r_"), Err(ChunkError::Malformed { .. })));
    }

    #[test]
    fn size_line_running_to_segment_end_is_malformed() {
        // the only CRLF is the trailing one, leaving no data region
        assert!(matches!(decode_chunk(b"abcde\r\n"), Err(ChunkError::Malformed { .. })));
    }
}
