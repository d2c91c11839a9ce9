//! TCP framing for Open Protocol.
//!
//! On the wire each message is a run of ASCII characters terminated by a
//! single NUL byte. This codec only splits and joins frames; identifying
//! and parsing the message inside a frame is [`MidCatalog`]'s job, and
//! connection lifecycle stays with the caller.
//!
//! [`MidCatalog`]: crate::protocol::dispatch::MidCatalog

use crate::protocol::error::ProtocolError;
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Byte terminating every Open Protocol frame.
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Ceiling implied by the four-digit total-length header field.
pub const MAX_FRAME_SIZE: usize = 9999;

/// NUL-delimited frame codec yielding raw message strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenProtocolCodec;

impl Decoder for OpenProtocolCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        let Some(end) = buf.iter().position(|&b| b == FRAME_TERMINATOR) else {
            if buf.len() > MAX_FRAME_SIZE {
                return Err(ProtocolError::FrameTooLarge(buf.len()));
            }
            return Ok(None);
        };

        let frame = buf.split_to(end);
        buf.advance(1); // terminator
        if !frame.is_ascii() {
            return Err(ProtocolError::InvalidFrame(
                "frame contains non-ASCII bytes".to_string(),
            ));
        }
        String::from_utf8(frame.to_vec())
            .map(Some)
            .map_err(|e| ProtocolError::InvalidFrame(e.to_string()))
    }
}

impl Encoder<&str> for OpenProtocolCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: &str, buf: &mut BytesMut) -> Result<(), ProtocolError> {
        if item.len() > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge(item.len()));
        }
        if !item.is_ascii() {
            return Err(ProtocolError::InvalidFrame(
                "frame contains non-ASCII characters".to_string(),
            ));
        }
        buf.reserve(item.len() + 1);
        buf.extend_from_slice(item.as_bytes());
        buf.extend_from_slice(&[FRAME_TERMINATOR]);
        Ok(())
    }
}

impl Encoder<String> for OpenProtocolCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: String, buf: &mut BytesMut) -> Result<(), ProtocolError> {
        Encoder::<&str>::encode(self, item.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_waits_for_terminator() {
        let mut codec = OpenProtocolCodec;
        let mut buf = BytesMut::from(&b"00200001"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"001         \x00");
        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some("00200001001         ")
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_splits_back_to_back_frames() {
        let mut codec = OpenProtocolCodec;
        let mut buf = BytesMut::from(&b"aaaa\x00bbbb\x00"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("aaaa"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("bbbb"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn decode_rejects_non_ascii() {
        let mut codec = OpenProtocolCodec;
        let mut buf = BytesMut::from(&b"00\xff0\x00"[..]);
        assert!(matches!(
            codec.decode(&mut buf).unwrap_err(),
            ProtocolError::InvalidFrame(_)
        ));
    }

    #[test]
    fn decode_caps_unterminated_growth() {
        let mut codec = OpenProtocolCodec;
        let mut buf = BytesMut::from(vec![b'0'; MAX_FRAME_SIZE + 1].as_slice());
        assert!(matches!(
            codec.decode(&mut buf).unwrap_err(),
            ProtocolError::FrameTooLarge(_)
        ));
    }

    #[test]
    fn encode_appends_terminator() {
        let mut codec = OpenProtocolCodec;
        let mut buf = BytesMut::new();
        codec.encode("0020", &mut buf).unwrap();
        assert_eq!(&buf[..], b"0020\x00");
    }
}
