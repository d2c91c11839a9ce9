use crate::protocol::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Width of the fixed header present in every Open Protocol message.
pub const HEADER_LEN: usize = 20;

/// Fixed-layout header common to all MIDs.
///
/// Wire layout (column-exact, zero-padded numerics, blank means "not used"):
///
/// ```text
/// offset  width  field
/// 0       4      total message length (including the header itself)
/// 4       4      MID number
/// 8       3      revision
/// 11      1      no-ack flag
/// 12      2      station id
/// 14      2      spindle id
/// 16      2      sequence number
/// 18      1      number of message parts
/// 19      1      message part number
/// ```
///
/// Optional subfields round-trip byte-exactly: all-blank columns parse to
/// `None` and pack back to blanks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidHeader {
    /// Total length field as decoded from the wire.
    pub length: usize,
    /// MID number identifying the message type.
    pub mid: u16,
    /// Layout revision; `None` or `0` means revision 1.
    pub revision: Option<u16>,
    /// Suppress the controller's acknowledgement when set.
    pub no_ack: Option<bool>,
    pub station_id: Option<u8>,
    pub spindle_id: Option<u8>,
    pub sequence_number: Option<u8>,
    pub message_parts: Option<u8>,
    pub message_part_number: Option<u8>,
}

impl MidHeader {
    /// Create a header for an outgoing message of the given MID and revision.
    pub fn new(mid: u16, revision: u16) -> Self {
        Self {
            length: HEADER_LEN,
            mid,
            revision: Some(revision),
            no_ack: None,
            station_id: None,
            spindle_id: None,
            sequence_number: None,
            message_parts: None,
            message_part_number: None,
        }
    }

    /// Revision used for field-layout resolution.
    ///
    /// Blank and zero revisions both mean revision 1 on the wire.
    pub fn layout_revision(&self) -> u16 {
        match self.revision {
            Some(r) if r > 0 => r,
            _ => 1,
        }
    }

    /// Parse the fixed leading segment of a raw message.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        if !raw.is_ascii() {
            return Err(ProtocolError::MalformedHeader(
                "message is not ASCII".to_string(),
            ));
        }
        if raw.len() < HEADER_LEN {
            return Err(ProtocolError::MalformedHeader(format!(
                "message is {} characters, the header alone needs {HEADER_LEN}",
                raw.len()
            )));
        }

        let length: usize = required(raw, 0, 4, "length")?;
        let mid: u16 = required(raw, 4, 4, "mid")?;
        if length != raw.len() {
            return Err(ProtocolError::MalformedHeader(format!(
                "length field says {length}, message is {} characters",
                raw.len()
            )));
        }

        let no_ack = match &raw[11..12] {
            " " => None,
            "0" => Some(false),
            "1" => Some(true),
            other => {
                return Err(ProtocolError::MalformedHeader(format!(
                    "no-ack flag must be blank, `0` or `1`, found `{other}`"
                )))
            }
        };

        Ok(Self {
            length,
            mid,
            revision: numeric(raw, 8, 3, "revision")?,
            no_ack,
            station_id: numeric(raw, 12, 2, "station id")?,
            spindle_id: numeric(raw, 14, 2, "spindle id")?,
            sequence_number: numeric(raw, 16, 2, "sequence number")?,
            message_parts: numeric(raw, 18, 1, "message parts")?,
            message_part_number: numeric(raw, 19, 1, "message part number")?,
        })
    }

    /// Render the header over a body of `body_len` characters.
    ///
    /// The total length is recomputed here, so a stale `length` value on the
    /// header can never leak onto the wire. The MID number is taken from the
    /// owning message type rather than this struct.
    pub fn pack(&self, mid: u16, body_len: usize) -> String {
        let length = HEADER_LEN + body_len;
        debug_assert!(length <= 9999, "message exceeds the four-digit length field");

        let mut out = String::with_capacity(length);
        let _ = write!(out, "{length:04}{mid:04}");
        match self.revision {
            // Revision 0 is valid on the wire and must survive a repack,
            // so only `None` renders as blanks.
            Some(r) => {
                let _ = write!(out, "{r:03}");
            }
            None => out.push_str("   "),
        }
        out.push(match self.no_ack {
            Some(true) => '1',
            Some(false) => '0',
            None => ' ',
        });
        push_numeric(&mut out, self.station_id, 2);
        push_numeric(&mut out, self.spindle_id, 2);
        push_numeric(&mut out, self.sequence_number, 2);
        push_numeric(&mut out, self.message_parts, 1);
        push_numeric(&mut out, self.message_part_number, 1);
        out
    }
}

/// Decode a fixed-width numeric subfield; all-blank columns mean "not used".
fn numeric<T: FromStr>(
    raw: &str,
    start: usize,
    width: usize,
    name: &str,
) -> Result<Option<T>, ProtocolError> {
    let text = &raw[start..start + width];
    if text.bytes().all(|b| b == b' ') {
        return Ok(None);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::MalformedHeader(format!(
            "{name} subfield `{text}` is not numeric"
        )));
    }
    text.parse::<T>().map(Some).map_err(|_| {
        ProtocolError::MalformedHeader(format!("{name} subfield `{text}` is out of range"))
    })
}

fn required<T: FromStr>(
    raw: &str,
    start: usize,
    width: usize,
    name: &str,
) -> Result<T, ProtocolError> {
    numeric(raw, start, width, name)?
        .ok_or_else(|| ProtocolError::MalformedHeader(format!("{name} subfield is blank")))
}

fn push_numeric(out: &mut String, value: Option<u8>, width: usize) {
    match value {
        Some(value) => {
            let _ = write!(out, "{value:0width$}");
        }
        None => {
            for _ in 0..width {
                out.push(' ');
            }
        }
    }
}
