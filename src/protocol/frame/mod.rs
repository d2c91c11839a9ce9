//! Message structure: header, field layouts, converters and the `Mid`
//! entity contract every concrete message type implements.

pub mod convert;
pub mod field;
pub mod header;

pub use convert::{
    BoolCodec, CodeCodec, FieldCode, FieldCodec, IntCodec, TextCodec, TimestampCodec,
    TIMESTAMP_FORMAT,
};
pub use field::{FieldDescriptor, FieldValues, MidSchema, Padding};
pub use header::{MidHeader, HEADER_LEN};

use crate::protocol::codec::MAX_FRAME_SIZE;
use crate::protocol::error::ProtocolError;
use std::any::Any;
use std::fmt;

/// Contract implemented by every concrete MID type.
///
/// A catalog entry supplies its MID number, its per-revision schema and the
/// two owned pieces of state (header and field storage); the provided
/// methods supply everything else — parsing, packing and revision changes.
/// `pack` and `parse_raw` are exact inverses for any well-formed entity:
/// `parse_raw(pack(m))` restores the same MID number, revision and field
/// values.
pub trait Mid: fmt::Debug + Send + Any {
    /// MID number this type owns. Immutable for the life of the entity.
    fn mid(&self) -> u16;

    /// Per-revision field layout of this type.
    fn schema(&self) -> &'static MidSchema;

    fn header(&self) -> &MidHeader;
    fn header_mut(&mut self) -> &mut MidHeader;
    fn fields(&self) -> &FieldValues;
    fn fields_mut(&mut self) -> &mut FieldValues;

    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Advisory domain checks (range limits and the like), independent of
    /// field widths. Never blocks `pack`; the caller decides whether the
    /// returned messages are fatal.
    fn validate(&self) -> Vec<String> {
        Vec::new()
    }

    /// Populate this entity from a raw message.
    ///
    /// The raw MID number must match this type; the body is resolved with
    /// the layout of the header's revision.
    fn parse_raw(&mut self, raw: &str) -> Result<(), ProtocolError> {
        let header = MidHeader::parse(raw)?;
        if header.mid != self.mid() {
            return Err(ProtocolError::MidMismatch {
                expected: self.mid(),
                actual: header.mid,
            });
        }
        let values = self
            .schema()
            .resolve(&raw[HEADER_LEN..], header.layout_revision())?;
        *self.header_mut() = header;
        *self.fields_mut() = values;
        Ok(())
    }

    /// Serialize to the wire representation.
    ///
    /// The body is rendered first so the header can be packed over the
    /// exact body length, keeping the total-length invariant by
    /// construction.
    fn pack(&self) -> Result<String, ProtocolError> {
        let body = self
            .schema()
            .render(self.fields(), self.header().layout_revision())?;
        let total = HEADER_LEN + body.len();
        // The length subfield holds four digits; past that the columns of
        // every following subfield would shift.
        if total > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge(total));
        }
        let mut out = self.header().pack(self.mid(), body.len());
        out.push_str(&body);
        Ok(out)
    }

    /// Change the header revision, re-deriving field widths first.
    ///
    /// Every stored value is checked against the new layout before the
    /// revision is committed, so a narrowing revision change cannot leave
    /// the entity unpackable.
    fn set_revision(&mut self, revision: u16) -> Result<(), ProtocolError> {
        let descriptors = self
            .schema()
            .fields_for(revision)
            .ok_or(ProtocolError::UnsupportedRevision {
                mid: self.mid(),
                revision,
            })?;
        for descriptor in descriptors {
            if let Some(raw) = self.fields().raw(descriptor.key) {
                if raw.len() > descriptor.width {
                    return Err(ProtocolError::FieldOverflow {
                        field: descriptor.key.to_string(),
                        value: raw.to_string(),
                        width: descriptor.width,
                    });
                }
            }
        }
        self.header_mut().revision = Some(revision);
        Ok(())
    }

    /// Descriptor of `key` in the active revision's layout, for the typed
    /// setters.
    fn descriptor(&self, key: &str) -> Result<FieldDescriptor, ProtocolError> {
        let revision = self.header().layout_revision();
        self.schema()
            .fields_for(revision)
            .ok_or(ProtocolError::UnsupportedRevision {
                mid: self.mid(),
                revision,
            })?
            .iter()
            .find(|d| d.key == key)
            .copied()
            .ok_or_else(|| ProtocolError::FieldNotInRevision {
                field: key.to_string(),
                revision,
            })
    }
}
