//! Tool location system MIDs.

use crate::protocol::error::ProtocolError;
use crate::protocol::frame::{
    FieldDescriptor, FieldValues, Mid, MidHeader, MidSchema, TextCodec,
};
use std::any::Any;
use std::sync::LazyLock;

const TOOL_TAG_ID: &str = "tool_tag_id";

static SCHEMA: LazyLock<MidSchema> =
    LazyLock::new(|| {
        MidSchema::new(Mid0262::MID).revision(1, vec![FieldDescriptor::text(TOOL_TAG_ID, 10)])
    });

/// MID 0262: tool tag id request/report.
///
/// Carries the RFID tag of a tool in the tool location system as a single
/// ten-character field.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid0262 {
    header: MidHeader,
    fields: FieldValues,
}

impl Mid0262 {
    pub const MID: u16 = 262;
    pub const LAST_REVISION: u16 = 1;

    pub fn new(revision: u16) -> Self {
        Self {
            header: MidHeader::new(Self::MID, revision),
            fields: FieldValues::default(),
        }
    }

    pub fn tool_tag_id(&self) -> Result<Option<String>, ProtocolError> {
        self.fields.get(&TextCodec, TOOL_TAG_ID)
    }

    pub fn set_tool_tag_id(&mut self, tag: &str) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(TOOL_TAG_ID)?;
        self.fields.set_raw(&descriptor, tag.to_string())
    }
}

impl Default for Mid0262 {
    fn default() -> Self {
        Self::new(Self::LAST_REVISION)
    }
}

impl Mid for Mid0262 {
    fn mid(&self) -> u16 {
        Self::MID
    }

    fn schema(&self) -> &'static MidSchema {
        &SCHEMA
    }

    fn header(&self) -> &MidHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut MidHeader {
        &mut self.header
    }

    fn fields(&self) -> &FieldValues {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldValues {
        &mut self.fields
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
