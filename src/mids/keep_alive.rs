//! Keep-alive MID.

use crate::protocol::frame::{FieldValues, Mid, MidHeader, MidSchema};
use std::any::Any;
use std::sync::LazyLock;

static SCHEMA: LazyLock<MidSchema> = LazyLock::new(|| MidSchema::new(Mid9999::MID).revision(1, Vec::new()));

/// MID 9999: keep alive.
///
/// Sent by the integrator when the link has been idle; the controller
/// echoes it back unchanged. Header only, revision 1 forever.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid9999 {
    header: MidHeader,
    fields: FieldValues,
}

impl Mid9999 {
    pub const MID: u16 = 9999;

    pub fn new() -> Self {
        Self {
            header: MidHeader::new(Self::MID, 1),
            fields: FieldValues::default(),
        }
    }
}

impl Default for Mid9999 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mid for Mid9999 {
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
