//! Alarm MIDs.

use crate::protocol::frame::{FieldValues, Mid, MidHeader, MidSchema};
use std::any::Any;
use std::sync::LazyLock;

static SCHEMA: LazyLock<MidSchema> = LazyLock::new(|| MidSchema::new(Mid0070::MID).revision(1, Vec::new()));

/// MID 0070: alarm subscribe.
///
/// Subscription for the alarms that can appear in the controller; the body
/// is empty in every revision. Answered with MID 0005, or MID 0004 when
/// the subscription already exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid0070 {
    header: MidHeader,
    fields: FieldValues,
}

impl Mid0070 {
    pub const MID: u16 = 70;
    pub const LAST_REVISION: u16 = 2;

    pub fn new(revision: u16) -> Self {
        Self {
            header: MidHeader::new(Self::MID, revision),
            fields: FieldValues::default(),
        }
    }

    /// Subscribe without expecting an acknowledgement.
    pub fn no_ack(revision: u16) -> Self {
        let mut mid = Self::new(revision);
        mid.header.no_ack = Some(true);
        mid
    }
}

impl Default for Mid0070 {
    fn default() -> Self {
        Self::new(Self::LAST_REVISION)
    }
}

impl Mid for Mid0070 {
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
