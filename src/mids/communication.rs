//! Communication establishment and command-reply MIDs.

use crate::protocol::error::ProtocolError;
use crate::protocol::frame::{
    CodeCodec, FieldCode, FieldDescriptor, FieldValues, IntCodec, Mid, MidHeader, MidSchema,
};
use std::any::Any;
use std::sync::LazyLock;

/// MID 0001: application communication start.
///
/// First message sent by the integrator after the TCP connection opens.
/// Answered with MID 0002 (communication start acknowledge) or MID 0004.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid0001 {
    header: MidHeader,
    fields: FieldValues,
}

static MID0001_SCHEMA: LazyLock<MidSchema> =
    LazyLock::new(|| MidSchema::new(Mid0001::MID).revision(1, Vec::new()));

impl Mid0001 {
    pub const MID: u16 = 1;
    pub const LAST_REVISION: u16 = 6;

    pub fn new(revision: u16) -> Self {
        Self {
            header: MidHeader::new(Self::MID, revision),
            fields: FieldValues::default(),
        }
    }
}

impl Default for Mid0001 {
    fn default() -> Self {
        Self::new(Self::LAST_REVISION)
    }
}

impl Mid for Mid0001 {
    fn mid(&self) -> u16 {
        Self::MID
    }

    fn schema(&self) -> &'static MidSchema {
        &MID0001_SCHEMA
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

/// Controller-side reason carried in MID 0004.
///
/// A conservative subset of the published codes; anything else is kept in
/// `Other` rather than rejected, since controllers routinely extend the
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    NoError,
    InvalidData,
    ParameterSetIdNotPresent,
    ParameterSetCannotBeSet,
    ParameterSetNotRunning,
    JobIdNotPresent,
    Other(u32),
}

impl FieldCode for CommandError {
    fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => CommandError::NoError,
            1 => CommandError::InvalidData,
            2 => CommandError::ParameterSetIdNotPresent,
            3 => CommandError::ParameterSetCannotBeSet,
            4 => CommandError::ParameterSetNotRunning,
            10 => CommandError::JobIdNotPresent,
            other => CommandError::Other(other),
        })
    }

    fn code(&self) -> u32 {
        match self {
            CommandError::NoError => 0,
            CommandError::InvalidData => 1,
            CommandError::ParameterSetIdNotPresent => 2,
            CommandError::ParameterSetCannotBeSet => 3,
            CommandError::ParameterSetNotRunning => 4,
            CommandError::JobIdNotPresent => 10,
            CommandError::Other(other) => *other,
        }
    }
}

const FAILED_MID: &str = "failed_mid";
const ERROR_CODE: &str = "error_code";

static MID0004_SCHEMA: LazyLock<MidSchema> = LazyLock::new(|| {
    MidSchema::new(Mid0004::MID)
        .revision(
            1,
            vec![
                FieldDescriptor::numeric(FAILED_MID, 4),
                FieldDescriptor::numeric(ERROR_CODE, 2),
            ],
        )
        // Revision 2 widened the error code to three digits.
        .revision(
            2,
            vec![
                FieldDescriptor::numeric(FAILED_MID, 4),
                FieldDescriptor::numeric(ERROR_CODE, 3),
            ],
        )
});

/// MID 0004: command error.
///
/// Controller's negative reply: the MID number of the failed request plus
/// an error code.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid0004 {
    header: MidHeader,
    fields: FieldValues,
}

impl Mid0004 {
    pub const MID: u16 = 4;
    pub const LAST_REVISION: u16 = 2;

    pub fn new(revision: u16) -> Self {
        Self {
            header: MidHeader::new(Self::MID, revision),
            fields: FieldValues::default(),
        }
    }

    pub fn failed_mid(&self) -> Result<Option<u32>, ProtocolError> {
        self.fields.get(&IntCodec, FAILED_MID)
    }

    pub fn set_failed_mid(&mut self, mid: u32) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(FAILED_MID)?;
        self.fields.set(&IntCodec, &descriptor, &mid)
    }

    pub fn error(&self) -> Result<Option<CommandError>, ProtocolError> {
        self.fields.get(&CodeCodec::<CommandError>::new(), ERROR_CODE)
    }

    pub fn set_error(&mut self, error: CommandError) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(ERROR_CODE)?;
        self.fields
            .set(&CodeCodec::<CommandError>::new(), &descriptor, &error)
    }
}

impl Default for Mid0004 {
    fn default() -> Self {
        Self::new(Self::LAST_REVISION)
    }
}

impl Mid for Mid0004 {
    fn mid(&self) -> u16 {
        Self::MID
    }

    fn schema(&self) -> &'static MidSchema {
        &MID0004_SCHEMA
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

const ACCEPTED_MID: &str = "accepted_mid";

static MID0005_SCHEMA: LazyLock<MidSchema> = LazyLock::new(|| {
    MidSchema::new(Mid0005::MID).revision(1, vec![FieldDescriptor::numeric(ACCEPTED_MID, 4)])
});

/// MID 0005: command accepted.
///
/// Controller's positive reply carrying the MID number of the accepted
/// request.
#[derive(Debug, Clone, PartialEq)]
pub struct Mid0005 {
    header: MidHeader,
    fields: FieldValues,
}

impl Mid0005 {
    pub const MID: u16 = 5;
    pub const LAST_REVISION: u16 = 1;

    pub fn new(revision: u16) -> Self {
        Self {
            header: MidHeader::new(Self::MID, revision),
            fields: FieldValues::default(),
        }
    }

    pub fn accepted(accepted_mid: u32) -> Result<Self, ProtocolError> {
        let mut mid = Self::new(Self::LAST_REVISION);
        mid.set_accepted_mid(accepted_mid)?;
        Ok(mid)
    }

    pub fn accepted_mid(&self) -> Result<Option<u32>, ProtocolError> {
        self.fields.get(&IntCodec, ACCEPTED_MID)
    }

    pub fn set_accepted_mid(&mut self, mid: u32) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(ACCEPTED_MID)?;
        self.fields.set(&IntCodec, &descriptor, &mid)
    }
}

impl Default for Mid0005 {
    fn default() -> Self {
        Self::new(Self::LAST_REVISION)
    }
}

impl Mid for Mid0005 {
    fn mid(&self) -> u16 {
        Self::MID
    }

    fn schema(&self) -> &'static MidSchema {
        &MID0005_SCHEMA
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
