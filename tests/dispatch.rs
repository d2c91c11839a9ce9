mod common;

use chrono::{NaiveDate, NaiveDateTime};
use openprotocol::mids::{default_catalog, Mid0038, Mid0070, Mid0262};
use openprotocol::{
    BoolCodec, CodeCodec, FieldCode, FieldDescriptor, FieldValues, IntCodec, Mid, MidHeader,
    MidSchema, ProtocolError, TimestampCodec,
};
use std::any::Any;
use std::sync::LazyLock;

#[test]
fn unknown_mid_is_a_distinguishable_outcome() {
    common::init_tracing();
    let catalog = default_catalog().unwrap();
    let raw = "00200999001         ";
    assert!(matches!(
        catalog.parse(raw).unwrap_err(),
        ProtocolError::UnknownMid { mid: 999 }
    ));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut catalog = default_catalog().unwrap();
    assert!(matches!(
        catalog.register::<Mid0038>().unwrap_err(),
        ProtocolError::DuplicateMid { mid: 38 }
    ));
}

#[test]
fn typed_parse_of_the_wrong_type_is_a_mismatch() {
    let catalog = default_catalog().unwrap();
    let packed = Mid0070::default().pack().unwrap();
    assert!(matches!(
        catalog.parse_as::<Mid0262>(&packed).unwrap_err(),
        ProtocolError::MidMismatch {
            expected: 262,
            actual: 70,
        }
    ));
}

#[test]
fn dynamic_parse_reports_the_concrete_type() {
    let catalog = default_catalog().unwrap();
    let packed = Mid0038::with_job_id(3, 2).unwrap().pack().unwrap();
    let message = catalog.parse(&packed).unwrap();
    assert_eq!(message.mid(), Mid0038::MID);
    assert!(message.as_any().is::<Mid0038>());
}

// A message type defined entirely outside the crate, the way an integrator
// extends the catalog with vendor MIDs. Exercises the bool, timestamp and
// enum-code converters the built-in samples do not use.

const COUNT: &str = "count";
const ENABLED: &str = "enabled";
const STATUS: &str = "status";
const STARTED_AT: &str = "started_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchStatus {
    Idle,
    Running,
    Done,
}

impl FieldCode for BatchStatus {
    fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(BatchStatus::Idle),
            1 => Some(BatchStatus::Running),
            2 => Some(BatchStatus::Done),
            _ => None,
        }
    }

    fn code(&self) -> u32 {
        match self {
            BatchStatus::Idle => 0,
            BatchStatus::Running => 1,
            BatchStatus::Done => 2,
        }
    }
}

static BATCH_SCHEMA: LazyLock<MidSchema> = LazyLock::new(|| {
    MidSchema::new(BatchReport::MID).revision(
        1,
        vec![
            FieldDescriptor::numeric(COUNT, 5),
            FieldDescriptor::numeric(ENABLED, 1),
            FieldDescriptor::numeric(STATUS, 3),
            FieldDescriptor::text(STARTED_AT, 19),
        ],
    )
});

#[derive(Debug, Clone, PartialEq)]
struct BatchReport {
    header: MidHeader,
    fields: FieldValues,
}

impl BatchReport {
    const MID: u16 = 9001;

    fn count(&self) -> Result<Option<u32>, ProtocolError> {
        self.fields.get(&IntCodec, COUNT)
    }

    fn set_count(&mut self, count: u32) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(COUNT)?;
        self.fields.set(&IntCodec, &descriptor, &count)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(ENABLED)?;
        self.fields.set(&BoolCodec, &descriptor, &enabled)
    }

    fn status(&self) -> Result<Option<BatchStatus>, ProtocolError> {
        self.fields.get(&CodeCodec::<BatchStatus>::new(), STATUS)
    }

    fn set_status(&mut self, status: BatchStatus) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(STATUS)?;
        self.fields
            .set(&CodeCodec::<BatchStatus>::new(), &descriptor, &status)
    }

    fn started_at(&self) -> Result<Option<NaiveDateTime>, ProtocolError> {
        self.fields.get(&TimestampCodec, STARTED_AT)
    }

    fn set_started_at(&mut self, at: NaiveDateTime) -> Result<(), ProtocolError> {
        let descriptor = self.descriptor(STARTED_AT)?;
        self.fields.set(&TimestampCodec, &descriptor, &at)
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self {
            header: MidHeader::new(Self::MID, 1),
            fields: FieldValues::default(),
        }
    }
}

impl Mid for BatchReport {
    fn mid(&self) -> u16 {
        Self::MID
    }

    fn schema(&self) -> &'static MidSchema {
        &BATCH_SCHEMA
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

#[test]
fn external_type_registers_and_round_trips() {
    common::init_tracing();
    let mut catalog = default_catalog().unwrap();
    catalog.register::<BatchReport>().unwrap();

    let started = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(10, 0, 3)
        .unwrap();

    let mut report = BatchReport::default();
    report.set_count(1234).unwrap();
    report.set_enabled(true).unwrap();
    report.set_status(BatchStatus::Running).unwrap();
    report.set_started_at(started).unwrap();

    let packed = report.pack().unwrap();
    assert_eq!(packed.len(), 20 + 5 + 1 + 3 + 19);
    assert!(packed.contains("012341001"));
    assert!(packed.ends_with("2024-05-17:10:00:03"));

    let parsed = catalog.parse_as::<BatchReport>(&packed).unwrap();
    assert_eq!(parsed, report);
    assert_eq!(parsed.count().unwrap(), Some(1234));
    assert_eq!(parsed.status().unwrap(), Some(BatchStatus::Running));
    assert_eq!(parsed.started_at().unwrap(), Some(started));
}
