mod common;

use openprotocol::mids::{default_catalog, Mid0038, Mid0262};
use openprotocol::{Mid, MidHeader, ProtocolError};

/// Literal vector from controller traffic: MID 0262 revision 1 with the
/// no-ack flag set and a ten-character tool tag.
const MID0262_PACKAGE: &str = "003002620011        013200078D";

#[test]
fn mid0262_parses_and_repacks_byte_exact() {
    common::init_tracing();
    let catalog = default_catalog().unwrap();

    let mid = catalog.parse_as::<Mid0262>(MID0262_PACKAGE).unwrap();
    assert_eq!(mid.header().no_ack, Some(true));
    assert_eq!(mid.tool_tag_id().unwrap().as_deref(), Some("013200078D"));
    assert_eq!(mid.pack().unwrap(), MID0262_PACKAGE);
}

#[test]
fn mid0038_round_trips_in_both_revisions() {
    let catalog = default_catalog().unwrap();

    for (revision, job_id, body) in [(1, 99, "99"), (2, 99, "0099"), (2, 1234, "1234")] {
        let packed = Mid0038::with_job_id(job_id, revision).unwrap().pack().unwrap();
        assert!(packed.ends_with(body), "revision {revision}: {packed}");

        let parsed = catalog.parse_as::<Mid0038>(&packed).unwrap();
        assert_eq!(parsed.header().revision, Some(revision));
        assert_eq!(parsed.job_id().unwrap(), Some(job_id));
        assert_eq!(parsed.pack().unwrap(), packed);
    }
}

#[test]
fn explicit_zero_revision_survives_a_repack() {
    let catalog = default_catalog().unwrap();

    // Some controllers send revision `000` where others leave the columns
    // blank; both mean revision 1, but the digits must come back as sent.
    let raw = "00200001000         ";
    let parsed = catalog.parse(raw).unwrap();
    assert_eq!(parsed.header().revision, Some(0));
    assert_eq!(parsed.pack().unwrap(), raw);
}

#[test]
fn packed_length_field_matches_actual_length() {
    let messages: Vec<String> = vec![
        Mid0038::with_job_id(7, 2).unwrap().pack().unwrap(),
        Mid0262::default().pack().unwrap(),
        MID0262_PACKAGE.to_string(),
    ];
    for packed in messages {
        let header = MidHeader::parse(&packed).unwrap();
        assert_eq!(header.length, packed.len());
    }
}

#[test]
fn job_id_overflow_is_an_assignment_error() {
    // 99 is the widest value revision 1 can carry in two digits.
    let packed = Mid0038::with_job_id(99, 1).unwrap().pack().unwrap();
    assert_eq!(packed.len(), 22);

    let err = Mid0038::with_job_id(100, 1).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::FieldOverflow { width: 2, .. }
    ));
}

#[test]
fn deferred_validation_path_reports_instead_of_packing() {
    let mut mid = Mid0038::new(1);
    mid.fields_mut()
        .set_raw_unchecked("job_id", "100".to_string());

    let errors = mid.validate();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("out of range"), "{}", errors[0]);

    // Rendering still refuses to truncate the oversized value.
    assert!(matches!(
        mid.pack().unwrap_err(),
        ProtocolError::FieldOverflow { .. }
    ));
}

#[test]
fn narrowing_revision_change_rechecks_widths() {
    let mut mid = Mid0038::with_job_id(1234, 2).unwrap();
    assert!(matches!(
        mid.set_revision(1).unwrap_err(),
        ProtocolError::FieldOverflow { width: 2, .. }
    ));
    // The failed change must not have committed.
    assert_eq!(mid.header().revision, Some(2));

    let mut mid = Mid0038::with_job_id(42, 2).unwrap();
    mid.set_revision(1).unwrap();
    assert!(mid.pack().unwrap().ends_with("42"));
}

#[test]
fn revision_below_the_first_layout_is_unsupported() {
    let mut mid = Mid0038::new(1);
    assert!(matches!(
        mid.set_revision(0).unwrap_err(),
        ProtocolError::UnsupportedRevision {
            mid: 38,
            revision: 0,
        }
    ));
}

#[test]
fn body_one_character_short_is_structural() {
    let catalog = default_catalog().unwrap();
    let short = "002902620011        013200078";
    assert!(matches!(
        catalog.parse(short).unwrap_err(),
        ProtocolError::TruncatedBody { missing: 1, .. }
    ));
}

#[test]
fn trailing_body_characters_are_structural() {
    let catalog = default_catalog().unwrap();
    let long = "003102620011        013200078DX";
    assert!(matches!(
        catalog.parse(long).unwrap_err(),
        ProtocolError::TrailingBody(1)
    ));
}
