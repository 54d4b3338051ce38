//! BDD step definitions for status interpretation

use cucumber::{given, then, when};

use homework_watch::error::StatusError;
use homework_watch::status::parse_status;

use crate::world::WatchWorld;

#[given(expr = "the homework record {string}")]
fn homework_record(world: &mut WatchWorld, record: String) {
    world.payload = Some(serde_json::from_str(&record).expect("record must be valid JSON"));
}

#[when("the record is interpreted")]
fn record_interpreted(world: &mut WatchWorld) {
    let record = world.payload.as_ref().expect("no record");
    world.interpretation = Some(parse_status(record).map(|homework| homework.message()));
}

#[then(expr = "the notification text should be {string}")]
fn notification_text(world: &mut WatchWorld, expected: String) {
    let result = world.interpretation.as_ref().expect("record not interpreted");
    assert_eq!(result, &Ok(expected));
}

#[then(expr = "interpretation should fail with {string}")]
fn interpretation_fails(world: &mut WatchWorld, expected: String) {
    let error = match world.interpretation.as_ref().expect("record not interpreted") {
        Err(e) => e,
        Ok(text) => panic!("expected interpretation to fail, got {:?}", text),
    };
    let actual = match error {
        StatusError::MissingName => "missing name",
        StatusError::MissingStatus => "missing status",
        StatusError::UnrecognizedStatus(_) => "unrecognized status",
    };
    assert_eq!(actual, expected, "error was {}", error);
}
