//! Replayed `update-data` round trips.
//!
//! The cassettes stand in for both the disk and the entity-data service, so
//! these runs are deterministic and never touch the network.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use tagcheck::cassette::format::{Cassette, Interaction};
use tagcheck::context::ServiceContext;
use tagcheck::data::update::{since, UpdateOutcome};
use tagcheck::tags::EntityKind;

fn call(seq: u64, port: &str, method: &str, input: Value, output: Value) -> Interaction {
    Interaction { seq, port: port.into(), method: method.into(), input, output }
}

/// A stale local directory (no revision marker) refreshed to revision 7.
fn stale_refresh() -> Vec<Interaction> {
    let mut interactions = vec![
        call(0, "fs", "exists", json!({"path": "/data/revision.json"}), json!(false)),
        call(1, "entity_data", "last_revision", json!({}), json!({"Ok": 7})),
    ];
    for kind in EntityKind::ALL {
        let records = match kind {
            EntityKind::Effect => json!([
                {"id": 1701, "name": "Hip to the Jive", "ambiguous": true},
                {"id": 1872, "name": "Hip to the Jive", "ambiguous": true},
                {"id": 9, "name": "Sugar Rush", "ambiguous": false},
            ]),
            EntityKind::Item => json!([{"id": 1, "name": "Newbiesport&trade; tent"}]),
            _ => json!([]),
        };
        let seq = interactions.len() as u64;
        interactions.push(call(
            seq,
            "entity_data",
            "fetch_entities",
            json!({"kind": kind.plural()}),
            json!({ "Ok": records }),
        ));
        let seq = interactions.len() as u64;
        interactions.push(call(
            seq,
            "fs",
            "write",
            json!({"path": format!("/data/{}.json", kind.plural())}),
            Value::Null,
        ));
    }
    let seq = interactions.len() as u64;
    interactions.push(call(seq, "fs", "write", json!({"path": "/data/revision.json"}), Value::Null));
    interactions
}

fn write_cassette(name: &str, interactions: Vec<Interaction>) -> PathBuf {
    let dir = std::env::temp_dir().join("tagcheck_update_replay");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.cassette.yaml"));
    let cassette = Cassette {
        name: name.into(),
        recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        interactions,
    };
    std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn replayed_refresh_reports_counts() {
    let path = write_cassette("stale", stale_refresh());
    let ctx = ServiceContext::replaying(&path).unwrap();

    let outcome = since(&ctx, Path::new("/data"), None).await.unwrap();

    let UpdateOutcome::Updated { from, to, counts } = outcome else {
        panic!("expected a refresh, got {outcome:?}");
    };
    assert_eq!((from, to), (0, 7));
    assert!(counts.contains(&(EntityKind::Effect, 3)));
    assert!(counts.contains(&(EntityKind::Item, 1)));
    assert!(counts.contains(&(EntityKind::Path, 0)));
}

#[tokio::test]
async fn replaying_twice_is_deterministic() {
    let path = write_cassette("deterministic", stale_refresh());
    let first = since(&ServiceContext::replaying(&path).unwrap(), Path::new("/data"), None).await;
    let second = since(&ServiceContext::replaying(&path).unwrap(), Path::new("/data"), None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn satisfied_revision_skips_the_service() {
    let path = write_cassette(
        "satisfied",
        vec![
            call(0, "fs", "exists", json!({"path": "/data/revision.json"}), json!(true)),
            call(1, "fs", "read_to_string", json!({"path": "/data/revision.json"}), json!({"Ok": "9"})),
        ],
    );
    let ctx = ServiceContext::replaying(&path).unwrap();
    let outcome = since(&ctx, Path::new("/data"), Some(5)).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::AlreadySatisfied { local: 9 });
}

#[tokio::test]
async fn service_failure_is_reported() {
    let path = write_cassette(
        "failure",
        vec![
            call(0, "fs", "exists", json!({"path": "/data/revision.json"}), json!(false)),
            call(1, "entity_data", "last_revision", json!({}), json!({"Err": "503 Service Unavailable"})),
        ],
    );
    let ctx = ServiceContext::replaying(&path).unwrap();
    let err = since(&ctx, Path::new("/data"), None).await.unwrap_err();
    assert!(err.contains("503"), "{err}");
}

#[test]
fn binary_runs_update_from_cassette() {
    let path = write_cassette("binary", stale_refresh());
    let output = Command::new(env!("CARGO_BIN_EXE_tagcheck"))
        .args(["update-data", "--data-dir", "/data"])
        .env("TAGCHECK_REPLAY", &path)
        .output()
        .expect("failed to run tagcheck binary");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Updated data from revision 0 to 7."), "{stdout}");
    assert!(stdout.contains("  effects    3"), "{stdout}");
}
