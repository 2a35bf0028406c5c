mod common;

use bot_actions::{ErrorCode, NotifyOutcome};
use bot_actions::notify::NoopNotifier;
use common::{RecordingNotifier, TestEnv, complete_form};
use serde_json::{Value, json};
use shared::models::BookingStore;
use std::fs;
use std::sync::Arc;

fn load_store(env: &TestEnv) -> BookingStore {
    serde_json::from_str(&fs::read_to_string(env.bookings_path()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_save_booking_persists_and_notifies() {
    let notifier = RecordingNotifier::delivered();
    let env = TestEnv::new(notifier.clone());
    let date = env.day(7);

    let tracker = complete_form(date).with_slot("special_request", "  window seat ");
    let response = env.run("action_save_booking", tracker).await;

    let store = load_store(&env);
    assert_eq!(store.len(), 1);
    let record = &store.bookings[0];
    assert!(record.booking_id.starts_with("BKG"));
    assert_eq!(record.date, date.format("%Y-%m-%d").to_string());
    assert_eq!(record.special_request.as_deref(), Some("window seat"));

    assert_eq!(
        response.texts(),
        vec![
            format!("Saved booking {} for Asha Rao.", record.booking_id).as_str(),
            "A confirmation SMS was sent to 9876543210.",
        ]
    );
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));
    assert_eq!(response.slot("booking_id"), Some(&json!(record.booking_id)));
    assert_eq!(response.slot("party_size"), Some(&json!(4)));

    assert_eq!(notifier.count(), 1);
    assert_eq!(notifier.sent.lock().unwrap()[0], *record);
}

#[tokio::test]
async fn test_bookings_append_in_order() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    let date = env.day(3);

    env.run("action_save_booking", complete_form(date)).await;
    let first = load_store(&env);

    let second_form = complete_form(date)
        .with_slot("name", "Ravi Kumar")
        .with_slot("party_size", "2");
    env.run("action_save_booking", second_form).await;

    let store = load_store(&env);
    assert_eq!(store.len(), 2);
    assert_eq!(store.bookings[0], first.bookings[0]);
    assert_eq!(store.last().unwrap().name, "Ravi Kumar");
    assert_eq!(store.last().unwrap().party_size, 2);
}

#[tokio::test]
async fn test_missing_slots_are_reported() {
    let notifier = RecordingNotifier::delivered();
    let env = TestEnv::new(notifier.clone());

    let tracker = complete_form(env.day(1))
        .with_slot("phone", Value::Null)
        .with_slot("time", "");
    let response = env.run("action_save_booking", tracker).await;

    assert_eq!(
        response.texts(),
        vec!["I still need your phone number and time before I can save the booking."]
    );
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(false)));
    assert_eq!(notifier.count(), 0);
    assert!(load_store_opt(&env).is_none());
}

fn load_store_opt(env: &TestEnv) -> Option<BookingStore> {
    fs::read_to_string(env.bookings_path())
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
}

#[tokio::test]
async fn test_invalid_slot_is_cleared_and_reprompted() {
    let env = TestEnv::new(RecordingNotifier::delivered());

    let tracker = complete_form(env.day(1)).with_slot("time", "03:00");
    let response = env.run("action_save_booking", tracker).await;

    assert_eq!(response.slot("time"), Some(&Value::Null));
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(false)));
    assert!(response.texts()[0].contains("07:30 to 01:30 (next day)"));
}

#[tokio::test]
async fn test_sms_failure_keeps_booking() {
    let notifier = RecordingNotifier::new(NotifyOutcome::Failed {
        code: ErrorCode::NotificationFailed,
        error: "HTTP error: connection refused".into(),
    });
    let env = TestEnv::new(notifier);

    let response = env.run("action_save_booking", complete_form(env.day(2))).await;

    assert_eq!(load_store(&env).len(), 1);
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));
    assert_eq!(
        response.texts()[1],
        "Booking saved, but failed to send SMS: HTTP error: connection refused"
    );
}

#[tokio::test]
async fn test_unconfigured_sms_is_skipped() {
    let env = TestEnv::new(Arc::new(NoopNotifier::new("messaging is not configured")));

    let response = env.run("action_save_booking", complete_form(env.day(2))).await;

    assert_eq!(
        response.texts()[1],
        "Booking saved. (SMS not sent — messaging is not configured.)"
    );
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));
}

#[tokio::test]
async fn test_storage_failure_is_not_confirmed() {
    let notifier = RecordingNotifier::delivered();
    let env = TestEnv::new(notifier.clone());
    // a directory where the bookings file should be makes every read fail
    fs::create_dir_all(env.bookings_path()).unwrap();

    let response = env.run("action_save_booking", complete_form(env.day(2))).await;

    assert_eq!(
        response.texts(),
        vec!["Sorry, we hit a technical issue saving your booking. Please try again."]
    );
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(false)));
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_corrupt_store_is_quarantined() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    fs::write(env.bookings_path(), "{\"bookings\": [ oops").unwrap();

    let response = env.run("action_save_booking", complete_form(env.day(2))).await;

    assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));
    assert_eq!(load_store(&env).len(), 1);

    let backup = env.dir.path().join("bookings.json.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{\"bookings\": [ oops");
}

#[tokio::test]
async fn test_legacy_store_is_upgraded_on_write() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    fs::write(
        env.bookings_path(),
        r#"[{"booking_id":"BKG4821","name":"Old Guest","phone":"9876500000","date":"2025-11-20","time":"19:30","party_size":"3","special_request":"","created_at":"2025-11-01T09:15:00Z"}]"#,
    )
    .unwrap();

    env.run("action_save_booking", complete_form(env.day(2))).await;

    let raw: Value = serde_json::from_str(&fs::read_to_string(env.bookings_path()).unwrap()).unwrap();
    let bookings = raw["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["booking_id"], "BKG4821");
    assert_eq!(bookings[0]["party_size"], 3);
}

#[tokio::test]
async fn test_unreadable_legacy_row_keeps_other_bookings() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    let original = r#"{"bookings":[
        {"booking_id":"BKG4821","name":"Old Guest","phone":"9876500000","date":"2025-11-20","time":"19:30","party_size":3,"special_request":"","created_at":"2025-11-01T09:15:00Z"},
        {"booking_id":"BKG1111","name":"Half Saved","phone":"9876511111","date":"2025-11-21","time":"20:00","party_size":"","special_request":"","created_at":"2025-11-01T09:20:00Z"}
    ]}"#;
    fs::write(env.bookings_path(), original).unwrap();

    let response = env.run("action_save_booking", complete_form(env.day(2))).await;
    assert_eq!(response.slot("booking_confirmed"), Some(&json!(true)));

    let store = load_store(&env);
    assert_eq!(store.len(), 2);
    assert_eq!(store.bookings[0].booking_id, "BKG4821");

    let backup = env.dir.path().join("bookings.json.bak");
    assert_eq!(fs::read_to_string(backup).unwrap(), original);
}

#[tokio::test]
async fn test_second_corruption_keeps_first_backup() {
    let env = TestEnv::new(RecordingNotifier::delivered());

    fs::write(env.bookings_path(), "first oops").unwrap();
    env.run("action_save_booking", complete_form(env.day(2))).await;
    fs::write(env.bookings_path(), "second oops").unwrap();
    env.run("action_save_booking", complete_form(env.day(3))).await;

    let mut backups: Vec<String> = fs::read_dir(env.dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("bookings.json.bak"))
        .collect();
    backups.sort();
    assert_eq!(backups.len(), 2);
    assert_eq!(backups[0], "bookings.json.bak");
    assert_eq!(
        fs::read_to_string(env.dir.path().join("bookings.json.bak")).unwrap(),
        "first oops"
    );
}
