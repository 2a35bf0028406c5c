#![allow(dead_code)]

use async_trait::async_trait;
use bot_actions::actions::Tracker;
use bot_actions::{ActionRequest, ActionResponse, ActionState, Config, Notifier, NotifyOutcome};
use chrono::{Days, NaiveDate};
use shared::models::BookingRecord;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Notifier double: records every booking and answers with a fixed outcome
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<BookingRecord>>,
    outcome: NotifyOutcome,
}

impl RecordingNotifier {
    pub fn new(outcome: NotifyOutcome) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            outcome,
        })
    }

    pub fn delivered() -> Arc<Self> {
        Self::new(NotifyOutcome::Sent {
            to: "+919876543210".into(),
            message_id: Some("SM123".into()),
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn kind(&self) -> &'static str {
        "recording"
    }

    async fn send_confirmation(&self, booking: &BookingRecord) -> NotifyOutcome {
        self.sent.lock().unwrap().push(booking.clone());
        self.outcome.clone()
    }
}

/// Isolated data directory plus a state wired to it
pub struct TestEnv {
    pub dir: TempDir,
    pub state: ActionState,
}

impl TestEnv {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(dir.path().to_string_lossy().to_string());
        let state = ActionState::with_notifier(config, notifier);
        Self { dir, state }
    }

    pub fn bookings_path(&self) -> std::path::PathBuf {
        self.state.config.storage().bookings_file
    }

    pub fn menu_path(&self) -> std::path::PathBuf {
        self.state.config.storage().menu_file
    }

    pub fn write_menu(&self, json: &str) {
        std::fs::write(self.menu_path(), json).unwrap();
    }

    /// `days` after the restaurant's today
    pub fn day(&self, days: u64) -> NaiveDate {
        self.state.today().checked_add_days(Days::new(days)).unwrap()
    }

    pub async fn run(&self, action: &str, tracker: Tracker) -> ActionResponse {
        let request = ActionRequest::new(action, tracker);
        bot_actions::dispatch(&self.state, &request).await.unwrap()
    }
}

pub fn complete_form(date: NaiveDate) -> Tracker {
    Tracker::default()
        .with_slot("name", "Asha Rao")
        .with_slot("phone", "9876543210")
        .with_slot("date", date.format("%Y-%m-%d").to_string())
        .with_slot("time", "19:30")
        .with_slot("party_size", 4)
}
