//! Test helpers for E2E tests.
//!
//! Provides a `TestSession` that drives an `Application` over a manual
//! clock, and helpers to script whole input transcripts.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use vfstore::config::{Config, FolderIdStrategy};
use vfstore::{Application, ManualClock};

/// Instant every test session starts at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 2, 24, 10, 0, 0).unwrap()
}

/// Default config switched to the `last_live` folder id strategy.
pub fn last_live_config() -> Config {
    let mut config = Config::default();
    config.store.folder_id_strategy = FolderIdStrategy::LastLive;
    config
}

/// An application plus a handle on its clock.
pub struct TestSession {
    pub app: Application,
    pub clock: ManualClock,
}

impl TestSession {
    /// Session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Session that reuses the largest live folder id.
    pub fn last_live() -> Self {
        Self::with_config(&last_live_config())
    }

    /// Session with an explicit configuration.
    pub fn with_config(config: &Config) -> Self {
        let clock = ManualClock::new(start_time());
        let app = Application::with_clock(config, Arc::new(clock.clone()));
        Self { app, clock }
    }

    /// Execute one line and return its output lines.
    pub fn send(&self, line: &str) -> Vec<String> {
        self.app.execute(line).output
    }

    /// Execute one line that must print exactly `expected`.
    pub fn expect(&self, line: &str, expected: &str) {
        assert_eq!(self.send(line), [expected], "command: {line}");
    }

    /// Move the clock forward by `secs` seconds.
    pub fn tick(&self, secs: i64) {
        self.clock.advance(Duration::seconds(secs));
    }
}

/// Feed a whole transcript through `Application::run` and return stdout.
pub fn run_script(session: &TestSession, script: &str) -> String {
    let mut output = Vec::new();
    session
        .app
        .run(script.as_bytes(), &mut output, false)
        .unwrap();
    String::from_utf8(output).unwrap()
}
