//! Test doubles shared by the adapter tests

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::adapters::class_registry::ClassRegistry;
use crate::adapters::mock_generator::MockGenerator;
use crate::adapters::value_handlers::PrimitiveSettings;
use crate::domain::{FakerKind, ValueSource};

/// Value source returning fixed values and counting calls per strategy
#[derive(Default)]
pub struct RecordingValueSource {
    calls: Mutex<HashMap<&'static str, usize>>,
    number_args: Mutex<Vec<u64>>,
    locale: Mutex<String>,
    next_pick: Mutex<usize>,
}

impl RecordingValueSource {
    pub fn new() -> Self {
        Self {
            locale: Mutex::new("en".to_string()),
            ..Self::default()
        }
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;
    }

    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn number_args(&self) -> Vec<u64> {
        self.number_args.lock().unwrap().clone()
    }

    pub fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }
}

impl ValueSource for RecordingValueSource {
    fn alpha(&self, len: usize) -> String {
        self.record("alpha");
        "a".repeat(len)
    }

    fn alpha_numeric(&self, len: usize) -> String {
        self.record("alpha_numeric");
        "1".repeat(len)
    }

    fn number(&self, max: u64) -> u64 {
        self.record("number");
        self.number_args.lock().unwrap().push(max);
        max
    }

    fn boolean(&self) -> bool {
        self.record("boolean");
        true
    }

    fn recent_date(&self) -> DateTime<Utc> {
        self.record("recent_date");
        Self::fixed_date()
    }

    /// Cycles through indices so every member is eventually picked
    fn pick(&self, len: usize) -> usize {
        self.record("pick");
        let mut next = self.next_pick.lock().unwrap();
        let index = *next % len.max(1);
        *next += 1;
        index
    }

    fn fake(&self, kind: FakerKind) -> String {
        self.record("fake");
        format!("fake-{}", kind)
    }

    fn fake_localized(&self, kind: FakerKind, locale: &str) -> String {
        self.record("fake");
        format!("fake-{}-{}", kind, locale)
    }

    fn set_locale(&self, locale: &str) {
        self.record("set_locale");
        *self.locale.lock().unwrap() = locale.to_string();
    }

    fn locale(&self) -> String {
        self.locale.lock().unwrap().clone()
    }
}

/// Generator over `registry` with the default handlers and the given source
pub fn generator_with(registry: ClassRegistry, source: Arc<dyn ValueSource>) -> MockGenerator {
    MockGenerator::with_defaults(Arc::new(registry), source, PrimitiveSettings::default())
}
