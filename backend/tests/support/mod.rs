//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use outage_schedule::models::{QueueId, ScheduleBlock};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and access to the process environment
/// is serialized across tests running in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

pub fn queue(raw: &str) -> QueueId {
    raw.parse().unwrap()
}

/// A typical base table covering a few queues, including an overnight one.
pub const BASE_TABLE: &str = "Графік погодинних відключень:\n\
    підчерга 1.1 – з 10:00 до 15:00;\n\
    підчерга 1.2 – з 04:00 до 09:00;\n\
    підчерга 2.1 – з 08:00 до 12:00, з 18:00 до 22:00;\n\
    підчерга 2.2 – з 23:00 до 02:00;\n\
    підчерга 3.1 – з 06:00 до 10:00;";

/// A change notice touching queues 1.1 and 1.2.
pub const CHANGES: &str = "Оперативні зміни: \
    - у підчергу 1.1 відключення розпочнеться раніше – о 09:00; \
    - у підчергу 1.2 додатково буде знеструмлено з 16:00 до 18:00.";

pub fn block(month: u32, day: u32, extras: &str) -> ScheduleBlock {
    ScheduleBlock::new(date(month, day), BASE_TABLE, extras)
}
