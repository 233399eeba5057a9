// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall-clock abstraction so cache expiry can be exercised in tests.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
