// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::DateTime;
use chrono::Days;
use chrono::Local;
use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Utc;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::types::date::Date;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The calendar day this timestamp falls on in the local timezone.
    pub fn local_date(self) -> Date {
        let ts = self.0.with_timezone(&Local);
        Date::new(ts.date_naive())
    }

    /// Add a number of calendar days in the local timezone. The local
    /// wall-clock time is kept, so a day across a DST transition is not
    /// exactly 24 hours. `None` if the result is out of range.
    pub fn add_days(self, days: usize) -> Option<Self> {
        add_calendar_days(self.0, &Local, days).map(Self)
    }

    /// Fractional days elapsed from `earlier` to `self`. Negative if
    /// `earlier` is in the future.
    pub fn days_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Whole seconds elapsed from `earlier` to `self`, zero if negative.
    pub fn seconds_since(self, earlier: Timestamp) -> u64 {
        (self.0 - earlier.0).num_seconds().max(0) as u64
    }

    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339()
    }
}

/// Add `days` calendar days to `ts` as seen in the timezone `tz`.
fn add_calendar_days<Tz: TimeZone>(
    ts: DateTime<Utc>,
    tz: &Tz,
    days: usize,
) -> Option<DateTime<Utc>> {
    let local = ts.with_timezone(tz);
    match local.checked_add_days(Days::new(u64::try_from(days).ok()?)) {
        Some(ts) => Some(ts.with_timezone(&Utc)),
        // Either the local time does not exist on the target day, or the
        // date is out of range.
        None => {
            let step = TimeDelta::try_days(i64::try_from(days).ok()?)?;
            ts.checked_add_signed(step)
        }
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let str = self.0.to_rfc3339();
        Ok(ToSqlOutput::from(str))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        let ts =
            DateTime::parse_from_rfc3339(&string).map_err(|e| FromSqlError::Other(Box::new(e)))?;
        let ts = ts.with_timezone(&Utc);
        Ok(Timestamp(ts))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}
