// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month. Derived `Ord` on (year, month) matches calendar order,
/// so these compare the way the zero-padded "YYYY-MM" strings do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month number {}", month));
        }
        Ok(YearMonth { year, month })
    }

    pub fn now() -> Self {
        Self::containing_date(Utc::now().date_naive())
    }

    /// The month that owns a transaction dated at this instant.
    pub fn containing(date: DateTime<Utc>) -> Self {
        Self::containing_date(date.date_naive())
    }

    pub fn containing_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn last_day(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// Date for the given day of this month, clamped to the month's last
    /// valid day (day 31 in February yields Feb 28/29, never a rollover
    /// into March).
    pub fn day(self, day: u32) -> NaiveDate {
        let clamped = day.clamp(1, self.last_day());
        NaiveDate::from_ymd_opt(self.year, self.month, clamped)
            .expect("day clamped to month length")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 || parts[0].len() != 4 || parts[1].len() != 2 {
            return Err(anyhow!("Invalid month '{}', expected YYYY-MM", s));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|_| anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
        YearMonth::new(year, month)
    }
}

// Stored and exported as the plain "YYYY-MM" string so partition keys and
// persisted rules stay readable.
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
