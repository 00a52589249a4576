use chrono::{DateTime, Duration, Utc};

pub const WEEK_IN_DAYS: i64 = 7;

/// Trailing window of one week ending at `end`.
///
/// A timestamp belongs to the window when it is strictly after `start` and
/// not after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeeklyWindow {
    pub fn ending_at(end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::days(WEEK_IN_DAYS),
            end,
        }
    }

    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp > self.start && timestamp <= self.end
    }

    pub fn contains_unix(&self, seconds: i64) -> bool {
        DateTime::from_timestamp(seconds, 0).map_or(false, |t| self.contains(t))
    }
}

/// Month a game archive covers, as the platform addresses it (`.../games/2024/05`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchivePeriod {
    pub year: i32,
    pub month: u32,
}

impl ArchivePeriod {
    pub fn from_archive_url(url: &str) -> Option<Self> {
        let mut segments = url.trim_end_matches('/').rsplit('/');
        let month = segments.next()?.parse().ok()?;
        let year = segments.next()?.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

/// Picks the archive covering the latest month.
///
/// Urls without a recognizable period lose against any dated one; if none is
/// dated the last entry of the list wins, since the platform lists oldest first.
pub fn latest_archive(archives: &[String]) -> Option<&str> {
    let mut latest: Option<(ArchivePeriod, &str)> = None;
    for url in archives {
        if let Some(period) = ArchivePeriod::from_archive_url(url) {
            if latest.map_or(true, |(best, _)| period >= best) {
                latest = Some((period, url.as_str()));
            }
        }
    }

    latest
        .map(|(_, url)| url)
        .or_else(|| archives.last().map(String::as_str))
}
