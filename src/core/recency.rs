use crate::domain::model::NoticeRecord;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};

pub const POSTED_AT_FORMAT: &str = "%Y-%m-%d";

/// Trailing window of `days` days before today, today included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    days: u32,
}

impl RecencyWindow {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn retain(&self, records: Vec<NoticeRecord>, today: NaiveDate) -> Vec<NoticeRecord> {
        filter_recent(records, self.cutoff(today))
    }
}

/// Civil date of `instant` in the board's zone.
pub fn today_in(offset: FixedOffset, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

pub fn parse_posted_at(posted_at: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(posted_at.trim(), POSTED_AT_FORMAT).ok()
}

/// Records without a readable date are kept.
pub fn is_recent(record: &NoticeRecord, cutoff: NaiveDate) -> bool {
    match parse_posted_at(&record.posted_at) {
        Some(posted) => posted >= cutoff,
        None => true,
    }
}

pub fn filter_recent(records: Vec<NoticeRecord>, cutoff: NaiveDate) -> Vec<NoticeRecord> {
    records
        .into_iter()
        .filter(|record| is_recent(record, cutoff))
        .collect()
}
