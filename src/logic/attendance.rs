//! Attendance list ranking: seat confirmed players by confirmation time, up to the matchday capacity.

use crate::models::{AttendanceError, AttendanceId, AttendanceRecord, AttendanceStatus, Matchday};
use serde::Serialize;

/// Lowest and highest skill level an admin can assign.
const LEVELS: std::ops::RangeInclusive<u8> = 1..=5;

/// One record with its computed status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAttendance {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub status: AttendanceStatus,
    /// 0-based position among confirmed records; None for canceled ones.
    pub rank: Option<usize>,
}

/// The ranked attendance list of a matchday plus its counters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBoard {
    pub capacity: u32,
    /// Seated, then waitlisted (both in rank order), then canceled (input order).
    pub entries: Vec<RankedAttendance>,
    /// Every confirmed record, seated or waiting.
    confirmed_count: usize,
    waiting_count: usize,
    canceled_count: usize,
    seated_count: usize,
}

impl AttendanceBoard {
    /// Rank a matchday's list using its capacity.
    pub fn for_matchday(
        matchday: &Matchday,
        records: &[AttendanceRecord],
    ) -> Result<Self, AttendanceError> {
        classify_attendance(records, matchday.capacity())
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed_count
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting_count
    }

    pub fn canceled_count(&self) -> usize {
        self.canceled_count
    }

    /// Confirmed players holding a seat: `confirmed - waiting`, i.e. `min(confirmed, capacity)`.
    pub fn seated_count(&self) -> usize {
        self.seated_count
    }

    /// Status of one record, if it is on the list.
    pub fn status_of(&self, id: AttendanceId) -> Option<AttendanceStatus> {
        self.find(id).map(|e| e.status)
    }

    pub fn find(&self, id: AttendanceId) -> Option<&RankedAttendance> {
        self.entries.iter().find(|e| e.record.id == id)
    }

    /// Entries with the given status, in board order.
    pub fn with_status(&self, status: AttendanceStatus) -> impl Iterator<Item = &RankedAttendance> {
        self.entries.iter().filter(move |e| e.status == status)
    }
}

/// Classify every record as confirmed (seated), waiting or canceled.
///
/// 1. Split into confirmed and not confirmed.
/// 2. Stable-sort confirmed by `time_confirmed` ascending; equal times keep input order.
/// 3. The first `capacity` confirmed records are seated, the rest wait.
/// 4. Unconfirmed records are canceled regardless of time or capacity.
///
/// Every `time_confirmed` must parse, canceled records included.
pub fn classify_attendance(
    records: &[AttendanceRecord],
    capacity: u32,
) -> Result<AttendanceBoard, AttendanceError> {
    let mut confirmed = Vec::new();
    let mut canceled = Vec::new();
    for record in records {
        let at = record.confirmed_at()?;
        if record.confirmed {
            confirmed.push((at, record));
        } else {
            canceled.push(record);
        }
    }

    confirmed.sort_by_key(|(at, _)| *at);

    let seats = usize::try_from(capacity).unwrap_or(usize::MAX);
    let confirmed_count = confirmed.len();
    let waiting_count = confirmed_count.saturating_sub(seats);
    let canceled_count = canceled.len();

    let mut entries = Vec::with_capacity(records.len());
    for (rank, (_, record)) in confirmed.into_iter().enumerate() {
        let status = if rank < seats {
            AttendanceStatus::Confirmed
        } else {
            AttendanceStatus::Waiting
        };
        entries.push(RankedAttendance {
            record: record.clone(),
            status,
            rank: Some(rank),
        });
    }
    entries.extend(canceled.into_iter().map(|record| RankedAttendance {
        record: record.clone(),
        status: AttendanceStatus::Canceled,
        rank: None,
    }));

    Ok(AttendanceBoard {
        capacity,
        entries,
        confirmed_count,
        waiting_count,
        canceled_count,
        seated_count: confirmed_count - waiting_count,
    })
}

/// Check a skill level before sending it to the API.
pub fn validate_level(level: u8) -> Result<u8, AttendanceError> {
    if LEVELS.contains(&level) {
        Ok(level)
    } else {
        Err(AttendanceError::InvalidLevel(level))
    }
}
