//! UTC offset providers.
//!
//! The resolver never reads process-wide time zone state itself. Whatever
//! zone is being probed is handed in as an [`OffsetProvider`], so a test can
//! stand in any zone it likes and the host zone is just one more provider.

use super::tree::TestPoint;
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of UTC offsets for one time zone.
///
/// Implementations must be pure: the same instant always yields the same
/// offset for the lifetime of the provider.
pub trait OffsetProvider {
    /// Offset in effect at an absolute instant.
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset;

    /// Offset in effect at a test point.
    ///
    /// Wall-clock points are first placed on the timeline using this
    /// provider's own rules. Inside a DST gap or overlap the smaller offset
    /// (standard time) wins.
    fn offset_at(&self, point: &TestPoint) -> FixedOffset {
        match point {
            TestPoint::Instant(at) => self.utc_offset(*at),
            TestPoint::Wall(local) => wall_offset(self, *local),
        }
    }
}

/// Tree key for an offset: whole minutes ahead of UTC, rounded to nearest.
pub fn offset_minutes(offset: FixedOffset) -> i32 {
    (offset.local_minus_utc() + 30).div_euclid(60)
}

fn wall_offset<P: OffsetProvider + ?Sized>(provider: &P, local: NaiveDateTime) -> FixedOffset {
    let as_utc = Utc.from_utc_datetime(&local);
    let day = Duration::days(1);

    let mut candidates = vec![provider.utc_offset(as_utc)];
    for shifted in [as_utc.checked_sub_signed(day), as_utc.checked_add_signed(day)]
        .into_iter()
        .flatten()
    {
        let offset = provider.utc_offset(shifted);
        if !candidates.contains(&offset) {
            candidates.push(offset);
        }
    }

    let consistent = candidates
        .iter()
        .copied()
        .filter(|offset| {
            local
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
                .map(|utc| provider.utc_offset(Utc.from_utc_datetime(&utc)) == *offset)
                .unwrap_or(false)
        })
        .min_by_key(FixedOffset::local_minus_utc);

    match consistent {
        Some(offset) => offset,
        // Gap: no offset maps this reading back onto itself.
        None => candidates
            .into_iter()
            .min_by_key(FixedOffset::local_minus_utc)
            .unwrap_or_else(|| provider.utc_offset(as_utc)),
    }
}

/// The zone the host is configured with, as seen through `chrono::Local`.
///
/// On Unix this honours the `TZ` environment variable and falls back to
/// `/etc/localtime`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostZone;

impl OffsetProvider for HostZone {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        Local.offset_from_utc_datetime(&at.naive_utc())
    }
}

impl OffsetProvider for FixedOffset {
    fn utc_offset(&self, _at: DateTime<Utc>) -> FixedOffset {
        *self
    }
}

impl OffsetProvider for Tz {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        self.offset_from_utc_datetime(&at.naive_utc()).fix()
    }
}

impl<P: OffsetProvider + ?Sized> OffsetProvider for &P {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        (**self).utc_offset(at)
    }

    fn offset_at(&self, point: &TestPoint) -> FixedOffset {
        (**self).offset_at(point)
    }
}

impl<P: OffsetProvider + ?Sized> OffsetProvider for Box<P> {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        (**self).utc_offset(at)
    }

    fn offset_at(&self, point: &TestPoint) -> FixedOffset {
        (**self).offset_at(point)
    }
}

/// A zone described by an explicit list of offset changes.
///
/// Handy for simulating historical rule changes without a zone database.
///
/// # Example
///
/// ```rust
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use tzsniff::core::{OffsetProvider, Schedule};
///
/// let est = FixedOffset::west_opt(5 * 3600).unwrap();
/// let edt = FixedOffset::west_opt(4 * 3600).unwrap();
/// let switch = Utc.with_ymd_and_hms(2007, 3, 11, 7, 0, 0).unwrap();
///
/// let zone = Schedule::new(est).then(switch, edt);
///
/// assert_eq!(zone.utc_offset(switch - chrono::Duration::seconds(1)), est);
/// assert_eq!(zone.utc_offset(switch), edt);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    initial: FixedOffset,
    changes: Vec<(DateTime<Utc>, FixedOffset)>,
}

impl Schedule {
    pub fn new(initial: FixedOffset) -> Self {
        Self {
            initial,
            changes: Vec::new(),
        }
    }

    /// Switch to `offset` from `at` onwards. Changes may be added in any order.
    pub fn then(mut self, at: DateTime<Utc>, offset: FixedOffset) -> Self {
        let index = self.changes.partition_point(|(start, _)| *start <= at);
        self.changes.insert(index, (at, offset));
        self
    }
}

impl OffsetProvider for Schedule {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        let index = self.changes.partition_point(|(start, _)| *start <= at);
        match index {
            0 => self.initial,
            n => self.changes[n - 1].1,
        }
    }
}

/// Provider backed by a closure.
pub struct OffsetFn {
    lookup: Box<dyn Fn(DateTime<Utc>) -> FixedOffset + Send + Sync>,
}

impl OffsetFn {
    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> FixedOffset + Send + Sync + 'static,
    {
        OffsetFn {
            lookup: Box::new(lookup),
        }
    }
}

impl OffsetProvider for OffsetFn {
    fn utc_offset(&self, at: DateTime<Utc>) -> FixedOffset {
        (self.lookup)(at)
    }
}
