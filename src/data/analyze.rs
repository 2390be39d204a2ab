//! Heartbeat gap analysis for a single service.
//!
//! Walks a service's events oldest first with a cursor marking the last
//! on-time heartbeat. Each slot later than one interval past the cursor with
//! no heartbeat is a miss: the miss counter goes up and the cursor moves
//! forward by exactly one interval. The end of the batch counts as silence,
//! so every service eventually crosses its threshold.
//!
//! Runs of missed slots are applied in one step, so the cost is linear in the
//! number of events whatever the interval and threshold.

use beatwatch_types::{Alert, HealthStatus, HeartbeatEvent, ServiceStatus};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use super::config::MonitorConfig;
use crate::error::ConfigError;

/// Consecutive misses at which a service is flagged as warning.
///
/// Independent of `allowed_misses`: with one or two allowed misses a service
/// goes straight to critical.
pub const WARNING_MISSES: u32 = 2;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Outcome of analyzing one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// At most one alert per service per run.
    pub alert: Option<Alert>,
    pub status: ServiceStatus,
}

/// Analyze one service's events, which must already be sorted ascending.
///
/// Returns `Ok(None)` for an empty slice.
pub fn analyze(
    events: &[HeartbeatEvent],
    config: &MonitorConfig,
) -> Result<Option<Analysis>, ConfigError> {
    config.validate()?;
    Ok(analyze_service(events, config.interval()?, config.allowed_misses))
}

pub(crate) fn analyze_service(
    events: &[HeartbeatEvent],
    interval: TimeDelta,
    allowed_misses: u32,
) -> Option<Analysis> {
    let (first, rest) = events.split_first()?;
    let mut walk = Walk::new(first, interval, allowed_misses);

    let mut stopped = false;
    for next in rest {
        let missed = walk.slots_missed_before(next.timestamp);
        if walk.miss(missed) {
            stopped = true;
            break;
        }
        if walk.cursor.checked_add_signed(interval).is_none() {
            warn!(service = walk.service, cursor = %walk.cursor, "expected heartbeat time out of range, stopping analysis");
            stopped = true;
            break;
        }
        walk.beat(next.timestamp);
    }

    if !stopped {
        let remaining = allowed_misses - walk.consecutive_misses;
        walk.miss(u64::from(remaining));
    }

    Some(walk.finish())
}

/// Running state of one service's walk.
struct Walk<'a> {
    service: &'a str,
    interval: TimeDelta,
    allowed_misses: u32,
    cursor: DateTime<Utc>,
    last_heartbeat: DateTime<Utc>,
    consecutive_misses: u32,
    status: HealthStatus,
    alert: Option<Alert>,
}

impl<'a> Walk<'a> {
    fn new(first: &'a HeartbeatEvent, interval: TimeDelta, allowed_misses: u32) -> Self {
        Self {
            service: first.service.as_str(),
            interval,
            allowed_misses,
            cursor: first.timestamp,
            last_heartbeat: first.timestamp,
            consecutive_misses: 0,
            status: HealthStatus::Healthy,
            alert: None,
        }
    }

    /// Empty slots between the cursor and a heartbeat at `at`.
    fn slots_missed_before(&self, at: DateTime<Utc>) -> u64 {
        let gap = total_nanos(at - self.cursor);
        let step = total_nanos(self.interval);
        if gap <= step {
            return 0;
        }
        u64::try_from((gap - 1) / step).unwrap_or(u64::MAX)
    }

    fn beat(&mut self, at: DateTime<Utc>) {
        self.consecutive_misses = 0;
        self.status = HealthStatus::Healthy;
        self.cursor = at;
        self.last_heartbeat = at;
    }

    /// Count `count` consecutive missed slots. Returns true when the walk is
    /// over, either because the threshold was crossed or time ran out.
    fn miss(&mut self, count: u64) -> bool {
        if count == 0 {
            return false;
        }
        let budget = self.allowed_misses - self.consecutive_misses;
        let misses = u32::try_from(count).map_or(budget, |c| c.min(budget));

        let Some(last_slot) = slot_after(self.cursor, self.interval, misses) else {
            self.run_out_of_time(misses);
            return true;
        };

        self.consecutive_misses += misses;
        debug!(service = self.service, missed = misses, consecutive_misses = self.consecutive_misses, "missed heartbeats");

        if self.consecutive_misses >= self.allowed_misses {
            info!(service = self.service, alert_at = %last_slot, consecutive_misses = self.consecutive_misses, "service went silent");
            self.alert = Some(Alert::new(self.service, last_slot));
            self.status = HealthStatus::Critical;
            // The cursor stays on the slot before the alerting one.
            if let Some(cursor) = slot_after(self.cursor, self.interval, misses - 1) {
                self.cursor = cursor;
            }
            return true;
        }

        self.mark_warning();
        self.cursor = last_slot;
        false
    }

    /// Only the slots that still fit before the end of representable time count.
    fn run_out_of_time(&mut self, wanted: u32) {
        let room = total_nanos(DateTime::<Utc>::MAX_UTC - self.cursor) / total_nanos(self.interval);
        let fit = u32::try_from(room.min(i128::from(wanted))).unwrap_or(0);

        if let Some(cursor) = slot_after(self.cursor, self.interval, fit) {
            self.consecutive_misses += fit;
            self.cursor = cursor;
            self.mark_warning();
        }
        warn!(service = self.service, cursor = %self.cursor, "expected heartbeat time out of range, stopping analysis");
    }

    fn mark_warning(&mut self) {
        if self.consecutive_misses >= WARNING_MISSES {
            self.status = HealthStatus::Warning;
        }
    }

    fn finish(self) -> Analysis {
        Analysis {
            alert: self.alert,
            status: ServiceStatus {
                service: self.service.to_string(),
                status: self.status,
                last_heartbeat: Some(self.last_heartbeat),
                consecutive_misses: self.consecutive_misses,
                next_expected: self.cursor.checked_add_signed(self.interval),
            },
        }
    }
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SEC + i128::from(delta.subsec_nanos())
}

/// `from + slots * interval`, or `None` outside chrono's range.
fn slot_after(from: DateTime<Utc>, interval: TimeDelta, slots: u32) -> Option<DateTime<Utc>> {
    let nanos = total_nanos(interval).checked_mul(i128::from(slots))?;
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SEC)).ok()?;
    from.checked_add_signed(TimeDelta::new(secs, subsec)?)
}
