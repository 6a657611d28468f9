//! Timed page advancement.
//!
//! [`AutoplayScheduler`] is polled rather than driven by its own thread: it
//! keeps the next deadline and [`AutoplayScheduler::poll`] reports how many
//! intervals elapsed since then. Hosts sleep until
//! [`AutoplayScheduler::next_deadline`] and poll on wake-up.
use std::time::{Duration, Instant};

use derive_setters::Setters;
use tracing::{debug, trace};

/// Default time between automatic page changes.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5_000);

/// Autoplay configuration.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoplayArgs {
    /// Whether pages advance on their own.
    pub enabled: bool,
    /// Time between advances. A zero interval disables autoplay.
    ///
    /// Serialized as whole milliseconds.
    #[cfg_attr(feature = "serde", serde(with = "interval_millis"))]
    pub interval: Duration,
    /// Whether the view exposes a pause/play control.
    pub show_pause_button: bool,
}

impl AutoplayArgs {
    /// Whether autoplay is enabled with a usable interval.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.interval.is_zero()
    }
}

impl Default for AutoplayArgs {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_AUTOPLAY_INTERVAL,
            show_pause_button: true,
        }
    }
}

#[cfg(feature = "serde")]
mod interval_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        interval: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Deadline-based autoplay timer.
///
/// The timer runs only while enabled, with a non-zero interval, and not
/// paused. Any change to those three re-arms it from the current instant.
/// Manual navigation does not touch the timer.
#[derive(Clone, Debug)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval: Duration,
    paused: bool,
    next_deadline: Option<Instant>,
}

impl AutoplayScheduler {
    /// Creates a scheduler, armed from `now` if it should run.
    pub fn new(args: &AutoplayArgs, now: Instant) -> Self {
        let mut scheduler = Self {
            enabled: args.enabled,
            interval: args.interval,
            paused: false,
            next_deadline: None,
        };
        scheduler.rearm(now);
        scheduler
    }

    /// Whether ticks are currently being scheduled.
    pub fn is_running(&self) -> bool {
        self.enabled && !self.interval.is_zero() && !self.paused
    }

    /// Whether the user paused autoplay.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Toggles the pause flag. Only possible while autoplay is enabled.
    ///
    /// Returns whether the flag changed.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "autoplay pause toggled");
        self.rearm(now);
        true
    }

    /// Applies new arguments, re-arming only if `enabled` or `interval`
    /// changed.
    pub fn reconfigure(&mut self, args: &AutoplayArgs, now: Instant) {
        if self.enabled == args.enabled && self.interval == args.interval {
            return;
        }
        self.enabled = args.enabled;
        self.interval = args.interval;
        debug!(
            enabled = self.enabled,
            interval = ?self.interval,
            "autoplay reconfigured"
        );
        self.rearm(now);
    }

    /// When the next tick is due, if the timer is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Returns how many ticks became due at `now` and schedules the next one.
    ///
    /// Late polls catch up: the count covers every whole interval that
    /// passed, and the next deadline stays aligned to the first deadline.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.next_deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }

        let interval_nanos = self.interval.as_nanos().max(1);
        let late = now.duration_since(deadline).as_nanos();
        let ticks = u32::try_from(1 + late / interval_nanos).unwrap_or(u32::MAX);
        self.next_deadline = Some(
            self.interval
                .checked_mul(ticks)
                .and_then(|advance| deadline.checked_add(advance))
                .unwrap_or(now + self.interval),
        );
        trace!(ticks, "autoplay due");
        ticks
    }

    fn rearm(&mut self, now: Instant) {
        self.next_deadline = self.is_running().then(|| now + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn running(now: Instant) -> AutoplayScheduler {
        AutoplayScheduler::new(&AutoplayArgs::default().enabled(true).interval(SECOND), now)
    }

    #[test]
    fn disabled_by_default() {
        let now = Instant::now();
        let mut scheduler = AutoplayScheduler::new(&AutoplayArgs::default(), now);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.poll(now + SECOND * 100), 0);
    }

    #[test]
    fn zero_interval_never_runs() {
        let now = Instant::now();
        let args = AutoplayArgs::default()
            .enabled(true)
            .interval(Duration::ZERO);
        assert!(!args.is_active());
        let scheduler = AutoplayScheduler::new(&args, now);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn ticks_once_per_interval() {
        let start = Instant::now();
        let mut scheduler = running(start);
        assert_eq!(scheduler.next_deadline(), Some(start + SECOND));

        assert_eq!(scheduler.poll(start + SECOND / 2), 0);
        assert_eq!(scheduler.poll(start + SECOND), 1);
        assert_eq!(scheduler.next_deadline(), Some(start + SECOND * 2));
        assert_eq!(scheduler.poll(start + SECOND * 2), 1);
    }

    #[test]
    fn late_poll_catches_up_without_drift() {
        let start = Instant::now();
        let mut scheduler = running(start);
        let late = start + SECOND * 3 + SECOND / 4;
        assert_eq!(scheduler.poll(late), 3);
        assert_eq!(scheduler.next_deadline(), Some(start + SECOND * 4));
    }

    #[test]
    fn pause_stops_and_resume_rearms() {
        let start = Instant::now();
        let mut scheduler = running(start);

        assert!(scheduler.toggle_pause(start + SECOND / 2));
        assert!(scheduler.is_paused());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.poll(start + SECOND * 10), 0);

        let resumed = start + SECOND * 10;
        assert!(scheduler.toggle_pause(resumed));
        assert_eq!(scheduler.next_deadline(), Some(resumed + SECOND));
    }

    #[test]
    fn pause_requires_enabled_autoplay() {
        let now = Instant::now();
        let mut scheduler = AutoplayScheduler::new(&AutoplayArgs::default(), now);
        assert!(!scheduler.toggle_pause(now));
        assert!(!scheduler.is_paused());
    }

    #[test]
    fn reconfigure_rearms_on_interval_change_only() {
        let start = Instant::now();
        let mut scheduler = running(start);
        let later = start + SECOND / 2;

        scheduler.reconfigure(
            &AutoplayArgs::default()
                .enabled(true)
                .interval(SECOND)
                .show_pause_button(false),
            later,
        );
        assert_eq!(scheduler.next_deadline(), Some(start + SECOND));

        scheduler.reconfigure(
            &AutoplayArgs::default().enabled(true).interval(SECOND * 2),
            later,
        );
        assert_eq!(scheduler.next_deadline(), Some(later + SECOND * 2));

        scheduler.reconfigure(&AutoplayArgs::default(), later);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.next_deadline(), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn interval_reads_as_milliseconds() {
        let args: AutoplayArgs =
            serde_json::from_str(r#"{ "enabled": true, "interval": 5000 }"#).unwrap();
        assert!(args.enabled);
        assert_eq!(args.interval, Duration::from_millis(5_000));
        assert!(args.show_pause_button);
    }

    #[test]
    fn interval_writes_as_milliseconds() {
        let args = AutoplayArgs::default().interval(Duration::from_millis(2_500));
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(value["interval"], serde_json::json!(2500));
    }

    #[test]
    fn non_integer_interval_is_rejected() {
        let parsed: Result<AutoplayArgs, _> =
            serde_json::from_str(r#"{ "interval": { "secs": 5, "nanos": 0 } }"#);
        assert!(parsed.is_err());
    }
}
