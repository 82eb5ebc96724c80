//! Simulation clock
//!
//! Three independent periodic timers (physics, spawn, countdown) that are
//! armed together on entering `Playing` and disarmed together on leaving it.
//! The host drives the clock with elapsed wall time; due firings come out
//! in chronological order, each stamped with the session token it was
//! scheduled under.

use std::time::Duration;

use super::state::SessionToken;

/// Which periodic action fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Physics,
    Spawn,
    Countdown,
}

/// A single due timer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFiring {
    pub token: SessionToken,
    pub kind: TimerKind,
}

/// Intervals for one armed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockIntervals {
    pub physics: Duration,
    pub spawn: Duration,
    pub countdown: Duration,
}

#[derive(Debug, Clone, Copy)]
struct PeriodicTimer {
    kind: TimerKind,
    interval: Duration,
    elapsed: Duration,
}

impl PeriodicTimer {
    fn new(kind: TimerKind, interval: Duration) -> Self {
        Self {
            kind,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Time until the next firing (None when disabled)
    fn until_due(&self) -> Option<Duration> {
        if self.interval.is_zero() {
            return None;
        }
        Some(self.interval.saturating_sub(self.elapsed))
    }
}

/// The three session timers
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    armed: Option<SessionToken>,
    timers: Vec<PeriodicTimer>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start all three timers for `token`, discarding any previous schedule
    pub fn arm(&mut self, token: SessionToken, intervals: ClockIntervals) {
        self.armed = Some(token);
        self.timers = vec![
            PeriodicTimer::new(TimerKind::Physics, intervals.physics),
            PeriodicTimer::new(TimerKind::Spawn, intervals.spawn),
            PeriodicTimer::new(TimerKind::Countdown, intervals.countdown),
        ];
    }

    /// Cancel all three timers at once
    pub fn disarm(&mut self) {
        self.armed = None;
        self.timers.clear();
    }

    pub fn armed_token(&self) -> Option<SessionToken> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Restart the spawn timer with a new interval (others keep their phase)
    pub fn reschedule_spawn(&mut self, interval: Duration) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.kind == TimerKind::Spawn) {
            *timer = PeriodicTimer::new(TimerKind::Spawn, interval);
        }
    }

    /// Advance wall time by `dt`, appending every due firing to `out`.
    ///
    /// Firings are ordered by due time; ties resolve physics, spawn,
    /// countdown. Nothing is emitted while disarmed.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<TimerFiring>) {
        let Some(token) = self.armed else {
            return;
        };

        let mut remaining = dt;
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter_map(|(i, t)| t.until_due().map(|due| (due, i)))
                .min();

            let Some((due, index)) = next else {
                return;
            };
            if due > remaining {
                for timer in &mut self.timers {
                    timer.elapsed += remaining;
                }
                return;
            }

            remaining -= due;
            for timer in &mut self.timers {
                timer.elapsed += due;
            }
            let timer = &mut self.timers[index];
            timer.elapsed = Duration::ZERO;
            out.push(TimerFiring {
                token,
                kind: timer.kind,
            });
        }
    }
}
