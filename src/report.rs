//! End-of-session reports
//!
//! The report is the only thing the point ledger (outside this crate)
//! needs to persist progress. The engine never writes anywhere itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::{EndReason, GameMode, ModeOptions, Session, WasteCategory};

/// Score thresholds for one, two and three stars
pub const STAR_THRESHOLDS: [i64; 3] = [100, 250, 500];

/// Mode-specific statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModeStats {
    Sorting {
        target: WasteCategory,
        correct_catches: u32,
        wrong_catches: u32,
        missed_targets: u32,
    },
    Collection {
        collected: u32,
        missed: u32,
        /// captured / (captured + missed), in percent
        accuracy_percent: f64,
    },
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub mode: GameMode,
    pub final_score: i64,
    /// Seconds actually played (pauses excluded)
    pub duration_secs: u32,
    pub end_reason: EndReason,
    pub stars: u8,
    pub stats: ModeStats,
}

impl SessionReport {
    pub fn from_session(session: &Session, end_reason: EndReason) -> Self {
        let stats = &session.stats;
        let stats = match session.options {
            ModeOptions::Sorting { target } => ModeStats::Sorting {
                target,
                correct_catches: stats.captured_target,
                wrong_catches: stats.captured_other,
                missed_targets: stats.expired_target,
            },
            ModeOptions::Collection { .. } => ModeStats::Collection {
                collected: stats.captured(),
                missed: stats.missed(),
                accuracy_percent: accuracy_percent(stats.captured(), stats.missed()),
            },
        };

        Self {
            mode: session.mode,
            final_score: session.score,
            duration_secs: session.stats.seconds_played,
            end_reason,
            stars: star_rating(session.score),
            stats,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Points to award; negative runs award nothing
    pub fn points_earned(&self) -> u64 {
        self.final_score.max(0) as u64
    }
}

/// Stars earned for a final score (0-3)
pub fn star_rating(score: i64) -> u8 {
    STAR_THRESHOLDS.iter().filter(|&&t| score >= t).count() as u8
}

/// Accuracy in percent; 0 when nothing was resolved
pub fn accuracy_percent(captured: u32, missed: u32) -> f64 {
    let total = captured + missed;
    if total == 0 {
        return 0.0;
    }
    f64::from(captured) / f64::from(total) * 100.0
}

/// External bookkeeping that records finished sessions
pub trait PointLedger {
    fn record(&mut self, report: &SessionReport);
}

impl PointLedger for Vec<SessionReport> {
    fn record(&mut self, report: &SessionReport) {
        self.push(report.clone());
    }
}
