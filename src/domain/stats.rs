// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/stats.rs
//
// XP, levels, daily streaks, and achievements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constant::XP_LEVEL_FACTOR;

/// Persistent learner statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub total_mistakes: u32,
    #[serde(default)]
    pub reviewed_count: u32,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_active: Utc::now(),
            total_mistakes: 0,
            reviewed_count: 0,
        }
    }
}

impl UserStats {
    /// XP required to complete the current level.
    pub fn xp_for_next_level(&self) -> u32 {
        self.level * XP_LEVEL_FACTOR
    }

    /// Progress through the current level in `0.0..=1.0`.
    pub fn level_progress(&self) -> f32 {
        (self.xp as f32 / self.xp_for_next_level() as f32).min(1.0)
    }

    /// Total XP earned over all levels, for the report hero card.
    pub fn total_xp(&self) -> u32 {
        // Levels below the current one each cost `level * factor`.
        let completed: u32 = (1..self.level).map(|l| l * XP_LEVEL_FACTOR).sum();
        completed + self.xp
    }

    /// Award XP. Returns `true` when the award crossed a level boundary,
    /// carrying leftover XP into the new level.
    pub fn add_xp(&mut self, amount: u32) -> bool {
        self.xp += amount;
        let mut leveled = false;
        while self.xp >= self.xp_for_next_level() {
            self.xp -= self.xp_for_next_level();
            self.level += 1;
            leveled = true;
        }
        leveled
    }

    /// Roll the daily streak forward for a session starting at `now`.
    /// Consecutive calendar days extend the streak, a gap resets it to 1,
    /// and the very first session starts it at 1.
    pub fn touch_streak(&mut self, now: DateTime<Utc>) {
        let gap_days = (now.date_naive() - self.last_active.date_naive()).num_days();
        if gap_days == 1 {
            self.streak += 1;
        } else if gap_days > 1 || self.streak == 0 {
            self.streak = 1;
        }
        self.last_active = now;
    }
}

/// Unlockable badges shown on the report's achievement wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    DiligentBee,
    Persistent,
    ReviewAce,
    TopOfClass,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::DiligentBee,
        Achievement::Persistent,
        Achievement::ReviewAce,
        Achievement::TopOfClass,
    ];

    /// Whether this badge is unlocked for the given progress numbers.
    pub fn unlocked(&self, total_recorded: usize, reviewed: usize, stats: &UserStats) -> bool {
        match self {
            Achievement::DiligentBee => total_recorded >= 10,
            Achievement::Persistent => stats.streak >= 3,
            Achievement::ReviewAce => reviewed >= 5,
            Achievement::TopOfClass => stats.level >= 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn level_up_carries_remainder() {
        let mut stats = UserStats::default();
        assert!(!stats.add_xp(150));
        assert_eq!((stats.level, stats.xp), (1, 150));

        // 150 + 60 crosses the 200 boundary with 10 left over.
        assert!(stats.add_xp(60));
        assert_eq!((stats.level, stats.xp), (2, 10));
    }

    #[test]
    fn big_award_can_skip_levels() {
        let mut stats = UserStats::default();
        // 200 (lvl 1) + 400 (lvl 2) + 50 leftover.
        assert!(stats.add_xp(650));
        assert_eq!((stats.level, stats.xp), (3, 50));
        assert_eq!(stats.total_xp(), 650);
    }

    #[test]
    fn streak_rules() {
        let day = |d: u32| Utc.with_ymd_and_hms(2026, 3, d, 8, 0, 0).unwrap();

        let mut stats = UserStats {
            last_active: day(1),
            ..UserStats::default()
        };

        // First ever session.
        stats.touch_streak(day(1));
        assert_eq!(stats.streak, 1);

        // Next day extends.
        stats.touch_streak(day(2));
        assert_eq!(stats.streak, 2);

        // Same day keeps it.
        stats.touch_streak(day(2));
        assert_eq!(stats.streak, 2);

        // A gap resets to 1.
        stats.touch_streak(day(5));
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn achievements_unlock() {
        let mut stats = UserStats::default();
        stats.streak = 3;
        stats.level = 5;
        assert!(Achievement::DiligentBee.unlocked(10, 0, &stats));
        assert!(!Achievement::DiligentBee.unlocked(9, 0, &stats));
        assert!(Achievement::Persistent.unlocked(0, 0, &stats));
        assert!(Achievement::ReviewAce.unlocked(0, 5, &stats));
        assert!(Achievement::TopOfClass.unlocked(0, 0, &stats));
    }
}
