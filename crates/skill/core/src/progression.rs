//! Player progression: level, experience and the skill point wallet.
//!
//! Experience is tracked as progress toward the next level and resets on each
//! level-up. Every level gained awards `points_per_level` skill points.

/// Experience curve: the requirement for each next level grows geometrically.
///
/// `experience_for(1) = base`, `experience_for(n) = experience_for(n - 1) × (100 + growth_percent) / 100`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelCurve {
    pub base: u64,
    pub growth_percent: u32,
    /// Highest reachable player level.
    pub max_level: u32,
}

impl LevelCurve {
    pub const DEFAULT_BASE: u64 = 100;
    pub const DEFAULT_GROWTH_PERCENT: u32 = 25;
    pub const DEFAULT_MAX_LEVEL: u32 = 50;

    /// Experience needed to advance from `level` to `level + 1`.
    pub fn experience_for(&self, level: u32) -> u64 {
        let mut required = self.base.max(1);
        for _ in 1..level {
            required = required.saturating_mul(100 + u64::from(self.growth_percent)) / 100;
        }
        required
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            growth_percent: Self::DEFAULT_GROWTH_PERCENT,
            max_level: Self::DEFAULT_MAX_LEVEL,
        }
    }
}

/// Result of granting experience.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelUp {
    pub previous_level: u32,
    pub levels_gained: u32,
    pub points_awarded: u32,
}

/// Persistent player progression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub player_level: u32,
    /// Progress toward the next level.
    pub experience: u64,
    pub unspent_points: u32,
}

impl Progression {
    pub fn new(player_level: u32, unspent_points: u32) -> Self {
        Self {
            player_level: player_level.max(1),
            experience: 0,
            unspent_points,
        }
    }

    /// Grants experience, processing as many level-ups as it pays for.
    ///
    /// Experience beyond the level cap is discarded.
    pub fn gain_experience(
        &mut self,
        amount: u64,
        curve: &LevelCurve,
        points_per_level: u32,
    ) -> LevelUp {
        let mut outcome = LevelUp {
            previous_level: self.player_level,
            ..LevelUp::default()
        };

        if self.player_level >= curve.max_level {
            return outcome;
        }

        self.experience = self.experience.saturating_add(amount);
        loop {
            let required = curve.experience_for(self.player_level);
            if self.experience < required {
                break;
            }
            self.experience -= required;
            self.player_level += 1;
            self.unspent_points = self.unspent_points.saturating_add(points_per_level);
            outcome.levels_gained += 1;
            outcome.points_awarded += points_per_level;

            if self.player_level >= curve.max_level {
                self.experience = 0;
                break;
            }
        }

        outcome
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_grows_geometrically() {
        let curve = LevelCurve {
            base: 100,
            growth_percent: 50,
            max_level: 10,
        };
        assert_eq!(curve.experience_for(1), 100);
        assert_eq!(curve.experience_for(2), 150);
        assert_eq!(curve.experience_for(3), 225);
    }

    #[test]
    fn multiple_level_ups_award_points() {
        let curve = LevelCurve {
            base: 100,
            growth_percent: 50,
            max_level: 10,
        };
        let mut progression = Progression::new(1, 0);

        // 100 (1→2) + 150 (2→3) + 30 leftover
        let outcome = progression.gain_experience(280, &curve, 2);

        assert_eq!(outcome.levels_gained, 2);
        assert_eq!(outcome.points_awarded, 4);
        assert_eq!(progression.player_level, 3);
        assert_eq!(progression.experience, 30);
        assert_eq!(progression.unspent_points, 4);
    }

    #[test]
    fn level_cap_discards_experience() {
        let curve = LevelCurve {
            base: 10,
            growth_percent: 0,
            max_level: 3,
        };
        let mut progression = Progression::new(1, 0);

        let outcome = progression.gain_experience(1_000, &curve, 1);
        assert_eq!(outcome.levels_gained, 2);
        assert_eq!(progression.player_level, 3);
        assert_eq!(progression.experience, 0);

        let outcome = progression.gain_experience(1_000, &curve, 1);
        assert_eq!(outcome.levels_gained, 0);
    }
}
