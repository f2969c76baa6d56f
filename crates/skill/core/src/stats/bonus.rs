//! Bonus stacking for stat-modifier skills.
//!
//! Calculation order is fixed: `Flat → %Inc → More → Less → Clamp`.
//! Integer percentages keep the math deterministic.

/// A single bonus granted by one level of a skill.
///
/// - **Flat**: additive, applied first (`+5 DMG`)
/// - **Increased**: percentages summed, then multiplied once (`+20%`)
/// - **More**: sequential multipliers (`50` = ×1.5)
/// - **Less**: sequential reductions (`10` = ×0.9)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    Increased(i32),
    More(i32),
    Less(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: i32) -> Self {
        Bonus::Less(percent)
    }

    /// The bonus granted by `level` ranks of a skill (per-level value × level).
    pub fn scaled(&self, level: u32) -> Self {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        match *self {
            Bonus::Flat(v) => Bonus::Flat(v.saturating_mul(level)),
            Bonus::Increased(p) => Bonus::Increased(p.saturating_mul(level)),
            Bonus::More(p) => Bonus::More(p.saturating_mul(level)),
            Bonus::Less(p) => Bonus::Less(p.saturating_mul(level)),
        }
    }
}

/// A collection of bonuses applied in the canonical order.
///
/// # Example
/// ```
/// # use skill_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5));           // +5
/// stack.add(Bonus::increased(20));     // +20%
/// stack.add(Bonus::increased(15));     // +15% (summed)
/// stack.add(Bonus::more(50));          // ×1.5
/// stack.add(Bonus::less(10));          // ×0.9
///
/// // clamp((10 + 5) × 1.35 × 1.5 × 0.9, 5, 100) = 27
/// assert_eq!(stack.apply(10, 5, 100), 27);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to `base`, then clamp into `[min, max]`.
    ///
    /// ```text
    /// result = clamp((base + flat_sum) × (1 + inc_sum/100) × more_product × less_product, min, max)
    /// ```
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let mut flat_sum: i64 = 0;
        let mut inc_sum: i64 = 0;
        for bonus in &self.bonuses {
            match bonus {
                Bonus::Flat(v) => flat_sum += i64::from(*v),
                Bonus::Increased(p) => inc_sum += i64::from(*p),
                _ => {}
            }
        }

        let after_inc = (i64::from(base) + flat_sum) * (100 + inc_sum) / 100;

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(after_inc, |acc, percent| acc * (100 + percent) / 100);

        let after_less = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Less(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(after_more, |acc, percent| acc * (100 - percent) / 100);

        after_less.clamp(i64::from(min), i64::from(max)) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bonus> {
        self.bonuses.iter()
    }
}
