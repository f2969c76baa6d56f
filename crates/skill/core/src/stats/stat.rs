//! A single named attribute with bounds and per-level growth.

/// Per-level growth applied to a stat's base and maximum.
///
/// `value_at(level) = value + flat_per_level × (level - 1) + value × percent_per_level × (level - 1) / 100`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Growth {
    pub flat_per_level: i32,
    pub percent_per_level: i32,
}

impl Growth {
    pub const NONE: Self = Self {
        flat_per_level: 0,
        percent_per_level: 0,
    };

    pub const fn flat(per_level: i32) -> Self {
        Self {
            flat_per_level: per_level,
            percent_per_level: 0,
        }
    }

    /// Value at `level`, where level 1 returns `value` unchanged.
    pub fn apply(&self, value: i32, level: u32) -> i32 {
        let steps = i64::from(level.saturating_sub(1));
        let value = i64::from(value);
        let grown = value
            + i64::from(self.flat_per_level) * steps
            + value * i64::from(self.percent_per_level) * steps / 100;
        grown.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

/// Static description of a stat, as loaded from content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDefinition {
    pub name: String,
    pub abbreviation: String,
    /// Starting value; current is initialised to it.
    pub base: i32,
    pub min: i32,
    pub max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub growth: Growth,
}

impl StatDefinition {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            base: 0,
            min: 0,
            max: i32::MAX,
            growth: Growth::NONE,
        }
    }

    pub fn with_base(mut self, base: i32) -> Self {
        self.base = base;
        self
    }

    pub fn with_bounds(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }
}

/// Which bound the current value sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Inside,
    AtMin,
    AtMax,
}

impl Bound {
    fn of(value: i32, min: i32, max: i32) -> Self {
        if value <= min {
            Bound::AtMin
        } else if value >= max {
            Bound::AtMax
        } else {
            Bound::Inside
        }
    }
}

/// Bound newly reached by a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Threshold {
    Min,
    Max,
}

/// Outcome of a single stat mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatChange {
    pub previous: i32,
    pub current: i32,
    /// Set only when this mutation moved the value onto a bound it was not on.
    pub crossed: Option<Threshold>,
}

/// Runtime state of a stat. Invariant: `min ≤ current ≤ max` and `min < max`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    definition: StatDefinition,
    level: u32,
    base: i32,
    current: i32,
    min: i32,
    max: i32,
    bound: Bound,
}

impl Stat {
    /// Caller guarantees `min < max` and `min ≤ base ≤ max` (checked by the registry).
    pub(crate) fn new(definition: StatDefinition) -> Self {
        let base = definition.base;
        let min = definition.min;
        let max = definition.max;
        Self {
            level: 1,
            base,
            current: base,
            min,
            max,
            bound: Bound::of(base, min, max),
            definition,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn abbreviation(&self) -> &str {
        &self.definition.abbreviation
    }

    pub fn definition(&self) -> &StatDefinition {
        &self.definition
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_at_min(&self) -> bool {
        self.bound == Bound::AtMin
    }

    pub fn is_at_max(&self) -> bool {
        self.bound == Bound::AtMax
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.definition.name.eq_ignore_ascii_case(name)
            || self.definition.abbreviation.eq_ignore_ascii_case(name)
    }

    pub(crate) fn set(&mut self, value: i32) -> StatChange {
        let previous = self.current;
        self.current = value.clamp(self.min, self.max);

        let bound = Bound::of(self.current, self.min, self.max);
        let crossed = if bound == self.bound {
            None
        } else {
            match bound {
                Bound::AtMin => Some(Threshold::Min),
                Bound::AtMax => Some(Threshold::Max),
                Bound::Inside => None,
            }
        };
        self.bound = bound;

        StatChange {
            previous,
            current: self.current,
            crossed,
        }
    }

    pub(crate) fn modify(&mut self, delta: i32) -> StatChange {
        self.set(self.current.saturating_add(delta))
    }

    /// Recomputes base and max for `level`; current moves by the same amount as max.
    pub(crate) fn apply_level(&mut self, level: u32) -> StatChange {
        let growth = self.definition.growth;
        let new_max = growth
            .apply(self.definition.max, level)
            .max(self.min.saturating_add(1));
        let delta = new_max.saturating_sub(self.max);

        self.level = level;
        self.base = growth
            .apply(self.definition.base, level)
            .clamp(self.min, new_max);
        self.max = new_max;
        self.set(self.current.saturating_add(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp() -> Stat {
        Stat::new(StatDefinition::new("Health", "HP").with_base(50).with_bounds(0, 100))
    }

    #[test]
    fn threshold_reported_once_per_crossing() {
        let mut stat = hp();

        assert_eq!(stat.modify(-60).crossed, Some(Threshold::Min));
        assert_eq!(stat.current(), 0);
        // Staying on the bound is not a new crossing.
        assert_eq!(stat.modify(-10).crossed, None);

        assert_eq!(stat.modify(20).crossed, None);
        assert_eq!(stat.modify(-20).crossed, Some(Threshold::Min));
    }

    #[test]
    fn value_clamped_into_bounds() {
        let mut stat = hp();
        let change = stat.set(250);
        assert_eq!(change.previous, 50);
        assert_eq!(change.current, 100);
        assert_eq!(change.crossed, Some(Threshold::Max));
        assert!(stat.is_at_max());
    }

    #[test]
    fn growth_raises_max_and_current_together() {
        let mut stat = Stat::new(
            StatDefinition::new("Health", "HP")
                .with_base(100)
                .with_bounds(0, 100)
                .with_growth(Growth {
                    flat_per_level: 10,
                    percent_per_level: 10,
                }),
        );
        stat.modify(-30);

        stat.apply_level(3);

        // 100 + 10×2 + 100×10×2/100 = 140
        assert_eq!(stat.max(), 140);
        assert_eq!(stat.base(), 140);
        assert_eq!(stat.current(), 110);
        assert_eq!(stat.level(), 3);
    }

    #[test]
    fn shrinking_growth_keeps_max_above_min() {
        let mut stat = Stat::new(
            StatDefinition::new("Health", "HP")
                .with_base(50)
                .with_bounds(0, 100)
                .with_growth(Growth::flat(-60)),
        );

        let change = stat.apply_level(3);

        assert_eq!(stat.max(), 1);
        assert_eq!(stat.current(), 0);
        assert_eq!(change.crossed, Some(Threshold::Min));

        // Both bounds stay reachable.
        assert_eq!(stat.set(5).crossed, Some(Threshold::Max));
        assert!(stat.is_at_max());
        assert_eq!(stat.set(0).crossed, Some(Threshold::Min));
    }
}
