//! Named stat registry with bound notifications.

use std::collections::BTreeMap;

use crate::error::{CoreError, ErrorSeverity};
use crate::events::{Observers, SubscriptionId};

use super::bonus::{Bonus, BonusStack};
use super::stat::{Stat, StatChange, StatDefinition, Threshold};

/// Index of a stat inside its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatId(pub u16);

/// Bound notifications delivered to the stat event sink.
///
/// A death-handling system typically listens for `ReachedMin` on health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatEvent {
    ReachedMin { id: StatId, name: String, value: i32 },
    ReachedMax { id: StatId, name: String, value: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatError {
    #[error("stat '{0}' is already defined")]
    Duplicate(String),

    #[error("stat name must not be empty")]
    EmptyName,

    #[error("stat '{name}' has invalid bounds: needs min < max and base {base} within [{min}, {max}]")]
    InvalidBounds {
        name: String,
        base: i32,
        min: i32,
        max: i32,
    },

    #[error("unknown stat '{0}'")]
    Unknown(String),

    #[error("unknown stat id {0:?}")]
    UnknownId(StatId),

    #[error("stat registry is full")]
    Full,
}

impl CoreError for StatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            StatError::Duplicate(_) => "STAT_DUPLICATE",
            StatError::EmptyName => "STAT_EMPTY_NAME",
            StatError::InvalidBounds { .. } => "STAT_INVALID_BOUNDS",
            StatError::Unknown(_) => "STAT_UNKNOWN",
            StatError::UnknownId(_) => "STAT_UNKNOWN_ID",
            StatError::Full => "STAT_REGISTRY_FULL",
        }
    }
}

/// Aggregated bonuses per stat name (case-insensitive).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatBonuses {
    stacks: BTreeMap<String, BonusStack>,
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stat: &str, bonus: Bonus) {
        self.stacks
            .entry(stat.to_ascii_lowercase())
            .or_default()
            .add(bonus);
    }

    pub fn get(&self, stat: &str) -> Option<&BonusStack> {
        self.stacks.get(&stat.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BonusStack)> {
        self.stacks.iter().map(|(name, stack)| (name.as_str(), stack))
    }
}

/// Current values of a registry at one instant, keyed by stat name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSnapshot {
    values: BTreeMap<String, i32>,
}

impl StatSnapshot {
    pub fn get(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Ordered collection of stats owned by one character.
#[derive(Debug, Default)]
pub struct StatRegistry {
    stats: Vec<Stat>,
    observers: Observers<StatEvent>,
}

impl StatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a catalog, failing on the first invalid definition.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = StatDefinition>,
    ) -> Result<Self, StatError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.define(definition)?;
        }
        Ok(registry)
    }

    pub fn define(&mut self, definition: StatDefinition) -> Result<StatId, StatError> {
        if definition.name.trim().is_empty() {
            return Err(StatError::EmptyName);
        }
        if self.id_of(&definition.name).is_some()
            || (!definition.abbreviation.is_empty() && self.id_of(&definition.abbreviation).is_some())
        {
            return Err(StatError::Duplicate(definition.name));
        }
        if definition.min >= definition.max
            || definition.base < definition.min
            || definition.base > definition.max
        {
            return Err(StatError::InvalidBounds {
                name: definition.name,
                base: definition.base,
                min: definition.min,
                max: definition.max,
            });
        }

        let id = u16::try_from(self.stats.len())
            .map(StatId)
            .map_err(|_| StatError::Full)?;
        tracing::debug!("Defined stat {} ({:?})", definition.name, id);
        self.stats.push(Stat::new(definition));
        Ok(id)
    }

    /// Looks up a stat by name or abbreviation, ignoring ASCII case.
    pub fn id_of(&self, name: &str) -> Option<StatId> {
        self.stats
            .iter()
            .position(|stat| stat.matches(name))
            .map(|index| StatId(index as u16))
    }

    pub fn resolve(&self, name: &str) -> Result<StatId, StatError> {
        self.id_of(name)
            .ok_or_else(|| StatError::Unknown(name.to_string()))
    }

    pub fn get(&self, id: StatId) -> Option<&Stat> {
        self.stats.get(usize::from(id.0))
    }

    pub fn find(&self, name: &str) -> Option<&Stat> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn current(&self, id: StatId) -> Result<i32, StatError> {
        self.stat(id).map(Stat::current)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatId, &Stat)> {
        self.stats
            .iter()
            .enumerate()
            .map(|(index, stat)| (StatId(index as u16), stat))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StatEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn set_current(&mut self, id: StatId, value: i32) -> Result<StatChange, StatError> {
        let change = self.stat_mut(id)?.set(value);
        self.notify(id, change);
        Ok(change)
    }

    pub fn modify(&mut self, id: StatId, delta: i32) -> Result<StatChange, StatError> {
        let change = self.stat_mut(id)?.modify(delta);
        self.notify(id, change);
        Ok(change)
    }

    /// Sets current to max.
    pub fn fill(&mut self, id: StatId) -> Result<StatChange, StatError> {
        let max = self.stat(id)?.max();
        self.set_current(id, max)
    }

    /// Sets current to min.
    pub fn drain(&mut self, id: StatId) -> Result<StatChange, StatError> {
        let min = self.stat(id)?.min();
        self.set_current(id, min)
    }

    /// Re-applies growth for a new character level to every stat.
    pub fn apply_level(&mut self, level: u32) {
        for index in 0..self.stats.len() {
            let change = self.stats[index].apply_level(level);
            self.notify(StatId(index as u16), change);
        }
    }

    /// Current value with skill bonuses applied, never below the stat minimum.
    pub fn effective(&self, id: StatId, bonuses: &StatBonuses) -> Result<i32, StatError> {
        let stat = self.stat(id)?;

        // Modifiers may target either the full name or the abbreviation.
        let mut stack = BonusStack::new();
        if let Some(by_name) = bonuses.get(stat.name()) {
            stack.extend(by_name.iter().cloned());
        }
        if !stat.abbreviation().is_empty()
            && !stat.abbreviation().eq_ignore_ascii_case(stat.name())
            && let Some(by_abbreviation) = bonuses.get(stat.abbreviation())
        {
            stack.extend(by_abbreviation.iter().cloned());
        }

        if stack.is_empty() {
            return Ok(stat.current());
        }
        Ok(stack.apply(stat.current(), stat.min(), i32::MAX))
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            values: self
                .stats
                .iter()
                .map(|stat| (stat.name().to_string(), stat.current()))
                .collect(),
        }
    }

    fn stat(&self, id: StatId) -> Result<&Stat, StatError> {
        self.get(id).ok_or(StatError::UnknownId(id))
    }

    fn stat_mut(&mut self, id: StatId) -> Result<&mut Stat, StatError> {
        self.stats
            .get_mut(usize::from(id.0))
            .ok_or(StatError::UnknownId(id))
    }

    fn notify(&mut self, id: StatId, change: StatChange) {
        let Some(threshold) = change.crossed else {
            return;
        };
        let name = self.stats[usize::from(id.0)].name().to_string();
        let event = match threshold {
            Threshold::Min => StatEvent::ReachedMin {
                id,
                name,
                value: change.current,
            },
            Threshold::Max => StatEvent::ReachedMax {
                id,
                name,
                value: change.current,
            },
        };
        tracing::debug!("Stat threshold reached: {:?}", event);
        self.observers.emit(&event);
    }
}
