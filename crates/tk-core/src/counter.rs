//! Resource counters and toggleable character states.
//!
//! A counter is a clamped numeric resource (spell slots, rage uses, ki
//! points) with per-rest regeneration amounts. A state is a named toggle
//! (raging, transformed) that may spend from a linked counter when
//! activated.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a counter within a character.
///
/// Persisted data from earlier app versions carries arbitrary id strings
/// (timestamp-suffixed short ids), so this is an opaque string, not a
/// parsed UUID. Fresh ids are minted as UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterId(pub String);

impl CounterId {
    /// Generate a new random counter ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for CounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.get(..8).unwrap_or(&self.0))
    }
}

/// Unique identifier for a character state entry. Opaque for the same
/// reason as [`CounterId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub String);

impl StateId {
    /// Generate a new random state ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for StateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.get(..8).unwrap_or(&self.0))
    }
}

/// A quick-adjust button shown next to a counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterButton {
    /// Button label, e.g. `+1`.
    pub label: String,
    /// Amount the button adds to the counter (may be negative).
    pub increment: i32,
}

/// A named numeric resource clamped between `min` and `max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    /// Unique identifier.
    #[serde(default)]
    pub id: CounterId,
    /// Display name.
    pub name: String,
    /// Current value.
    pub value: i32,
    /// Minimum value (usually 0).
    #[serde(default)]
    pub min: i32,
    /// Maximum value.
    pub max: i32,
    /// Amount regained on a short rest.
    #[serde(default)]
    pub short_rest: i32,
    /// Amount regained on a long rest.
    #[serde(default)]
    pub long_rest: i32,
    /// Quick-adjust buttons.
    #[serde(default = "default_buttons")]
    pub buttons: Vec<CounterButton>,
}

fn default_buttons() -> Vec<CounterButton> {
    vec![
        CounterButton {
            label: "+1".to_string(),
            increment: 1,
        },
        CounterButton {
            label: "-1".to_string(),
            increment: -1,
        },
    ]
}

impl Counter {
    /// Create a counter starting at `initial`, clamped to `[min, max]`.
    pub fn new(name: impl Into<String>, initial: i32, min: i32, max: i32) -> Self {
        Self {
            id: CounterId::new(),
            name: name.into(),
            value: initial.clamp(min, max),
            min,
            max,
            short_rest: 0,
            long_rest: 0,
            buttons: default_buttons(),
        }
    }

    /// Adjust the value by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.value
    }

    /// Set the value to its maximum.
    pub fn set_to_max(&mut self) {
        self.value = self.max;
    }

    /// Apply rest regeneration, never exceeding the maximum.
    pub fn apply_rest(&mut self, kind: RestKind) {
        let amount = match kind {
            RestKind::Short => self.short_rest,
            RestKind::Long => self.long_rest,
        };
        if amount > 0 {
            self.value = (self.value + amount).min(self.max);
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.value, self.max)
    }
}

/// The kind of rest taken, driving counter regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestKind {
    /// A short rest.
    Short,
    /// A long rest.
    Long,
}

/// How a state's activation cost is applied to its linked counter.
///
/// Earlier app versions persisted the Spanish labels `resta`/`suma`;
/// those still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Spend from the counter on activation.
    #[default]
    #[serde(alias = "resta")]
    Subtract,
    /// Add to the counter on activation.
    #[serde(alias = "suma")]
    Add,
}

/// A named toggleable state, optionally spending from a linked counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntry {
    /// Unique identifier.
    #[serde(default)]
    pub id: StateId,
    /// Display name.
    pub name: String,
    /// Counter this state spends from when activated, if any.
    #[serde(default)]
    pub linked_counter_id: Option<CounterId>,
    /// Amount applied to the linked counter on activation.
    #[serde(default)]
    pub discount_on_activate: i32,
    /// Whether activation spends from or adds to the linked counter.
    #[serde(default)]
    pub discount_type: DiscountType,
    /// Whether the state is currently active.
    #[serde(default)]
    pub active: bool,
}

impl StateEntry {
    /// Create an inactive, unlinked state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StateId::new(),
            name: name.into(),
            linked_counter_id: None,
            discount_on_activate: 0,
            discount_type: DiscountType::Subtract,
            active: false,
        }
    }

    /// The signed delta applied to the linked counter when this state
    /// activates. Defaults to spending 1 when no amount is configured.
    pub fn activation_delta(&self) -> i32 {
        let amount = self.discount_on_activate.abs().max(1);
        match self.discount_type {
            DiscountType::Subtract => -amount,
            DiscountType::Add => amount,
        }
    }
}
