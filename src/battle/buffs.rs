//! Buff ledger - timed modifiers attached to units
//!
//! At most one buff per kind lives on a unit. Reapplying a kind merges into
//! the existing entry, keeping the larger duration and the larger magnitude.
//! Durations tick down once at the start of the owner's own turn.

use serde::{Deserialize, Serialize};

use crate::battle::grid::Unit;
use crate::core::types::UnitId;

/// Kind of timed modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuffKind {
    /// Bonus initiative
    Haste,
    /// Bonus power
    Bless,
    /// Healing at the start of each own turn
    Regen,
    /// Defensive stance: next hit is halved, then the stance is consumed
    Defending,
}

/// A timed modifier on a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    /// Own turns remaining, always > 0 while attached
    pub duration: u32,
    pub magnitude: u32,
    pub source: Option<UnitId>,
}

/// Attach a buff, merging with an existing one of the same kind
pub fn apply_buff(
    unit: &mut Unit,
    kind: BuffKind,
    duration: u32,
    magnitude: u32,
    source: Option<UnitId>,
) {
    if duration == 0 {
        return;
    }

    if let Some(existing) = unit.buffs.iter_mut().find(|b| b.kind == kind) {
        existing.duration = existing.duration.max(duration);
        existing.magnitude = existing.magnitude.max(magnitude);
        existing.source = source;
        return;
    }

    unit.buffs.push(Buff {
        kind,
        duration,
        magnitude,
        source,
    });
}

/// Strip every buff of a kind
pub fn remove_buff(unit: &mut Unit, kind: BuffKind) {
    unit.buffs.retain(|b| b.kind != kind);
}

/// Tick every buff down by one turn, dropping the expired ones
pub fn decrement_durations(unit: &mut Unit) {
    unit.buffs.retain_mut(|b| {
        b.duration = b.duration.saturating_sub(1);
        b.duration > 0
    });
}

/// Total magnitude of a kind
pub fn buff_magnitude(unit: &Unit, kind: BuffKind) -> u32 {
    unit.buffs
        .iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.magnitude)
        .sum()
}

pub fn has_buff(unit: &Unit, kind: BuffKind) -> bool {
    unit.buffs.iter().any(|b| b.kind == kind)
}

/// Base power plus bless
pub fn effective_power(unit: &Unit) -> u32 {
    unit.power + buff_magnitude(unit, BuffKind::Bless)
}

/// Base initiative plus haste
pub fn effective_initiative(unit: &Unit) -> u32 {
    unit.initiative + buff_magnitude(unit, BuffKind::Haste)
}

pub fn is_defending(unit: &Unit) -> bool {
    has_buff(unit, BuffKind::Defending)
}

/// Heal from regeneration, capped at missing health
///
/// Returns the amount healed. Does not touch the regen buff's duration.
pub fn apply_regen_healing(unit: &mut Unit) -> u32 {
    let regen = buff_magnitude(unit, BuffKind::Regen);
    if regen == 0 || unit.health >= unit.max_health {
        return 0;
    }

    let healed = regen.min(unit.missing_health());
    unit.health += healed;
    healed
}
