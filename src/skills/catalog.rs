//! Static skill catalog
//!
//! Every skill a unit can use, with its targeting requirements and numeric
//! parameters. Pure data: nothing here is mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::battle::buffs::BuffKind;
use crate::core::error::BattleError;

/// Identifier for a catalog skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillId {
    Wait,
    Attack,
    Defend,
    Move,
    Bolt,
    Heal,
    Leech,
    Haste,
    Bless,
    Regen,
}

impl SkillId {
    pub const ALL: [SkillId; 10] = [
        SkillId::Wait,
        SkillId::Attack,
        SkillId::Defend,
        SkillId::Move,
        SkillId::Bolt,
        SkillId::Heal,
        SkillId::Leech,
        SkillId::Haste,
        SkillId::Bless,
        SkillId::Regen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillId::Wait => "wait",
            SkillId::Attack => "attack",
            SkillId::Defend => "defend",
            SkillId::Move => "move",
            SkillId::Bolt => "bolt",
            SkillId::Heal => "heal",
            SkillId::Leech => "leech",
            SkillId::Haste => "haste",
            SkillId::Bless => "bless",
            SkillId::Regen => "regen",
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillId {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BattleError::UnknownSkill(s.to_string()))
    }
}

/// Who a targeting requirement may select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetCategory {
    /// Living unit on another team, subject to range
    Opposing,
    /// Living unit on another team, any row
    OpposingUnrestricted,
    /// Living unit on the caster's team (caster included)
    SameTeam,
    /// Same as `SameTeam`, any row
    SameTeamUnrestricted,
    /// The caster itself
    Caster,
    /// No explicit target
    None,
}

impl TargetCategory {
    pub fn is_opposing(self) -> bool {
        matches!(self, TargetCategory::Opposing | TargetCategory::OpposingUnrestricted)
    }

    pub fn is_same_team(self) -> bool {
        matches!(self, TargetCategory::SameTeam | TargetCategory::SameTeamUnrestricted)
    }
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TargetCategory::Opposing => "enemy",
            TargetCategory::OpposingUnrestricted => "enemy-any",
            TargetCategory::SameTeam => "ally",
            TargetCategory::SameTeamUnrestricted => "ally-any",
            TargetCategory::Caster => "self",
            TargetCategory::None => "none",
        };
        f.write_str(label)
    }
}

/// Range tag on a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    /// Front row only, when the front-row rule is enabled
    Melee,
    Ranged,
}

/// One step of a skill's target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetRequirement {
    pub category: TargetCategory,
    pub count: usize,
    pub range: Option<RangeKind>,
}

impl TargetRequirement {
    pub const fn new(category: TargetCategory, count: usize, range: Option<RangeKind>) -> Self {
        Self { category, count, range }
    }
}

/// What a skill does when it resolves
///
/// The resolution engine dispatches on this, one handler per variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SkillEffect {
    /// Damage a single opposing target; `multiplier_pct` scales damage after defense
    Strike { multiplier_pct: u32 },
    /// Strike that heals the caster for a share of the damage dealt
    Drain { multiplier_pct: u32, heal_pct: u32 },
    /// Put the caster into defensive stance
    Stance { duration: u32 },
    /// Restore health to a single ally
    Restore { amount: u32 },
    /// Apply a timed buff to a single ally
    Empower { kind: BuffKind, duration: u32, magnitude: u32 },
    /// Do nothing this turn; the caster gets a short initiative bump
    Pass { kind: BuffKind, duration: u32, magnitude: u32 },
    /// Relocate to an empty cell on the caster's own side
    Reposition,
}

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub targeting: &'static [TargetRequirement],
    pub effect: SkillEffect,
}

impl Skill {
    /// Sum of every requirement's count
    pub fn expected_target_count(&self) -> usize {
        self.targeting.iter().map(|r| r.count).sum()
    }

    pub fn is_melee(&self) -> bool {
        self.targeting.iter().any(|r| r.range == Some(RangeKind::Melee))
    }

    /// True when resolving the skill involves no combat choice
    pub fn is_trivial(&self) -> bool {
        matches!(self.effect, SkillEffect::Pass { .. } | SkillEffect::Reposition)
    }
}

const ONE_ENEMY_MELEE: &[TargetRequirement] = &[TargetRequirement::new(
    TargetCategory::Opposing,
    1,
    Some(RangeKind::Melee),
)];
const ONE_ENEMY_ANY: &[TargetRequirement] = &[TargetRequirement::new(
    TargetCategory::OpposingUnrestricted,
    1,
    Some(RangeKind::Ranged),
)];
const ONE_ALLY_ANY: &[TargetRequirement] = &[TargetRequirement::new(
    TargetCategory::SameTeamUnrestricted,
    1,
    Some(RangeKind::Ranged),
)];

pub const WAIT: Skill = Skill {
    id: SkillId::Wait,
    name: "Wait",
    description: "Wait this turn and gain +5 initiative next round",
    targeting: &[],
    effect: SkillEffect::Pass { kind: BuffKind::Haste, duration: 1, magnitude: 5 },
};

pub const ATTACK: Skill = Skill {
    id: SkillId::Attack,
    name: "Attack",
    description: "Melee attack a front-row enemy using power",
    targeting: ONE_ENEMY_MELEE,
    effect: SkillEffect::Strike { multiplier_pct: 100 },
};

pub const DEFEND: Skill = Skill {
    id: SkillId::Defend,
    name: "Defend",
    description: "Take a defensive stance, halving the next hit taken",
    targeting: &[],
    effect: SkillEffect::Stance { duration: 1 },
};

pub const MOVE: Skill = Skill {
    id: SkillId::Move,
    name: "Move",
    description: "Move to an empty cell on your own side",
    targeting: &[],
    effect: SkillEffect::Reposition,
};

pub const BOLT: Skill = Skill {
    id: SkillId::Bolt,
    name: "Bolt",
    description: "Ranged attack - can target any enemy",
    targeting: ONE_ENEMY_ANY,
    effect: SkillEffect::Strike { multiplier_pct: 80 },
};

pub const HEAL: Skill = Skill {
    id: SkillId::Heal,
    name: "Heal",
    description: "Restore 30 health to an ally",
    targeting: ONE_ALLY_ANY,
    effect: SkillEffect::Restore { amount: 30 },
};

pub const LEECH: Skill = Skill {
    id: SkillId::Leech,
    name: "Leech",
    description: "Drain life from an enemy",
    targeting: ONE_ENEMY_ANY,
    effect: SkillEffect::Drain {
        multiplier_pct: 70,
        heal_pct: crate::battle::constants::DRAIN_HEAL_PERCENT,
    },
};

pub const HASTE: Skill = Skill {
    id: SkillId::Haste,
    name: "Haste",
    description: "Grant +10 initiative to an ally for 5 turns",
    targeting: ONE_ALLY_ANY,
    effect: SkillEffect::Empower { kind: BuffKind::Haste, duration: 5, magnitude: 10 },
};

pub const BLESS: Skill = Skill {
    id: SkillId::Bless,
    name: "Bless",
    description: "Grant +10 power to an ally for 5 turns",
    targeting: ONE_ALLY_ANY,
    effect: SkillEffect::Empower { kind: BuffKind::Bless, duration: 5, magnitude: 10 },
};

pub const REGEN: Skill = Skill {
    id: SkillId::Regen,
    name: "Regen",
    description: "Grant 5 health per turn to an ally for 5 turns",
    targeting: ONE_ALLY_ANY,
    effect: SkillEffect::Empower { kind: BuffKind::Regen, duration: 5, magnitude: 5 },
};

/// Skills every unit gets regardless of template
pub const DEFAULT_SKILLS: [SkillId; 4] =
    [SkillId::Attack, SkillId::Defend, SkillId::Wait, SkillId::Move];

/// Look up a catalog entry
pub fn get_skill(id: SkillId) -> &'static Skill {
    match id {
        SkillId::Wait => &WAIT,
        SkillId::Attack => &ATTACK,
        SkillId::Defend => &DEFEND,
        SkillId::Move => &MOVE,
        SkillId::Bolt => &BOLT,
        SkillId::Heal => &HEAL,
        SkillId::Leech => &LEECH,
        SkillId::Haste => &HASTE,
        SkillId::Bless => &BLESS,
        SkillId::Regen => &REGEN,
    }
}

/// Look up several entries, preserving order
pub fn get_skills(ids: &[SkillId]) -> Vec<&'static Skill> {
    ids.iter().map(|&id| get_skill(id)).collect()
}

/// Resolve a skill from its textual identifier
pub fn find_skill(name: &str) -> Result<&'static Skill, BattleError> {
    name.parse::<SkillId>().map(get_skill)
}
