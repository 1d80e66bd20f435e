//! Character templates and their stat blocks
//!
//! Templates are fixed data: the playable classes and the monsters the
//! enemy side fields. A unit copies its template's stats at battle setup.

use serde::Serialize;

use crate::skills::SkillId;

/// Which roster a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Class,
    Monster,
}

/// Stat block a unit is created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: TemplateKind,
    pub max_health: u32,
    pub power: u32,
    pub magic: u32,
    pub defense: u32,
    pub initiative: u32,
    /// Skills on top of the defaults every unit has
    pub skills: &'static [SkillId],
}

pub const WARRIOR: CharacterTemplate = CharacterTemplate {
    id: "warrior",
    name: "Warrior",
    kind: TemplateKind::Class,
    max_health: 120,
    power: 25,
    magic: 0,
    defense: 8,
    initiative: 8,
    skills: &[],
};

/// Fast, fragile, shoots anything on the board
pub const ARCHER: CharacterTemplate = CharacterTemplate {
    id: "archer",
    name: "Archer",
    kind: TemplateKind::Class,
    max_health: 80,
    power: 20,
    magic: 15,
    defense: 4,
    initiative: 12,
    skills: &[SkillId::Bolt],
};

pub const CLERIC: CharacterTemplate = CharacterTemplate {
    id: "cleric",
    name: "Cleric",
    kind: TemplateKind::Class,
    max_health: 70,
    power: 12,
    magic: 25,
    defense: 6,
    initiative: 10,
    skills: &[SkillId::Heal, SkillId::Bless, SkillId::Regen],
};

pub const MAGE: CharacterTemplate = CharacterTemplate {
    id: "mage",
    name: "Mage",
    kind: TemplateKind::Class,
    max_health: 60,
    power: 10,
    magic: 30,
    defense: 3,
    initiative: 9,
    skills: &[SkillId::Bolt, SkillId::Leech, SkillId::Haste],
};

/// Tank with some support
pub const PALADIN: CharacterTemplate = CharacterTemplate {
    id: "paladin",
    name: "Paladin",
    kind: TemplateKind::Class,
    max_health: 150,
    power: 18,
    magic: 15,
    defense: 12,
    initiative: 6,
    skills: &[SkillId::Heal, SkillId::Bless],
};

pub const NECROMANCER: CharacterTemplate = CharacterTemplate {
    id: "necromancer",
    name: "Necromancer",
    kind: TemplateKind::Monster,
    max_health: 70,
    power: 10,
    magic: 22,
    defense: 4,
    initiative: 10,
    skills: &[SkillId::Bolt, SkillId::Leech, SkillId::Regen],
};

pub const SKELETON: CharacterTemplate = CharacterTemplate {
    id: "skeleton",
    name: "Skeleton",
    kind: TemplateKind::Monster,
    max_health: 80,
    power: 15,
    magic: 0,
    defense: 3,
    initiative: 8,
    skills: &[],
};

pub const ORC: CharacterTemplate = CharacterTemplate {
    id: "orc",
    name: "Orc",
    kind: TemplateKind::Monster,
    max_health: 100,
    power: 28,
    magic: 0,
    defense: 5,
    initiative: 7,
    skills: &[],
};

const TEMPLATES: [&CharacterTemplate; 8] = [
    &WARRIOR,
    &ARCHER,
    &CLERIC,
    &MAGE,
    &PALADIN,
    &NECROMANCER,
    &SKELETON,
    &ORC,
];

/// Case-insensitive lookup by id
pub fn get_template(id: &str) -> Option<&'static CharacterTemplate> {
    let id = id.trim();
    TEMPLATES
        .iter()
        .copied()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

pub fn all_templates() -> Vec<&'static CharacterTemplate> {
    TEMPLATES.to_vec()
}

pub fn class_templates() -> Vec<&'static CharacterTemplate> {
    templates_of(TemplateKind::Class)
}

pub fn monster_templates() -> Vec<&'static CharacterTemplate> {
    templates_of(TemplateKind::Monster)
}

fn templates_of(kind: TemplateKind) -> Vec<&'static CharacterTemplate> {
    TEMPLATES.iter().copied().filter(|t| t.kind == kind).collect()
}
