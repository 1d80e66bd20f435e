//! Skill catalog - static definitions for every action a unit can take

pub mod catalog;

pub use catalog::{
    find_skill, get_skill, get_skills, RangeKind, Skill, SkillEffect, SkillId, TargetCategory,
    TargetRequirement, DEFAULT_SKILLS,
};
