//! Rosters - character templates, parties and battle setup

pub mod party;
pub mod setup;
pub mod templates;

pub use party::{create_unit, create_units_from_party, default_position, Party, PartyMember};
pub use setup::{create_game, default_enemy_party, default_player_party, GameSetup};
pub use templates::{
    all_templates, class_templates, get_template, monster_templates, CharacterTemplate,
    TemplateKind,
};
