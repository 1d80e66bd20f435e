//! Party composition and unit creation

use serde::Serialize;

use crate::battle::constants::{MAX_PARTY_SIZE, UNITS_PER_ROW};
use crate::battle::grid::Unit;
use crate::core::error::{BattleError, Result};
use crate::core::types::{GridPosition, Team, UnitId};
use crate::roster::templates::{get_template, CharacterTemplate};
use crate::skills::DEFAULT_SKILLS;

/// A template slot in a party, optionally pinned to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartyMember {
    pub template: &'static CharacterTemplate,
    pub position: Option<GridPosition>,
}

/// An ordered group of templates fielded by one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub members: Vec<PartyMember>,
}

impl Party {
    /// Party with default placement for every member
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        templates: impl IntoIterator<Item = &'static CharacterTemplate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: templates
                .into_iter()
                .map(|template| PartyMember {
                    template,
                    position: None,
                })
                .collect(),
        }
    }

    /// Party with every member pinned to an explicit cell
    pub fn positioned(
        id: impl Into<String>,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (&'static CharacterTemplate, GridPosition)>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: members
                .into_iter()
                .map(|(template, position)| PartyMember {
                    template,
                    position: Some(position),
                })
                .collect(),
        }
    }

    /// Build a party from template ids, failing on the first unknown one
    pub fn from_template_ids<S: AsRef<str>>(
        id: impl Into<String>,
        name: impl Into<String>,
        template_ids: &[S],
    ) -> Result<Self> {
        let templates = template_ids
            .iter()
            .map(|t| {
                get_template(t.as_ref()).ok_or_else(|| {
                    BattleError::InvalidParty(format!("Unknown character template: {}", t.as_ref()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(id, name, templates))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(BattleError::InvalidParty(
                "Party must have at least one character".into(),
            ));
        }
        if self.members.len() > MAX_PARTY_SIZE {
            return Err(BattleError::InvalidParty(format!(
                "Party cannot have more than {} characters",
                MAX_PARTY_SIZE
            )));
        }
        Ok(())
    }
}

/// Cell a member lands on when the party gives no explicit position
///
/// Two per row from row 0, front column first.
pub fn default_position(team: Team, index: usize) -> GridPosition {
    let columns = team.home_columns();
    GridPosition::new(index / UNITS_PER_ROW, columns[index % UNITS_PER_ROW])
}

/// Fresh unit at full health with the default skills plus the template's own
pub fn create_unit(
    template: &CharacterTemplate,
    id: UnitId,
    position: GridPosition,
    team: Team,
) -> Unit {
    let mut skills = DEFAULT_SKILLS.to_vec();
    skills.extend(
        template
            .skills
            .iter()
            .copied()
            .filter(|s| !DEFAULT_SKILLS.contains(s)),
    );

    Unit {
        id,
        name: template.name.to_string(),
        health: template.max_health,
        max_health: template.max_health,
        power: template.power,
        magic: template.magic,
        defense: template.defense,
        initiative: template.initiative,
        position,
        team,
        skills,
        buffs: Vec::new(),
        template_id: Some(template.id.to_string()),
    }
}

/// Create the units of a party for a team
///
/// Ids follow `{team}-{template}-{index}`. Explicit positions must lie on
/// the team's own half of the board.
pub fn create_units_from_party(party: &Party, team: Team) -> Result<Vec<Unit>> {
    party.validate()?;

    party
        .members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let id = UnitId::new(format!("{}-{}-{}", team.as_str(), member.template.id, index));
            let position = member
                .position
                .unwrap_or_else(|| default_position(team, index));
            if !position.in_bounds() {
                return Err(BattleError::OutOfBounds(position));
            }
            if position.home_team() != team {
                return Err(BattleError::InvalidDestination { unit: id, position });
            }
            Ok(create_unit(member.template, id, position, team))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::templates::{CLERIC, MAGE, SKELETON, WARRIOR};
    use crate::skills::SkillId;

    #[test]
    fn test_validate_size() {
        assert!(Party::new("p", "Empty", Vec::new()).validate().is_err());
        assert!(Party::new("p", "Solo", [&WARRIOR]).validate().is_ok());
        assert!(Party::new("p", "Full", [&WARRIOR; 4]).validate().is_ok());
        let err = Party::new("p", "Crowd", [&WARRIOR; 5]).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid party: Party cannot have more than 4 characters");
    }

    #[test]
    fn test_from_template_ids() {
        let party = Party::from_template_ids("p", "Heroes", &["warrior", "Cleric"]).unwrap();
        assert_eq!(party.len(), 2);
        assert_eq!(party.members[1].template.id, "cleric");

        let err = Party::from_template_ids("p", "Heroes", &["warrior", "dragon"]).unwrap_err();
        assert!(matches!(err, BattleError::InvalidParty(msg) if msg.contains("dragon")));
    }

    #[test]
    fn test_default_positions() {
        assert_eq!(default_position(Team::Player, 0), GridPosition::new(0, 1));
        assert_eq!(default_position(Team::Player, 1), GridPosition::new(0, 0));
        assert_eq!(default_position(Team::Player, 3), GridPosition::new(1, 0));
        assert_eq!(default_position(Team::Enemy, 0), GridPosition::new(0, 2));
        assert_eq!(default_position(Team::Enemy, 2), GridPosition::new(1, 2));
    }

    #[test]
    fn test_created_units() {
        let party = Party::new("e", "Enemies", [&SKELETON, &MAGE]);
        let units = create_units_from_party(&party, Team::Enemy).unwrap();

        assert_eq!(units[0].id.as_str(), "enemy-skeleton-0");
        assert_eq!(units[1].id.as_str(), "enemy-mage-1");
        assert_eq!(units[1].health, 60);
        assert_eq!(units[1].position, GridPosition::new(0, 3));
        assert_eq!(units[1].template_id.as_deref(), Some("mage"));
        assert_eq!(
            units[1].skills,
            vec![
                SkillId::Attack,
                SkillId::Defend,
                SkillId::Wait,
                SkillId::Move,
                SkillId::Bolt,
                SkillId::Leech,
                SkillId::Haste
            ]
        );
    }

    #[test]
    fn test_positioned_party() {
        let party = Party::positioned(
            "p",
            "Heroes",
            [(&WARRIOR, GridPosition::new(3, 1)), (&CLERIC, GridPosition::new(2, 0))],
        );
        let units = create_units_from_party(&party, Team::Player).unwrap();
        assert_eq!(units[0].position, GridPosition::new(3, 1));
        assert_eq!(units[1].position, GridPosition::new(2, 0));
    }

    #[test]
    fn test_positioned_party_must_stay_home() {
        let party = Party::positioned("p", "Heroes", [(&WARRIOR, GridPosition::new(0, 2))]);
        let err = create_units_from_party(&party, Team::Player).unwrap_err();
        assert!(matches!(err, BattleError::InvalidDestination { .. }));

        let party = Party::positioned("p", "Heroes", [(&WARRIOR, GridPosition::new(4, 0))]);
        let err = create_units_from_party(&party, Team::Player).unwrap_err();
        assert!(matches!(err, BattleError::OutOfBounds(_)));
    }
}
