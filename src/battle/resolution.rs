//! Battle resolution engine
//!
//! `execute_action` is the single transition function of a battle. It never
//! touches the state it is given: it works on a clone and returns the next
//! snapshot. Units nobody touched keep sharing their allocation with the
//! previous snapshot.
//!
//! Order of a turn:
//! 1. start-of-turn upkeep on the active unit (regen, then buff tick-down)
//! 2. the skill's effect
//! 3. victory check
//! 4. hand the turn to the next living unit

use crate::battle::buffs::{
    apply_buff, apply_regen_healing, decrement_durations, effective_power, is_defending,
    remove_buff, BuffKind,
};
use crate::battle::constants::MIN_DAMAGE;
use crate::battle::state::{ActionCommand, BattleState, BattleStatus};
use crate::battle::targeting::validate_destination;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Team, UnitId};
use crate::skills::{get_skill, Skill, SkillEffect};

/// Damage of one hit
///
/// Defense is subtracted first with a floor of one, the multiplier scales the
/// result (rounded down) and a defending target halves it (rounded up). The
/// final number is never below one.
pub fn strike_damage(power: u32, defense: u32, multiplier_pct: u32, defending: bool) -> u32 {
    let base = power.saturating_sub(defense).max(MIN_DAMAGE);
    let scaled = base * multiplier_pct / 100;
    let damage = if defending { scaled.div_ceil(2) } else { scaled };
    damage.max(MIN_DAMAGE)
}

/// Resolve one action for the active unit and return the next state
///
/// A finished battle is returned unchanged. Commands that name a missing or
/// fallen target, or an illegal destination, are rejected with an error and
/// the input state stays as it was.
pub fn execute_action(state: &BattleState, command: &ActionCommand) -> Result<BattleState> {
    if state.is_over() {
        return Ok(state.clone());
    }
    let Some(actor_id) = state.active_unit_id().cloned() else {
        return Ok(state.clone());
    };
    let Some(actor) = state.grid.unit(&actor_id) else {
        return Ok(state.clone());
    };

    let mut next = state.clone();

    // A unit that fell before its turn came up forfeits it
    if actor.is_alive() {
        start_of_turn(&mut next, &actor_id);

        let skill = get_skill(command.skill);
        tracing::debug!(
            "{} uses {} (targets: {:?})",
            actor_id,
            skill.name,
            command.targets
        );

        let mut turn = Turn {
            state: &mut next,
            actor: actor_id,
            command,
            skill,
        };
        match skill.effect {
            SkillEffect::Strike { multiplier_pct } => turn.strike(multiplier_pct)?,
            SkillEffect::Drain {
                multiplier_pct,
                heal_pct,
            } => turn.drain(multiplier_pct, heal_pct)?,
            SkillEffect::Stance { duration } => turn.stance(duration),
            SkillEffect::Restore { amount } => turn.restore(amount)?,
            SkillEffect::Empower {
                kind,
                duration,
                magnitude,
            } => turn.empower(kind, duration, magnitude)?,
            SkillEffect::Pass {
                kind,
                duration,
                magnitude,
            } => turn.pass(kind, duration, magnitude),
            SkillEffect::Reposition => turn.reposition()?,
        }
    }

    check_victory(&mut next);
    if !next.is_over() {
        match next.turn_order.advance(&next.grid) {
            Some(order) => next.turn_order = order,
            None => conclude(&mut next, None),
        }
    }

    Ok(next)
}

/// Regen heals, then every buff on the unit ticks down one turn
fn start_of_turn(state: &mut BattleState, actor_id: &UnitId) {
    let mut healed = 0;
    let mut name = String::new();
    state.grid.modify_unit(actor_id, |unit| {
        healed = apply_regen_healing(unit);
        decrement_durations(unit);
        name = unit.name.clone();
    });
    if healed > 0 {
        state.log_line(format!("{} regenerates {} HP.", name, healed));
    }
}

/// What landed on a target
#[derive(Debug, Default)]
struct Hit {
    damage: u32,
    defended: bool,
    defeated: bool,
    target_name: String,
}

/// One action being resolved
struct Turn<'a> {
    state: &'a mut BattleState,
    actor: UnitId,
    command: &'a ActionCommand,
    skill: &'static Skill,
}

impl Turn<'_> {
    fn actor_name(&self) -> String {
        self.state
            .grid
            .unit(&self.actor)
            .map(|u| u.name.clone())
            .unwrap_or_default()
    }

    fn actor_power(&self) -> u32 {
        self.state.grid.unit(&self.actor).map_or(0, effective_power)
    }

    /// The target at `index`, which must exist and still be standing
    fn target(&self, index: usize) -> Result<UnitId> {
        let id = self
            .command
            .targets
            .get(index)
            .ok_or(BattleError::MissingTarget {
                skill: self.skill.id,
                index,
            })?;
        let unit = self
            .state
            .grid
            .unit(id)
            .ok_or_else(|| BattleError::UnitNotFound(id.clone()))?;
        if !unit.is_alive() {
            return Err(BattleError::TargetIncapacitated(id.clone()));
        }
        Ok(id.clone())
    }

    fn land_hit(&mut self, target_id: &UnitId, multiplier_pct: u32) -> Hit {
        let power = self.actor_power();
        let mut hit = Hit::default();
        self.state.grid.modify_unit(target_id, |target| {
            hit.defended = is_defending(target);
            hit.damage = strike_damage(power, target.defense, multiplier_pct, hit.defended);
            target.take_damage(hit.damage);
            // A stance absorbs one hit
            if hit.defended {
                remove_buff(target, BuffKind::Defending);
            }
            hit.defeated = !target.is_alive();
            hit.target_name = target.name.clone();
        });
        hit
    }

    fn report_defeat(&mut self, hit: &Hit) {
        if hit.defeated {
            tracing::debug!("{} has fallen", hit.target_name);
            self.state
                .log_line(format!("{} has been defeated!", hit.target_name));
        }
    }

    fn strike(&mut self, multiplier_pct: u32) -> Result<()> {
        let target_id = self.target(0)?;
        let hit = self.land_hit(&target_id, multiplier_pct);
        let actor = self.actor_name();

        let line = if !self.skill.is_melee() {
            format!(
                "{} casts {} at {} for {} damage!",
                actor, self.skill.name, hit.target_name, hit.damage
            )
        } else if hit.defended {
            format!(
                "{} attacks! {} defends and takes {} damage.",
                actor, hit.target_name, hit.damage
            )
        } else {
            format!(
                "{} attacks {} for {} damage!",
                actor, hit.target_name, hit.damage
            )
        };
        self.state.log_line(line);
        self.report_defeat(&hit);
        Ok(())
    }

    fn drain(&mut self, multiplier_pct: u32, heal_pct: u32) -> Result<()> {
        let target_id = self.target(0)?;
        let hit = self.land_hit(&target_id, multiplier_pct);

        let mut healed = 0;
        self.state.grid.modify_unit(&self.actor, |caster| {
            healed = caster.restore_health(hit.damage * heal_pct / 100);
        });

        let line = format!(
            "{} leeches {} for {} damage and heals {} HP!",
            self.actor_name(),
            hit.target_name,
            hit.damage,
            healed
        );
        self.state.log_line(line);
        self.report_defeat(&hit);
        Ok(())
    }

    fn stance(&mut self, duration: u32) {
        let actor = self.actor.clone();
        self.state.grid.modify_unit(&self.actor, |unit| {
            apply_buff(unit, BuffKind::Defending, duration, 0, Some(actor));
        });
        let line = format!("{} takes a defensive stance.", self.actor_name());
        self.state.log_line(line);
    }

    fn restore(&mut self, amount: u32) -> Result<()> {
        let target_id = self.target(0)?;
        let mut healed = 0;
        let mut target_name = String::new();
        self.state.grid.modify_unit(&target_id, |target| {
            healed = target.restore_health(amount);
            target_name = target.name.clone();
        });

        let line = format!("{} heals {} for {} HP!", self.actor_name(), target_name, healed);
        self.state.log_line(line);
        Ok(())
    }

    fn empower(&mut self, kind: BuffKind, duration: u32, magnitude: u32) -> Result<()> {
        let target_id = self.target(0)?;
        let source = self.actor.clone();
        let mut target_name = String::new();
        self.state.grid.modify_unit(&target_id, |target| {
            apply_buff(target, kind, duration, magnitude, Some(source));
            target_name = target.name.clone();
        });

        let line = format!(
            "{} casts {} on {}!",
            self.actor_name(),
            self.skill.name,
            target_name
        );
        self.state.log_line(line);
        Ok(())
    }

    fn pass(&mut self, kind: BuffKind, duration: u32, magnitude: u32) {
        let actor = self.actor.clone();
        self.state.grid.modify_unit(&self.actor, |unit| {
            remove_buff(unit, BuffKind::Defending);
            apply_buff(unit, kind, duration, magnitude, Some(actor));
        });
        let line = format!("{} waits.", self.actor_name());
        self.state.log_line(line);
    }

    fn reposition(&mut self) -> Result<()> {
        let destination = self.command.destination;
        let validation = validate_destination(self.state, &self.actor, destination);
        let position = match destination {
            Some(position) if validation.is_valid() => position,
            _ => {
                return Err(BattleError::InvalidDestination {
                    unit: self.actor.clone(),
                    position: destination.unwrap_or_default(),
                })
            }
        };

        let unit = self
            .state
            .grid
            .unit(&self.actor)
            .cloned()
            .ok_or_else(|| BattleError::UnitNotFound(self.actor.clone()))?;
        let name = unit.name.clone();
        self.state.grid = self.state.grid.place_unit(unit, position)?;
        self.state
            .log_line(format!("{} moves to {}.", name, position));
        Ok(())
    }
}

/// End the battle if a side has no one standing
fn check_victory(state: &mut BattleState) {
    let players = state.living_count(Team::Player);
    let enemies = state.living_count(Team::Enemy);
    match (players, enemies) {
        (0, 0) => conclude(state, None),
        (0, _) => conclude(state, Some(Team::Enemy)),
        (_, 0) => conclude(state, Some(Team::Player)),
        _ => {}
    }
}

fn conclude(state: &mut BattleState, winner: Option<Team>) {
    state.status = BattleStatus::Over { winner };
    let line = match winner {
        Some(team) => format!("Game Over! {} team wins!", team.label()),
        None => "Game Over! Both teams have fallen.".to_string(),
    };
    tracing::info!("{} (round {})", line, state.turn_order.round);
    state.log_line(line);
}
