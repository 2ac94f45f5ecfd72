#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-based duel state machine that resolves enemy encounters.

use std::fmt;

use rand::Rng;

use arcane_pathways_core::{Character, Command, DuelAction, Guard, NpcId};

/// States of the duel state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuelState {
    /// Awaiting an action selection from the player.
    PlayerTurn,
    /// The enemy is resolving its automatic action.
    EnemyTurn,
    /// Terminal: the player defeated the enemy.
    Victory,
    /// Terminal: the enemy defeated the player.
    Defeat,
    /// Terminal: the player abandoned the duel; the enemy wins.
    Forfeit,
}

impl DuelState {
    /// Reports whether the duel has concluded.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, DuelState::Victory | DuelState::Defeat | DuelState::Forfeit)
    }
}

/// Side acting within a duel turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnSide {
    /// The player's character acted.
    Player,
    /// The enemy combatant acted.
    Enemy,
}

/// Displayable record of a single duel transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuelEvent {
    /// The duel opened and the coin flip selected the first side.
    Engaged {
        /// Side that acts first.
        first: TurnSide,
    },
    /// An attack resolved against the acting side's opponent.
    ActionResolved {
        /// Side whose action resolved.
        side: TurnSide,
        /// Line describing the attack.
        description: String,
        /// Damage subtracted from the defender's health.
        damage: i32,
        /// Defender health after the action, clamped at zero for display.
        defender_health: i32,
    },
    /// The acting side raised a defensive stance instead of attacking.
    Guarded {
        /// Side that guarded.
        side: TurnSide,
        /// Line describing the stance.
        description: String,
    },
    /// The duel reached a terminal state.
    Concluded {
        /// Terminal state the duel settled in.
        state: DuelState,
    },
    /// A submission arrived after the duel had already concluded.
    Ignored {
        /// State the duel had already settled in.
        state: DuelState,
    },
}

impl fmt::Display for DuelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuelEvent::Engaged {
                first: TurnSide::Enemy,
            } => f.write_str("An enemy has appeared! The enemy strikes first!"),
            DuelEvent::Engaged {
                first: TurnSide::Player,
            } => f.write_str("An enemy has appeared! You strike first!"),
            DuelEvent::ActionResolved { description, .. }
            | DuelEvent::Guarded { description, .. } => f.write_str(description),
            DuelEvent::Concluded { state } => f.write_str(match state {
                DuelState::Victory => "You defeated the enemy!",
                DuelState::Defeat => "You were defeated by the enemy.",
                DuelState::Forfeit => "You have forfeited the duel!",
                DuelState::PlayerTurn | DuelState::EnemyTurn => "The duel continues.",
            }),
            DuelEvent::Ignored { .. } => f.write_str("The duel has already concluded."),
        }
    }
}

/// Turn-based combat sub-session triggered by an enemy encounter.
///
/// The engine owns the enemy combatant and resolves enemy turns
/// automatically, so callers only ever submit player action selections. It
/// performs no I/O: every transition is reported through [`DuelEvent`]
/// values for the presentation layer to render.
#[derive(Debug)]
pub struct Duel {
    enemy_id: NpcId,
    enemy: Character,
    state: DuelState,
    guards: Vec<Guard>,
}

impl Duel {
    /// Opens a duel against the provided enemy, flipping a coin for the
    /// first turn. When the enemy wins the flip, its opening action resolves
    /// immediately; the returned duel is then either awaiting the player or
    /// already concluded.
    pub fn engage(
        enemy_id: NpcId,
        enemy: Character,
        player: &mut Character,
        rng: &mut impl Rng,
        out: &mut Vec<DuelEvent>,
    ) -> Self {
        let enemy_first = rng.gen_bool(0.5);
        out.push(DuelEvent::Engaged {
            first: if enemy_first {
                TurnSide::Enemy
            } else {
                TurnSide::Player
            },
        });
        let mut duel = Self {
            enemy_id,
            enemy,
            state: DuelState::PlayerTurn,
            guards: Vec::new(),
        };
        if enemy_first {
            duel.state = DuelState::EnemyTurn;
            duel.enemy_turn(player, rng, out);
        }
        duel
    }

    /// Applies one player action selection, then resolves the enemy's
    /// automatic answer unless the duel concluded first.
    ///
    /// `selection` indexes the archetype's action menu. `None` forfeits the
    /// duel, which counts as an enemy win; an out-of-range index falls back
    /// to the archetype's primary attack. Submissions after conclusion are
    /// reported as ignored and change nothing.
    pub fn submit_action(
        &mut self,
        player: &mut Character,
        selection: Option<usize>,
        rng: &mut impl Rng,
        out: &mut Vec<DuelEvent>,
    ) {
        if self.state != DuelState::PlayerTurn {
            out.push(DuelEvent::Ignored { state: self.state });
            return;
        }
        let Some(index) = selection else {
            self.conclude(player, DuelState::Forfeit, out);
            return;
        };
        let action = player
            .archetype()
            .action_menu()
            .get(index)
            .map(|option| option.action())
            .unwrap_or(DuelAction::Attack);
        match action {
            DuelAction::Defend => {
                if let Some(guard) = player.defend() {
                    out.push(DuelEvent::Guarded {
                        side: TurnSide::Player,
                        description: guard.description().to_owned(),
                    });
                    self.guards.push(guard);
                } else {
                    self.player_attack(player, rng, out);
                }
            }
            DuelAction::Attack => self.player_attack(player, rng, out),
        }
        if self.state.is_terminal() {
            return;
        }
        self.state = DuelState::EnemyTurn;
        self.enemy_turn(player, rng, out);
    }

    /// Current state of the duel.
    #[must_use]
    pub const fn state(&self) -> DuelState {
        self.state
    }

    /// Read-only access to the enemy combatant.
    #[must_use]
    pub fn enemy(&self) -> &Character {
        &self.enemy
    }

    /// Roster bookkeeping owed once the duel concluded: the triggering
    /// enemy NPC leaves the grid regardless of the outcome. Returns `None`
    /// while the duel is still running.
    #[must_use]
    pub fn settlement(&self) -> Option<Command> {
        self.state
            .is_terminal()
            .then_some(Command::RemoveEnemy { npc: self.enemy_id })
    }

    fn player_attack(
        &mut self,
        player: &mut Character,
        rng: &mut impl Rng,
        out: &mut Vec<DuelEvent>,
    ) {
        let report = player.attack(&mut self.enemy, rng);
        out.push(DuelEvent::ActionResolved {
            side: TurnSide::Player,
            description: report.description().to_owned(),
            damage: report.damage(),
            defender_health: self.enemy.health().max(0),
        });
        if self.enemy.is_defeated() {
            self.conclude(player, DuelState::Victory, out);
        }
    }

    fn enemy_turn(&mut self, player: &mut Character, rng: &mut impl Rng, out: &mut Vec<DuelEvent>) {
        let report = self.enemy.attack(player, rng);
        out.push(DuelEvent::ActionResolved {
            side: TurnSide::Enemy,
            description: report.description().to_owned(),
            damage: report.damage(),
            defender_health: player.health().max(0),
        });
        if player.is_defeated() {
            self.conclude(player, DuelState::Defeat, out);
        } else {
            self.state = DuelState::PlayerTurn;
        }
    }

    fn conclude(&mut self, player: &mut Character, verdict: DuelState, out: &mut Vec<DuelEvent>) {
        for guard in self.guards.drain(..) {
            player.withdraw_guard(&guard);
        }
        self.state = verdict;
        out.push(DuelEvent::Concluded { state: verdict });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_classified() {
        assert!(DuelState::Victory.is_terminal());
        assert!(DuelState::Defeat.is_terminal());
        assert!(DuelState::Forfeit.is_terminal());
        assert!(!DuelState::PlayerTurn.is_terminal());
        assert!(!DuelState::EnemyTurn.is_terminal());
    }

    #[test]
    fn conclusions_render_their_verdict() {
        let victory = DuelEvent::Concluded {
            state: DuelState::Victory,
        };
        assert_eq!(victory.to_string(), "You defeated the enemy!");
        let forfeit = DuelEvent::Concluded {
            state: DuelState::Forfeit,
        };
        assert_eq!(forfeit.to_string(), "You have forfeited the duel!");
    }
}
