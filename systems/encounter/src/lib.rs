#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that classifies movement requests into encounter outcomes.

use rand::Rng;

use arcane_pathways_core::{BlockReason, Boost, Character, Command, Direction, Outcome};
use arcane_pathways_world::query::{NpcView, TerrainView};

/// Pure system that resolves one movement request into exactly one
/// [`Outcome`].
///
/// Resolution priority is fixed: out-of-bounds, obstacle, end spot, friendly
/// NPC at the exact target tile, then enemy adjacency over the current
/// roster. The system mutates only the player model (boost application) and
/// expresses every world change as a command for the caller to apply.
#[derive(Debug, Default)]
pub struct Encounter;

impl Encounter {
    /// Classifies the movement request and emits the commands realizing it.
    ///
    /// An enemy within a Chebyshev distance of one of the target tile forces
    /// an encounter without moving the player; the triggering NPC's removal
    /// is settled by the duel, not here.
    pub fn resolve(
        &self,
        direction: Direction,
        player: &mut Character,
        terrain: TerrainView<'_>,
        npcs: NpcView<'_>,
        rng: &mut impl Rng,
        out: &mut Vec<Command>,
    ) -> Outcome {
        let from = terrain.player_position();
        let Some(target) = from.step(direction) else {
            return Outcome::Blocked(BlockReason::OutOfBounds);
        };
        if !terrain.contains(target) {
            return Outcome::Blocked(BlockReason::OutOfBounds);
        }
        if terrain.obstacle_at(target) {
            return Outcome::Blocked(BlockReason::Obstacle);
        }
        if terrain.end_spot_at(target) {
            out.push(Command::MovePlayer { to: target });
            return Outcome::ReachedEnd(target);
        }
        if let Some(npc) = npcs.friendly_at(target) {
            let boost = Boost::sample(rng);
            boost.apply(player);
            out.push(Command::RemoveFriendly { npc: npc.id });
            out.push(Command::MovePlayer { to: target });
            return Outcome::FriendlyInteraction { npc: npc.id, boost };
        }
        if let Some(npc) = npcs.enemy_near(target) {
            return Outcome::EnemyEncounter {
                npc: npc.id,
                at: npc.at,
            };
        }
        out.push(Command::MovePlayer { to: target });
        Outcome::Moved(target)
    }
}
