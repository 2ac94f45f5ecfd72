#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Arcane Pathways experience.

use arcane_pathways_core::Character;
use arcane_pathways_world::{query, TileGrid, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the tile grid configuration required for rendering.
    #[must_use]
    pub fn tile_grid<'world>(&self, world: &'world World) -> &'world TileGrid {
        query::tile_grid(world)
    }

    /// Greeting shown once the player has chosen a character.
    #[must_use]
    pub fn greeting(&self, character: &Character) -> String {
        format!(
            "Welcome, {} the {}!",
            character.name(),
            character.archetype().label()
        )
    }

    /// Character sheet re-printed after successful moves.
    #[must_use]
    pub fn profile(&self, character: &Character) -> String {
        character.profile()
    }
}
