#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Arcane Pathways.
//!
//! The world owns the tile grid, the static obstacle field, the two end
//! spots, both NPC rosters, and the player cursor. Mutations enter through
//! [`apply`], which executes [`Command`] values and broadcasts [`Event`]
//! values; systems and adapters read state exclusively through the [`query`]
//! module.

use rand::Rng;
use thiserror::Error;

use arcane_pathways_core::{
    Command, EntityKind, Event, GridPos, NpcId, PlacementError, WELCOME_BANNER,
};

const DEFAULT_GRID_COLUMNS: u32 = 16;
const DEFAULT_GRID_ROWS: u32 = 12;
const DEFAULT_OBSTACLE_COUNT: u32 = 20;
const DEFAULT_FRIENDLY_COUNT: u32 = 5;
const DEFAULT_ENEMY_COUNT: u32 = 5;
const DEFAULT_PLAYER_START: GridPos = GridPos::new(5, 5);

const MAX_PLACEMENT_ATTEMPTS: u32 = 1024;

/// Parameters controlling grid generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of tile columns laid out in the grid.
    pub columns: u32,
    /// Number of tile rows laid out in the grid.
    pub rows: u32,
    /// Obstacles sampled independently across the grid; overlapping samples
    /// collapse onto the same tile.
    pub obstacle_count: u32,
    /// Friendly NPCs placed by rejection sampling.
    pub friendly_count: u32,
    /// Enemy NPCs placed by rejection sampling.
    pub enemy_count: u32,
    /// Tile the player occupies when the session opens.
    pub player_start: GridPos,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            friendly_count: DEFAULT_FRIENDLY_COUNT,
            enemy_count: DEFAULT_ENEMY_COUNT,
            player_start: DEFAULT_PLAYER_START,
        }
    }
}

/// Fatal configuration error raised when the grid cannot host its entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The player start tile lies outside the configured grid.
    #[error("player start ({column}, {row}) lies outside the {columns}x{rows} grid")]
    StartOutOfBounds {
        /// Column of the configured start tile.
        column: u32,
        /// Row of the configured start tile.
        row: u32,
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Rejection sampling failed to find a free tile for an entity.
    #[error("no free tile found for {kind} after {attempts} attempts; the configuration is too dense")]
    PlacementExhausted {
        /// Category of entity that could not be placed.
        kind: EntityKind,
        /// Number of sampling attempts made before giving up.
        attempts: u32,
    },
}

/// Describes the discrete tile layout of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
}

impl TileGrid {
    pub(crate) const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the tile lies inside the grid.
    #[must_use]
    pub const fn contains(&self, tile: GridPos) -> bool {
        tile.column() < self.columns && tile.row() < self.rows
    }
}

#[derive(Clone, Debug)]
struct ObstacleField {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl ObstacleField {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![false; capacity],
        }
    }

    fn cover(&mut self, tile: GridPos) {
        if let Some(index) = self.index(tile) {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = true;
            }
        }
    }

    fn blocked(&self, tile: GridPos) -> bool {
        self.index(tile)
            .map_or(false, |index| self.cells.get(index).copied().unwrap_or(false))
    }

    fn index(&self, tile: GridPos) -> Option<usize> {
        if tile.column() < self.columns && tile.row() < self.rows {
            let row = usize::try_from(tile.row()).ok()?;
            let column = usize::try_from(tile.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Npc {
    id: NpcId,
    at: GridPos,
}

/// Represents the authoritative Arcane Pathways world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    obstacles: ObstacleField,
    end_spots: Vec<GridPos>,
    friendly: Vec<Npc>,
    enemies: Vec<Npc>,
    player: GridPos,
    next_npc: u32,
}

impl World {
    /// Creates an empty world with the configured grid and its two fixed
    /// end spots. Obstacles and NPCs are left to placement commands; use
    /// [`World::generate`] for a fully populated grid.
    pub fn new(config: &GridConfig) -> Result<Self, GenerationError> {
        let grid = TileGrid::new(config.columns, config.rows);
        if !grid.contains(config.player_start) {
            return Err(GenerationError::StartOutOfBounds {
                column: config.player_start.column(),
                row: config.player_start.row(),
                columns: config.columns,
                rows: config.rows,
            });
        }
        Ok(Self {
            banner: WELCOME_BANNER,
            obstacles: ObstacleField::new(config.columns, config.rows),
            end_spots: end_spots(&grid),
            friendly: Vec::new(),
            enemies: Vec::new(),
            player: config.player_start,
            next_npc: 0,
            grid,
        })
    }

    /// Generates a fully populated world: obstacles first, then friendly
    /// NPCs, then enemy NPCs, each draw taken from the provided generator.
    ///
    /// Obstacle samples are independent and may overlap each other, but
    /// never cover an end spot. NPC placement rejects tiles covered by
    /// obstacles, the player start, the end spots, and every previously
    /// placed NPC of either roster. Retries are bounded; exhaustion
    /// surfaces a [`GenerationError`].
    pub fn generate(config: &GridConfig, rng: &mut impl Rng) -> Result<Self, GenerationError> {
        let mut world = Self::new(config)?;
        for _ in 0..config.obstacle_count {
            let tile = world.sample_obstacle_tile(rng)?;
            world.obstacles.cover(tile);
        }
        for _ in 0..config.friendly_count {
            let tile = world.sample_free_tile(EntityKind::Friendly, rng)?;
            let _ = world.admit(Roster::Friendly, tile);
        }
        for _ in 0..config.enemy_count {
            let tile = world.sample_free_tile(EntityKind::Enemy, rng)?;
            let _ = world.admit(Roster::Enemy, tile);
        }
        Ok(world)
    }

    fn sample_tile(&self, rng: &mut impl Rng) -> GridPos {
        GridPos::new(
            rng.gen_range(0..self.grid.columns()),
            rng.gen_range(0..self.grid.rows()),
        )
    }

    fn sample_obstacle_tile(&self, rng: &mut impl Rng) -> Result<GridPos, GenerationError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let tile = self.sample_tile(rng);
            if !self.end_spots.contains(&tile) {
                return Ok(tile);
            }
        }
        Err(GenerationError::PlacementExhausted {
            kind: EntityKind::Obstacle,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    fn sample_free_tile(
        &self,
        kind: EntityKind,
        rng: &mut impl Rng,
    ) -> Result<GridPos, GenerationError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let tile = self.sample_tile(rng);
            if self.validate_npc_placement(tile).is_ok() {
                return Ok(tile);
            }
        }
        Err(GenerationError::PlacementExhausted {
            kind,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    fn validate_npc_placement(&self, tile: GridPos) -> Result<(), PlacementError> {
        if !self.grid.contains(tile) {
            return Err(PlacementError::OutOfBounds);
        }
        let collides = self.obstacles.blocked(tile)
            || tile == self.player
            || self.end_spots.contains(&tile)
            || npc_at(&self.friendly, tile).is_some()
            || npc_at(&self.enemies, tile).is_some();
        if collides {
            return Err(PlacementError::Occupied);
        }
        Ok(())
    }

    fn admit(&mut self, roster: Roster, at: GridPos) -> NpcId {
        let id = NpcId::new(self.next_npc);
        self.next_npc += 1;
        let npc = Npc { id, at };
        match roster {
            Roster::Friendly => self.friendly.push(npc),
            Roster::Enemy => self.enemies.push(npc),
        }
        id
    }
}

#[derive(Clone, Copy, Debug)]
enum Roster {
    Friendly,
    Enemy,
}

fn npc_at(roster: &[Npc], tile: GridPos) -> Option<&Npc> {
    roster.iter().find(|npc| npc.at == tile)
}

fn remove_npc(roster: &mut Vec<Npc>, npc: NpcId) -> Option<Npc> {
    let index = roster.iter().position(|candidate| candidate.id == npc)?;
    Some(roster.remove(index))
}

fn end_spots(grid: &TileGrid) -> Vec<GridPos> {
    if grid.columns() == 0 || grid.rows() == 0 {
        return Vec::new();
    }
    vec![
        GridPos::new(grid.columns() - 1, 0),
        GridPos::new(grid.columns() - 1, grid.rows() - 1),
    ]
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Invalid requests degrade to rejection events or silent no-ops: removing
/// an absent NPC emits nothing, and a player move onto an invalid tile is
/// ignored because the resolving system is authoritative for movement.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceObstacle { at } => {
            if !world.grid.contains(at) {
                out_events.push(Event::PlacementRejected {
                    kind: EntityKind::Obstacle,
                    at,
                    reason: PlacementError::OutOfBounds,
                });
            } else if world.end_spots.contains(&at) {
                out_events.push(Event::PlacementRejected {
                    kind: EntityKind::Obstacle,
                    at,
                    reason: PlacementError::Occupied,
                });
            } else {
                world.obstacles.cover(at);
                out_events.push(Event::ObstaclePlaced { at });
            }
        }
        Command::PlaceFriendly { at } => match world.validate_npc_placement(at) {
            Ok(()) => {
                let npc = world.admit(Roster::Friendly, at);
                out_events.push(Event::FriendlyPlaced { npc, at });
            }
            Err(reason) => out_events.push(Event::PlacementRejected {
                kind: EntityKind::Friendly,
                at,
                reason,
            }),
        },
        Command::PlaceEnemy { at } => match world.validate_npc_placement(at) {
            Ok(()) => {
                let npc = world.admit(Roster::Enemy, at);
                out_events.push(Event::EnemyPlaced { npc, at });
            }
            Err(reason) => out_events.push(Event::PlacementRejected {
                kind: EntityKind::Enemy,
                at,
                reason,
            }),
        },
        Command::MovePlayer { to } => {
            if world.grid.contains(to) && !world.obstacles.blocked(to) {
                let from = world.player;
                world.player = to;
                out_events.push(Event::PlayerMoved { from, to });
            }
        }
        Command::RemoveFriendly { npc } => {
            if let Some(removed) = remove_npc(&mut world.friendly, npc) {
                out_events.push(Event::FriendlyRemoved {
                    npc,
                    at: removed.at,
                });
            }
        }
        Command::RemoveEnemy { npc } => {
            if let Some(removed) = remove_npc(&mut world.enemies, npc) {
                out_events.push(Event::EnemyRemoved {
                    npc,
                    at: removed.at,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{npc_at, TileGrid, World};
    use arcane_pathways_core::{GridPos, NpcId};

    /// Retrieves the welcome banner adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile grid definition.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Tile currently occupied by the player.
    #[must_use]
    pub fn player_position(world: &World) -> GridPos {
        world.player
    }

    /// End spots that win the session when reached.
    #[must_use]
    pub fn end_spots(world: &World) -> &[GridPos] {
        &world.end_spots
    }

    /// Captures a view answering tile-classification queries.
    #[must_use]
    pub fn terrain_view(world: &World) -> TerrainView<'_> {
        TerrainView { world }
    }

    /// Captures a view over both NPC rosters.
    #[must_use]
    pub fn npc_view(world: &World) -> NpcView<'_> {
        NpcView { world }
    }

    /// Read-only view combining bounds, obstacle, end-spot and player
    /// queries.
    #[derive(Clone, Copy, Debug)]
    pub struct TerrainView<'a> {
        world: &'a World,
    }

    impl TerrainView<'_> {
        /// Reports whether the tile lies inside the grid.
        #[must_use]
        pub fn contains(&self, tile: GridPos) -> bool {
            self.world.grid.contains(tile)
        }

        /// Reports whether the tile is covered by a static obstacle.
        #[must_use]
        pub fn obstacle_at(&self, tile: GridPos) -> bool {
            self.world.obstacles.blocked(tile)
        }

        /// Reports whether the tile is one of the end spots.
        #[must_use]
        pub fn end_spot_at(&self, tile: GridPos) -> bool {
            self.world.end_spots.contains(&tile)
        }

        /// Tile currently occupied by the player.
        #[must_use]
        pub fn player_position(&self) -> GridPos {
            self.world.player
        }

        /// Provides the dimensions of the underlying grid.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            (self.world.grid.columns(), self.world.grid.rows())
        }
    }

    /// Read-only view over the friendly and enemy rosters.
    #[derive(Clone, Copy, Debug)]
    pub struct NpcView<'a> {
        world: &'a World,
    }

    impl NpcView<'_> {
        /// Friendly NPC occupying the exact tile, if any.
        #[must_use]
        pub fn friendly_at(&self, tile: GridPos) -> Option<NpcSnapshot> {
            npc_at(&self.world.friendly, tile).map(|npc| NpcSnapshot {
                id: npc.id,
                at: npc.at,
            })
        }

        /// First enemy NPC within a Chebyshev distance of one of the tile,
        /// in roster order.
        #[must_use]
        pub fn enemy_near(&self, tile: GridPos) -> Option<NpcSnapshot> {
            self.world
                .enemies
                .iter()
                .find(|npc| npc.at.chebyshev_distance(tile) <= 1)
                .map(|npc| NpcSnapshot {
                    id: npc.id,
                    at: npc.at,
                })
        }

        /// Snapshots of the friendly roster in placement order.
        #[must_use]
        pub fn friendly(&self) -> Vec<NpcSnapshot> {
            self.world
                .friendly
                .iter()
                .map(|npc| NpcSnapshot {
                    id: npc.id,
                    at: npc.at,
                })
                .collect()
        }

        /// Snapshots of the enemy roster in placement order.
        #[must_use]
        pub fn enemies(&self) -> Vec<NpcSnapshot> {
            self.world
                .enemies
                .iter()
                .map(|npc| NpcSnapshot {
                    id: npc.id,
                    at: npc.at,
                })
                .collect()
        }

        /// Number of friendly NPCs still on the grid.
        #[must_use]
        pub fn friendly_count(&self) -> usize {
            self.world.friendly.len()
        }

        /// Number of enemy NPCs still on the grid.
        #[must_use]
        pub fn enemy_count(&self) -> usize {
            self.world.enemies.len()
        }
    }

    /// Immutable representation of a single NPC used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct NpcSnapshot {
        /// Unique identifier assigned to the NPC.
        pub id: NpcId,
        /// Grid tile currently occupied by the NPC.
        pub at: GridPos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_field_ignores_out_of_range_tiles() {
        let mut field = ObstacleField::new(4, 3);
        field.cover(GridPos::new(9, 9));
        assert!(!field.blocked(GridPos::new(9, 9)));
        field.cover(GridPos::new(2, 1));
        assert!(field.blocked(GridPos::new(2, 1)));
    }

    #[test]
    fn end_spots_anchor_the_right_corners() {
        let grid = TileGrid::new(16, 12);
        assert_eq!(
            end_spots(&grid),
            vec![GridPos::new(15, 0), GridPos::new(15, 11)]
        );
    }
}
