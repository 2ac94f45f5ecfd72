#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arcane Pathways engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values confirming what
//! changed. Systems consume read-only world views and respond with new
//! command batches plus their own typed results, such as the [`Outcome`] of
//! a movement request. The character model lives here as well because every
//! layer of the engine reads or mutates it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Arcane Pathways.";

const DEPRIVED_MENU: [MenuOption; 2] = [
    MenuOption::new("Basic Attack", DuelAction::Attack),
    MenuOption::new("Magic Strike", DuelAction::Attack),
];
const KNIGHT_MENU: [MenuOption; 2] = [
    MenuOption::new("Sword Slash", DuelAction::Attack),
    MenuOption::new("Shield Block", DuelAction::Defend),
];
const WIZARD_MENU: [MenuOption; 2] = [
    MenuOption::new("Fireball", DuelAction::Attack),
    MenuOption::new("Magic Shield", DuelAction::Defend),
];
const ENEMY_MENU: [MenuOption; 1] = [MenuOption::new("Attack", DuelAction::Attack)];

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order, useful for exhaustive sweeps.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Error produced when a direction token cannot be interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized direction token `{token}`; expected W, A, S or D")]
pub struct ParseDirectionError {
    token: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Ok(Direction::Up),
            "s" | "down" => Ok(Direction::Down),
            "a" | "left" => Ok(Direction::Left),
            "d" | "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError {
                token: token.trim().to_owned(),
            }),
        }
    }
}

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    column: u32,
    row: u32,
}

impl GridPos {
    /// Creates a new grid tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Tile reached by taking one step in the provided direction, or `None`
    /// when the step would leave the addressable coordinate space.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<GridPos> {
        match direction {
            Direction::Up => {
                if self.row == 0 {
                    None
                } else {
                    Some(Self::new(self.column, self.row - 1))
                }
            }
            Direction::Down => Some(Self::new(self.column, self.row + 1)),
            Direction::Left => {
                if self.column == 0 {
                    None
                } else {
                    Some(Self::new(self.column - 1, self.row))
                }
            }
            Direction::Right => Some(Self::new(self.column + 1, self.row)),
        }
    }

    /// Computes the Chebyshev (chessboard) distance between two tiles.
    #[must_use]
    pub fn chebyshev_distance(self, other: GridPos) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }
}

/// Unique identifier assigned to an NPC within its roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Stat-table tier selected once at character creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// The canonical stat table.
    #[default]
    Standard,
    /// A harsher tier with leaner health pools and otherwise identical stats.
    Hard,
}

/// Fixed category determining a character's base stats and combat actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Balanced wanderer whose strikes alternate between blade and spell.
    Deprived,
    /// Armored fighter with deterministic sword damage and a shield stance.
    Knight,
    /// Fragile caster with deterministic fireball damage and a warding stance.
    Wizard,
    /// Hostile combatant fielded by the grid during duels.
    Enemy,
}

impl Archetype {
    /// Archetypes available for player selection.
    pub const PLAYABLE: [Archetype; 3] =
        [Archetype::Deprived, Archetype::Knight, Archetype::Wizard];

    /// Human-readable archetype label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Archetype::Deprived => "Deprived",
            Archetype::Knight => "Knight",
            Archetype::Wizard => "Wizard",
            Archetype::Enemy => "Enemy",
        }
    }

    /// Base stats granted at character creation for the provided tier.
    #[must_use]
    pub const fn base_stats(&self, difficulty: Difficulty) -> BaseStats {
        let stats = match self {
            Archetype::Deprived => BaseStats::new(100, 10, 10, 4),
            Archetype::Knight => BaseStats::new(120, 15, 5, 2),
            Archetype::Wizard => BaseStats::new(80, 5, 20, 3),
            Archetype::Enemy => BaseStats::new(100, 10, 10, 2),
        };
        match difficulty {
            Difficulty::Standard => stats,
            Difficulty::Hard => stats.with_health(match self {
                Archetype::Deprived => 80,
                Archetype::Knight => 120,
                Archetype::Wizard => 60,
                Archetype::Enemy => 100,
            }),
        }
    }

    /// Action menu presented to this archetype during a duel.
    #[must_use]
    pub const fn action_menu(&self) -> &'static [MenuOption] {
        match self {
            Archetype::Deprived => &DEPRIVED_MENU,
            Archetype::Knight => &KNIGHT_MENU,
            Archetype::Wizard => &WIZARD_MENU,
            Archetype::Enemy => &ENEMY_MENU,
        }
    }
}

/// Immutable stat block granted at character creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseStats {
    health: i32,
    strength: i32,
    magic: i32,
    movement_range: u32,
}

impl BaseStats {
    const fn new(health: i32, strength: i32, magic: i32, movement_range: u32) -> Self {
        Self {
            health,
            strength,
            magic,
            movement_range,
        }
    }

    const fn with_health(self, health: i32) -> Self {
        Self {
            health,
            strength: self.strength,
            magic: self.magic,
            movement_range: self.movement_range,
        }
    }

    /// Starting health pool.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Starting strength score.
    #[must_use]
    pub const fn strength(&self) -> i32 {
        self.strength
    }

    /// Starting magic score.
    #[must_use]
    pub const fn magic(&self) -> i32 {
        self.magic
    }

    /// Tiles the character may cover per move. Reserved for multi-tile
    /// movement; current movement logic always takes unit steps.
    #[must_use]
    pub const fn movement_range(&self) -> u32 {
        self.movement_range
    }
}

/// Player archetype selection, either a named archetype or a random draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchetypeChoice {
    /// A specific playable archetype named by the player.
    Named(Archetype),
    /// A uniform draw across the playable archetypes.
    Random,
}

impl ArchetypeChoice {
    /// Resolves the choice into a concrete archetype, drawing uniformly for
    /// [`ArchetypeChoice::Random`].
    #[must_use]
    pub fn resolve(self, rng: &mut impl Rng) -> Archetype {
        match self {
            ArchetypeChoice::Named(archetype) => archetype,
            ArchetypeChoice::Random => {
                let index = rng.gen_range(0..Archetype::PLAYABLE.len());
                Archetype::PLAYABLE[index]
            }
        }
    }
}

/// Error produced when an archetype name cannot be interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized archetype `{name}`; expected Deprived, Knight, Wizard or Random")]
pub struct ParseArchetypeError {
    name: String,
}

impl FromStr for ArchetypeChoice {
    type Err = ParseArchetypeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "deprived" => Ok(ArchetypeChoice::Named(Archetype::Deprived)),
            "knight" => Ok(ArchetypeChoice::Named(Archetype::Knight)),
            "wizard" => Ok(ArchetypeChoice::Named(Archetype::Wizard)),
            "random" => Ok(ArchetypeChoice::Random),
            _ => Err(ParseArchetypeError {
                name: name.trim().to_owned(),
            }),
        }
    }
}

/// Classification of an attack's damage source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Damage drawn from the attacker's strength score.
    Physical,
    /// Damage drawn from the attacker's magic score.
    Magical,
}

/// Resolved attack: the damage dealt plus the line describing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    kind: AttackKind,
    damage: i32,
    description: String,
}

impl AttackReport {
    fn new(kind: AttackKind, damage: i32, description: String) -> Self {
        Self {
            kind,
            damage,
            description,
        }
    }

    /// Damage source classification of the attack.
    #[must_use]
    pub const fn kind(&self) -> AttackKind {
        self.kind
    }

    /// Damage subtracted from the defender's health.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Human-readable line describing the attack.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Stat raised by a defensive stance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardedStat {
    /// The bonus was added to the character's strength.
    Strength,
    /// The bonus was added to the character's magic.
    Magic,
}

/// Defensive stance bonus held for the remainder of a duel.
///
/// Callers record the guard and withdraw it via
/// [`Character::withdraw_guard`] once the duel concludes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    stat: GuardedStat,
    bonus: i32,
    description: String,
}

impl Guard {
    fn new(stat: GuardedStat, bonus: i32, description: String) -> Self {
        Self {
            stat,
            bonus,
            description,
        }
    }

    /// Stat the stance raised.
    #[must_use]
    pub const fn stat(&self) -> GuardedStat {
        self.stat
    }

    /// Magnitude of the granted bonus.
    #[must_use]
    pub const fn bonus(&self) -> i32 {
        self.bonus
    }

    /// Human-readable line describing the stance.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Underlying effect of a duel menu option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuelAction {
    /// Resolve the archetype's primary attack against the opponent.
    Attack,
    /// Raise a defensive stance granting a stat bonus for the rest of the
    /// duel. Archetypes without a stance fall back to their primary attack.
    Defend,
}

/// Labelled entry in an archetype's duel action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuOption {
    label: &'static str,
    action: DuelAction,
}

impl MenuOption {
    const fn new(label: &'static str, action: DuelAction) -> Self {
        Self { label, action }
    }

    /// Label shown to the player.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Effect selecting this option triggers.
    #[must_use]
    pub const fn action(&self) -> DuelAction {
        self.action
    }
}

/// Mutable character sheet tracking a combatant's stats across a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    name: String,
    archetype: Archetype,
    health: i32,
    strength: i32,
    magic: i32,
    movement_range: u32,
}

impl Character {
    /// Creates a character carrying the archetype's base stats for the tier.
    #[must_use]
    pub fn new(name: String, archetype: Archetype, difficulty: Difficulty) -> Self {
        let stats = archetype.base_stats(difficulty);
        Self {
            name,
            archetype,
            health: stats.health(),
            strength: stats.strength(),
            magic: stats.magic(),
            movement_range: stats.movement_range(),
        }
    }

    /// Name chosen for the character.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archetype fixed at creation time.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Current health. Attacks may drive this below zero; presentation
    /// layers clamp at zero for display.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Current strength score.
    #[must_use]
    pub const fn strength(&self) -> i32 {
        self.strength
    }

    /// Current magic score.
    #[must_use]
    pub const fn magic(&self) -> i32 {
        self.magic
    }

    /// Tiles the character may cover per move.
    #[must_use]
    pub const fn movement_range(&self) -> u32 {
        self.movement_range
    }

    /// Reports whether the character has been defeated. Any health value at
    /// or below zero counts.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Multi-line character sheet shown by presentation layers.
    #[must_use]
    pub fn profile(&self) -> String {
        format!(
            "Name: {}\nArchetype: {}\nHealth: {}\nStrength: {}\nMagic: {}\nMovement Range: {}",
            self.name,
            self.archetype.label(),
            self.health.max(0),
            self.strength,
            self.magic,
            self.movement_range
        )
    }

    /// Resolves this character's primary attack against the defender and
    /// subtracts the rolled damage from the defender's health.
    ///
    /// Knights and Wizards strike deterministically from strength and magic
    /// respectively; Deprived characters and enemies flip a coin between the
    /// two damage sources on every call.
    pub fn attack(&self, defender: &mut Character, rng: &mut impl Rng) -> AttackReport {
        let report = match self.archetype {
            Archetype::Knight => AttackReport::new(
                AttackKind::Physical,
                self.strength,
                format!(
                    "{} slashes {} with a mighty sword for {} damage!",
                    self.name, defender.name, self.strength
                ),
            ),
            Archetype::Wizard => AttackReport::new(
                AttackKind::Magical,
                self.magic,
                format!(
                    "{} casts a fireball at {} for {} magical damage!",
                    self.name, defender.name, self.magic
                ),
            ),
            Archetype::Deprived => self.split_attack(defender, "performs", "basic attack", rng),
            Archetype::Enemy => self.split_attack(defender, "uses", "physical attack", rng),
        };
        defender.health -= report.damage();
        report
    }

    fn split_attack(
        &self,
        defender: &Character,
        verb: &str,
        physical_label: &str,
        rng: &mut impl Rng,
    ) -> AttackReport {
        if rng.gen_bool(0.5) {
            AttackReport::new(
                AttackKind::Magical,
                self.magic,
                format!(
                    "{} {} a magical attack on {} for {} damage!",
                    self.name, verb, defender.name, self.magic
                ),
            )
        } else {
            AttackReport::new(
                AttackKind::Physical,
                self.strength,
                format!(
                    "{} {} a {} on {} for {} damage!",
                    self.name, verb, physical_label, defender.name, self.strength
                ),
            )
        }
    }

    /// Raises the archetype's defensive stance and applies its stat bonus.
    /// Archetypes without a stance receive `None`; callers fall back to the
    /// primary attack in that case.
    pub fn defend(&mut self) -> Option<Guard> {
        let guard = match self.archetype {
            Archetype::Knight => Guard::new(
                GuardedStat::Strength,
                2,
                format!(
                    "{} uses Shield Block! Strength temporarily increased by 2.",
                    self.name
                ),
            ),
            Archetype::Wizard => Guard::new(
                GuardedStat::Magic,
                3,
                format!(
                    "{} casts Magic Shield! Magic temporarily increased by 3.",
                    self.name
                ),
            ),
            Archetype::Deprived | Archetype::Enemy => return None,
        };
        self.raise(&guard);
        Some(guard)
    }

    fn raise(&mut self, guard: &Guard) {
        match guard.stat() {
            GuardedStat::Strength => self.strength += guard.bonus(),
            GuardedStat::Magic => self.magic += guard.bonus(),
        }
    }

    /// Withdraws a previously granted stance bonus.
    pub fn withdraw_guard(&mut self, guard: &Guard) {
        match guard.stat() {
            GuardedStat::Strength => self.strength -= guard.bonus(),
            GuardedStat::Magic => self.magic -= guard.bonus(),
        }
    }
}

/// Attribute boost granted by a friendly NPC interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boost {
    /// Restores 10 points of health.
    Health,
    /// Grants 2 points of strength.
    Strength,
    /// Grants 2 points of magic.
    Magic,
}

impl Boost {
    /// Draws one of the three boosts uniformly.
    #[must_use]
    pub fn sample(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Boost::Health,
            1 => Boost::Strength,
            _ => Boost::Magic,
        }
    }

    /// Magnitude of the boost.
    #[must_use]
    pub const fn amount(&self) -> i32 {
        match self {
            Boost::Health => 10,
            Boost::Strength | Boost::Magic => 2,
        }
    }

    /// Stat label used in presentation summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Boost::Health => "health",
            Boost::Strength => "strength",
            Boost::Magic => "magic",
        }
    }

    /// Flavor line spoken by the friendly NPC granting the boost.
    #[must_use]
    pub const fn flavor_line(&self) -> &'static str {
        match self {
            Boost::Health => "Greetings, traveler! Your health increases.",
            Boost::Strength => "Beware of the dangers ahead! Your strength grows.",
            Boost::Magic => "You feel magical power surging through you. Your magic improves.",
        }
    }

    /// Applies the boost to the character's stats.
    pub fn apply(&self, character: &mut Character) {
        match self {
            Boost::Health => character.health += self.amount(),
            Boost::Strength => character.strength += self.amount(),
            Boost::Magic => character.magic += self.amount(),
        }
    }
}

/// Reason a movement request produced no position change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// The target tile lies outside the grid.
    OutOfBounds,
    /// The target tile is covered by a static obstacle.
    Obstacle,
}

/// Tagged result of one movement resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The move was rejected; the player did not change position.
    Blocked(BlockReason),
    /// The player stepped onto an empty tile.
    Moved(GridPos),
    /// The player stepped onto an end spot, winning the session.
    ReachedEnd(GridPos),
    /// A friendly NPC at the target tile granted a boost and stepped aside;
    /// the player occupies the vacated tile.
    FriendlyInteraction {
        /// Identifier of the friendly NPC that was consumed.
        npc: NpcId,
        /// Boost granted to the player.
        boost: Boost,
    },
    /// An enemy within the danger radius of the target tile forced a duel;
    /// the player did not change position.
    EnemyEncounter {
        /// Identifier of the triggering enemy NPC.
        npc: NpcId,
        /// Tile occupied by the triggering enemy.
        at: GridPos,
    },
}

/// Category of entity subject to grid placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A static obstacle covering a tile.
    Obstacle,
    /// A friendly NPC granting boosts.
    Friendly,
    /// An enemy NPC guarding its surroundings.
    Enemy,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Obstacle => "obstacle",
            EntityKind::Friendly => "friendly NPC",
            EntityKind::Enemy => "enemy NPC",
        })
    }
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested tile lies outside the grid.
    OutOfBounds,
    /// The requested tile collides with an existing entity.
    Occupied,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Covers a tile with a static obstacle.
    PlaceObstacle {
        /// Tile to cover.
        at: GridPos,
    },
    /// Places a friendly NPC on a free tile.
    PlaceFriendly {
        /// Tile the NPC should occupy.
        at: GridPos,
    },
    /// Places an enemy NPC on a free tile.
    PlaceEnemy {
        /// Tile the NPC should occupy.
        at: GridPos,
    },
    /// Moves the player cursor onto a tile a system already validated.
    MovePlayer {
        /// Tile the player should occupy.
        to: GridPos,
    },
    /// Removes a friendly NPC once its interaction completed.
    RemoveFriendly {
        /// Identifier of the NPC to remove.
        npc: NpcId,
    },
    /// Removes an enemy NPC once its duel concluded.
    RemoveEnemy {
        /// Identifier of the NPC to remove.
        npc: NpcId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a tile was covered by a static obstacle.
    ObstaclePlaced {
        /// Tile that was covered.
        at: GridPos,
    },
    /// Confirms that a friendly NPC joined its roster.
    FriendlyPlaced {
        /// Identifier assigned to the NPC by the world.
        npc: NpcId,
        /// Tile the NPC occupies.
        at: GridPos,
    },
    /// Confirms that an enemy NPC joined its roster.
    EnemyPlaced {
        /// Identifier assigned to the NPC by the world.
        npc: NpcId,
        /// Tile the NPC occupies.
        at: GridPos,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Category of entity requested for placement.
        kind: EntityKind,
        /// Tile provided in the placement request.
        at: GridPos,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that the player cursor moved between two tiles.
    PlayerMoved {
        /// Tile the player occupied before moving.
        from: GridPos,
        /// Tile the player occupies after the move.
        to: GridPos,
    },
    /// Confirms that a friendly NPC left its roster.
    FriendlyRemoved {
        /// Identifier of the removed NPC.
        npc: NpcId,
        /// Tile the NPC occupied.
        at: GridPos,
    },
    /// Confirms that an enemy NPC left its roster.
    EnemyRemoved {
        /// Identifier of the removed NPC.
        npc: NpcId,
        /// Tile the NPC occupied.
        at: GridPos,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn physical_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn magical_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn fresh(archetype: Archetype) -> Character {
        Character::new("Tester".to_owned(), archetype, Difficulty::Standard)
    }

    #[test]
    fn chebyshev_distance_matches_expectation() {
        let origin = GridPos::new(5, 5);
        assert_eq!(origin.chebyshev_distance(GridPos::new(6, 6)), 1);
        assert_eq!(origin.chebyshev_distance(GridPos::new(4, 5)), 1);
        assert_eq!(origin.chebyshev_distance(GridPos::new(7, 5)), 2);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn step_stops_at_the_coordinate_origin() {
        let corner = GridPos::new(0, 0);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Right), Some(GridPos::new(1, 0)));
        assert_eq!(corner.step(Direction::Down), Some(GridPos::new(0, 1)));
    }

    #[test]
    fn direction_tokens_parse_case_insensitively() {
        assert_eq!("W".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("s".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("a".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("D".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
    }

    #[test]
    fn unknown_direction_token_is_rejected() {
        let error = "x".parse::<Direction>().expect_err("token must be rejected");
        assert!(error.to_string().contains("unrecognized direction token"));
    }

    #[test]
    fn canonical_stat_table_matches_archetypes() {
        let knight = Archetype::Knight.base_stats(Difficulty::Standard);
        assert_eq!(
            (
                knight.health(),
                knight.strength(),
                knight.magic(),
                knight.movement_range()
            ),
            (120, 15, 5, 2)
        );
        let wizard = Archetype::Wizard.base_stats(Difficulty::Standard);
        assert_eq!(
            (wizard.health(), wizard.strength(), wizard.magic()),
            (80, 5, 20)
        );
        let deprived = Archetype::Deprived.base_stats(Difficulty::Standard);
        assert_eq!(
            (deprived.health(), deprived.strength(), deprived.magic()),
            (100, 10, 10)
        );
        let enemy = Archetype::Enemy.base_stats(Difficulty::Standard);
        assert_eq!((enemy.health(), enemy.movement_range()), (100, 2));
    }

    #[test]
    fn hard_tier_reduces_health_pools_only() {
        let wizard = Archetype::Wizard.base_stats(Difficulty::Hard);
        assert_eq!(
            (wizard.health(), wizard.strength(), wizard.magic()),
            (60, 5, 20)
        );
        assert_eq!(Archetype::Deprived.base_stats(Difficulty::Hard).health(), 80);
        assert_eq!(Archetype::Knight.base_stats(Difficulty::Hard).health(), 120);
    }

    #[test]
    fn knight_slash_is_deterministic() {
        let knight = fresh(Archetype::Knight);
        let mut defender = fresh(Archetype::Enemy);
        let report = knight.attack(&mut defender, &mut magical_rng());
        assert_eq!(report.kind(), AttackKind::Physical);
        assert_eq!(report.damage(), 15);
        assert!(report.description().contains("slashes"));
        assert_eq!(defender.health(), 85);
    }

    #[test]
    fn wizard_fireball_is_deterministic() {
        let wizard = fresh(Archetype::Wizard);
        let mut defender = fresh(Archetype::Enemy);
        let report = wizard.attack(&mut defender, &mut physical_rng());
        assert_eq!(report.kind(), AttackKind::Magical);
        assert_eq!(report.damage(), 20);
        assert_eq!(defender.health(), 80);
    }

    #[test]
    fn deprived_attack_splits_on_the_coin_flip() {
        let deprived = fresh(Archetype::Deprived);
        let mut defender = fresh(Archetype::Enemy);
        let physical = deprived.attack(&mut defender, &mut physical_rng());
        assert_eq!(physical.kind(), AttackKind::Physical);
        let magical = deprived.attack(&mut defender, &mut magical_rng());
        assert_eq!(magical.kind(), AttackKind::Magical);
        assert_eq!(defender.health(), 80);
    }

    #[test]
    fn enemy_attack_splits_on_the_coin_flip() {
        let enemy = fresh(Archetype::Enemy);
        let mut defender = fresh(Archetype::Knight);
        let report = enemy.attack(&mut defender, &mut magical_rng());
        assert_eq!(report.kind(), AttackKind::Magical);
        assert!(report.description().contains("magical attack"));
    }

    #[test]
    fn attack_may_drive_health_below_zero() {
        let knight = fresh(Archetype::Knight);
        let mut defender = fresh(Archetype::Enemy);
        for _ in 0..7 {
            let _ = knight.attack(&mut defender, &mut magical_rng());
        }
        assert_eq!(defender.health(), -5);
        assert!(defender.is_defeated());
        assert!(defender.profile().contains("Health: 0"));
    }

    #[test]
    fn knight_guard_raises_strength() {
        let mut knight = fresh(Archetype::Knight);
        let guard = knight.defend().expect("knights carry a shield stance");
        assert_eq!(guard.stat(), GuardedStat::Strength);
        assert_eq!(knight.strength(), 17);
        knight.withdraw_guard(&guard);
        assert_eq!(knight.strength(), 15);
    }

    #[test]
    fn wizard_guard_raises_magic() {
        let mut wizard = fresh(Archetype::Wizard);
        let guard = wizard.defend().expect("wizards carry a warding stance");
        assert_eq!(guard.stat(), GuardedStat::Magic);
        assert_eq!(guard.bonus(), 3);
        assert_eq!(wizard.magic(), 23);
    }

    #[test]
    fn deprived_has_no_guard() {
        let mut deprived = fresh(Archetype::Deprived);
        assert_eq!(deprived.defend(), None);
        assert_eq!(deprived.strength(), 10);
    }

    #[test]
    fn strength_boost_on_wizard_matches_scenario() {
        let mut wizard = fresh(Archetype::Wizard);
        Boost::Strength.apply(&mut wizard);
        assert_eq!(wizard.strength(), 7);
        assert_eq!(wizard.health(), 80);
        assert_eq!(wizard.magic(), 20);
    }

    #[test]
    fn boost_amounts_match_the_interaction_table() {
        assert_eq!(Boost::Health.amount(), 10);
        assert_eq!(Boost::Strength.amount(), 2);
        assert_eq!(Boost::Magic.amount(), 2);
    }

    #[test]
    fn archetype_names_parse_and_random_resolves_to_playable() {
        assert_eq!(
            "Knight".parse::<ArchetypeChoice>(),
            Ok(ArchetypeChoice::Named(Archetype::Knight))
        );
        assert_eq!(
            "random".parse::<ArchetypeChoice>(),
            Ok(ArchetypeChoice::Random)
        );
        assert!("enemy".parse::<ArchetypeChoice>().is_err());

        let drawn = ArchetypeChoice::Random.resolve(&mut magical_rng());
        assert!(Archetype::PLAYABLE.contains(&drawn));
    }

    #[test]
    fn action_menus_match_archetypes() {
        let knight = Archetype::Knight.action_menu();
        assert_eq!(knight[0].label(), "Sword Slash");
        assert_eq!(knight[1].action(), DuelAction::Defend);

        let deprived = Archetype::Deprived.action_menu();
        assert_eq!(deprived.len(), 2);
        assert!(deprived
            .iter()
            .all(|option| option.action() == DuelAction::Attack));

        assert_eq!(Archetype::Enemy.action_menu().len(), 1);
    }

    #[test]
    fn contracts_serialize_for_adapters() {
        assert_eq!(
            serde_json::to_string(&GridPos::new(3, 4)).expect("serialize"),
            "{\"column\":3,\"row\":4}"
        );
        assert_eq!(
            serde_json::to_string(&Boost::Strength).expect("serialize"),
            "\"Strength\""
        );
    }
}
