#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts an Arcane Pathways session.
//!
//! The adapter owns every blocking call: it parses arguments, prompts for
//! the character, reads movement tokens, renders the grid, and walks the
//! player through duel menus. All decisions stay in the core crates; this
//! binary only ferries commands, events and outcomes between them and the
//! terminal.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use arcane_pathways_core::{
    Archetype, ArchetypeChoice, BlockReason, Character, Command, Difficulty, Direction, GridPos,
    NpcId, Outcome,
};
use arcane_pathways_system_bootstrap::Bootstrap;
use arcane_pathways_system_duel::{Duel, DuelState};
use arcane_pathways_system_encounter::Encounter;
use arcane_pathways_world::{self as world, query, GridConfig, World};

/// Command-line options accepted by the Arcane Pathways binary.
#[derive(Debug, Parser)]
#[command(name = "arcane-pathways", about = "Tactical grid adventure for the terminal")]
struct Args {
    /// Seed for the session generator; drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Character archetype: deprived, knight, wizard or random.
    #[arg(long)]
    archetype: Option<String>,
    /// Character name.
    #[arg(long)]
    name: Option<String>,
    /// Play with the harsher stat table.
    #[arg(long)]
    hard: bool,
    /// Echo every world event for session tracing.
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let bootstrap = Bootstrap::default();
    let difficulty = if args.hard {
        Difficulty::Hard
    } else {
        Difficulty::Standard
    };

    let mut world = World::generate(&GridConfig::default(), &mut rng)
        .context("failed to generate the adventure grid")?;
    writeln!(out, "{}", bootstrap.welcome_banner(&world))?;

    let archetype = choose_archetype(args.archetype, &mut input, &mut out, &mut rng)?;
    let name = choose_name(args.name, &mut input, &mut out)?;
    let mut player = Character::new(name, archetype, difficulty);
    writeln!(out, "{}", bootstrap.greeting(&player))?;
    writeln!(out, "\n{}\n", bootstrap.profile(&player))?;
    writeln!(
        out,
        "Move your character with: W (up), S (down), A (left), D (right); Q quits."
    )?;

    let encounter = Encounter::default();
    loop {
        render_map(&mut out, &world)?;
        let Some(line) = prompt(&mut input, &mut out, "Enter your move: ")? else {
            break;
        };
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        if token.eq_ignore_ascii_case("q") {
            break;
        }
        let direction = match token.parse::<Direction>() {
            Ok(direction) => direction,
            Err(error) => {
                writeln!(out, "{error}")?;
                continue;
            }
        };

        let mut commands = Vec::new();
        let outcome = encounter.resolve(
            direction,
            &mut player,
            query::terrain_view(&world),
            query::npc_view(&world),
            &mut rng,
            &mut commands,
        );
        pump(&mut world, commands, args.trace, &mut out)?;

        match outcome {
            Outcome::Blocked(reason) => writeln!(out, "Invalid move! {}", block_notice(reason))?,
            Outcome::Moved(_) => writeln!(out, "{}\n", bootstrap.profile(&player))?,
            Outcome::ReachedEnd(_) => {
                writeln!(out, "Congratulations! You have defeated Arcane Pathways!")?;
                return Ok(());
            }
            Outcome::FriendlyInteraction { boost, .. } => {
                writeln!(
                    out,
                    "{} (+{} {})",
                    boost.flavor_line(),
                    boost.amount(),
                    boost.label()
                )?;
                writeln!(out, "{}\n", bootstrap.profile(&player))?;
            }
            Outcome::EnemyEncounter { npc, .. } => {
                let survived = run_duel(
                    npc,
                    &mut player,
                    &mut world,
                    &mut input,
                    &mut out,
                    &mut rng,
                    difficulty,
                    args.trace,
                )?;
                if !survived {
                    writeln!(out, "Game over.")?;
                    return Ok(());
                }
                writeln!(out, "{}\n", bootstrap.profile(&player))?;
            }
        }
    }
    Ok(())
}

/// Resolves the archetype from the argument or an interactive prompt,
/// falling back to Deprived for unrecognized names.
fn choose_archetype(
    arg: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
    rng: &mut impl Rng,
) -> Result<Archetype> {
    let token = match arg {
        Some(token) => token,
        None => prompt(
            input,
            out,
            "Choose your character archetype (Deprived, Knight, Wizard, or Random): ",
        )?
        .unwrap_or_default(),
    };
    let choice = match token.parse::<ArchetypeChoice>() {
        Ok(choice) => choice,
        Err(error) => {
            writeln!(out, "{error}")?;
            writeln!(out, "Invalid choice! Defaulting to Deprived.")?;
            ArchetypeChoice::Named(Archetype::Deprived)
        }
    };
    Ok(choice.resolve(rng))
}

/// Resolves the character name from the argument or an interactive prompt.
fn choose_name(
    arg: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<String> {
    let name = match arg {
        Some(name) => name,
        None => prompt(input, out, "Enter your character name: ")?.unwrap_or_default(),
    };
    let name = name.trim().to_owned();
    if name.is_empty() {
        return Ok("Adventurer".to_owned());
    }
    Ok(name)
}

/// Writes a prompt and reads one line; `None` signals end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Applies a command batch to the world, optionally echoing the events.
fn pump(
    world: &mut World,
    commands: Vec<Command>,
    trace: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    if trace {
        for event in &events {
            writeln!(out, "[event] {event:?}")?;
        }
    }
    Ok(())
}

/// Draws the grid. Enemy positions are deliberately not drawn.
fn render_map(out: &mut impl Write, world: &World) -> Result<()> {
    let terrain = query::terrain_view(world);
    let npcs = query::npc_view(world);
    let (columns, rows) = terrain.dimensions();
    for row in 0..rows {
        for column in 0..columns {
            let tile = GridPos::new(column, row);
            let glyph = if terrain.player_position() == tile {
                '@'
            } else if npcs.friendly_at(tile).is_some() {
                'F'
            } else if terrain.end_spot_at(tile) {
                'E'
            } else if terrain.obstacle_at(tile) {
                '#'
            } else {
                '.'
            };
            write!(out, "{glyph}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn block_notice(reason: BlockReason) -> &'static str {
    match reason {
        BlockReason::OutOfBounds => "The map ends there.",
        BlockReason::Obstacle => "The way is blocked.",
    }
}

/// Walks the player through a duel and settles the enemy's removal.
/// Returns whether the player survived.
fn run_duel(
    npc: NpcId,
    player: &mut Character,
    world: &mut World,
    input: &mut impl BufRead,
    out: &mut impl Write,
    rng: &mut impl Rng,
    difficulty: Difficulty,
    trace: bool,
) -> Result<bool> {
    let enemy = Character::new("Goblin".to_owned(), Archetype::Enemy, difficulty);
    let mut events = Vec::new();
    let mut duel = Duel::engage(npc, enemy, player, rng, &mut events);
    for event in &events {
        writeln!(out, "{event}")?;
    }

    while !duel.state().is_terminal() {
        let selection = prompt_action(player, input, out)?;
        let mut turn_events = Vec::new();
        duel.submit_action(player, selection, rng, &mut turn_events);
        for event in &turn_events {
            writeln!(out, "{event}")?;
        }
    }

    if let Some(command) = duel.settlement() {
        pump(world, vec![command], trace, out)?;
    }
    Ok(duel.state() == DuelState::Victory)
}

/// Prompts for a duel action selection; `None` forfeits the duel.
fn prompt_action(
    player: &Character,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<usize>> {
    loop {
        writeln!(out, "Choose your action:")?;
        for (index, option) in player.archetype().action_menu().iter().enumerate() {
            writeln!(out, "  {}) {}", index + 1, option.label())?;
        }
        let Some(line) = prompt(input, out, "Your turn: ")? else {
            return Ok(None);
        };
        let token = line.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match token.parse::<usize>() {
            Ok(number) if number >= 1 => return Ok(Some(number - 1)),
            _ => writeln!(
                out,
                "Pick one of the numbered actions, or press Enter to forfeit."
            )?,
        }
    }
}
