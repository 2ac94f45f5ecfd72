use arcane_pathways_core::{Archetype, Character, Command, Difficulty, NpcId};
use arcane_pathways_system_duel::{Duel, DuelEvent, DuelState, TurnSide};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn knight() -> Character {
    Character::new("Arthur".to_owned(), Archetype::Knight, Difficulty::Standard)
}

fn wizard() -> Character {
    Character::new("Merla".to_owned(), Archetype::Wizard, Difficulty::Standard)
}

fn deprived() -> Character {
    Character::new("Wretch".to_owned(), Archetype::Deprived, Difficulty::Standard)
}

fn goblin() -> Character {
    Character::new("Goblin".to_owned(), Archetype::Enemy, Difficulty::Standard)
}

/// Coin flips land on the low side: the player wins the opening flip and
/// every split attack resolves physically.
fn physical_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Coin flips land on the high side: the enemy wins the opening flip and
/// every split attack resolves magically.
fn magical_rng() -> StepRng {
    StepRng::new(0, 0)
}

#[test]
fn knight_overwhelms_the_enemy_within_ten_turns() {
    let mut rng = physical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(1), goblin(), &mut player, &mut rng, &mut events);
    assert!(matches!(
        events.first(),
        Some(DuelEvent::Engaged {
            first: TurnSide::Player
        })
    ));

    let mut player_turns = 0;
    while !duel.state().is_terminal() {
        let mut turn_events = Vec::new();
        duel.submit_action(&mut player, Some(0), &mut rng, &mut turn_events);
        player_turns += 1;
        assert!(
            player_turns <= 10,
            "the duel must conclude within ten player turns"
        );
    }

    assert_eq!(duel.state(), DuelState::Victory);
    assert_eq!(player_turns, 7, "seven slashes exhaust 100 health");
    assert_eq!(player.health(), 60, "six counterattacks at 10 damage each");
    assert!(duel.enemy().is_defeated());
}

#[test]
fn enemy_wins_the_opening_flip_and_strikes_immediately() {
    let mut rng = magical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let duel = Duel::engage(NpcId::new(4), goblin(), &mut player, &mut rng, &mut events);

    assert_eq!(duel.state(), DuelState::PlayerTurn);
    assert_eq!(player.health(), 110);
    assert!(matches!(
        events.as_slice(),
        [
            DuelEvent::Engaged {
                first: TurnSide::Enemy
            },
            DuelEvent::ActionResolved {
                side: TurnSide::Enemy,
                damage: 10,
                defender_health: 110,
                ..
            },
        ]
    ));
}

#[test]
fn a_wizard_who_only_guards_is_worn_down_to_defeat() {
    let mut rng = magical_rng();
    let mut player = wizard();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(2), goblin(), &mut player, &mut rng, &mut events);
    assert_eq!(player.health(), 70, "the enemy opens the duel");

    let mut guard_turns = 0;
    while !duel.state().is_terminal() {
        let mut turn_events = Vec::new();
        duel.submit_action(&mut player, Some(1), &mut rng, &mut turn_events);
        guard_turns += 1;
        assert!(guard_turns <= 10, "defeat must arrive within ten guards");
    }

    assert_eq!(duel.state(), DuelState::Defeat);
    assert_eq!(guard_turns, 7);
    assert!(player.is_defeated());
    assert_eq!(
        player.magic(),
        20,
        "every warding bonus is withdrawn at conclusion"
    );
}

#[test]
fn forfeit_concludes_and_settles_enemy_removal() {
    let mut rng = physical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(7), goblin(), &mut player, &mut rng, &mut events);
    assert_eq!(duel.settlement(), None, "no settlement before conclusion");

    let mut turn_events = Vec::new();
    duel.submit_action(&mut player, None, &mut rng, &mut turn_events);

    assert_eq!(duel.state(), DuelState::Forfeit);
    assert!(turn_events.contains(&DuelEvent::Concluded {
        state: DuelState::Forfeit
    }));
    assert_eq!(
        duel.settlement(),
        Some(Command::RemoveEnemy { npc: NpcId::new(7) })
    );
    assert_eq!(player.health(), 120, "no further turns resolve after a forfeit");
}

#[test]
fn submissions_after_conclusion_are_ignored() {
    let mut rng = physical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(9), goblin(), &mut player, &mut rng, &mut events);
    duel.submit_action(&mut player, None, &mut rng, &mut Vec::new());

    let enemy_health = duel.enemy().health();
    let mut late_events = Vec::new();
    duel.submit_action(&mut player, Some(0), &mut rng, &mut late_events);

    assert_eq!(
        late_events,
        vec![DuelEvent::Ignored {
            state: DuelState::Forfeit
        }]
    );
    assert_eq!(duel.enemy().health(), enemy_health);
}

#[test]
fn shield_block_bonus_is_withdrawn_at_conclusion() {
    let mut rng = physical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(3), goblin(), &mut player, &mut rng, &mut events);

    let mut turn_events = Vec::new();
    duel.submit_action(&mut player, Some(1), &mut rng, &mut turn_events);
    assert!(matches!(
        turn_events.first(),
        Some(DuelEvent::Guarded {
            side: TurnSide::Player,
            ..
        })
    ));
    assert_eq!(player.strength(), 17);
    assert_eq!(player.health(), 110, "the enemy still answers a guard");

    duel.submit_action(&mut player, None, &mut rng, &mut Vec::new());
    assert_eq!(player.strength(), 15);
}

#[test]
fn deprived_menu_entries_share_the_randomized_attack() {
    let mut rng = physical_rng();
    let mut player = deprived();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(5), goblin(), &mut player, &mut rng, &mut events);

    for selection in [Some(1), Some(0)] {
        let mut turn_events = Vec::new();
        duel.submit_action(&mut player, selection, &mut rng, &mut turn_events);
        assert!(
            matches!(
                turn_events.first(),
                Some(DuelEvent::ActionResolved {
                    side: TurnSide::Player,
                    damage: 10,
                    ..
                })
            ),
            "both menu entries resolve the same attack, got {turn_events:?}"
        );
    }
}

#[test]
fn out_of_range_selection_falls_back_to_the_primary_attack() {
    let mut rng = physical_rng();
    let mut player = knight();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(6), goblin(), &mut player, &mut rng, &mut events);

    let mut turn_events = Vec::new();
    duel.submit_action(&mut player, Some(9), &mut rng, &mut turn_events);
    assert!(matches!(
        turn_events.first(),
        Some(DuelEvent::ActionResolved {
            side: TurnSide::Player,
            damage: 15,
            ..
        })
    ));
}

#[test]
fn duels_terminate_under_a_seeded_generator() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut player = deprived();
    let mut events = Vec::new();
    let mut duel = Duel::engage(NpcId::new(8), goblin(), &mut player, &mut rng, &mut events);

    let mut exchanges = 0;
    while !duel.state().is_terminal() {
        duel.submit_action(&mut player, Some(0), &mut rng, &mut Vec::new());
        exchanges += 1;
        assert!(
            exchanges <= 64,
            "every exchange removes at least ten health, so the duel must end"
        );
    }
    assert!(matches!(
        duel.state(),
        DuelState::Victory | DuelState::Defeat
    ));
}
