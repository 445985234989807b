use game_core::{
    ActorId, AttackMethod, Behavior, Cell, Command, DiscardEvents, Direction, EnemySpec, GameConfig,
    GameEnv, GameEvent, GameState, GameStatus, HeroSpec, LevelDefinition, PcgRng, Position,
    RoundError, Spell, Treasure, TurnEngine, Weapon,
};

fn hero(row: i32, col: i32) -> HeroSpec {
    HeroSpec {
        max_health: 20,
        max_mana: 2,
        mana_regen: 0,
        fist_damage: 1,
        start_position: Position::new(row, col),
        name: "Ash".into(),
        title: "Bold".into(),
        weapon: Some(Weapon::new("sword", 5)),
        spell: Some(Spell::new("bolt", 6, 3, 4)),
    }
}

fn enemy(row: i32, col: i32, behavior: Behavior) -> EnemySpec {
    EnemySpec {
        max_health: 10,
        max_mana: 0,
        mana_regen: 0,
        fist_damage: 2,
        start_position: Position::new(row, col),
        behavior,
        weapon: None,
        spell: None,
    }
}

fn level(rows: u32, cols: u32, hero: HeroSpec, enemies: Vec<EnemySpec>) -> LevelDefinition {
    LevelDefinition {
        rows,
        cols,
        hero,
        enemies,
        treasure_catalog: Vec::new(),
        obstacle_positions: Vec::new(),
        treasure_chest_positions: Vec::new(),
        gateway_position: None,
    }
}

struct Game {
    state: GameState,
    config: GameConfig,
    events: Vec<GameEvent>,
}

impl Game {
    fn load(level: &LevelDefinition) -> Self {
        let config = GameConfig::with_seed(7);
        let state = GameState::from_level(level, &config).expect("level should load");
        Self {
            state,
            config,
            events: Vec::new(),
        }
    }

    fn play(&mut self, command: &str) -> Result<GameStatus, RoundError> {
        let command: Command = command.parse().expect("valid command");
        let mut env = GameEnv::new(&PcgRng, &mut self.events);
        TurnEngine::new(&mut self.state, &self.config).execute_round(command, &mut env)
    }
}

#[test]
fn melee_hit_leaves_the_enemy_in_place() {
    let mut game = Game::load(&level(1, 3, hero(0, 0), vec![enemy(0, 1, Behavior::Friendly)]));

    assert_eq!(game.play("weapon right"), Ok(GameStatus::Playing));

    let goblin = game.state.actor(ActorId(1)).expect("enemy exists");
    assert_eq!(goblin.health(), 5);
    assert_eq!(game.state.map.get(Position::new(0, 1)), Ok(Cell::Actor(ActorId(1))));
}

#[test]
fn unaffordable_spell_still_consumes_the_turn() {
    let mut game = Game::load(&level(1, 4, hero(0, 0), vec![enemy(0, 3, Behavior::Friendly)]));

    assert_eq!(game.play("spell right"), Ok(GameStatus::Playing));

    assert_eq!(game.state.hero().mana(), 2);
    assert_eq!(game.state.actor(ActorId(1)).map(|a| a.health()), Some(10));
    assert!(
        !game
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::SpellPath { .. }))
    );
    assert_eq!(game.state.turn.round, 1);
}

#[test]
fn stepping_on_the_gateway_wins_before_enemies_act() {
    let mut definition = level(1, 4, hero(0, 1), vec![enemy(0, 3, Behavior::Aggressive)]);
    definition.gateway_position = Some(Position::new(0, 2));
    let mut game = Game::load(&definition);

    assert_eq!(game.play("right"), Ok(GameStatus::Won));
    assert_eq!(game.state.hero().health(), 20);
    assert_eq!(game.state.turn.nonce, 1);
    assert_eq!(
        game.events.last(),
        Some(&GameEvent::RoundCompleted {
            round: 1,
            status: GameStatus::Won
        })
    );
    assert_eq!(
        game.play("left"),
        Err(RoundError::GameOver(GameStatus::Won))
    );
}

#[test]
fn hero_death_loses_the_game() {
    let mut definition = level(1, 2, hero(0, 0), vec![enemy(0, 1, Behavior::Aggressive)]);
    definition.hero.max_health = 3;
    let mut game = Game::load(&definition);

    assert_eq!(game.play("up"), Ok(GameStatus::Playing));
    assert_eq!(game.play("up"), Ok(GameStatus::Lost));
    assert_eq!(game.state.map.get(Position::new(0, 0)), Ok(Cell::Walkable));
    assert!(matches!(game.play("up"), Err(RoundError::GameOver(GameStatus::Lost))));
}

#[test]
fn enemy_loses_the_trail_after_reaching_last_seen() {
    let mut game = Game::load(&level(3, 5, hero(1, 1), vec![enemy(1, 4, Behavior::Aggressive)]));
    let enemy_position = |state: &GameState| state.actor(ActorId(1)).map(|a| a.position);
    let last_seen = |state: &GameState| {
        state
            .actor(ActorId(1))
            .and_then(|a| a.mind())
            .and_then(|m| m.last_seen)
    };

    // spotted along row 1, out of reach
    game.play("fist up").unwrap();
    assert_eq!(last_seen(&game.state), Some(Position::new(1, 1)));
    assert_eq!(enemy_position(&game.state), Some(Position::new(1, 3)));

    // hero leaves the row; the enemy keeps walking to the record
    game.play("up").unwrap();
    assert_eq!(enemy_position(&game.state), Some(Position::new(1, 2)));
    game.play("fist down").unwrap();
    assert_eq!(enemy_position(&game.state), Some(Position::new(1, 1)));
    assert_eq!(last_seen(&game.state), Some(Position::new(1, 1)));

    game.play("left").unwrap();
    assert_eq!(last_seen(&game.state), None);
    assert_eq!(enemy_position(&game.state), Some(Position::new(1, 1)));
    assert_eq!(game.state.hero().health(), 20);
}

#[test]
fn chest_draws_are_uniform_and_repeatable() {
    let catalog = vec![
        Treasure::HealthPotion { amount: 1 },
        Treasure::ManaPotion { amount: 1 },
        Treasure::Weapon(Weapon::new("axe", 7)),
    ];
    let mut counts = [0usize; 3];

    for seed in 0..3_000u64 {
        let mut definition = level(1, 2, hero(0, 0), Vec::new());
        definition.treasure_catalog = catalog.clone();
        definition.treasure_chest_positions = vec![Position::new(0, 1)];
        let config = GameConfig::with_seed(seed);
        let mut state = GameState::from_level(&definition, &config).unwrap();

        let mut events = Vec::new();
        let mut env = GameEnv::new(&PcgRng, &mut events);
        TurnEngine::new(&mut state, &config)
            .execute_round(Command::Move(Direction::Right), &mut env)
            .unwrap();

        let looted = events.iter().find_map(|event| match event {
            GameEvent::TreasureLooted { treasure, .. } => Some(treasure),
            _ => None,
        });
        let index = catalog
            .iter()
            .position(|t| Some(t) == looted)
            .expect("a catalog item was drawn");
        counts[index] += 1;
    }

    for count in counts {
        assert!((850..=1150).contains(&count), "skewed draw: {counts:?}");
    }
}

#[test]
fn same_seed_and_commands_replay_identically() {
    let mut definition = level(5, 5, hero(0, 0), vec![enemy(4, 4, Behavior::Rabid)]);
    definition.treasure_catalog = vec![Treasure::HealthPotion { amount: 1 }];
    definition.treasure_chest_positions = vec![Position::new(2, 2)];

    let script = ["down", "right", "down", "fist left", "spell up", "right"];
    let run = || {
        let mut game = Game::load(&definition);
        for command in script {
            game.play(command).unwrap();
        }
        (game.state, game.events)
    };

    assert_eq!(run(), run());
}

#[test]
fn attacking_with_nothing_in_range_is_a_no_op() {
    let mut game = Game::load(&level(2, 2, hero(0, 0), Vec::new()));
    let mut env_events = Vec::new();
    let mut env = GameEnv::new(&PcgRng, &mut env_events);
    let before = game.state.map.clone();

    TurnEngine::new(&mut game.state, &game.config)
        .execute_round(Command::Attack(AttackMethod::Weapon, Direction::Down), &mut env)
        .unwrap();

    assert_eq!(game.state.map, before);
    assert_eq!(game.state.hero().health(), 20);

    let mut sink = DiscardEvents;
    let mut env = GameEnv::new(&PcgRng, &mut sink);
    let status = TurnEngine::new(&mut game.state, &game.config)
        .execute_round(Command::Move(Direction::Up), &mut env)
        .unwrap();
    assert_eq!(status, GameStatus::Playing);
}
