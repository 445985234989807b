use game_content::LevelLoader;
use game_core::{
    ActorId, Behavior, Command, Direction, EnemySpec, ErrorSeverity, FixedRng, GameConfig,
    GameError, GameEvent, GameStatus, HeroSpec, LevelDefinition, Position, Treasure, Weapon,
};
use runtime::{ChannelCommandProvider, GameSession, RuntimeError, ScriptedCommandProvider};

/// 1x5 corridor: hero, gateway two steps right, a friendly enemy at the end.
fn corridor() -> LevelDefinition {
    LevelDefinition {
        rows: 1,
        cols: 5,
        hero: HeroSpec {
            max_health: 10,
            max_mana: 0,
            mana_regen: 0,
            fist_damage: 1,
            start_position: Position::new(0, 0),
            name: "Ash".into(),
            title: "Bold".into(),
            weapon: None,
            spell: None,
        },
        enemies: vec![EnemySpec {
            max_health: 4,
            max_mana: 0,
            mana_regen: 0,
            fist_damage: 1,
            start_position: Position::new(0, 4),
            behavior: Behavior::Friendly,
            weapon: None,
            spell: None,
        }],
        treasure_catalog: vec![Treasure::Weapon(Weapon::new("axe", 9))],
        obstacle_positions: Vec::new(),
        treasure_chest_positions: vec![Position::new(0, 1)],
        gateway_position: Some(Position::new(0, 2)),
    }
}

#[tokio::test]
async fn scripted_session_runs_to_victory() {
    let provider = ScriptedCommandProvider::from_script("right\nright\n").unwrap();
    let mut session = GameSession::new(corridor(), GameConfig::default(), provider).unwrap();
    let mut events = session.subscribe();

    assert_eq!(session.run().await.unwrap(), GameStatus::Won);
    assert_eq!(session.state().hero().weapon.name, "axe");
    assert_eq!(session.state().turn.round, 2);

    let first = events.recv().await.unwrap();
    assert!(matches!(
        first,
        GameEvent::TreasureLooted {
            actor: ActorId::HERO,
            ..
        }
    ));

    let error = session.step().await.unwrap_err();
    assert!(error.is_game_over());
    assert_eq!(error.final_status(), Some(GameStatus::Won));
    assert_eq!(error.error_code(), "GAME_OVER");
    assert_eq!(error.severity().as_str(), "validation");
}

#[tokio::test]
async fn exhausted_script_is_an_error() {
    let provider = ScriptedCommandProvider::new([Command::Move(Direction::Up)]);
    let mut session = GameSession::new(corridor(), GameConfig::default(), provider).unwrap();

    let error = session.run().await.unwrap_err();
    assert!(matches!(error, RuntimeError::ScriptExhausted { served: 1 }));
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
    assert_eq!(error.error_code(), "SCRIPT_EXHAUSTED");
    assert_eq!(session.status(), GameStatus::Playing);
}

#[tokio::test]
async fn reset_restores_the_initial_state() {
    let provider = ScriptedCommandProvider::from_script("right\nright\n").unwrap();
    let mut session = GameSession::new(corridor(), GameConfig::default(), provider)
        .unwrap()
        .with_rng(FixedRng(0));
    let initial = session.state().clone();

    session.run().await.unwrap();
    assert_ne!(session.state(), &initial);

    session.reset().unwrap();
    assert_eq!(session.state(), &initial);
    assert_eq!(session.provider_mut().remaining(), 0);
}

#[tokio::test]
async fn channel_provider_feeds_commands_as_they_arrive() {
    let (tx, provider) = ChannelCommandProvider::channel(4);
    let mut session = GameSession::new(corridor(), GameConfig::default(), provider).unwrap();

    tx.send(Command::Move(Direction::Right)).await.unwrap();
    assert_eq!(session.step().await.unwrap(), GameStatus::Playing);
    assert_eq!(session.state().hero().position, Position::new(0, 1));

    drop(tx);
    assert!(matches!(
        session.step().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test]
async fn malformed_levels_are_rejected() {
    let mut level = corridor();
    level.gateway_position = Some(Position::new(0, 1));
    let provider = ScriptedCommandProvider::default();

    let error = GameSession::new(level, GameConfig::default(), provider)
        .err()
        .expect("gateway on a chest is rejected");
    assert!(matches!(error, RuntimeError::InitialState(_)));
}

#[tokio::test]
async fn bundled_level_survives_a_few_rounds() {
    let level = LevelLoader::builtin().unwrap().remove(0);
    let provider = ScriptedCommandProvider::from_script("down\ndown\nright\nfist up\n").unwrap();
    let mut session = GameSession::new(level, GameConfig::with_seed(3), provider).unwrap();

    for _ in 0..4 {
        session.step().await.unwrap();
    }
    assert_eq!(session.state().turn.round, 4);
    assert!(session.state().hero().is_alive());
}
