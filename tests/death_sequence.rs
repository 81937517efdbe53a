mod common;

use candysnek::{Candy, Cue, Direction, GameConfig, Phase, Point, Status, TimerEvent};
use common::{boxed_snake, game_with, ms};

fn doomed_game(tolerance: u32) -> candysnek::GameController<common::RecordingView> {
    let config = GameConfig {
        collision_tolerance: tolerance,
        ..common::config()
    };
    let mut game = game_with(config);
    let engine = game.engine_mut();
    engine.set_snake(boxed_snake(1));
    engine.set_score(27);
    engine.set_candies(vec![Candy::new(Point::new(8, 8), 2)]);
    game
}

#[test]
fn second_consecutive_block_kills_with_tolerance_one() {
    let mut game = doomed_game(1);
    game.steer(Direction::Up);

    game.step().unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert!(game.engine().snake().is_alive());
    let scenes = game.view().scenes;

    game.step().unwrap();
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(!game.engine().snake().is_alive());
    assert!(!game.view().alive);
    assert_eq!(game.view().scenes, scenes + 1);
    assert_eq!(game.view().cues.last(), Some(&Cue::GameOver));
}

#[test]
fn zero_tolerance_dies_on_the_first_block() {
    let mut game = doomed_game(0);
    game.steer(Direction::Up);
    game.step().unwrap();
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn death_replaces_the_frame_clock() {
    let mut game = doomed_game(0);
    game.steer(Direction::Up);
    game.step().unwrap();

    assert_eq!(game.timeline().len(), 1);
    assert!(game.timeline().contains(|e| *e == TimerEvent::TrimTail));
    assert!(!game.timeline().contains(|e| *e == TimerEvent::Frame));

    // Input and pause have no effect while the death sequence runs.
    game.steer(Direction::Left);
    game.pause();
    game.resume();
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.timeline().len(), 1);
}

#[test]
fn tail_shrinks_to_the_head_then_the_snake_returns() {
    let mut game = doomed_game(0);
    let high_score_before = game.high_score();
    game.steer(Direction::Up);
    game.step().unwrap();
    let died_at = game.now();

    // First trim waits ten frames, the rest come every quarter frame.
    assert_eq!(game.step().unwrap(), Some(TimerEvent::TrimTail));
    assert_eq!(game.now(), died_at + ms(1000));
    assert_eq!(game.engine().snake().len(), 7);
    assert_eq!(game.view().snake.len(), 7);

    for expected_len in (1..7).rev() {
        assert_eq!(game.step().unwrap(), Some(TimerEvent::TrimTail));
        assert_eq!(game.engine().snake().len(), expected_len);
    }
    assert_eq!(game.now(), died_at + ms(1000) + ms(25) * 6);

    // One more trim finds only the head and schedules the resurrection.
    assert_eq!(game.step().unwrap(), Some(TimerEvent::TrimTail));
    assert_eq!(game.phase(), Phase::GameOver);
    let trimmed_at = game.now();

    assert_eq!(game.step().unwrap(), Some(TimerEvent::Resurrect));
    assert_eq!(game.now(), trimmed_at + ms(1000));
    assert_eq!(game.phase(), Phase::Ready);
    assert!(game.timeline().is_empty());

    let engine = game.engine();
    assert!(engine.snake().is_alive());
    assert_eq!(engine.snake().len(), 1);
    assert_eq!(engine.snake().head(), Point::new(1, 1));
    assert_eq!(engine.snake().growth_pending(), 0);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.high_score(), high_score_before);
    assert_eq!(engine.round().count, 0);
    assert_eq!(engine.round().started_at, game.now());
    assert_eq!(engine.candies().len(), 4);
    assert!(game.view().alive);
    assert_eq!(game.view().score.0, 0);
}

#[test]
fn high_score_survives_resurrection() {
    let mut game = doomed_game(0);
    game.engine_mut()
        .set_snake(candysnek::Snake::new(Point::new(7, 8), Direction::Right, 0));
    game.steer(Direction::Right);
    game.step().unwrap();
    assert_eq!(game.high_score(), 27);

    game.engine_mut().set_snake(boxed_snake(1));
    game.steer(Direction::Up);
    while game.phase() != Phase::Ready {
        game.step().unwrap();
    }
    assert_eq!(game.engine().score(), 0);
    assert_eq!(game.high_score(), 27);
}

#[test]
fn play_resumes_after_resurrection() {
    let mut game = doomed_game(0);
    game.steer(Direction::Up);
    while game.phase() != Phase::Ready {
        game.step().unwrap();
    }

    game.steer(Direction::Down);
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.step().unwrap(), Some(TimerEvent::Frame));
    assert_eq!(game.engine().snake().head(), Point::new(1, 2));
}

#[test]
fn init_game_starts_over() {
    let mut game = doomed_game(0);
    game.steer(Direction::Up);
    game.step().unwrap();
    assert_eq!(game.phase(), Phase::GameOver);

    game.init_game().unwrap();
    assert_eq!(game.phase(), Phase::Ready);
    assert!(game.timeline().is_empty());
    assert_eq!(game.engine().score(), 0);
    assert_eq!(game.high_score(), 0);
    assert_eq!(game.engine().snake().len(), 1);
    assert!(game.engine().snake().is_alive());
}

#[test]
fn dying_during_round_feedback_leaves_a_neutral_face() {
    let mut game = doomed_game(0);
    game.engine_mut()
        .set_snake(candysnek::Snake::new(Point::new(5, 5), Direction::Right, 0));
    game.engine_mut()
        .set_candies(vec![Candy::new(Point::new(6, 5), 10)]);
    game.steer(Direction::Right);
    game.step().unwrap();
    assert_eq!(game.view().status(), Status::Happy);
    assert!(game.timeline().contains(|e| *e == TimerEvent::RoundReset));

    // Dies on the very next frame, well inside the feedback delay.
    game.engine_mut().set_snake(boxed_snake(1));
    game.steer(Direction::Up);
    assert_eq!(game.step().unwrap(), Some(TimerEvent::Frame));
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(!game.timeline().contains(|e| *e == TimerEvent::RoundReset));

    while game.phase() != Phase::Ready {
        game.step().unwrap();
    }
    assert_eq!(game.view().status(), Status::Neutral);

    game.advance(std::time::Duration::from_secs(30)).unwrap();
    assert_eq!(game.view().status(), Status::Neutral);
}
