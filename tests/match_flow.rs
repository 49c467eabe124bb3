//! Whole-match behavior through the public `Game` API with a `DisplayList` scene

use glam::Vec2;

use pong_classic::consts::SIM_DT;
use pong_classic::renderer::DisplayList;
use pong_classic::sim::{MatchEvent, MatchPhase, Score, Side};
use pong_classic::{Game, GameConfig};

fn new_game(seed: u64) -> Game<DisplayList> {
    Game::new(GameConfig::default(), DisplayList::new(), seed)
}

fn run_frames(game: &mut Game<DisplayList>, frames: usize) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(game.frame(SIM_DT));
    }
    events
}

fn start_match(game: &mut Game<DisplayList>) {
    game.pointer_down();
    game.frame(SIM_DT);
    assert_eq!(game.state().phase, MatchPhase::Active);
}

/// Launch a live ball just inside `missed`'s edge, heading out, away from the paddles
fn force_miss(game: &mut Game<DisplayList>, missed: Side) -> Vec<MatchEvent> {
    let width = game.config().screen_width;
    let speed = game.config().ball_velocity;
    let (x, vx) = match missed {
        Side::Left => (2.0, -speed),
        Side::Right => (width - 2.0, speed),
    };

    let state = game.state_mut();
    state.serve_timer = None;
    state.ball.visible = true;
    state.ball.body.pos = Vec2::new(x, 20.0);
    state.ball.body.vel = Vec2::new(vx, 0.0);

    run_frames(game, 10)
}

fn score_texts(game: &Game<DisplayList>) -> (Option<String>, Option<String>) {
    let handles = *game.handles();
    (
        game.scene().text(handles.score_left).map(str::to_string),
        game.scene().text(handles.score_right).map(str::to_string),
    )
}

#[test]
fn test_ball_hidden_during_serve_delay() {
    let mut game = new_game(7);
    start_match(&mut game);
    let ball = game.handles().ball;

    run_frames(&mut game, 200);
    assert!(!game.scene().is_visible(ball));
    assert!(!game.state().ball.visible);

    let events = run_frames(&mut game, 60);
    assert!(game.scene().is_visible(ball));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, MatchEvent::BallLaunched { .. }))
    );
    let speed = game.state().ball.body.vel.length();
    assert!((speed - game.config().ball_velocity).abs() < 0.5);
}

#[test]
fn test_score_text_follows_points() {
    let mut game = new_game(8);
    start_match(&mut game);
    force_miss(&mut game, Side::Right);
    force_miss(&mut game, Side::Left);
    assert_eq!(game.state().score, Score { left: 1, right: 1 });
    assert_eq!(
        score_texts(&game),
        (Some("1".to_string()), Some("1".to_string()))
    );
}

#[test]
fn test_miss_serves_from_missed_side_list() {
    let mut game = new_game(9);
    start_match(&mut game);

    let events = force_miss(&mut game, Side::Left);
    assert!(events.contains(&MatchEvent::Scored {
        scorer: Side::Right,
        missed: Side::Left,
    }));
    assert_eq!(game.state().missed_side, Some(Side::Left));

    let events = run_frames(&mut game, 300);
    let angle = events
        .iter()
        .find_map(|e| match e {
            MatchEvent::BallLaunched { angle } => Some(*angle),
            _ => None,
        })
        .expect("ball relaunched after the serve delay");
    assert!(game.config().serve_angles_left.contains(&angle));
}

#[test]
fn test_eleven_points_returns_to_demo() {
    let mut game = new_game(10);
    start_match(&mut game);
    let handles = *game.handles();

    let mut won = None;
    for point in 1..=11 {
        let events = force_miss(&mut game, Side::Right);
        if point < 11 {
            assert_eq!(game.state().phase, MatchPhase::Active);
            assert_eq!(score_texts(&game).0, Some(point.to_string()));
        }
        won = events.iter().find_map(|e| match e {
            MatchEvent::MatchWon { winner, score } => Some((*winner, *score)),
            _ => None,
        });
    }

    assert_eq!(won, Some((Side::Left, Score { left: 11, right: 0 })));
    assert_eq!(game.state().phase, MatchPhase::Demo);
    assert!(!game.scene().is_visible(handles.paddle_left));
    assert!(!game.scene().is_visible(handles.paddle_right));
    assert_eq!(
        score_texts(&game),
        (Some("11".to_string()), Some("0".to_string()))
    );

    // Next press starts over from 0 - 0
    start_match(&mut game);
    assert_eq!(game.state().score, Score::new());
    assert_eq!(
        score_texts(&game),
        (Some("0".to_string()), Some("0".to_string()))
    );
    assert!(game.scene().is_visible(handles.paddle_left));
}

#[test]
fn test_same_seed_same_frames() {
    let mut a = new_game(4242);
    let mut b = new_game(4242);

    for i in 0..1500 {
        if i == 120 {
            a.pointer_down();
            b.pointer_down();
        }
        if i % 200 == 0 {
            a.key_down("a");
            b.key_down("a");
        } else if i % 200 == 100 {
            a.key_up("a");
            b.key_up("a");
        }
        let events_a = a.frame(SIM_DT);
        let events_b = b.frame(SIM_DT);
        assert_eq!(events_a, events_b);
    }

    assert_eq!(a.scene().vertices(), b.scene().vertices());
}
