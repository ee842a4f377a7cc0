use invaders::config::{
    ALIENS_PER_ROW, ALIEN_KILL_SCORE, ALIEN_ROWS, CANNON_SPEED, HEIGHT, PADDING, WIDTH,
};
use invaders::entities::{Alien, Bullet, ExplosionKind};
use invaders::play::{PlayScene, SessionStatus, LOSS_MESSAGE, WIN_MESSAGE};
use invaders::scene::{AudioSink, Cue, Input, MessageColor, Scene, SceneRequest};

#[derive(Default)]
struct RecordedAudio {
    cues: Vec<Cue>,
}

impl AudioSink for RecordedAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

fn idle() -> Input {
    Input::default()
}

fn firing() -> Input {
    Input {
        fire: true,
        ..Input::default()
    }
}

// ── Session init ──────────────────────────────────────────────────────────────

#[test]
fn init_spawns_full_grid_row_major() {
    let scene = PlayScene::new();

    assert_eq!(scene.aliens.len(), ALIEN_ROWS * ALIENS_PER_ROW);
    // Top row first, left to right.
    assert_eq!(scene.aliens[0].body.x, 60.0);
    assert_eq!(scene.aliens[0].body.y, 40.0);
    assert_eq!(scene.aliens[1].body.x, 120.0);
    assert_eq!(scene.aliens[1].body.y, 40.0);
    // First alien of the second row.
    assert_eq!(scene.aliens[ALIENS_PER_ROW].body.x, 60.0);
    assert_eq!(scene.aliens[ALIENS_PER_ROW].body.y, 80.0);
    // Bottom-right corner of the grid.
    let last = scene.aliens.last().unwrap();
    assert_eq!(last.body.x, 420.0);
    assert_eq!(last.body.y, 520.0);

    assert_eq!(scene.cannon.body.x, WIDTH / 2.0);
    assert_eq!(scene.cannon.body.y, HEIGHT - PADDING);
    assert!(scene.bullets.is_empty());
    assert!(scene.explosions.is_empty());
    assert_eq!(scene.score, 0);
    assert_eq!(scene.status, SessionStatus::Running);
}

#[test]
fn init_resets_a_dirty_session() {
    let mut scene = PlayScene::new();
    scene.score = 500;
    scene.aliens.clear();
    scene.bullets.push(Bullet::new(100.0, 100.0));
    scene.status = SessionStatus::Done;

    scene.init();

    assert_eq!(scene.score, 0);
    assert_eq!(scene.aliens.len(), ALIEN_ROWS * ALIENS_PER_ROW);
    assert!(scene.bullets.is_empty());
    assert!(scene.explosions.is_empty());
    assert_eq!(scene.status, SessionStatus::Running);
    assert_eq!(scene.cannon.body.x, WIDTH / 2.0);
}

// ── Input handling ────────────────────────────────────────────────────────────

#[test]
fn movement_input_moves_cannon() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    let x0 = scene.cannon.body.x;

    let right = Input {
        right: true,
        ..Input::default()
    };
    scene.update(&right, 0, &mut audio);
    assert_eq!(scene.cannon.body.x, x0 + CANNON_SPEED);

    let left = Input {
        left: true,
        ..Input::default()
    };
    scene.update(&left, 0, &mut audio);
    assert_eq!(scene.cannon.body.x, x0);
}

#[test]
fn right_input_wins_over_left() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    let x0 = scene.cannon.body.x;

    let both = Input {
        left: true,
        right: true,
        ..Input::default()
    };
    scene.update(&both, 0, &mut audio);
    assert_eq!(scene.cannon.body.x, x0 + CANNON_SPEED);
}

#[test]
fn fire_respects_cooldown() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    // One far-off alien keeps the session running without ever meeting a
    // bullet fired from the center column.
    scene.aliens.clear();
    scene.aliens.push(Alien::new(60.0, 40.0));

    scene.update(&firing(), 60, &mut audio);
    assert_eq!(scene.bullets.len(), 1);
    assert_eq!(scene.cannon.last_fire_ms, 60);

    // Within the cooldown window nothing new spawns.
    scene.update(&firing(), 80, &mut audio);
    assert_eq!(scene.bullets.len(), 1);

    scene.update(&firing(), 111, &mut audio);
    assert_eq!(scene.bullets.len(), 2);

    let shots = audio.cues.iter().filter(|c| **c == Cue::Shot).count();
    assert_eq!(shots, 2);
}

#[test]
fn bullet_spawns_at_cannon_center() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(60.0, 40.0));

    scene.update(&firing(), 100, &mut audio);
    let bullet = &scene.bullets[0];
    assert_eq!(bullet.body.x, scene.cannon.body.x);
    // Spawned at the cannon's center, then moved once this same frame.
    assert_eq!(bullet.body.y, scene.cannon.body.y - bullet.speed);
}

// ── Combat resolution ─────────────────────────────────────────────────────────

#[test]
fn bullet_kill_removes_alien_and_awards_score() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    // Aimed at the bottom-left alien of the grid.
    scene.bullets.push(Bullet::new(60.0, 560.0));

    scene.update(&idle(), 0, &mut audio);

    assert_eq!(scene.aliens.len(), ALIEN_ROWS * ALIENS_PER_ROW - 1);
    assert_eq!(scene.score, ALIEN_KILL_SCORE);
    assert!(scene.bullets.is_empty());

    // The explosion sits where the alien was (it had marched half a pixel).
    assert_eq!(scene.explosions.len(), 1);
    let explosion = &scene.explosions[0];
    assert_eq!(explosion.kind, ExplosionKind::Alien);
    assert!((explosion.body.x - 60.5).abs() < 1e-3);
    assert_eq!(explosion.body.y, 520.0);

    // The bottom-left grid slot is really gone.
    assert!(!scene
        .aliens
        .iter()
        .any(|a| a.body.y == 520.0 && (a.body.x - 60.5).abs() < 1.0));

    assert!(audio.cues.contains(&Cue::Explosion));
    assert_eq!(scene.status, SessionStatus::Running);
}

#[test]
fn bullet_is_consumed_by_at_most_one_alien() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    // Two aliens stacked on the same spot; the single bullet may only ever
    // account for one of them.
    scene.aliens.clear();
    scene.aliens.push(Alien::new(100.0, 300.0));
    scene.aliens.push(Alien::new(100.0, 300.0));
    scene.bullets.push(Bullet::new(100.0, 330.0));

    scene.update(&idle(), 0, &mut audio);

    assert_eq!(scene.aliens.len(), 1);
    assert_eq!(scene.aliens[0].lives, 1);
    assert_eq!(scene.score, ALIEN_KILL_SCORE);
    assert!(scene.bullets.is_empty());
    assert_eq!(scene.explosions.len(), 1);
}

#[test]
fn unconsumed_bullet_survives_the_frame() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(100.0, 300.0));
    scene.bullets.push(Bullet::new(100.0, 330.0));
    scene.bullets.push(Bullet::new(102.0, 330.0));

    scene.update(&idle(), 0, &mut audio);

    // First bullet killed the alien; the second had nothing left to hit.
    assert!(scene.aliens.is_empty());
    assert_eq!(scene.bullets.len(), 1);
    assert_eq!(scene.score, ALIEN_KILL_SCORE);
    // The pending explosion defers the win check.
    assert_eq!(scene.status, SessionStatus::Running);
}

// ── Win path ──────────────────────────────────────────────────────────────────

#[test]
fn win_fires_after_last_explosion_settles() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(100.0, 300.0));
    scene.bullets.push(Bullet::new(100.0, 330.0));

    scene.update(&idle(), 0, &mut audio);
    assert!(scene.aliens.is_empty());
    assert_eq!(scene.status, SessionStatus::Running);

    let mut request = SceneRequest::None;
    for _ in 0..30 {
        request = scene.update(&idle(), 0, &mut audio);
        if request != SceneRequest::None {
            break;
        }
    }
    assert_eq!(
        request,
        SceneRequest::GameOver {
            message: WIN_MESSAGE,
            color: MessageColor::Cyan,
        }
    );
    assert_eq!(scene.status, SessionStatus::Done);
    assert!(audio.cues.contains(&Cue::Win));
    assert!(!audio.cues.contains(&Cue::Loss));
}

#[test]
fn empty_field_wins_immediately() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();

    let request = scene.update(&idle(), 0, &mut audio);
    assert_eq!(
        request,
        SceneRequest::GameOver {
            message: WIN_MESSAGE,
            color: MessageColor::Cyan,
        }
    );
    assert_eq!(scene.status, SessionStatus::Done);
}

// ── Loss paths ────────────────────────────────────────────────────────────────

#[test]
fn cannon_collision_starts_loss_and_blocks_input() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(WIDTH / 2.0, HEIGHT - PADDING));

    scene.update(&idle(), 0, &mut audio);
    assert_eq!(scene.status, SessionStatus::LostAwaitingExplosions);
    assert_eq!(scene.explosions.len(), 1);
    assert_eq!(scene.explosions[0].kind, ExplosionKind::Cannon);
    assert!(audio.cues.contains(&Cue::Explosion));

    // No firing once the session is lost.
    scene.update(&firing(), 1_000, &mut audio);
    assert!(scene.bullets.is_empty());
    assert!(!audio.cues.contains(&Cue::Shot));

    let mut request = SceneRequest::None;
    for _ in 0..30 {
        request = scene.update(&idle(), 0, &mut audio);
        if request != SceneRequest::None {
            break;
        }
    }
    assert_eq!(
        request,
        SceneRequest::GameOver {
            message: LOSS_MESSAGE,
            color: MessageColor::Red,
        }
    );
    assert_eq!(scene.status, SessionStatus::Done);
    assert!(audio.cues.contains(&Cue::Loss));
    assert!(!audio.cues.contains(&Cue::Win));
}

#[test]
fn alien_reaching_bottom_ends_session() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(60.0, 590.0));

    scene.update(&idle(), 0, &mut audio);
    assert_eq!(scene.status, SessionStatus::LostAwaitingExplosions);
    // This loss trigger leaves no explosion behind.
    assert!(scene.explosions.is_empty());

    let request = scene.update(&idle(), 0, &mut audio);
    assert_eq!(
        request,
        SceneRequest::GameOver {
            message: LOSS_MESSAGE,
            color: MessageColor::Red,
        }
    );
    assert_eq!(audio.cues, vec![Cue::Loss]);
}

#[test]
fn done_session_is_inert() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    scene.aliens.clear();
    scene.aliens.push(Alien::new(60.0, 590.0));

    scene.update(&idle(), 0, &mut audio);
    scene.update(&idle(), 0, &mut audio);
    assert_eq!(scene.status, SessionStatus::Done);
    let cues_so_far = audio.cues.len();

    for _ in 0..5 {
        let request = scene.update(&firing(), 10_000, &mut audio);
        assert_eq!(request, SceneRequest::None);
    }
    assert!(scene.bullets.is_empty());
    assert_eq!(audio.cues.len(), cues_so_far);
}

// ── Driven session invariants ─────────────────────────────────────────────────

/// Drives 200 frames of continuous fire from the center column and checks
/// the frame-to-frame invariants: score never decreases, and no collection
/// carries a dead entity across a frame boundary.
#[test]
fn driven_session_holds_invariants() {
    let mut audio = RecordedAudio::default();
    let mut scene = PlayScene::new();
    let mut last_score = 0;

    for frame in 1..=200u64 {
        scene.update(&firing(), frame * 33, &mut audio);

        assert!(scene.score >= last_score);
        last_score = scene.score;

        for alien in &scene.aliens {
            assert!(!alien.is_dead());
        }
        for bullet in &scene.bullets {
            assert!(!bullet.is_dead());
        }
        for explosion in &scene.explosions {
            assert!(!explosion.is_finished());
        }
    }

    // The cannon never moved, so exactly the center column of the grid is
    // shot away: one kill per row.
    assert_eq!(scene.score, ALIEN_ROWS as u32 * ALIEN_KILL_SCORE);
    assert_eq!(
        scene.aliens.len(),
        ALIEN_ROWS * ALIENS_PER_ROW - ALIEN_ROWS
    );
    assert_eq!(scene.status, SessionStatus::Running);
}
