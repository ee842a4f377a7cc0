//! The play scene: owns every live entity, runs the per-frame update order,
//! resolves collisions, and drives the session state machine.
//!
//! Update order within a running frame is fixed: cannon movement, firing,
//! bullets, aliens (with all collision checks), explosions, then the win
//! check. Dead entities are removed in the same pass that kills them, so no
//! collection ever carries a dead entity across frames.

use std::io::{self, Write};

use crate::config::{
    ALIENS_PER_ROW, ALIEN_KILL_SCORE, ALIEN_ROWS, ALIEN_X_DISTANCE, ALIEN_Y_DISTANCE, HEIGHT,
    LEFTMOST_ALIEN_X, PADDING, TOP_ALIEN_Y, WIDTH,
};
use crate::display;
use crate::entities::{Alien, Bullet, Cannon, Explosion, ExplosionKind};
use crate::scene::{AudioSink, Cue, Input, MessageColor, Scene, SceneRequest};

pub const WIN_MESSAGE: &str = "YOU WON!!!!!";
pub const LOSS_MESSAGE: &str = "YOU LOST...";

/// Session status. A session is `Running` until a loss trigger fires, then
/// waits in `LostAwaitingExplosions` for the remaining explosions to expire,
/// and ends in `Done` once the scene change has been requested. The win path
/// goes straight from `Running` to `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    LostAwaitingExplosions,
    Done,
}

pub struct PlayScene {
    pub cannon: Cannon,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: SessionStatus,
}

impl PlayScene {
    pub fn new() -> Self {
        let mut scene = PlayScene {
            cannon: Cannon::new(WIDTH / 2.0, HEIGHT - PADDING),
            bullets: Vec::new(),
            aliens: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            status: SessionStatus::Running,
        };
        scene.init();
        scene
    }

    /// Spawns the alien grid row-major: top row first, left to right.
    /// Creation order is also the collision iteration order.
    fn create_aliens(&mut self) {
        for row in 0..ALIEN_ROWS {
            for col in 0..ALIENS_PER_ROW {
                let x = LEFTMOST_ALIEN_X + col as f32 * ALIEN_X_DISTANCE;
                let y = TOP_ALIEN_Y + row as f32 * ALIEN_Y_DISTANCE;
                self.aliens.push(Alien::new(x, y));
            }
        }
    }

    fn update_running(
        &mut self,
        input: &Input,
        now_ms: u64,
        audio: &mut dyn AudioSink,
    ) -> SceneRequest {
        if input.right {
            self.cannon.move_right();
        } else if input.left {
            self.cannon.move_left();
        }

        if input.fire && self.cannon.ready_to_fire(now_ms) {
            self.bullets
                .push(Bullet::new(self.cannon.body.x, self.cannon.body.y));
            audio.play(Cue::Shot);
            self.cannon.record_fire(now_ms);
        }

        self.bullets.retain_mut(|bullet| {
            bullet.update();
            !bullet.is_dead()
        });

        // Aliens in creation order, bullets oldest-first within each alien.
        // Index loops so removal mid-pass stays well-defined. A cannon hit
        // does not stop the pass; the rest of the frame still resolves.
        let mut ai = 0;
        while ai < self.aliens.len() {
            self.aliens[ai].update();

            if self.cannon.body.overlaps(&self.aliens[ai].body) {
                self.explosions.push(Explosion::new(
                    self.cannon.body.x,
                    self.cannon.body.y,
                    ExplosionKind::Cannon,
                ));
                audio.play(Cue::Explosion);
                self.status = SessionStatus::LostAwaitingExplosions;
                log::debug!("cannon hit by alien, session lost");
            }
            if self.aliens[ai].body.bottom() >= HEIGHT {
                self.status = SessionStatus::LostAwaitingExplosions;
                log::debug!("alien reached the bottom, session lost");
            }

            let mut destroyed = false;
            let mut bi = 0;
            while bi < self.bullets.len() {
                if self.aliens[ai].body.overlaps(&self.bullets[bi].body) {
                    // The bullet is consumed by its first match and can
                    // never hit a second alien this frame.
                    self.aliens[ai].lives -= 1;
                    self.bullets.remove(bi);
                    if self.aliens[ai].is_dead() {
                        let alien = self.aliens.remove(ai);
                        self.explosions.push(Explosion::new(
                            alien.body.x,
                            alien.body.y,
                            ExplosionKind::Alien,
                        ));
                        audio.play(Cue::Explosion);
                        self.score += ALIEN_KILL_SCORE;
                        destroyed = true;
                        break;
                    }
                } else {
                    bi += 1;
                }
            }
            if !destroyed {
                ai += 1;
            }
        }

        self.explosions.retain_mut(|explosion| {
            explosion.update();
            !explosion.is_finished()
        });

        if self.status == SessionStatus::Running
            && self.aliens.is_empty()
            && self.explosions.is_empty()
        {
            audio.play(Cue::Win);
            self.status = SessionStatus::Done;
            log::debug!("session won with score {}", self.score);
            return SceneRequest::GameOver {
                message: WIN_MESSAGE,
                color: MessageColor::Cyan,
            };
        }
        SceneRequest::None
    }

    /// After a loss trigger only the explosions keep animating; no input is
    /// processed and nothing new spawns.
    fn update_lost(&mut self, audio: &mut dyn AudioSink) -> SceneRequest {
        self.explosions.retain_mut(|explosion| {
            explosion.update();
            !explosion.is_finished()
        });

        if self.explosions.is_empty() {
            audio.play(Cue::Loss);
            self.status = SessionStatus::Done;
            log::debug!("session lost with score {}", self.score);
            return SceneRequest::GameOver {
                message: LOSS_MESSAGE,
                color: MessageColor::Red,
            };
        }
        SceneRequest::None
    }
}

impl Scene for PlayScene {
    fn init(&mut self) {
        self.cannon = Cannon::new(WIDTH / 2.0, HEIGHT - PADDING);
        self.bullets.clear();
        self.aliens.clear();
        self.explosions.clear();
        self.score = 0;
        self.create_aliens();
        self.status = SessionStatus::Running;
        log::debug!("play session reset, {} aliens spawned", self.aliens.len());
    }

    fn update(&mut self, input: &Input, now_ms: u64, audio: &mut dyn AudioSink) -> SceneRequest {
        match self.status {
            SessionStatus::Running => self.update_running(input, now_ms, audio),
            SessionStatus::LostAwaitingExplosions => self.update_lost(audio),
            SessionStatus::Done => SceneRequest::None,
        }
    }

    fn draw<W: Write>(&self, out: &mut W, size: (u16, u16)) -> io::Result<()> {
        display::draw_play(out, self, size)
    }
}
