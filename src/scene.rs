//! Scene plumbing: the `Scene` trait, the collaborator seams the scenes
//! consume (keyboard snapshot, clock, audio), and the `Game` director that
//! owns the three scenes and mediates transitions between them.
//!
//! Scenes never call back into the director. A scene's `update` returns a
//! [`SceneRequest`] and the director applies it, which keeps the borrow
//! graph a straight line: driver -> director -> active scene.

use std::io::{self, Write};

use crate::config::WIDTH;
use crate::display;
use crate::entities::{Alien, Bullet, Cannon};
use crate::play::PlayScene;

// ── Collaborator seams ────────────────────────────────────────────────────────

/// Per-frame keyboard snapshot, built by the driver from whatever input
/// backend it uses. The core only ever sees these four booleans.
#[derive(Clone, Copy, Debug, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub start: bool,
}

/// Named audio cues. Fire-and-forget; the core never hears back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Shot,
    Explosion,
    Win,
    Loss,
}

/// Sink for audio cues. The driver supplies a real one; tests record.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Presentation-agnostic color tag for the game-over message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageColor {
    Cyan,
    Red,
}

// ── Scene interface ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneId {
    Menu,
    Play,
    GameOver,
}

/// What a scene wants the director to do after this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneRequest {
    None,
    Change(SceneId),
    /// End the play session: hand the message to the game-over scene, then
    /// switch to it.
    GameOver {
        message: &'static str,
        color: MessageColor,
    },
}

pub trait Scene {
    /// Resets the scene's state. Called by the director on every entry.
    fn init(&mut self);

    /// Advances one frame. `now_ms` is a monotonic millisecond clock the
    /// driver reads once per frame.
    fn update(&mut self, input: &Input, now_ms: u64, audio: &mut dyn AudioSink) -> SceneRequest;

    /// Draws the scene onto `out`, scaled to a `(cols, rows)` terminal.
    fn draw<W: Write>(&self, out: &mut W, size: (u16, u16)) -> io::Result<()>;
}

// ── Menu scene ────────────────────────────────────────────────────────────────

/// Title screen. Shows one of each sprite and waits for the start key.
pub struct MenuScene {
    pub cannon: Cannon,
    pub bullet: Bullet,
    pub alien: Alien,
}

impl MenuScene {
    pub fn new() -> Self {
        MenuScene {
            cannon: Cannon::new(WIDTH / 2.0, 420.0),
            bullet: Bullet::new(WIDTH / 2.0, 360.0),
            alien: Alien::new(WIDTH / 2.0, 220.0),
        }
    }
}

impl Scene for MenuScene {
    fn init(&mut self) {}

    fn update(&mut self, input: &Input, _now_ms: u64, _audio: &mut dyn AudioSink) -> SceneRequest {
        if input.start {
            SceneRequest::Change(SceneId::Play)
        } else {
            SceneRequest::None
        }
    }

    fn draw<W: Write>(&self, out: &mut W, size: (u16, u16)) -> io::Result<()> {
        display::draw_menu(out, self, size)
    }
}

// ── Game-over scene ───────────────────────────────────────────────────────────

/// End screen. The message and its color arrive from the play scene via the
/// director pass-through before this scene becomes active.
pub struct GameOverScene {
    pub message: &'static str,
    pub color: MessageColor,
}

impl GameOverScene {
    pub fn new() -> Self {
        GameOverScene {
            message: "",
            color: MessageColor::Red,
        }
    }

    pub fn set_message(&mut self, message: &'static str, color: MessageColor) {
        self.message = message;
        self.color = color;
    }
}

impl Scene for GameOverScene {
    fn init(&mut self) {}

    fn update(&mut self, input: &Input, _now_ms: u64, _audio: &mut dyn AudioSink) -> SceneRequest {
        if input.start {
            SceneRequest::Change(SceneId::Play)
        } else {
            SceneRequest::None
        }
    }

    fn draw<W: Write>(&self, out: &mut W, size: (u16, u16)) -> io::Result<()> {
        display::draw_game_over(out, self, size)
    }
}

// ── Director ──────────────────────────────────────────────────────────────────

/// Owns the three scenes and the active-scene tag, and dispatches
/// update/draw to whichever is active. Constructed explicitly by the driver
/// and passed into the frame loop; there is no global instance.
pub struct Game {
    pub menu: MenuScene,
    pub play: PlayScene,
    pub game_over: GameOverScene,
    pub current: SceneId,
}

impl Game {
    pub fn new() -> Self {
        Game {
            menu: MenuScene::new(),
            play: PlayScene::new(),
            game_over: GameOverScene::new(),
            current: SceneId::Menu,
        }
    }

    pub fn update(&mut self, input: &Input, now_ms: u64, audio: &mut dyn AudioSink) {
        let request = match self.current {
            SceneId::Menu => self.menu.update(input, now_ms, audio),
            SceneId::Play => self.play.update(input, now_ms, audio),
            SceneId::GameOver => self.game_over.update(input, now_ms, audio),
        };
        match request {
            SceneRequest::None => {}
            SceneRequest::Change(id) => self.change_scene(id),
            SceneRequest::GameOver { message, color } => {
                self.set_game_over_message(message, color);
                self.change_scene(SceneId::GameOver);
            }
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W, size: (u16, u16)) -> io::Result<()> {
        match self.current {
            SceneId::Menu => self.menu.draw(out, size),
            SceneId::Play => self.play.draw(out, size),
            SceneId::GameOver => self.game_over.draw(out, size),
        }
    }

    /// Re-initializes the target scene, then makes it active. Re-entering
    /// the play scene resets the whole session through its `init`.
    pub fn change_scene(&mut self, id: SceneId) {
        log::info!("scene change: {:?} -> {:?}", self.current, id);
        match id {
            SceneId::Menu => self.menu.init(),
            SceneId::Play => self.play.init(),
            SceneId::GameOver => self.game_over.init(),
        }
        self.current = id;
    }

    /// Pass-through so the play scene can hand off win/loss text without
    /// touching the game-over scene directly.
    pub fn set_game_over_message(&mut self, message: &'static str, color: MessageColor) {
        self.game_over.set_message(message, color);
    }
}
