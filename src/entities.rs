//! Game entity types and their per-frame update rules.
//!
//! Every entity embeds a [`Body`], an axis-aligned box that provides the
//! edge accessors and overlap test the collision pass needs. Entities know
//! how to advance themselves one frame; everything that involves more than
//! one entity (collisions, scoring, spawning) lives in the play scene.

use crate::config::{
    ALIEN_COSTUME_INTERVAL, ALIEN_HEIGHT, ALIEN_LIVES, ALIEN_MAX_MOVEMENT, ALIEN_WIDTH,
    ALIEN_X_SPEED, ALIEN_Y_SPEED, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH,
    CANNON_FIRING_INTERVAL_MS, CANNON_HEIGHT, CANNON_SPEED, CANNON_WIDTH, EXPLOSION_HEIGHT,
    EXPLOSION_TICK_LIMIT, EXPLOSION_WIDTH, PADDING, WIDTH,
};

// ── Bounding box ──────────────────────────────────────────────────────────────

/// Center position plus extents, with derived edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Body { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Moves the box so its left edge sits at `left`.
    pub fn set_left(&mut self, left: f32) {
        self.x = left + self.w / 2.0;
    }

    /// Moves the box so its right edge sits at `right`.
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w / 2.0;
    }

    /// True when the two boxes share any interior area. Boxes that merely
    /// touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Cannon ────────────────────────────────────────────────────────────────────

/// The player's cannon. Created once per play session; movement is clamped
/// to the padded playfield and firing is rate-limited by a millisecond
/// cooldown the scene checks before spawning a bullet.
#[derive(Clone, Debug)]
pub struct Cannon {
    pub body: Body,
    pub speed: f32,
    pub last_fire_ms: u64,
    pub firing_interval_ms: u64,
}

impl Cannon {
    pub fn new(x: f32, y: f32) -> Self {
        Cannon {
            body: Body::new(x, y, CANNON_WIDTH, CANNON_HEIGHT),
            speed: CANNON_SPEED,
            last_fire_ms: 0,
            firing_interval_ms: CANNON_FIRING_INTERVAL_MS,
        }
    }

    pub fn move_right(&mut self) {
        self.body.x += self.speed;
        let limit = WIDTH - PADDING;
        if self.body.right() >= limit {
            self.body.set_right(limit);
        }
    }

    pub fn move_left(&mut self) {
        self.body.x -= self.speed;
        if self.body.left() <= PADDING {
            self.body.set_left(PADDING);
        }
    }

    pub fn ready_to_fire(&self, now_ms: u64) -> bool {
        now_ms - self.last_fire_ms > self.firing_interval_ms
    }

    pub fn record_fire(&mut self, now_ms: u64) {
        self.last_fire_ms = now_ms;
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

/// A shot travelling straight up at a fixed speed.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Body,
    pub speed: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Bullet {
            body: Body::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.body.y -= self.speed;
    }

    /// A bullet dies once it has fully left the top of the playfield.
    pub fn is_dead(&self) -> bool {
        self.body.bottom() <= 0.0
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

/// Two-frame animation state, toggled on a fixed interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Costume {
    Open,
    Closed,
}

/// One invader. Marches horizontally, accumulating displacement until the
/// threshold is reached, then reverses and steps down one row.
#[derive(Clone, Debug)]
pub struct Alien {
    pub body: Body,
    pub x_speed: f32,
    pub y_speed: f32,
    /// Signed displacement since the last direction flip. Starts at half
    /// the threshold so the first leg is centered on the spawn column.
    pub movement: f32,
    pub max_movement: f32,
    pub lives: u32,
    pub ticks: u32,
    pub costume: Costume,
}

impl Alien {
    pub fn new(x: f32, y: f32) -> Self {
        Alien {
            body: Body::new(x, y, ALIEN_WIDTH, ALIEN_HEIGHT),
            x_speed: ALIEN_X_SPEED,
            y_speed: ALIEN_Y_SPEED,
            movement: ALIEN_MAX_MOVEMENT / 2.0,
            max_movement: ALIEN_MAX_MOVEMENT,
            lives: ALIEN_LIVES,
            ticks: 0,
            costume: Costume::Open,
        }
    }

    pub fn update(&mut self) {
        self.body.x += self.x_speed;
        self.movement += self.x_speed;
        if self.movement.abs() >= self.max_movement {
            self.x_speed = -self.x_speed;
            self.body.y += self.y_speed;
            self.movement = 0.0;
        }
        self.ticks += 1;
        if self.ticks > ALIEN_COSTUME_INTERVAL {
            self.ticks = 0;
            self.costume = match self.costume {
                Costume::Open => Costume::Closed,
                Costume::Closed => Costume::Open,
            };
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Distinguishes the sprite an explosion is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    Cannon,
    Alien,
}

/// A timed visual token left behind by a destroyed cannon or alien. Carries
/// no collision behaviour; the scene only tracks it until it expires.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub body: Body,
    pub kind: ExplosionKind,
    pub ticks: u32,
    pub tick_limit: u32,
    pub finished: bool,
}

impl Explosion {
    pub fn new(x: f32, y: f32, kind: ExplosionKind) -> Self {
        Explosion {
            body: Body::new(x, y, EXPLOSION_WIDTH, EXPLOSION_HEIGHT),
            kind,
            ticks: 0,
            tick_limit: EXPLOSION_TICK_LIMIT,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        if self.ticks > self.tick_limit {
            self.finished = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
