//! Every gameplay constant, fixed at compile time.
//!
//! Positions and sizes are logical pixels on a 480x600 playfield; the
//! display layer scales them to whatever terminal it is given.

/// Playfield width in logical pixels.
pub const WIDTH: f32 = 480.0;
/// Playfield height in logical pixels.
pub const HEIGHT: f32 = 600.0;
/// Horizontal padding the cannon may never cross on either side.
pub const PADDING: f32 = 40.0;

pub const CANNON_SPEED: f32 = 13.0;
/// Minimum milliseconds between shots.
pub const CANNON_FIRING_INTERVAL_MS: u64 = 50;
pub const CANNON_WIDTH: f32 = 48.0;
pub const CANNON_HEIGHT: f32 = 32.0;

pub const BULLET_SPEED: f32 = 30.0;
pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 16.0;

/// Unsigned horizontal displacement at which an alien reverses direction.
pub const ALIEN_MAX_MOVEMENT: f32 = 20.0;
pub const ALIEN_X_SPEED: f32 = 0.5;
/// Vertical step taken on each direction flip.
pub const ALIEN_Y_SPEED: f32 = 2.0;
pub const ALIEN_LIVES: u32 = 1;
pub const ALIEN_WIDTH: f32 = 48.0;
pub const ALIEN_HEIGHT: f32 = 32.0;

pub const LEFTMOST_ALIEN_X: f32 = 60.0;
pub const TOP_ALIEN_Y: f32 = 40.0;
pub const ALIEN_ROWS: usize = 13;
pub const ALIENS_PER_ROW: usize = 7;
pub const ALIEN_X_DISTANCE: f32 = 60.0;
pub const ALIEN_Y_DISTANCE: f32 = 40.0;

pub const ALIEN_KILL_SCORE: u32 = 100;
/// Frames between the two alien animation costumes.
pub const ALIEN_COSTUME_INTERVAL: u32 = 20;

/// Frames an explosion stays on screen before it expires.
pub const EXPLOSION_TICK_LIMIT: u32 = 15;
pub const EXPLOSION_WIDTH: f32 = 48.0;
pub const EXPLOSION_HEIGHT: f32 = 32.0;
