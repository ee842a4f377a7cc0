//! A fixed-grid space-invaders clone for the terminal.
//!
//! The simulation is entirely deterministic: a cannon moves along the bottom
//! of a 480x600 logical playfield and fires at a 13x7 grid of aliens that
//! zig-zag downward. All tunables live in [`config`] as compile-time
//! constants. Rendering, input, and audio are thin collaborator layers; the
//! game core never touches the terminal directly.

pub mod config;
pub mod display;
pub mod entities;
pub mod play;
pub mod scene;
