//! Rendering layer; all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of a scene
//! and translates it into queued terminal commands. No game logic is
//! performed. Entity positions are logical 480x600 playfield pixels and get
//! scaled to the writer's `(cols, rows)` every frame.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::{HEIGHT, WIDTH};
use crate::entities::{Body, Costume, ExplosionKind};
use crate::play::PlayScene;
use crate::scene::{GameOverScene, MenuScene, MessageColor};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CANNON: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ALIEN: Color = Color::Green;
const C_EXPLOSION: Color = Color::Yellow;
const C_SCORE: Color = Color::Yellow;
const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

const SPRITE_CANNON: &str = "▄█▄";
const SPRITE_BULLET: &str = "│";
const SPRITE_ALIEN_OPEN: &str = "/O\\";
const SPRITE_ALIEN_CLOSED: &str = "\\O/";
const SPRITE_EXPLOSION_ALIEN: &str = "✶";
const SPRITE_EXPLOSION_CANNON: &str = "✺";

// ── Coordinate scaling ────────────────────────────────────────────────────────

/// Maps a logical playfield point to a terminal cell, clamped inside the
/// drawable area.
fn cell(x: f32, y: f32, size: (u16, u16)) -> (u16, u16) {
    let (cols, rows) = size;
    let cx = (x * cols as f32 / WIDTH) as i32;
    let cy = (y * rows as f32 / HEIGHT) as i32;
    (
        cx.clamp(0, cols.saturating_sub(1) as i32) as u16,
        cy.clamp(0, rows.saturating_sub(1) as i32) as u16,
    )
}

fn row_of(y: f32, rows: u16) -> u16 {
    let row = (y * rows as f32 / HEIGHT) as i32;
    row.clamp(0, rows.saturating_sub(1) as i32) as u16
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    body: &Body,
    sprite: &str,
    color: Color,
    size: (u16, u16),
) -> io::Result<()> {
    let (cx, cy) = cell(body.x, body.y, size);
    let col = cx.saturating_sub(sprite.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_text_centered<W: Write>(
    out: &mut W,
    row: u16,
    text: &str,
    color: Color,
    cols: u16,
) -> io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn finish_frame<W: Write>(out: &mut W, rows: u16) -> io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()
}

fn message_color(color: MessageColor) -> Color {
    match color {
        MessageColor::Cyan => Color::Cyan,
        MessageColor::Red => Color::Red,
    }
}

fn alien_sprite(costume: Costume) -> &'static str {
    match costume {
        Costume::Open => SPRITE_ALIEN_OPEN,
        Costume::Closed => SPRITE_ALIEN_CLOSED,
    }
}

// ── Scene renderers ───────────────────────────────────────────────────────────

/// Title screen: game name, one of each sprite, and the start hint.
pub fn draw_menu<W: Write>(out: &mut W, scene: &MenuScene, size: (u16, u16)) -> io::Result<()> {
    let (cols, rows) = size;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_text_centered(out, row_of(40.0, rows), "S P A C E", C_TITLE, cols)?;
    draw_text_centered(out, row_of(100.0, rows), "I N V A D E R S", C_TITLE, cols)?;

    draw_sprite(out, &scene.cannon.body, SPRITE_CANNON, C_CANNON, size)?;
    draw_sprite(out, &scene.bullet.body, SPRITE_BULLET, C_BULLET, size)?;
    draw_sprite(
        out,
        &scene.alien.body,
        alien_sprite(scene.alien.costume),
        C_ALIEN,
        size,
    )?;

    draw_text_centered(out, row_of(520.0, rows), "PRESS 'S' TO START", C_HINT, cols)?;
    finish_frame(out, rows)
}

/// One frame of the running game: every live entity plus the score line.
pub fn draw_play<W: Write>(out: &mut W, scene: &PlayScene, size: (u16, u16)) -> io::Result<()> {
    let (_, rows) = size;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_sprite(out, &scene.cannon.body, SPRITE_CANNON, C_CANNON, size)?;
    for bullet in &scene.bullets {
        draw_sprite(out, &bullet.body, SPRITE_BULLET, C_BULLET, size)?;
    }
    for alien in &scene.aliens {
        draw_sprite(out, &alien.body, alien_sprite(alien.costume), C_ALIEN, size)?;
    }
    for explosion in &scene.explosions {
        let sprite = match explosion.kind {
            ExplosionKind::Cannon => SPRITE_EXPLOSION_CANNON,
            ExplosionKind::Alien => SPRITE_EXPLOSION_ALIEN,
        };
        draw_sprite(out, &explosion.body, sprite, C_EXPLOSION, size)?;
    }

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("SCORE: {}", scene.score)))?;

    finish_frame(out, rows)
}

/// End screen with the win/loss message in its handed-off color.
pub fn draw_game_over<W: Write>(
    out: &mut W,
    scene: &GameOverScene,
    size: (u16, u16),
) -> io::Result<()> {
    let (cols, rows) = size;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_text_centered(out, row_of(40.0, rows), "G A M E", C_TITLE, cols)?;
    draw_text_centered(out, row_of(120.0, rows), "O V E R", C_TITLE, cols)?;
    draw_text_centered(
        out,
        row_of(300.0, rows),
        scene.message,
        message_color(scene.color),
        cols,
    )?;
    draw_text_centered(
        out,
        row_of(520.0, rows),
        "PRESS 'S' TO PLAY AGAIN",
        C_HINT,
        cols,
    )?;
    finish_frame(out, rows)
}
