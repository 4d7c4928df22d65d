/// Rendering layer. Every byte written to the terminal goes through here.
///
/// Draw functions take the writer and a borrowed `WorldSnapshot`; nothing
/// here touches game rules. World units are scaled onto the terminal grid by
/// a `Viewport`, so any terminal size shows the whole playfield.

use std::fmt::Display;
use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use invaders::entities::{
    Barrier, Bullet, BulletOwner, DamageLevel, Enemy, EnemyKind, Facing, Rect,
};
use invaders::WorldSnapshot;

// ── Palette ───────────────────────────────────────────────────────────────────

const FRAME_COLOR: Color = Color::DarkBlue;
const SCORE_COLOR: Color = Color::Yellow;
const REMAINING_COLOR: Color = Color::Cyan;
const LIVES_COLOR: Color = Color::Red;
const PLAYER_COLOR: Color = Color::Red;
const PLAYER_SHOT_COLOR: Color = Color::White;
const ENEMY_SHOT_COLOR: Color = Color::Yellow;
const HINT_COLOR: Color = Color::DarkGrey;

const CONTROLS: &str = "← → / A D move   SPACE fire   R restart   Q quit";

/// Maps world coordinates onto the play area between the HUD row and the
/// hint row, inside a one-cell border.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(width: u16, height: u16, snap: &WorldSnapshot<'_>) -> Self {
        // Row 0 is the HUD, rows 1 and h-2 are the border, row h-1 the hint.
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Self {
            cols,
            rows,
            scale_x: f32::from(cols) / snap.screen_width,
            scale_y: f32::from(rows) / snap.screen_height,
        }
    }

    /// Terminal cell of a world point, clamped into the play area.
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = ((x * self.scale_x).floor().max(0.0) as u16).min(self.cols - 1);
        let row = ((y * self.scale_y).floor().max(0.0) as u16).min(self.rows - 1);
        (col + 1, row + 2)
    }

    /// Top-left cell and size in cells, at least one cell each way.
    fn span(&self, rect: &Rect) -> ((u16, u16), u16, u16) {
        let origin = self.cell(rect.x, rect.y);
        let w = ((rect.width * self.scale_x).round() as u16).max(1);
        let h = ((rect.height * self.scale_y).round() as u16).max(1);
        (origin, w, h)
    }
}

/// Print `text` in `color` starting at `(col, row)`.
fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: impl Display) -> io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn centred(width: u16, text: &str) -> u16 {
    (width / 2).saturating_sub(text.chars().count() as u16 / 2)
}

/// Render one complete frame on a `width` x `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snap: &WorldSnapshot<'_>,
    width: u16,
    height: u16,
) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    let view = Viewport::new(width, height, snap);

    draw_frame(out, width, height)?;
    draw_status(out, snap, width)?;

    for barrier in snap.standing_barriers() {
        draw_barrier(out, &view, barrier)?;
    }
    for enemy in snap.alive_enemies() {
        draw_enemy(out, &view, enemy, snap.animation_frame)?;
    }
    for bullet in snap.active_bullets() {
        draw_bullet(out, &view, bullet)?;
    }
    draw_player(out, &view, snap)?;
    put(out, 1, height.saturating_sub(1), HINT_COLOR, CONTROLS)?;

    if snap.game_over || snap.won {
        draw_result(out, snap, width, height)?;
    }

    out.queue(ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()
}

// ── Frame and status line ─────────────────────────────────────────────────────

fn draw_frame<W: Write>(out: &mut W, width: u16, height: u16) -> io::Result<()> {
    let inner = "─".repeat(usize::from(width.saturating_sub(2)));
    let bottom = height.saturating_sub(2);
    put(out, 0, 1, FRAME_COLOR, format_args!("┌{inner}┐"))?;
    put(out, 0, bottom, FRAME_COLOR, format_args!("└{inner}┘"))?;
    for row in 2..bottom {
        put(out, 0, row, FRAME_COLOR, "│")?;
        put(out, width.saturating_sub(1), row, FRAME_COLOR, "│")?;
    }
    Ok(())
}

fn draw_status<W: Write>(out: &mut W, snap: &WorldSnapshot<'_>, width: u16) -> io::Result<()> {
    put(out, 1, 0, SCORE_COLOR, format_args!("Score {:08}", snap.score))?;

    let remaining = format!("[ {} LEFT ]", snap.alive_enemies().count());
    put(out, centred(width, &remaining), 0, REMAINING_COLOR, &remaining)?;

    let lives = format!("Lives {:02}", snap.lives);
    let col = width.saturating_sub(lives.chars().count() as u16 + 1);
    put(out, col, 0, LIVES_COLOR, &lives)
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, snap: &WorldSnapshot<'_>) -> io::Result<()> {
    let sprite = match snap.player.facing() {
        Facing::Idle => "/▲\\",
        Facing::Left => "◄▲\\",
        Facing::Right => "/▲►",
    };
    let ((col, row), _, _) = view.span(&snap.player.rect);
    put(out, col, row, PLAYER_COLOR, sprite)
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy, frame: usize) -> io::Result<()> {
    let (frames, color) = match enemy.kind {
        EnemyKind::Squid => (["/◆\\", "\\◆/"], Color::Magenta),
        EnemyKind::Crab => (["«▼»", "»▼«"], Color::Cyan),
        EnemyKind::Octopus => (["(◎)", ")◎("], Color::Green),
    };
    let ((col, row), _, _) = view.span(&enemy.rect);
    put(out, col, row, color, frames[frame % frames.len()])
}

fn draw_barrier<W: Write>(out: &mut W, view: &Viewport, barrier: &Barrier) -> io::Result<()> {
    let (glyph, color) = match barrier.damage {
        DamageLevel::New => ("█", Color::Green),
        DamageLevel::SmallDamage => ("▓", Color::DarkGreen),
        DamageLevel::HardDamage => ("▒", Color::DarkYellow),
        DamageLevel::Destroyed => return Ok(()),
    };
    let ((col, row), w, h) = view.span(&barrier.rect);
    let line = glyph.repeat(usize::from(w));
    for dy in 0..h {
        put(out, col, row + dy, color, &line)?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &Bullet) -> io::Result<()> {
    let (col, row) = view.cell(bullet.rect.center_x(), bullet.rect.y);
    let (glyph, color) = match bullet.owner() {
        BulletOwner::Player => ("║", PLAYER_SHOT_COLOR),
        BulletOwner::Enemy => ("↓", ENEMY_SHOT_COLOR),
    };
    put(out, col, row, color, glyph)
}

// ── End of session ────────────────────────────────────────────────────────────

fn draw_result<W: Write>(
    out: &mut W,
    snap: &WorldSnapshot<'_>,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let (banner, color) = if snap.won {
        ("║  FORMATION CLEARED ║", Color::Green)
    } else {
        ("║     GAME  OVER     ║", Color::Red)
    };
    let score = format!("Final Score: {:>8}", snap.score);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", color),
        (banner, color),
        ("╚════════════════════╝", color),
        (&score, Color::Yellow),
        ("R  play again    Q  quit", Color::White),
    ];

    let top = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (row, (text, color)) in (top..).zip(lines) {
        put(out, centred(width, text), row, color, text)?;
    }
    Ok(())
}
