mod display;

use std::collections::HashMap;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{Print, ResetColor},
    terminal, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::{update, Config, GameEvent, Intents, Session};

/// Fixed simulation step, roughly 30 frames per second.
const FRAME: Duration = Duration::from_millis(33);

/// Frames a key counts as held after its last press or repeat. Terminals
/// without release events only send auto-repeats, which arrive well inside
/// this window.
const HOLD_WINDOW: u64 = 4;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

#[derive(Parser)]
#[command(name = "invaders")]
#[command(about = "Fixed-formation shooter in the terminal")]
struct Args {
    /// JSON file overriding any subset of the game configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy targeting (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

// ── Terminal setup ────────────────────────────────────────────────────────────

struct Screen<W: Write> {
    out: W,
    keyboard_enhanced: bool,
}

impl<W: Write> Screen<W> {
    fn new(out: W) -> Self {
        Self { out, keyboard_enhanced: false }
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.flush()?;

        // Release events need the kitty keyboard protocol; elsewhere we fall
        // back to the hold window.
        self.keyboard_enhanced = self
            .out
            .queue(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .and_then(|out| out.flush())
            .is_ok();
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            self.out.queue(PopKeyboardEnhancementFlags)?;
        }
        self.out.queue(ResetColor)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Frame of the last press/repeat for every key currently held down.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    fn any(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.last_seen
                .get(key)
                .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }
}

/// Fold one terminal event into this frame's intents.
/// Returns `false` when the player asked to quit.
fn handle_event(ev: Event, frame: u64, held: &mut HeldKeys, intents: &mut Intents) -> bool {
    let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
        return true;
    };
    if kind == KeyEventKind::Release {
        held.release(code);
        return true;
    }
    held.press(code, frame);

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,
        KeyCode::Char(' ') => intents.fire = true,
        KeyCode::Char('r') | KeyCode::Char('R') if kind == KeyEventKind::Press => {
            intents.restart = true;
        }
        _ => {}
    }
    true
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Step and draw the session once per `FRAME` until the player quits.
fn run<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    let mut held = HeldKeys::default();
    let delta = FRAME.as_secs_f32();

    for frame in 1u64.. {
        let started = Instant::now();

        let mut intents = Intents::default();
        for ev in rx.try_iter() {
            if !handle_event(ev, frame, &mut held, &mut intents) {
                return Ok(());
            }
        }
        intents.move_left = held.any(&LEFT_KEYS, frame);
        intents.move_right = held.any(&RIGHT_KEYS, frame);

        for event in update(session, &intents, delta, rng) {
            log::debug!("{event:?}");
            if matches!(
                event,
                GameEvent::PlayerHit { .. }
                    | GameEvent::GameOver { .. }
                    | GameEvent::FormationCleared { .. }
            ) {
                // bell
                out.queue(Print("\x07"))?;
            }
        }

        let (width, height) = terminal::size()?;
        display::render(out, &session.snapshot(), width, height)?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Bad configuration is reported before the terminal is touched.
    let config = load_config(args.config.as_deref())?;
    let mut session = Session::new(config).context("invalid game configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut screen = Screen::new(BufWriter::new(io::stdout()));
    screen.enter()?;

    // Blocking reads live on their own thread; the frame loop only polls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut screen.out, &mut session, &rx, &mut rng);
    let restored = screen.exit();

    result?;
    restored?;
    log::info!("quit with score {} ({:?})", session.score, session.status);
    Ok(())
}
