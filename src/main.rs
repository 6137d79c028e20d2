//! Skyfall entry point
//!
//! Thin crossterm presentation layer over the deterministic engine: it feeds
//! elapsed time into `Game::advance`, translates key events into intent
//! flags, and draws whatever state the engine exposes. It never mutates
//! spatial state directly.

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};

use skyfall::platform::FileStorage;
use skyfall::sim::{Game, GamePhase, Geometry};
use skyfall::tuning::Variant;
use skyfall::{Settings, Theme};

const FRAME: Duration = Duration::from_millis(16); // ~60 FPS

/// Horizontal play-area units per terminal cell
const CELL_W: f32 = 10.0;
/// Vertical play-area units per terminal cell
const CELL_H: f32 = 20.0;

/// A key counts as "held" if its last press/repeat arrived within this many
/// frames. Classic terminals only deliver repeated Press events; the OS
/// repeat rate refreshes the window before it expires.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Variant),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &mut Settings,
    top_score: Option<u32>,
) -> std::io::Result<MenuResult> {
    loop {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let cy = height / 2;

        let title = "☄  S K Y F A L L  ☄";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            cy.saturating_sub(7),
        ))?;
        out.queue(style::SetForegroundColor(Color::Cyan))?;
        out.queue(Print(title))?;

        if let Some(best) = top_score {
            let line = format!("Best Score: {best}");
            out.queue(cursor::MoveTo(
                cx.saturating_sub(line.chars().count() as u16 / 2),
                cy.saturating_sub(5),
            ))?;
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(&line))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("Select variant:"))?;

        let options: &[(&str, Variant, Color, &str)] = &[
            ("1", Variant::Classic, Color::Green, "Fixed speed, score per dodge"),
            ("2", Variant::Rush, Color::Yellow, "Score over time, ever faster"),
            ("3", Variant::Deluxe, Color::Red, "Forgiving hitboxes, themed"),
        ];
        for (i, (key, variant, color, desc)) in options.iter().enumerate() {
            let row = cy.saturating_sub(1) + i as u16;
            out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("[{key}] ")))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(format!("{:<8}", variant.as_str())))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!(" — {desc}")))?;
        }

        out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 3))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[T] Theme: {}", settings.theme.as_str())))?;

        out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
        out.queue(Print("← → : Move   P : Pause   R : Restart   Q : Quit"))?;

        out.queue(style::ResetColor)?;
        out.flush()?;

        // Block until the user makes a choice
        loop {
            let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Variant::Classic)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Variant::Rush)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Variant::Deluxe)),
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    settings.theme = settings.theme.next();
                    break; // redraw with the new theme name
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn draw<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    let state = &game.state;
    let cols = (state.area.width / CELL_W).round() as u16;
    let rows = (state.area.height / CELL_H).round() as u16;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Border
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    for col in 0..=cols + 1 {
        out.queue(cursor::MoveTo(col, 0))?.queue(Print("─"))?;
        out.queue(cursor::MoveTo(col, rows + 1))?.queue(Print("─"))?;
    }
    for row in 1..=rows {
        out.queue(cursor::MoveTo(0, row))?.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cols + 1, row))?.queue(Print("│"))?;
    }

    // Obstacles
    out.queue(style::SetForegroundColor(Color::Red))?;
    let theme = game.theme();
    for obstacle in &state.obstacles {
        let col = 1 + (obstacle.x / CELL_W).round() as u16;
        let row = 1 + (obstacle.y / CELL_H).round() as u16;
        if row > rows {
            continue;
        }
        let glyph = theme.sprite(obstacle.sprite);
        let span = (obstacle.width / CELL_W).round().max(1.0) as usize;
        out.queue(cursor::MoveTo(col.min(cols), row))?;
        out.queue(Print(glyph.to_string().repeat(span)))?;
    }

    // Player
    out.queue(style::SetForegroundColor(Color::Green))?;
    let player_col = 1 + (state.player.left / CELL_W).round() as u16;
    let player_span = (state.player.width / CELL_W).round().max(1.0) as usize;
    out.queue(cursor::MoveTo(player_col.min(cols), rows))?;
    out.queue(Print("▀".repeat(player_span)))?;

    // HUD
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(cursor::MoveTo(0, rows + 2))?;
    let best = game.ledger().top_score().unwrap_or(0);
    out.queue(Print(format!(
        "Score {:>5}   Speed {:.1}   Best {best}",
        state.score, state.speed
    )))?;

    match state.phase {
        GamePhase::Paused => {
            out.queue(cursor::MoveTo(cols / 2 - 3, rows / 2))?;
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print("P A U S E D"))?;
        }
        GamePhase::GameOver => {
            let cx = cols / 2;
            out.queue(style::SetForegroundColor(Color::Red))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(5), rows / 2 - 3))?;
            out.queue(Print("GAME OVER"))?;
            out.queue(style::SetForegroundColor(Color::White))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(7), rows / 2 - 1))?;
            out.queue(Print(format!("Score: {}", state.score)))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(7), rows / 2 + 1))?;
            out.queue(Print(format!("Best:   {:?}", game.ledger().best)))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(7), rows / 2 + 2))?;
            out.queue(Print(format!("Recent: {:?}", game.ledger().recent)))?;
            out.queue(style::SetForegroundColor(Color::DarkGrey))?;
            out.queue(cursor::MoveTo(cx.saturating_sub(10), rows / 2 + 4))?;
            out.queue(Print("R : Restart   Q : Menu"))?;
        }
        _ => {}
    }

    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → back to menu.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let pause_enabled = game.tuning().pause_enabled;
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(game.state.phase != GamePhase::GameOver);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') if pause_enabled => {
                            game.toggle_pause();
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            if game.state.phase == GamePhase::GameOver {
                                if let Err(err) = game.restart() {
                                    log::error!("restart failed: {err}");
                                }
                            }
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // Held directions become intent flags; the engine resolves them on
        // its own movement cadence
        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame);
        game.set_move_left(left);
        game.set_move_right(right);

        let elapsed_ms = (last_frame.elapsed().as_millis() as u64).min(100);
        last_frame = Instant::now();
        game.advance(elapsed_ms);

        for event in game.drain_events() {
            log::debug!("{event:?}");
        }

        draw(out, game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run(out: &mut BufWriter<Stdout>, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let storage = FileStorage::default_dir();
    let mut settings = Settings::load(&storage);

    loop {
        let top = skyfall::ScoreLedger::load(&storage).top_score();
        let variant = match show_menu(out, rx, &mut settings, top)? {
            MenuResult::Start(variant) => variant,
            MenuResult::Quit => return Ok(()),
        };
        settings.variant = variant;
        if let Err(err) = settings.save(&storage) {
            log::warn!("settings not persisted: {err}");
        }

        // Deluxe is the themed variant; the others keep the classic look
        let theme = match variant {
            Variant::Deluxe => settings.theme,
            _ => Theme::Classic,
        };
        let mut game = Game::new(
            Geometry::standard(),
            variant.tuning(),
            theme,
            wall_clock_seed(),
            Box::new(storage.clone()),
        );
        if let Err(err) = game.start() {
            log::error!("could not start session: {err}");
            continue;
        }

        if game_loop(out, &mut game, rx)? {
            return Ok(());
        }
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events where the terminal supports them; classic
    // terminals fall back to the hold-window heuristic
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicated thread for blocking event reads so the frame loop never
    // stalls on input
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
