//! Quiz Dash entry point
//!
//! Wires the terminal to the simulation: raw-mode setup, the key-event pump,
//! one tick plus one draw per frame, and teardown on exit.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use quiz_dash::consts::FRAME;
use quiz_dash::input::{Action, InputState};
use quiz_dash::level::Level;
use quiz_dash::quiz::QuizBank;
use quiz_dash::sim::{GameState, GameStatus, tick};
use quiz_dash::tui::Screen;

/// Terminals without key-release reports synthesize holds from auto-repeat;
/// an action with no repeat for this long counts as released. The window must
/// outlast the OS auto-repeat initial delay.
const HOLD_WINDOW: Duration = Duration::from_millis(550);

const USAGE: &str = "\
quiz-dash - a side-scrolling quiz platformer for the terminal

USAGE:
    quiz-dash [OPTIONS]

OPTIONS:
    --level <path>    load level geometry from a JSON file
    --quiz <path>     load the question bank from a JSON file
    --seed <u64>      seed the simulation RNG (default: random)
    -h, --help        print this help

KEYS:
    a/d or arrows     run
    space, w or up    jump (press again mid-air for a double jump)
    1-4               answer an open quiz
    enter             start, retry after a loss, replay after a win
    q, esc, ctrl-c    quit";

struct Options {
    level: Option<String>,
    quiz: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Options, String> {
    let mut opts = Options {
        level: None,
        quiz: None,
        seed: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--level" => opts.level = Some(value(&mut args, "--level")?),
            "--quiz" => opts.quiz = Some(value(&mut args, "--quiz")?),
            "--seed" => {
                let raw = value(&mut args, "--seed")?;
                opts.seed = Some(raw.parse().map_err(|_| format!("bad seed: {raw}"))?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(opts)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} expects a value"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let opts = parse_args().map_err(|err| format!("{err}\n\n{USAGE}"))?;

    let level = match &opts.level {
        Some(path) => Level::from_json(&fs::read_to_string(path)?)?,
        None => Level::builtin(),
    };
    let quiz = match &opts.quiz {
        Some(path) => QuizBank::from_json(&fs::read_to_string(path)?)?,
        None => QuizBank::builtin(),
    };
    let seed = opts.seed.unwrap_or_else(rand::random);
    log::info!("starting with seed {seed}");

    let mut state = GameState::new(&level, quiz, seed);
    run(&mut state)
}

fn run(state: &mut GameState) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

    let key_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if key_release {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    log::info!(
        "key releases: {}",
        if key_release { "reported" } else { "timed fallback" }
    );

    let result = game_loop(&mut out, state, key_release);

    // Restore the terminal even when the loop errors.
    if key_release {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn game_loop(
    out: &mut impl Write,
    state: &mut GameState,
    key_release: bool,
) -> Result<(), Box<dyn Error>> {
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);
    let mut input = InputState::new();
    // Most recent press or repeat per action, for the timed fallback.
    let mut last_seen: [Option<Instant>; 3] = [None; 3];

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(key, state, &mut input, &mut last_seen, frame_start) {
                        return Ok(());
                    }
                }
                Event::Resize(cols, rows) => {
                    screen.resize(cols, rows);
                    execute!(out, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        if !key_release {
            expire_holds(&mut input, &mut last_seen, frame_start);
        }

        tick(state, &mut input, frame_start);
        screen.draw(out, state)?;

        if let Some(remaining) = FRAME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Applies one key event. Returns true when the player asked to quit.
fn handle_key(
    key: KeyEvent,
    state: &mut GameState,
    input: &mut InputState,
    last_seen: &mut [Option<Instant>; 3],
    now: Instant,
) -> bool {
    let action = map_action(key.code);

    if key.kind == KeyEventKind::Release {
        if let Some(action) = action {
            input.release(action);
            last_seen[action as usize] = None;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Enter => match state.status {
            GameStatus::Start => state.begin_game(),
            GameStatus::GameOver | GameStatus::Won => state.reset_game(),
            _ => {}
        },
        KeyCode::Char(digit @ '1'..='4') if state.status == GameStatus::Quiz => {
            state.submit_quiz_answer(digit as usize - '1' as usize);
        }
        _ => {}
    }

    if let Some(action) = action {
        input.press(action);
        last_seen[action as usize] = Some(now);
    }
    false
}

fn map_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char(' ') => Some(Action::Jump),
        _ => None,
    }
}

/// Timed-fallback release: drop any action whose auto-repeat went quiet.
fn expire_holds(input: &mut InputState, last_seen: &mut [Option<Instant>; 3], now: Instant) {
    for action in [Action::MoveLeft, Action::MoveRight, Action::Jump] {
        let slot = &mut last_seen[action as usize];
        if let Some(at) = *slot {
            if now.saturating_duration_since(at) > HOLD_WINDOW {
                input.release(action);
                *slot = None;
            }
        }
    }
}
