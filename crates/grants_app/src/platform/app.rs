use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use grants_core::{update, AppState, Msg, Page};
use grants_logging::{grants_info, grants_trace, grants_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::ui::command::{parse_command, Command};
use super::ui::render::Renderer;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the main loop reacts to.
pub(crate) enum Event {
    Line(String),
    InputClosed,
    Msg(Msg),
}

impl From<Msg> for Event {
    fn from(msg: Msg) -> Self {
        Event::Msg(msg)
    }
}

pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path(std::env::args().skip(1));
    let (config, config_error) = match config::load_config(&path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let config = config.with_base_url_override(std::env::var(config::BASE_URL_ENV).ok());

    grants_logging::initialize(config.log_destination, config.log_level, None);
    if let Some(err) = config_error {
        grants_warn!("Using default config: {:#}", err);
    }
    grants_info!("Config loaded from {:?}", path);

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    let runner = EffectRunner::new(config.client_config(), event_tx.clone())?;
    spawn_input_reader(event_tx.clone());
    spawn_ticker(event_tx);

    let mut renderer = Renderer::new(&config.base_url);
    let mut state = AppState::new();
    let mut stdout = io::stdout();
    writeln!(stdout, "Grant tracker at {}. Type `help` for commands.", config.base_url)?;

    state = dispatch(state, Msg::PageOpened(Page::Grants), &runner);
    draw(&mut state, &mut renderer, &mut stdout)?;

    while let Ok(event) = event_rx.recv() {
        match event {
            Event::Msg(msg) => state = dispatch(state, msg, &runner),
            Event::Line(line) => match parse_command(&line, &state.view()) {
                Command::Quit => break,
                Command::Show(text) => writeln!(stdout, "{text}")?,
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        state = dispatch(state, msg, &runner);
                    }
                }
            },
            Event::InputClosed => break,
        }
        draw(&mut state, &mut renderer, &mut stdout)?;
    }

    grants_info!("Shutting down");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    if !matches!(msg, Msg::Tick { .. }) {
        grants_trace!("dispatch {:?}", msg);
    }
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn draw(state: &mut AppState, renderer: &mut Renderer, out: &mut impl Write) -> io::Result<()> {
    if !state.consume_dirty() {
        return Ok(());
    }
    if let Some(frame) = renderer.frame(&state.view()) {
        write!(out, "\n{frame}")?;
        out.flush()?;
    }
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    grants_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn spawn_ticker(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let mut last = Instant::now();
        loop {
            thread::sleep(TICK_INTERVAL);
            let now = Instant::now();
            let elapsed = now - last;
            last = now;
            if tx.send(Event::Msg(Msg::Tick { elapsed })).is_err() {
                break;
            }
        }
    });
}
