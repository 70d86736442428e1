use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, ExecutableCommand};
use flapper::config::{self, CliOptions, Command, Settings, SettingsSource};
use flapper::game::{self, Game, GameEvent, GameInput, Phase};
use flapper::utils::logging::{self, LoggingConfig};
use flapper::{build_info, input, ui, HighScores, FRAME_INTERVAL_MS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let opts = match config::parse_args(std::env::args().skip(1)) {
        Ok(Command::Play(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'flapper --help' for usage.");
            std::process::exit(1);
        }
    };

    let (saved, source) = Settings::load();
    let settings = saved.clone().with_overrides(&opts);

    match logging::init_logging(LoggingConfig {
        filter: settings.log_filter.clone(),
        path: None,
    }) {
        Ok(Some(path)) => log::info!("{} logging to {}", build_info::version_line(), path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    // Reported only now that the logger is up
    match &source {
        SettingsSource::Saved => log::debug!("settings loaded"),
        SettingsSource::FirstRun => log::info!("no settings file, using defaults"),
        SettingsSource::Unreadable(e) => {
            log::warn!("settings unreadable, using defaults and leaving the file alone: {}", e)
        }
    }
    log::info!(
        "starting: difficulty={} mode={} seed={:?}",
        settings.difficulty.name(),
        settings.mode.name(),
        opts.seed
    );

    // First run writes defaults so there is a file to edit
    if source.should_write_defaults() {
        if let Err(e) = saved.save() {
            log::warn!("could not write settings: {}", e);
        }
    }

    let mut scores = HighScores::load();

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    // Key release events make hover movement stop exactly when a key is let go
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    log::debug!("keyboard enhancement: {}", enhanced);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &settings, &opts, &mut scores);
    let restored = restore_terminal(terminal.backend_mut(), enhanced);

    log::info!("exiting");
    result.and(restored)
}

/// Put the terminal back even if the game loop panics.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        default_hook(info);
    }));
}

/// Undo every terminal change. Each step runs even if an earlier one fails;
/// the first error is returned.
fn restore_terminal<W: Write>(out: &mut W, enhanced: bool) -> io::Result<()> {
    let popped = if enhanced {
        out.execute(PopKeyboardEnhancementFlags).map(|_| ())
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let screen = out.execute(LeaveAlternateScreen).map(|_| ());
    let cursor = out.execute(cursor::Show).map(|_| ());
    popped.and(raw).and(screen).and(cursor)
}

/// The frame loop: draw, poll input for the rest of the frame, advance time.
fn run(
    terminal: &mut Term,
    settings: &Settings,
    opts: &CliOptions,
    scores: &mut HighScores,
) -> io::Result<()> {
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(settings.difficulty, settings.mode, &mut rng);
    game.show_hitboxes = settings.show_hitboxes;
    game.best_score = scores.best(settings.difficulty, settings.mode);

    let frame_budget = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_game(frame, &game))?;

        // Drain input until the frame budget is spent
        let deadline = Instant::now() + frame_budget;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                let action = input::map_key(key, game.mode);
                if action == GameInput::Quit {
                    log::info!("quit with score {}", game.score);
                    record_best(&game, scores);
                    return Ok(());
                }
                let was_waiting = game.phase == Phase::WaitingToStart;
                game::process_input(&mut game, action);
                if was_waiting && game.phase == Phase::Playing {
                    // Don't count the idle time before the first input
                    last_tick = Instant::now();
                    log::debug!("round started");
                }
            }
        }

        let elapsed = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();
        if let Some(events) = game::tick(&mut game, elapsed, &mut rng) {
            for ev in events {
                handle_event(&game, ev, scores);
            }
        }
    }
}

fn handle_event(game: &Game, ev: GameEvent, scores: &mut HighScores) {
    match ev {
        GameEvent::Died { score } => {
            log::info!(
                "crashed with score {} (death #{}, tick {})",
                score,
                game.deaths,
                game.tick_count
            );
            record_best(game, scores);
        }
        GameEvent::Scored { score } => log::debug!("scored {}", score),
        GameEvent::RoundReset => log::debug!("round reset"),
        GameEvent::Flapped => log::trace!("flap"),
    }
}

/// Store the current round's score if it beats the saved best. The file is
/// only written when something changed.
fn record_best(game: &Game, scores: &mut HighScores) {
    if scores.record_round(game) {
        log::info!(
            "new best for {} {}: {}",
            game.difficulty.name(),
            game.mode.name(),
            game.score
        );
        if let Err(e) = scores.save() {
            log::warn!("could not save scores: {}", e);
        }
    }
}
