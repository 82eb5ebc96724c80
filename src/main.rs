//! Eco Games entry point
//!
//! The browser host drives the engine directly. Natively this runs a
//! headless auto-player through each game and prints the session reports.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use eco_games::consts::PHYSICS_INTERVAL;
    use eco_games::puzzle::PuzzleKind;
    use eco_games::sim::{GameEngine, GameMode, SessionState, Subtype};
    use eco_games::{EngineError, SessionReport, Settings, WordPuzzle};

    /// Safety stop for the frame loop (well past the longest session)
    const MAX_FRAMES: u32 = 20_000;

    pub fn run() -> Result<(), EngineError> {
        let settings = load_settings();
        let seed = settings.seed_or(0xEC0);
        let mut ledger: Vec<SessionReport> = Vec::new();

        let mut engine = GameEngine::new(seed);
        for mode in GameMode::ALL {
            engine.start(mode, settings.options_for(mode))?;
            play_out(&mut engine);
            engine.record_to(&mut ledger);
            engine.restart();
        }

        for report in &ledger {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to encode report: {}", e),
            }
        }
        let total: u64 = ledger.iter().map(SessionReport::points_earned).sum();
        println!("Points earned: {total}");

        puzzle_demo(settings.puzzle_kind, seed)
    }

    fn load_settings() -> Settings {
        let Some(path) = std::env::args().nth(1) else {
            return Settings::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Settings::default()
            }
        }
    }

    /// Chase the lowest catchable entity until the session ends
    fn play_out(engine: &mut GameEngine) {
        for _ in 0..MAX_FRAMES {
            if engine.state() != SessionState::Playing {
                break;
            }

            let goal = engine.session().and_then(|session| {
                session
                    .entities
                    .iter()
                    .filter(|e| session.is_target(e.kind) || e.kind == Subtype::Raindrop)
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.pos.x - session.actor.x)
            });
            if let Some(dx) = goal {
                if dx.abs() > 10.0 {
                    engine.move_actor(dx.signum());
                }
            }

            engine.advance(PHYSICS_INTERVAL);
            for event in engine.take_events() {
                log::trace!("{:?}", event);
            }
        }
    }

    fn puzzle_demo(kind: PuzzleKind, seed: u64) -> Result<(), EngineError> {
        let mut puzzle = WordPuzzle::new(kind, seed)?;
        for round in 0..3 {
            let display = puzzle.state().display.clone();
            let answer = puzzle.state().current_word.clone();
            // Answer every other word correctly
            let guess = if round % 2 == 0 { answer.to_lowercase() } else { display.clone() };
            let outcome = puzzle.submit(&guess);
            println!(
                "{} -> {} ({}): {}",
                display,
                outcome.word,
                if outcome.correct { "correct" } else { "wrong" },
                outcome.meaning
            );
            puzzle.next_word();
        }
        let snapshot = puzzle.snapshot();
        println!("Puzzle score {} at level {}", snapshot.score, snapshot.level);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Eco Games (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page embeds the library directly
}
