//! Session controller
//!
//! Owns the active session, its clock and the random source, and is the
//! only place state transitions happen:
//!
//! ```text
//! menu -> playing <-> paused
//!         playing -> ended -> menu (restart) | playing (play again)
//! ```
//!
//! Every timer firing is checked against the current session token before
//! it may touch anything, so a callback scheduled before a pause, end or
//! quit can never mutate the session that replaced it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{ClockIntervals, SessionClock, TimerFiring, TimerKind};
use super::input::{self, Action, Key};
use super::registry::{
    Decoration, GameMode, ModeOptions, ModeParams, ModeRegistry, RainIntensity, Subtype, Theme, WasteCategory,
};
use super::state::{EndReason, EntityId, Session, SessionState, SessionToken};
use super::tick::{self, GameEvent};
use crate::error::EngineError;
use crate::report::{PointLedger, SessionReport};

/// Read-only view of one live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: Subtype,
    pub variant: u8,
    pub pos: Vec2,
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub mode: Option<GameMode>,
    pub options: Option<ModeOptions>,
    pub score: i64,
    pub time_remaining: u32,
    pub actor_x: f32,
    pub entities: Vec<EntityView>,
    pub decorations: Vec<Decoration>,
    pub difficulty: f32,
    pub captured: u32,
    pub missed: u32,
    pub category_prompt: bool,
    pub lightning: bool,
}

impl Snapshot {
    fn menu() -> Self {
        Self {
            state: SessionState::Menu,
            mode: None,
            options: None,
            score: 0,
            time_remaining: 0,
            actor_x: crate::consts::ACTOR_START_X,
            entities: Vec::new(),
            decorations: Vec::new(),
            difficulty: 1.0,
            captured: 0,
            missed: 0,
            category_prompt: false,
            lightning: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Active {
    params: ModeParams,
    session: Session,
}

/// Controller for the tick-driven games
pub struct GameEngine<R = Pcg32> {
    registry: ModeRegistry,
    active: Option<Active>,
    clock: SessionClock,
    rng: R,
    next_token: u64,
    events: Vec<GameEvent>,
    firings: Vec<TimerFiring>,
    last_report: Option<SessionReport>,
}

impl GameEngine<Pcg32> {
    /// Engine with the builtin registry and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ModeRegistry::builtin(), Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Engine with a custom registry and random source
    pub fn with_rng(registry: ModeRegistry, rng: R) -> Self {
        Self {
            registry,
            active: None,
            clock: SessionClock::new(),
            rng,
            next_token: 0,
            events: Vec::new(),
            firings: Vec::new(),
            last_report: None,
        }
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn state(&self) -> SessionState {
        self.active.as_ref().map_or(SessionState::Menu, |a| a.session.state)
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Token of the current playing stretch (None unless playing)
    pub fn current_token(&self) -> Option<SessionToken> {
        self.clock.armed_token()
    }

    /// Report of the most recently ended session
    pub fn last_report(&self) -> Option<&SessionReport> {
        self.last_report.as_ref()
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand the last report to the point ledger. Each report is handed over
    /// at most once; returns false if there is none left to record.
    pub fn record_to<L: PointLedger + ?Sized>(&mut self, ledger: &mut L) -> bool {
        match self.last_report.take() {
            Some(report) => {
                ledger.record(&report);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Begin a fresh session (menu -> playing). Any running session is discarded.
    pub fn start(&mut self, mode: GameMode, options: ModeOptions) -> Result<SessionToken, EngineError> {
        let params = self.registry.params_for(mode)?.clone();

        let options = if options.fits(mode) {
            options
        } else {
            log::warn!("Options {:?} do not fit {:?}, using defaults", options, mode);
            ModeOptions::default_for(mode)
        };

        self.clock.disarm();
        let session = Session::new(&params, options);
        self.active = Some(Active { params, session });
        log::info!("Starting {} session", mode.as_str());

        let token = self.enter_playing();
        self.events.push(GameEvent::Started);
        Ok(token)
    }

    /// playing -> paused
    pub fn pause(&mut self) -> bool {
        if !self.leave_playing(SessionState::Paused) {
            log::debug!("pause ignored in state {:?}", self.state());
            return false;
        }
        self.events.push(GameEvent::Paused);
        true
    }

    /// paused -> playing (closes the category prompt, keeping the target)
    pub fn resume(&mut self) -> bool {
        if self.state() != SessionState::Paused {
            log::debug!("resume ignored in state {:?}", self.state());
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.session.category_prompt = false;
        }
        self.enter_playing();
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Pause and show the category prompt (sorting mode only)
    pub fn open_category_prompt(&mut self) -> bool {
        let sorting = self
            .active
            .as_ref()
            .is_some_and(|a| matches!(a.session.options, ModeOptions::Sorting { .. }));
        if !sorting || !self.leave_playing(SessionState::Paused) {
            log::debug!("category prompt ignored");
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.session.category_prompt = true;
        }
        self.events.push(GameEvent::CategoryPromptOpened);
        true
    }

    /// Confirm a category from the prompt and resume with it as the target
    pub fn select_category(&mut self, category: WasteCategory) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let session = &mut active.session;
        if session.state != SessionState::Paused || !session.category_prompt {
            log::debug!("category selection ignored outside the prompt");
            return false;
        }
        let ModeOptions::Sorting { target } = &mut session.options else {
            return false;
        };
        *target = category;
        session.category_prompt = false;

        log::info!("Target category now {}", category.as_str());
        self.events.push(GameEvent::CategoryChanged(category));
        self.enter_playing();
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Any state -> menu, discarding the session without a report
    pub fn quit(&mut self) {
        self.clock.disarm();
        if let Some(active) = self.active.take() {
            log::info!("Quit {} session", active.params.mode.as_str());
        }
    }

    /// ended -> menu
    pub fn restart(&mut self) -> bool {
        if self.state() != SessionState::Ended {
            return false;
        }
        self.quit();
        true
    }

    /// ended -> playing with the same mode and options
    pub fn play_again(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.session.state != SessionState::Ended {
            return false;
        }
        active.session.reset(&active.params);
        self.enter_playing();
        self.events.push(GameEvent::Started);
        true
    }

    fn enter_playing(&mut self) -> SessionToken {
        self.next_token += 1;
        let token = SessionToken(self.next_token);

        if let Some(active) = self.active.as_mut() {
            let params = &active.params;
            let session = &mut active.session;
            session.state = SessionState::Playing;
            session.token = token;
            self.clock.arm(
                token,
                ClockIntervals {
                    physics: params.physics_interval,
                    spawn: params.spawn_params(&session.options).interval,
                    countdown: params.countdown_interval,
                },
            );
        }
        token
    }

    /// Stop the clock before the state changes. False if not playing.
    fn leave_playing(&mut self, next: SessionState) -> bool {
        match self.active.as_mut() {
            Some(active) if active.session.state == SessionState::Playing => {
                self.clock.disarm();
                active.session.state = next;
                true
            }
            _ => false,
        }
    }

    /// playing -> ended; happens at most once per play-through
    fn end(&mut self, reason: EndReason) {
        if !self.leave_playing(SessionState::Ended) {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.session.end_reason = Some(reason);
        let report = SessionReport::from_session(&active.session, reason);
        log::info!(
            "{} session ended ({:?}): score {}, {} stars",
            report.mode.as_str(),
            reason,
            report.final_score,
            report.stars
        );
        self.last_report = Some(report.clone());
        self.events.push(GameEvent::SessionEnded(report));
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Advance wall time and run every timer that came due
    pub fn advance(&mut self, dt: std::time::Duration) {
        let mut firings = std::mem::take(&mut self.firings);
        self.clock.advance(dt, &mut firings);
        for firing in firings.drain(..) {
            self.fire(firing);
        }
        self.firings = firings;
    }

    /// Deliver a single timer callback. Stale firings are discarded.
    pub fn fire(&mut self, firing: TimerFiring) -> bool {
        let live = self.clock.armed_token() == Some(firing.token)
            && self
                .active
                .as_ref()
                .is_some_and(|a| a.session.is_playing() && a.session.token == firing.token);
        if !live {
            log::debug!("Discarding stale {:?} firing for {:?}", firing.kind, firing.token);
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let ended = match firing.kind {
            TimerKind::Physics => tick::physics_tick(&mut active.session, &active.params, &mut self.events),
            TimerKind::Spawn => {
                tick::spawn_tick(&mut active.session, &active.params, &mut self.rng, &mut self.events);
                None
            }
            TimerKind::Countdown => {
                tick::countdown_tick(&mut active.session, &active.params, &mut self.rng, &mut self.events)
            }
        };
        if let Some(reason) = ended {
            self.end(reason);
        }
        true
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Route a key press. Returns the action taken, if any.
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        let session = self.session()?;
        let action = input::route(session.mode, session.state, session.category_prompt, key)?;

        let applied = match action {
            Action::Move(direction) => self.move_actor(direction),
            Action::TogglePause => match self.state() {
                SessionState::Playing => self.pause(),
                _ => self.resume(),
            },
            Action::OpenCategoryPrompt => self.open_category_prompt(),
            Action::PickCategory(category) => self.select_category(category),
            Action::SetTheme(theme) => self.set_theme(theme),
            Action::SetIntensity(intensity) => self.set_intensity(intensity),
        };
        applied.then_some(action)
    }

    /// Move the actor one step left (negative) or right (positive).
    /// Zero and non-finite directions are ignored.
    pub fn move_actor(&mut self, direction: f32) -> bool {
        if direction == 0.0 || !direction.is_finite() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.session.is_playing() {
            return false;
        }
        let params = &active.params;
        let dx = direction.signum() * params.actor_step;
        active.session.actor.shift(dx, params.actor_min_x, params.actor_max_x);
        true
    }

    /// Switch sky theme without pausing (collection mode only)
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        let Some(options) = self.playing_collection_options() else {
            return false;
        };
        if let ModeOptions::Collection { theme: current, .. } = options {
            *current = theme;
        }
        self.events.push(GameEvent::ThemeChanged(theme));
        true
    }

    /// Switch rain intensity without pausing (collection mode only).
    /// On a real change the spawn timer restarts with the tier's interval;
    /// picking the active tier again leaves the schedule alone.
    pub fn set_intensity(&mut self, intensity: RainIntensity) -> bool {
        let Some(options) = self.playing_collection_options() else {
            return false;
        };
        if let ModeOptions::Collection { intensity: current, .. } = options {
            if *current == intensity {
                return true;
            }
            *current = intensity;
        }
        if let Some(active) = self.active.as_ref() {
            let interval = active.params.spawn_params(&active.session.options).interval;
            self.clock.reschedule_spawn(interval);
        }
        log::info!("Rain intensity now {}", intensity.as_str());
        self.events.push(GameEvent::IntensityChanged(intensity));
        true
    }

    fn playing_collection_options(&mut self) -> Option<&mut ModeOptions> {
        let active = self.active.as_mut()?;
        let session = &mut active.session;
        (session.is_playing() && matches!(session.options, ModeOptions::Collection { .. }))
            .then_some(&mut session.options)
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        let Some(active) = self.active.as_ref() else {
            return Snapshot::menu();
        };
        let session = &active.session;
        Snapshot {
            state: session.state,
            mode: Some(session.mode),
            options: Some(session.options),
            score: session.score,
            time_remaining: session.time_remaining,
            actor_x: session.actor.x,
            entities: session
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    variant: e.variant,
                    pos: e.pos,
                })
                .collect(),
            decorations: session.decorations.clone(),
            difficulty: session.difficulty,
            captured: session.stats.captured(),
            missed: session.stats.missed(),
            category_prompt: session.category_prompt,
            lightning: session.lightning_ticks > 0,
        }
    }
}
