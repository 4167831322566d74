//! Display loop state machine.
//!
//! Each cycle clears the overlay, checks the stage indicator and, on an
//! augment round, reads the three cards and draws their statistics:
//! Idle → CheckingPhase → LookingUp | Skipping → Rendering → Waiting → CheckingPhase

use anyhow::Result;
use std::time::Duration;

use super::canvas::Canvas;
use super::layout::OverlayLayout;
use super::lookup::{lookup, AugmentMatch};
use super::phase::is_augment_round;
use super::reader::ScreenReader;
use super::runner::StopSignal;
use crate::config::AppConfig;
use crate::data::SettingsStore;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    /// Not started; the screen resolution has not been read yet
    Idle,
    /// Reading the stage indicator
    CheckingPhase,
    /// Augment round: reading the three cards
    LookingUp,
    /// Not an augment round
    Skipping,
    /// Every card resolved; drawing (anchor x, match) pairs
    Rendering(Vec<(i32, AugmentMatch)>),
    /// Sleeping until the next cycle
    Waiting(Duration),
    /// Stop requested
    Stopped,
    /// Loop cannot continue
    Error(String),
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayState::Idle => write!(f, "Idle"),
            DisplayState::CheckingPhase => write!(f, "Checking round"),
            DisplayState::LookingUp => write!(f, "Reading augments"),
            DisplayState::Skipping => write!(f, "Not an augment round"),
            DisplayState::Rendering(_) => write!(f, "Showing stats"),
            DisplayState::Waiting(delay) => write!(f, "Waiting {}ms", delay.as_millis()),
            DisplayState::Stopped => write!(f, "Stopped"),
            DisplayState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

pub struct DisplayLoop {
    pub state: DisplayState,
    reader: ScreenReader,
    store: SettingsStore,
    canvas: Box<dyn Canvas>,
    stop: StopSignal,
    phase_delay: Duration,
    idle_delay: Duration,
    /// Set once from the live resolution when the loop starts
    layout: Option<OverlayLayout>,
    /// Whether the current cycle found an augment round
    in_phase: bool,
    pub cycles: u64,
}

impl DisplayLoop {
    pub fn new(
        reader: ScreenReader,
        store: SettingsStore,
        canvas: Box<dyn Canvas>,
        stop: StopSignal,
        config: &AppConfig,
    ) -> Self {
        Self {
            state: DisplayState::Idle,
            reader,
            store,
            canvas,
            stop,
            phase_delay: config.phase_delay(),
            idle_delay: config.idle_delay(),
            layout: None,
            in_phase: false,
            cycles: 0,
        }
    }

    /// Advances the state machine by one step.
    ///
    /// Returns `Ok(true)` while the loop should keep running, `Ok(false)`
    /// once it has stopped or failed.
    pub fn step(&mut self) -> Result<bool> {
        let state = std::mem::replace(&mut self.state, DisplayState::Stopped);

        // A stop that arrived mid-cycle ends the loop at the next step
        if !matches!(state, DisplayState::Stopped | DisplayState::Error(_))
            && self.stop.requested()
        {
            crate::log("Overlay stop requested");
            return Ok(false);
        }

        self.state = match state {
            DisplayState::Idle => match self.reader.resolution() {
                Ok(resolution) => {
                    let layout = OverlayLayout::for_resolution(resolution);
                    crate::log(&format!(
                        "Overlay started at {} (cards at {:?}, row {})",
                        resolution, layout.option_xs, layout.option_y
                    ));
                    self.layout = Some(layout);
                    DisplayState::CheckingPhase
                }
                Err(e) => DisplayState::Error(format!("Cannot read screen resolution: {}", e)),
            },

            DisplayState::CheckingPhase => {
                self.cycles += 1;
                self.canvas.clear();

                let Some(layout) = self.layout else {
                    self.state = DisplayState::Idle;
                    return Ok(true);
                };
                let (x, y) = layout.round_anchor;
                self.in_phase = is_augment_round(&self.reader, x, y, layout.resolution);

                if self.in_phase {
                    DisplayState::LookingUp
                } else {
                    DisplayState::Skipping
                }
            }

            DisplayState::LookingUp => self.look_up_cards(),

            DisplayState::Skipping => DisplayState::Waiting(self.next_delay()),

            DisplayState::Rendering(matches) => {
                if let Some(layout) = self.layout {
                    for (x, found) in &matches {
                        self.canvas.draw_text(*x, layout.text_y, &found.stats.summary());
                    }
                }
                DisplayState::Waiting(self.next_delay())
            }

            DisplayState::Waiting(delay) => {
                if self.stop.wait(delay) {
                    crate::log("Overlay stop requested");
                    DisplayState::Stopped
                } else {
                    DisplayState::CheckingPhase
                }
            }

            DisplayState::Stopped => DisplayState::Stopped,
            DisplayState::Error(msg) => DisplayState::Error(msg),
        };

        Ok(!matches!(
            self.state,
            DisplayState::Stopped | DisplayState::Error(_)
        ))
    }

    fn next_delay(&self) -> Duration {
        if self.in_phase {
            self.phase_delay
        } else {
            self.idle_delay
        }
    }

    /// Reloads the settings, then resolves every card. Renders only if all
    /// of them resolved.
    fn look_up_cards(&mut self) -> DisplayState {
        let Some(layout) = self.layout else {
            return DisplayState::Idle;
        };

        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(e) => {
                crate::log(&format!("Failed to load settings: {:#}", e));
                return DisplayState::Waiting(self.next_delay());
            }
        };
        let tables = match settings.augments.tables(settings.rank) {
            Ok(tables) => tables,
            Err(e) => {
                crate::log(&format!("{}", e));
                return DisplayState::Waiting(self.next_delay());
            }
        };

        let mut matches = Vec::with_capacity(layout.option_xs.len());
        for x in layout.option_xs {
            match lookup(&self.reader, tables, x, layout.option_y, layout.resolution) {
                Some(found) => matches.push((x, found)),
                None => {
                    crate::log(&format!("Card at x={} unresolved, nothing shown", x));
                    return DisplayState::Waiting(self.next_delay());
                }
            }
        }

        DisplayState::Rendering(matches)
    }
}
