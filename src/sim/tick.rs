//! Per-frame simulation step
//!
//! Resolves phase transitions from the frame's input, then (only while
//! playing) runs the gameplay update in a fixed order: rider, road, obstacles
//! and collisions, recycle and score, difficulty.

use super::autopilot;
use super::obstacle::{CollisionEffect, ObstacleKind};
use super::rider::Steer;
use super::state::{GamePhase, GameState, MenuItem, RunSummary, SlowEffect};
use crate::consts::MAX_FRAME_DT;

/// Semantic input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window/terminal close request
    pub close: bool,
    /// New viewport size
    pub resize: Option<(u32, u32)>,
    /// Pause toggle (Esc)
    pub pause: bool,
    /// Cancel/back (leaves the about panel)
    pub back: bool,
    /// Menu button activated this frame
    pub activate: Option<MenuItem>,
    /// Held steering
    pub left: bool,
    pub right: bool,
    /// Held boost
    pub boost: bool,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

/// Things that happened during a tick, for logging and the frontend
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted { run: u32 },
    Paused,
    Resumed,
    AboutOpened,
    AboutClosed,
    Crashed(RunSummary),
    HazardHit { kind: ObstacleKind, secs: f32 },
    SlowEnded,
    BoostStarted,
    BoostEnded,
    Recycled { score: u64 },
    SpeedIncreased { speed: f32 },
    ViewportResized { width: u32, height: u32 },
    QuitRequested,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    if input.close {
        events.push(GameEvent::QuitRequested);
        return events;
    }

    if let Some((width, height)) = input.resize {
        state.viewport = (width, height);
        events.push(GameEvent::ViewportResized { width, height });
    }

    match state.phase {
        GamePhase::Menu => {
            // Demo mode starts the next run by itself
            let activate = match input.activate {
                None if input.idle_mode => Some(MenuItem::Play),
                other => other,
            };
            match activate {
                Some(MenuItem::Play) => {
                    state.reset_run();
                    state.runs += 1;
                    state.phase = GamePhase::Playing;
                    log::info!("Run {} started (seed {})", state.runs, state.seed);
                    events.push(GameEvent::RunStarted { run: state.runs });
                }
                Some(MenuItem::About) => {
                    state.phase = GamePhase::About;
                    events.push(GameEvent::AboutOpened);
                }
                Some(MenuItem::Quit) => {
                    events.push(GameEvent::QuitRequested);
                }
                None => {}
            }
            return events;
        }
        GamePhase::About => {
            if input.back || input.pause {
                state.phase = GamePhase::Menu;
                events.push(GameEvent::AboutClosed);
            }
            return events;
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
        }
        GamePhase::Paused => {
            if !input.pause {
                return events;
            }
            // Resuming updates on this same frame
            state.phase = GamePhase::Playing;
            events.push(GameEvent::Resumed);
        }
    }

    let steer = if input.idle_mode {
        autopilot::steer(state)
    } else {
        Steer {
            left: input.left,
            right: input.right,
        }
    };

    update_run(state, steer, input.boost, dt, &mut events);
    events
}

/// One gameplay frame. Caller guarantees the phase is `Playing`.
fn update_run(
    state: &mut GameState,
    steer: Steer,
    boost_held: bool,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    state.elapsed_secs += dt;
    update_effects(state, boost_held, dt, events);

    // Rider
    let lateral_speed = state.lateral_speed();
    state.rider.steer(steer, lateral_speed, dt, &state.tuning);
    let rider_y = state.rider_y();
    state.rider.set_y(rider_y);
    let frame_duration = state.frame_duration();
    state.rider.animate(dt, frame_duration);

    // Road and obstacles share one speed
    let speed = state.scroll_speed();
    state.top_speed = state.top_speed.max(speed);
    state.road.advance(speed, dt);
    state.track.advance(speed, dt);

    let mut crash = None;
    let mut hazard = None;
    for obstacle in state.track.collisions(state.rider.footprint()) {
        match obstacle.effect {
            CollisionEffect::Lethal => {
                crash = Some(obstacle.kind);
                break;
            }
            CollisionEffect::Hazard {
                speed_factor,
                duration_secs,
            } => {
                hazard.get_or_insert((obstacle.kind, speed_factor, duration_secs));
            }
        }
    }

    if let Some(kind) = crash {
        let summary = state.finish_run(kind);
        state.phase = GamePhase::Menu;
        log::info!(
            "Run {} ended: hit {} after {:.1}s, score {}",
            summary.run,
            kind.name(),
            summary.elapsed_secs,
            summary.score
        );
        events.push(GameEvent::Crashed(summary));
        return;
    }

    if let Some((kind, factor, secs)) = hazard {
        // Re-contact refreshes the timer; the factor never compounds
        if state.effects.slow.is_none() {
            log::debug!("Hit {}: slowed for {:.1}s", kind.name(), secs);
            events.push(GameEvent::HazardHit { kind, secs });
        }
        state.effects.slow = Some(SlowEffect {
            factor,
            remaining_secs: secs,
        });
    }

    if state
        .track
        .recycle_if_needed(&mut state.rng, &state.tuning)
        .is_some()
    {
        state.recycled += 1;
        state.score += state.recycle_points();
        events.push(GameEvent::Recycled { score: state.score });

        let trigger = state.difficulty_trigger();
        if state.difficulty.maybe_escalate(trigger) {
            events.push(GameEvent::SpeedIncreased {
                speed: state.difficulty.speed(),
            });
        }
    }
}

/// Start, tick down and expire the transient effects
fn update_effects(state: &mut GameState, boost_held: bool, dt: f32, events: &mut Vec<GameEvent>) {
    if state.effects.boosting() {
        state.effects.boost_secs -= dt;
        if state.effects.boost_secs <= 0.0 {
            state.effects.boost_secs = 0.0;
            events.push(GameEvent::BoostEnded);
        }
    } else if state.rules.boost && boost_held {
        state.effects.boost_secs = state.tuning.boost_duration;
        log::debug!("Boost started");
        events.push(GameEvent::BoostStarted);
    }

    if let Some(slow) = state.effects.slow.as_mut() {
        slow.remaining_secs -= dt;
        if slow.remaining_secs <= 0.0 {
            state.effects.slow = None;
            events.push(GameEvent::SlowEnded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::{DifficultyTrigger, Rules};
    use crate::sim::obstacle::Obstacle;
    use crate::sim::track::ObstacleTrack;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn menu_state() -> GameState {
        GameState::new(12345, Tuning::default(), Rules::default())
    }

    fn play(state: &mut GameState) -> Vec<GameEvent> {
        let input = TickInput {
            activate: Some(MenuItem::Play),
            ..Default::default()
        };
        tick(state, &input, SIM_DT)
    }

    fn pause_input() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    /// Relay the track with a single obstacle sitting on the rider
    fn drop_obstacle_on_rider(state: &mut GameState) {
        let tuning = Tuning {
            initial_obstacles: 1,
            spawn_start_y: state.rider.pos.y,
            spawn_margin: state.rider.pos.x,
            ..state.tuning.clone()
        };
        state.track.reset(&mut state.rng, &tuning);
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = menu_state();
        let events = play(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.runs, 1);
        assert!(events.contains(&GameEvent::RunStarted { run: 1 }));
    }

    #[test]
    fn test_menu_ignores_gameplay_input() {
        let mut state = menu_state();
        let before = state.snapshot();
        let input = TickInput {
            left: true,
            pause: true,
            back: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_about_and_back() {
        let mut state = menu_state();
        let open = TickInput {
            activate: Some(MenuItem::About),
            ..Default::default()
        };
        tick(&mut state, &open, SIM_DT);
        assert_eq!(state.phase, GamePhase::About);

        // Menu buttons do nothing on the about panel
        play(&mut state);
        assert_eq!(state.phase, GamePhase::About);

        let back = TickInput {
            back: true,
            ..Default::default()
        };
        let events = tick(&mut state, &back, SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(events, vec![GameEvent::AboutClosed]);

        // Esc also leaves the about panel
        tick(&mut state, &open, SIM_DT);
        tick(&mut state, &pause_input(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_idle_mode_starts_runs() {
        let mut state = menu_state();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let events = tick(&mut state, &idle, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::RunStarted { run: 1 }));

        // An explicit choice still wins
        let mut state = menu_state();
        let quit = TickInput {
            idle_mode: true,
            activate: Some(MenuItem::Quit),
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &quit, SIM_DT), vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_quit_from_menu() {
        let mut state = menu_state();
        let input = TickInput {
            activate: Some(MenuItem::Quit),
            ..Default::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_close_in_any_phase() {
        let mut state = menu_state();
        play(&mut state);
        tick(&mut state, &pause_input(), SIM_DT);
        let input = TickInput {
            close: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_pause_toggle_freezes_gameplay() {
        let mut state = menu_state();
        play(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);

        let events = tick(&mut state, &pause_input(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(events, vec![GameEvent::Paused]);
        let frozen = state.snapshot();

        // Held keys and time do nothing while paused
        let held = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &held, SIM_DT);
        }
        assert_eq!(state.snapshot(), frozen);

        let events = tick(&mut state, &pause_input(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::Resumed));
        // Resume frame also advances the run, without resetting it
        assert!(state.elapsed_secs > frozen.elapsed_secs);
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_resize_has_no_transition() {
        let mut state = menu_state();
        let input = TickInput {
            resize: Some((1024, 768)),
            ..Default::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(state.viewport, (1024, 768));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(
            events,
            vec![GameEvent::ViewportResized {
                width: 1024,
                height: 768
            }]
        );
    }

    #[test]
    fn test_narrow_road_config_keeps_rider_on_road() {
        let settings = crate::settings::Settings::from_json(r#"{"tuning":{"screen_width":300.0}}"#)
            .expect("valid settings");
        let mut state = GameState::from_settings(3, &settings);
        play(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let half = crate::sim::Rider::half_width();
        assert!(state.rider.pos.x >= half);
        assert!(state.rider.pos.x <= 300.0 - half);
    }

    #[test]
    fn test_lethal_collision_returns_to_menu() {
        let mut state = menu_state();
        play(&mut state);
        drop_obstacle_on_rider(&mut state);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        let summary = state.last_run.clone().expect("run summary recorded");
        assert_eq!(summary.run, 1);
        assert!(events.contains(&GameEvent::Crashed(summary)));
    }

    #[test]
    fn test_hazard_slows_then_reverts() {
        let rules = Rules {
            puddles: true,
            ..Rules::default()
        };
        let mut state = GameState::new(7, Tuning::default(), rules);
        play(&mut state);

        let tuning = state.tuning.clone();
        let puddle = ObstacleKind::Puddle;
        state.track = ObstacleTrack::new(&[puddle], &tuning);
        drop_obstacle_on_rider(&mut state);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::HazardHit {
            kind: puddle,
            secs: 1.5
        }));
        assert_eq!(state.lateral_speed(), 2.0);

        // Ride it out; the puddle scrolls away and the timer expires
        let mut reverted = false;
        for _ in 0..200 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT);
            if events.contains(&GameEvent::SlowEnded) {
                reverted = true;
                break;
            }
        }
        assert!(reverted);
        assert_eq!(state.lateral_speed(), tuning.rider_lateral_speed);
    }

    #[test]
    fn test_boost_reverts_fully() {
        let rules = Rules {
            boost: true,
            ..Rules::default()
        };
        let mut state = GameState::new(3, Tuning::default(), rules);
        play(&mut state);

        let boost = TickInput {
            boost: true,
            ..Default::default()
        };
        let events = tick(&mut state, &boost, SIM_DT);
        assert!(events.contains(&GameEvent::BoostStarted));
        assert!((state.scroll_speed() - 2.5 * 1.7).abs() < 1e-5);
        assert_eq!(state.frame_duration(), 0.05);

        let mut ended = false;
        for _ in 0..60 {
            if tick(&mut state, &boost, SIM_DT).contains(&GameEvent::BoostEnded) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(state.scroll_speed(), 2.5);
        assert_eq!(state.rider.pos.y, 440.0);
        assert!(state.top_speed > 4.0);
    }

    #[test]
    fn test_boost_ignored_without_rule() {
        let mut state = menu_state();
        play(&mut state);
        let boost = TickInput {
            boost: true,
            ..Default::default()
        };
        let events = tick(&mut state, &boost, SIM_DT);
        assert!(!events.contains(&GameEvent::BoostStarted));
        assert_eq!(state.scroll_speed(), 2.5);
    }

    #[test]
    fn test_recycle_scores_and_escalates() {
        let rules = Rules {
            difficulty_trigger: DifficultyTrigger::Recycles,
            ..Rules::default()
        };
        let mut state = GameState::new(5, Tuning::default(), rules);
        play(&mut state);
        // Rider hugs the left edge, outside every spawn band
        state.rider.pos.x = 24.0;
        let mut speedups = 0;
        for _ in 0..10 {
            let front_y = state.track.front().map(|o| o.y()).expect("track never empty");
            state.track.advance(652.0 - front_y, SIM_DT);
            let events = tick(&mut state, &TickInput::default(), 0.0);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::SpeedIncreased { .. }))
            {
                speedups += 1;
            }
            assert_eq!(state.track.len(), 5);
        }
        assert_eq!(state.recycled, 10);
        assert_eq!(state.score, 10);
        assert_eq!(speedups, 1);
        assert!((state.difficulty.speed() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_restart_matches_fresh_boot() {
        let fresh = menu_state().snapshot();

        let mut state = menu_state();
        play(&mut state);
        let held = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &held, SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        state.phase = GamePhase::Menu;
        play(&mut state);

        assert_eq!(state.runs, 2);
        assert_eq!(state.snapshot(), fresh);
        assert_eq!(state.track.len(), 5);
    }

    #[test]
    fn test_determinism() {
        let mut a = menu_state();
        let mut b = menu_state();
        let inputs = [
            TickInput {
                activate: Some(MenuItem::Play),
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
        let xa: Vec<Vec2> = a.track.iter().map(Obstacle::pos).collect();
        let xb: Vec<Vec2> = b.track.iter().map(Obstacle::pos).collect();
        assert_eq!(xa, xb);
    }
}
