//! Arena Survival headless driver
//!
//! Runs one simulation at a fixed render rate without a window. Useful for
//! soak-testing the director and AI: HUD lines go to the log, snapshots can
//! be dumped as JSON lines on stdout.

use arena_survival::Settings;
use arena_survival::sim::{GameState, KeyState, RunPhase, TickInput, tick};

/// Steer away from the nearest enemy or projectile, thrusting constantly.
fn autopilot(state: &GameState) -> KeyState {
    let me = state.player.center();
    let threat = state
        .enemies
        .iter()
        .map(|e| e.center())
        .chain(state.projectiles.iter().map(|p| p.rect().center()))
        .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));

    let Some(threat) = threat else {
        return KeyState::default();
    };

    let away = me - threat;
    let desired = away.y.atan2(away.x);
    let mut delta = desired - state.player.heading;
    // Wrap into [-PI, PI)
    delta = (delta + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI;

    KeyState {
        forward: true,
        backward: false,
        turn_left: delta < -0.05,
        turn_right: delta > 0.05,
    }
}

fn run(settings: &Settings) -> arena_survival::Result<()> {
    let mode = settings.mode()?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {seed}, mode {mode}, {}s at {} fps", settings.duration_secs, settings.frame_rate);

    let mut state = GameState::new(seed);
    state.start_mode(mode)?;

    let dt = settings.frame_dt();
    let frames = (settings.duration_secs / dt).ceil() as u64;
    let hud_every = u64::from(settings.frame_rate);

    for frame in 0..frames {
        let keys = if settings.autopilot && state.is_running() {
            autopilot(&state)
        } else {
            KeyState::default()
        };
        tick(&mut state, &TickInput { keys }, dt);

        if frame % hud_every == 0 {
            let hud = state.hud();
            log::info!(
                "[{:?}] mode={} wave={} time={} enemies={}",
                state.phase,
                hud.mode,
                hud.wave,
                hud.time,
                hud.enemies
            );
        }

        if settings.snapshot_every > 0 && frame % u64::from(settings.snapshot_every) == 0 {
            println!("{}", serde_json::to_string(&state.snapshot())?);
        }

        if state.phase == RunPhase::GameOver {
            break;
        }
    }

    match state.summary.as_deref() {
        Some(summary) => println!("{summary}"),
        None => println!("Still alive after {}s (wave {}).", settings.duration_secs, state.wave_index),
    }
    Ok(())
}

fn main() -> arena_survival::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    run(&settings)
}
