use env_logger::Env;
use log::info;
use playbook_core::{ActorId, Camera, Coordinate, NullRenderer, Stage, TimedPath, Tuning};
use std::env;
use std::time::Instant;

const DEFAULT_FRAMES: usize = 180;
const THROW_FRAME: usize = 20;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let tuning = match env::var("PLAYBOOK_TUNING") {
        Ok(path) => {
            info!("tuning loaded from {path}");
            Tuning::load(path)?
        }
        Err(_) => Tuning::default(),
    };

    let frames = env::var("PLAYBOOK_FRAMES")
        .ok()
        .and_then(|frames| frames.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut stage = Stage::headless(tuning)?;
    let camera = Camera::default();

    let quarterback = stage.spawn_player(Coordinate::new(0.0, -10.0))?;
    let receiver = stage.spawn_player(Coordinate::new(-20.0, 0.0))?;

    stage.new_play(quarterback)?;
    if let Some(player) = stage.registry.player_mut(receiver) {
        player.set_target_path(TimedPath::with_points(
            Coordinate::new(-20.0, 0.0),
            [
                (400.0, Coordinate::new(-20.0, 15.0)),
                (900.0, Coordinate::new(0.0, 30.0)),
            ],
        ));
    }

    let started = Instant::now();

    stage.record()?;
    for frame in 0..frames {
        if frame == THROW_FRAME {
            stage.input.press_key("2");
        }
        stage.step(&mut NullRenderer, &camera)?;
    }
    stage.stop();

    info!(
        "recorded {frames} frames ({}) in {} ms",
        stage.clock.format_elapsed(),
        started.elapsed().as_millis()
    );

    if let Some(carrier) = stage.carrier.carrier() {
        info!("ball ends the play with {carrier}");
    }

    stage.play()?;
    let duration = stage.clock.max_time();
    for quarter in 0..=4 {
        stage.scrub(duration * quarter as f64 / 4.0);
        stage.step(&mut NullRenderer, &camera)?;
        log_positions(&stage, &[quarterback, receiver]);
    }

    stage.play()?;
    if let Some(at) = stage.look_ahead(receiver, 60)? {
        info!("receiver one second into the play: ({:.1}, {:.1})", at.x, at.y);
    }
    stage.stop();

    Ok(())
}

fn log_positions(stage: &Stage, players: &[ActorId]) {
    let football = stage.football().map(|football| football.position());

    for id in players {
        if let Some(player) = stage.player(*id) {
            let at = player.position();
            info!(
                "[{}] player {} at ({:.1}, {:.1})",
                stage.clock.format_elapsed(),
                player.number(),
                at.x,
                at.y
            );
        }
    }

    if let Some(at) = football {
        info!("[{}] football at ({:.1}, {:.1})", stage.clock.format_elapsed(), at.x, at.y);
    }
}
