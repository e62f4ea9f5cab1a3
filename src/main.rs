//! Neon Runner entry point
//!
//! Natively this runs a headless session (autopilot by default) and logs a
//! summary. The browser build is driven through `platform::web::WebRunner`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use neon_runner::persistence::{FileStore, MemoryStore, ScoreStore};
    use neon_runner::sim::{GameEvent, GamePhase};
    use neon_runner::{Session, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "neon-runner", about = "Headless endless-runner simulation")]
    pub struct Args {
        /// Seconds of simulated play
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Tuning JSON file
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Directory holding the best score (in-memory when absent)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Run without the autopilot (the runner goes straight ahead)
        #[arg(long)]
        manual: bool,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::parse();
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        match &args.data_dir {
            Some(dir) => simulate(Session::open(FileStore::new(dir), tuning), &args),
            None => simulate(Session::open(MemoryStore::new(), tuning), &args),
        }
        Ok(())
    }

    fn simulate<S: ScoreStore>(mut session: Session<S>, args: &Args) {
        session.autopilot = !args.manual;
        let fps = args.fps.max(1.0);
        let frame_ms = 1000.0 / fps;
        let frames = (args.seconds * fps).ceil() as u64;

        let mut now = 0.0;
        let (mut stumbles, mut powerups) = (0u32, 0u32);
        session.start(now);

        for _ in 0..frames {
            now += frame_ms;
            for event in session.frame(now, (frame_ms / 1000.0) as f32) {
                match event {
                    GameEvent::Stumbled => stumbles += 1,
                    GameEvent::PowerUpCollected { kind } => {
                        powerups += 1;
                        log::debug!("Power-up {:?} at {:.1}s", kind, now / 1000.0);
                    }
                    GameEvent::SpeedUp { speed } => log::debug!("Speed {:.1}", speed),
                    _ => {}
                }
            }
            if session.state().phase != GamePhase::Running {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "{:?} after {:.1}s: distance {:.0}, score {}, coins {}, power-ups {}, stumbles {}, speed {:.1}, best {}",
            state.phase,
            now / 1000.0,
            state.player.distance(),
            state.score,
            state.coins,
            powerups,
            stumbles,
            state.speed,
            session.best()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Runner (headless) starting...");
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
