//! Tank Arena headless driver
//!
//! Runs a session at a simulated frame rate, feeding key events from a
//! script (or a built-in patrol) and printing JSON snapshots to stdout.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use serde::{Deserialize, Serialize};

    use tank_arena::consts::SIM_STEP_MS;
    use tank_arena::sim::{FrameClock, Key, Session, SessionState};
    use tank_arena::{ArenaConfig, ConfigResult};

    #[derive(Parser, Debug)]
    #[command(name = "tank-arena")]
    #[command(about = "Run a deterministic tank arena session and dump snapshots as JSON")]
    pub struct Cli {
        /// Arena config (JSON); defaults are used for missing fields
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Key script (JSON list of `{ "at_ms", "key", "down" }`)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Simulated render frames
        #[arg(long, default_value_t = 3600)]
        frames: u32,
        /// Simulated render rate
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print a snapshot every N frames (0 = only the last one)
        #[arg(long, default_value_t = 60)]
        snapshot_every: u32,
        /// Also print game events as they happen
        #[arg(long)]
        events: bool,
    }

    /// One scripted key transition, timed on the host clock
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ScriptStep {
        pub at_ms: u64,
        pub key: Key,
        pub down: bool,
    }

    /// Hold fire and sweep left and right along the bottom of the arena
    fn patrol() -> Vec<ScriptStep> {
        let mut steps = vec![ScriptStep {
            at_ms: 0,
            key: Key::Fire,
            down: true,
        }];
        for lap in 0..30u64 {
            let key = if lap % 2 == 0 { Key::Left } else { Key::Right };
            let start = lap * 2000;
            steps.push(ScriptStep {
                at_ms: start,
                key,
                down: true,
            });
            steps.push(ScriptStep {
                at_ms: start + 1500,
                key,
                down: false,
            });
        }
        steps
    }

    fn load_script(path: &Path) -> ConfigResult<Vec<ScriptStep>> {
        let text = std::fs::read_to_string(path)?;
        let mut steps: Vec<ScriptStep> = serde_json::from_str(&text)?;
        steps.sort_by_key(|s| s.at_ms);
        log::info!("Loaded {} script steps from {}", steps.len(), path.display());
        Ok(steps)
    }

    /// Replays a key script against a session, one fixed step at a time.
    /// Steps are timed on the host's own clock, which keeps running while
    /// the session is paused, so a script can pause and later resume.
    pub struct ScriptDriver {
        steps: Vec<ScriptStep>,
        cursor: usize,
        host_ms: u64,
    }

    impl ScriptDriver {
        pub fn new(steps: Vec<ScriptStep>) -> Self {
            Self {
                steps,
                cursor: 0,
                host_ms: 0,
            }
        }

        /// Deliver every step due by now, then run one session tick
        pub fn substep(&mut self, session: &mut Session) {
            while let Some(step) = self.steps.get(self.cursor) {
                if step.at_ms > self.host_ms {
                    break;
                }
                if step.down {
                    session.on_key_down(step.key);
                } else {
                    session.on_key_up(step.key);
                }
                self.cursor += 1;
            }
            session.tick(SIM_STEP_MS);
            self.host_ms += SIM_STEP_MS;
        }

        pub fn is_finished(&self) -> bool {
            self.cursor >= self.steps.len()
        }
    }

    fn print_json<T: Serialize>(value: &T) {
        match serde_json::to_string(value) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Failed to serialize output: {}", e),
        }
    }

    pub fn run(cli: Cli) -> ConfigResult<()> {
        let mut config = match &cli.config {
            Some(path) => ArenaConfig::load(path)?,
            None => ArenaConfig::default(),
        };
        if let Some(seed) = cli.seed {
            config.seed = seed;
        }
        let script = match &cli.script {
            Some(path) => load_script(path)?,
            None => patrol(),
        };

        let mut session = Session::new(config)?;
        let mut clock = FrameClock::new();
        let mut driver = ScriptDriver::new(script);
        let frame_dt = 1.0 / cli.fps.max(1.0);

        for frame in 1..=cli.frames {
            for _ in 0..clock.advance(frame_dt) {
                driver.substep(&mut session);
            }

            let events = session.drain_events();
            if cli.events {
                for event in &events {
                    print_json(event);
                }
            }
            if cli.snapshot_every > 0 && frame % cli.snapshot_every == 0 {
                print_json(&session.snapshot());
            }

            if session.exit_requested() {
                log::info!("Exit requested at frame {}", frame);
                break;
            }
            // A script may still restart after game over
            if session.state() == SessionState::GameOver && driver.is_finished() {
                log::info!("Game over at frame {} with score {}", frame, session.score());
                break;
            }
        }

        print_json(&session.snapshot());
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn at(at_ms: u64, key: Key, down: bool) -> ScriptStep {
            ScriptStep { at_ms, key, down }
        }

        #[test]
        fn test_script_pauses_and_resumes() {
            let mut session = Session::new(ArenaConfig::default()).unwrap();
            let mut driver = ScriptDriver::new(vec![
                at(96, Key::Pause, true),
                at(112, Key::Pause, false),
                at(500, Key::Pause, true),
            ]);

            // Host 0..=80: six ticks, then paused at 96
            for _ in 0..7 {
                driver.substep(&mut session);
            }
            assert_eq!(session.state(), SessionState::Paused);
            assert_eq!(session.clock_ms(), 96);

            // Still paused through host 496
            for _ in 0..25 {
                driver.substep(&mut session);
            }
            assert_eq!(session.state(), SessionState::Paused);
            assert_eq!(session.clock_ms(), 96);

            // Resumed at host 512, then eight ticks
            for _ in 0..8 {
                driver.substep(&mut session);
            }
            assert!(driver.is_finished());
            assert_eq!(session.state(), SessionState::Playing);
            assert_eq!(session.clock_ms(), 96 + 8 * 16);
        }

        #[test]
        fn test_script_restarts_after_pause() {
            let mut session = Session::new(ArenaConfig::default()).unwrap();
            let mut driver = ScriptDriver::new(vec![
                at(160, Key::Pause, true),
                at(400, Key::Restart, true),
            ]);

            for _ in 0..30 {
                driver.substep(&mut session);
            }
            assert!(driver.is_finished());
            assert_eq!(session.state(), SessionState::Playing);
            // Restart at host 400, then ticks at 400..=464
            assert_eq!(session.clock_ms(), 5 * 16);
        }

        #[test]
        fn test_patrol_is_time_ordered() {
            let steps = patrol();
            assert!(steps.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    log::info!("Tank Arena (headless) starting...");

    match native::run(native::Cli::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core is a library; web hosts drive `Session` directly
}
