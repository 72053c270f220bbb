//! Roster Runner entry point
//!
//! On wasm32 this mounts the game on the page's `#canvas`. Natively it runs
//! a headless session with the autopilot at a simulated 60 Hz and prints the
//! game-over summary as JSON.

#[cfg(target_arch = "wasm32")]
fn main() {
    use roster_runner::platform::web;

    web::init_logging();
    log::info!("Roster Runner starting...");
    if let Err(e) = web::mount("canvas") {
        log::error!("Failed to mount: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Roster Runner (native, headless) starting...");
    log::info!("The playable version runs in the browser - build for wasm32 with `trunk serve`");

    let args = headless::Args::parse();
    let report = headless::run(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};

    use anyhow::Context;
    use clap::Parser;
    use roster_runner::renderer::DrawList;
    use roster_runner::sim::{GameOverSummary, TickInput};
    use roster_runner::{AssetReadiness, LoopControl, Session, Tuning};
    use serde::Serialize;

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Parser)]
    #[command(name = "roster-runner")]
    #[command(about = "Play Roster Runner headless with the autopilot and print the result")]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Stop after this many frames even if the run is still going
        #[arg(long, default_value_t = 18000)]
        pub frames: u64,
        /// JSON tuning overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    /// What the run produced
    #[derive(Debug, Serialize)]
    pub struct Report {
        pub seed: u64,
        pub frames: u64,
        /// Simulation ticks of the final run
        pub ticks: u64,
        pub winter_frame: Option<u64>,
        pub final_speed: f32,
        pub draw_calls_last_frame: usize,
        pub summary: Option<GameOverSummary>,
    }

    fn load_tuning(path: &Path) -> anyhow::Result<Tuning> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("bad tuning in {}", path.display()))
    }

    pub fn run(args: &Args) -> anyhow::Result<Report> {
        let tuning = match &args.tuning {
            Some(path) => load_tuning(path)?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(|| roster_runner::platform::now_ms() as u64);

        let mut session = Session::new(seed, tuning).context("invalid tuning")?;
        session.activate();

        let assets = AssetReadiness::default();
        let mut list = DrawList::new();
        let mut now_ms = roster_runner::platform::now_ms();
        let mut frames = 0;
        let mut winter_frame = None;

        while frames < args.frames {
            list.clear();
            let input = TickInput {
                now_ms,
                autopilot: true,
            };
            let control = session.frame(&input, &assets, &mut list);
            frames += 1;
            now_ms += FRAME_MS;

            if winter_frame.is_none() && session.state().winter {
                winter_frame = Some(frames);
            }
            if control == LoopControl::Stop {
                break;
            }
        }

        if session.is_running() {
            log::info!("Frame budget of {} exhausted while still running", args.frames);
        }

        let state = session.state();
        Ok(Report {
            seed,
            frames,
            ticks: state.time_ticks,
            winter_frame,
            final_speed: state.speed,
            draw_calls_last_frame: list.len(),
            summary: state.summary,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::parse_from(["roster-runner"]);
            assert!(args.seed.is_none());
            assert_eq!(args.frames, 18000);
            assert!(args.tuning.is_none());
        }

        #[test]
        fn test_run_reports_ticks() {
            let args = Args::parse_from(["roster-runner", "--seed", "7", "--frames", "120"]);
            let report = run(&args).expect("headless run");
            assert_eq!(report.seed, 7);
            assert!(report.frames <= 120);
            assert_eq!(report.ticks, report.frames);
            assert!(report.draw_calls_last_frame > 0);
        }

        #[test]
        fn test_missing_tuning_file_is_an_error() {
            let args = Args::parse_from(["roster-runner", "--tuning", "/nonexistent/tuning.json"]);
            let err = run(&args).unwrap_err();
            assert!(err.to_string().contains("cannot read tuning file"));
        }
    }
}
