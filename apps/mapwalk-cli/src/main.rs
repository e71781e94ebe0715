use clap::{Parser, Subcommand};
use glam::Vec2;
use mapwalk_input::{InputState, Key};
use mapwalk_kernel::{Player, Scene};
use mapwalk_render::{FrameLoop, RecordingCanvas};
use tracing_subscriber::EnvFilter;

const CANVAS_WIDTH: f32 = 640.0;
const CANVAS_HEIGHT: f32 = 400.0;

#[derive(Parser)]
#[command(name = "mapwalk-cli", about = "Headless mapwalk tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the frame loop headless with fixed input and trace the pose
    Walk {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Hold the forward key
        #[arg(long)]
        forward: bool,
        /// Hold the backward key
        #[arg(long)]
        backward: bool,
        /// Hold the turn-left key
        #[arg(long)]
        left: bool,
        /// Hold the turn-right key
        #[arg(long)]
        right: bool,
        /// Hold the boost modifier
        #[arg(long)]
        boost: bool,
        /// Emit the full pose trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project the demo walls from the starting pose
    Project {
        /// Emit the projected segments as JSON
        #[arg(long)]
        json: bool,
    },
}

fn held_input(forward: bool, backward: bool, left: bool, right: bool, boost: bool) -> InputState {
    let mut input = InputState::new();
    for (held, key) in [
        (forward, Key::Forward),
        (backward, Key::Backward),
        (left, Key::TurnLeft),
        (right, Key::TurnRight),
        (boost, Key::Boost),
    ] {
        if held {
            input.press(key);
        }
    }
    input
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("mapwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            let scene = Scene::demo(CANVAS_WIDTH, CANVAS_HEIGHT);
            println!(
                "kernel: walls={}, start=({:.1}, {:.1}), angle={}",
                scene.walls().len(),
                scene.player.x,
                scene.player.y,
                scene.player.angle
            );
            println!("render: {}", mapwalk_render::crate_info());
        }
        Commands::Walk {
            frames,
            forward,
            backward,
            left,
            right,
            boost,
            json,
        } => {
            let input = held_input(forward, backward, left, right, boost);
            let mut frame_loop = FrameLoop::new(
                Scene::demo(CANVAS_WIDTH, CANVAS_HEIGHT),
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
            );
            let mut canvas = RecordingCanvas::new();

            let mut trace: Vec<Player> = Vec::with_capacity(frames as usize + 1);
            trace.push(frame_loop.scene.player);
            for _ in 0..frames {
                frame_loop.advance(&input, &mut canvas);
                canvas.take();
                trace.push(frame_loop.scene.player);
            }

            if json {
                println!("{}", serde_json::to_string(&trace)?);
            } else {
                let last = frame_loop.scene.player;
                println!("Walked {frames} frames");
                println!(
                    "Final pose: ({:.2}, {:.2}), angle={:.4} rad, speed={:.0}",
                    last.x, last.y, last.angle, last.speed
                );
            }
        }
        Commands::Project { json } => {
            let scene = Scene::demo(CANVAS_WIDTH, CANVAS_HEIGHT);
            let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
            let segments: Vec<_> = scene
                .walls()
                .iter()
                .map(|wall| wall.project(&scene.player, center))
                .collect();

            if json {
                println!("{}", serde_json::to_string(&segments)?);
            } else {
                for (wall, seg) in scene.walls().iter().zip(&segments) {
                    println!(
                        "({:6.1}, {:6.1})-({:6.1}, {:6.1}) -> ({:7.2}, {:7.2})-({:7.2}, {:7.2})",
                        wall.x1, wall.y1, wall.x2, wall.y2, seg.a.x, seg.a.y, seg.b.x, seg.b.y
                    );
                }
            }
        }
    }

    Ok(())
}
