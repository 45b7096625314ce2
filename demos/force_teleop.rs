// Keyboard force teleop: WASD push the handle, R/F change strength, Q quit
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::info;

const STRENGTHS: [f64; 3] = [0.1, 0.4, 1.0]; // fraction of full force
const INPUT_TIMEOUT_MS: u64 = 100; // Release forces after this much time with no input

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher("surgitouch/force").await?;

    info!("Controls: WASD=push, R/F=strength, Q=quit");
    info!("Strength: LOW");

    enable_raw_mode()?;
    let result = run_teleop(&publisher).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    publisher: &zenoh::pubsub::Publisher<'_>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut strength_idx: usize = 0;

    // Persistent force state
    let mut force_x = 0.0;
    let mut force_y = 0.0;
    let mut last_input = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    // Push direction - update force and refresh timestamp
                    KeyCode::Char('w') if pressed => {
                        force_y = STRENGTHS[strength_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        force_y = -STRENGTHS[strength_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        force_x = -STRENGTHS[strength_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        force_x = STRENGTHS[strength_idx];
                        last_input = Instant::now();
                    }

                    // Strength control
                    KeyCode::Char('r') if pressed => {
                        strength_idx = (strength_idx + 1).min(2);
                        print_strength(strength_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        strength_idx = strength_idx.saturating_sub(1);
                        print_strength(strength_idx);
                    }

                    // Quit
                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Release the forces if no input for INPUT_TIMEOUT_MS
        if last_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            force_x = 0.0;
            force_y = 0.0;
        }

        // Always publish at ~50Hz; the runtime holds the last command
        let cmd = json!({
            "x": force_x,
            "y": force_y
        });
        publisher.put(cmd.to_string()).await?;
    }

    // Leave the handle free
    publisher.put(json!({ "x": 0.0, "y": 0.0 }).to_string()).await?;

    Ok(())
}

fn print_strength(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Strength: {}", label);
}
