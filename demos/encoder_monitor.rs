// Encoder monitor: READ-ONLY check that the controller and encoders respond
//
// This tool does NOT drive the motors - it's completely safe.
// Use this first before running force_test.
//
// Usage: cargo run --example encoder_monitor -- [--port /dev/ttyACM0]

use clap::Parser;
use std::thread::sleep;
use std::time::Duration;

use surgitouch_runtime::config;
use surgitouch_runtime::motor::roboclaw::{Command, RoboclawBus};
use surgitouch_runtime::motor::kinematics::positions_from_encoders;

#[derive(Parser)]
#[command(about = "Read-only surgitouch encoder diagnostic")]
struct Args {
    /// Serial port of the RoboClaw controller
    #[arg(long, default_value = config::MOTOR_PORT)]
    port: String,

    /// Packet-serial address of the controller
    #[arg(long, default_value_t = config::MOTOR_ADDRESS)]
    address: u8,

    /// Number of samples to print
    #[arg(long, default_value_t = 50)]
    samples: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    println!("surgitouch encoder monitor (read-only, no motor commands)");
    println!("Serial port: {} (address 0x{:02X})", args.port, args.address);
    println!();

    println!("Step 1: Opening serial port...");
    let mut bus = match RoboclawBus::open(&args.port, args.address) {
        Ok(bus) => {
            println!("  ✓ Serial port opened successfully");
            bus
        }
        Err(e) => {
            println!("  ✗ Failed to open serial port: {}", e);
            println!();
            println!("Troubleshooting:");
            println!("  - Check the port path is correct");
            println!("  - Verify the USB cable is connected");
            println!("  - Check you have permission to open the port");
            return Err(e.into());
        }
    };
    println!();

    println!("Step 2: Reading encoders...");
    println!("Move the handle by hand; counts and position should follow.");
    println!();
    println!("{:>10} {:>10} {:>8} {:>8}", "enc1", "enc2", "x", "y");

    for _ in 0..args.samples {
        let enc1 = bus.read_encoder(Command::ReadEncM1)?;
        let enc2 = bus.read_encoder(Command::ReadEncM2)?;
        let (x, y) = positions_from_encoders(enc1.count, enc2.count);
        println!("{:>10} {:>10} {:>8.3} {:>8.3}", enc1.count, enc2.count, x, y);
        sleep(Duration::from_millis(100));
    }

    println!();
    println!("Diagnostic complete. If the counts tracked the handle motion,");
    println!("next step: run 'cargo run --example force_test' with the handle free to move.");

    Ok(())
}
