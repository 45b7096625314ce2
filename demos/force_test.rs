// Force test: Careful, step-by-step test for motor actuation
//
// IMPORTANT: Run encoder_monitor FIRST to verify read-only communication.
//
// Usage: cargo run --example force_test -- [--port /dev/ttyACM0]
//
// Safety features:
// - Explicit confirmation before any drive command
// - Starts at zero force
// - Very gentle test forces
// - Easy abort with Ctrl+C

use clap::Parser;
use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use surgitouch_runtime::config;
use surgitouch_runtime::motor::{drive_from_force, Axis, HapticDevice, RoboclawDriver};

#[derive(Parser)]
#[command(about = "Step-by-step surgitouch force actuation test")]
struct Args {
    /// Serial port of the RoboClaw controller
    #[arg(long, default_value = config::MOTOR_PORT)]
    port: String,
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().eq_ignore_ascii_case("y")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    println!("surgitouch force test (WITH MOTOR DRIVE)");
    println!("  ⚠  This tool WILL drive the motors and move the handle!");
    println!("  ⚠  Keep your hand clear of the mechanism before proceeding!");
    println!();
    println!("Serial port: {}", args.port);
    println!();

    if !confirm("Have you run encoder_monitor first and verified the encoders respond?") {
        println!("Please run: cargo run --example encoder_monitor -- --port {}", args.port);
        return Ok(());
    }

    if !confirm("Is the handle free to move and your hand clear?") {
        println!("Please clear the mechanism before running the test.");
        return Ok(());
    }

    println!();
    println!("Opening motor controller...");
    let mut device = RoboclawDriver::new(&args.port)?;
    println!("✓ Connected");
    println!();

    // ========== STEP 1: Verify communication (read-only) ==========
    println!("Step 1: Verifying encoder communication (read-only)...");
    match device.read_encoders() {
        Ok(reading) => println!("  ✓ Encoders: enc1={}, enc2={}", reading.enc1, reading.enc2),
        Err(e) => {
            println!("  ✗ Encoder read failed: {} - aborting", e);
            return Ok(());
        }
    }
    println!();

    // ========== STEP 2: Zero force ==========
    println!("Step 2: Sending ZERO force to both axes...");
    println!("  This should NOT cause any movement.");
    println!();

    if !confirm("Send zero force command?") {
        println!("Aborted.");
        return Ok(());
    }

    apply_force(&mut device, 0.0, 0.0)?;
    println!("  ✓ Zero force sent");
    sleep(Duration::from_millis(500));
    println!();

    // ========== STEP 3: Gentle force test ==========
    println!("Step 3: Gentle force test");
    println!("  Force: 0.1 (one tenth of full scale)");
    println!("  Duration: 0.3 seconds per direction");
    println!();
    println!("  ⚠  WATCH THE HANDLE - it should nudge gently!");
    println!("  ⚠  Press Ctrl+C at any time to abort!");
    println!();

    if !confirm("Proceed with force test?") {
        apply_force(&mut device, 0.0, 0.0)?;
        return Ok(());
    }

    // Very conservative test parameters
    let test_force = 0.1;
    let test_duration = Duration::from_millis(300);
    let pause_duration = Duration::from_millis(500);

    let tests = [
        ("X positive", test_force, 0.0),
        ("X negative", -test_force, 0.0),
        ("Y positive", 0.0, test_force),
        ("Y negative", 0.0, -test_force),
    ];

    for (name, fx, fy) in tests {
        println!("  Testing: {}...", name);

        let dx = drive_from_force(fx);
        let dy = drive_from_force(fy);
        println!(
            "    Drive commands: X {:?} pwm={}, Y {:?} pwm={}",
            dx.direction, dx.pwm, dy.direction, dy.pwm
        );

        apply_force(&mut device, fx, fy)?;
        sleep(test_duration);

        // Release between tests
        apply_force(&mut device, 0.0, 0.0)?;
        sleep(pause_duration);
    }

    // ========== FINAL: Release ==========
    println!();
    println!("Step 4: Releasing motors...");
    apply_force(&mut device, 0.0, 0.0)?;
    println!("  ✓ Motors released");

    println!();
    println!("Test complete!");
    println!("If the handle nudged as expected, force actuation is working correctly.");
    println!("You can now try the full runtime with: cargo run");

    Ok(())
}

fn apply_force(
    device: &mut RoboclawDriver,
    fx: f32,
    fy: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let dx = drive_from_force(fx);
    let dy = drive_from_force(fy);
    device.drive_axis(Axis::X, dx.direction, dx.pwm)?;
    device.drive_axis(Axis::Y, dy.direction, dy.pwm)?;
    Ok(())
}
