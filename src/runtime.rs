// Fixed-rate haptic control loop
//
// Per tick: drain pending force commands (latest wins), read the encoders,
// publish the normalized position, then drive the motors from the current
// force command. A command arriving after a tick's drain point is applied
// on the next tick, never mid-iteration.

use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, warn};

// local imports
use crate::config::{LOOP_HZ, MOTOR_ENABLED, MOTOR_PORT, TOPIC_FORCE, TOPIC_POSITION};
use crate::messages::{ForceCommand, Position};
use crate::motor::{drive_from_force, positions_from_encoders};
use crate::motor::{Axis, HapticDevice, NullDevice, RoboclawDriver};

pub struct Runtime {
    // The only state that outlives an iteration: the last received force
    // command, applied every tick until replaced. Starts at zero force.
    force: ForceCommand,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            force: ForceCommand::default(),
        }
    }

    /// Process incoming force command
    fn on_force(&mut self, cmd: ForceCommand) {
        debug!("Received force command: {:?}", &cmd);
        self.force = cmd;
    }

    /// Run one control iteration against the device.
    ///
    /// Returns the position to publish, or None when the encoder read was
    /// invalid. An invalid read suppresses the publish for this iteration
    /// only; no stale or uninitialized position ever goes out, and the
    /// force apply still happens.
    fn step(&mut self, device: &mut dyn HapticDevice) -> Option<Position> {
        let position = match device.read_encoders() {
            Ok(reading) => {
                let (x, y) = positions_from_encoders(reading.enc1, reading.enc2);
                Some(Position { x, y })
            }
            Err(e) => {
                debug!("Invalid encoder read, suppressing publish: {}", e);
                None
            }
        };

        // The motors are commanded every iteration, even at zero force
        let drive_x = drive_from_force(self.force.x);
        let drive_y = drive_from_force(self.force.y);
        if let Err(e) = device.drive_axis(Axis::X, drive_x.direction, drive_x.pwm) {
            warn!("Failed to drive X axis: {}", e);
        }
        if let Err(e) = device.drive_axis(Axis::Y, drive_y.direction, drive_y.pwm) {
            warn!("Failed to drive Y axis: {}", e);
        }

        position
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let subscriber = session.declare_subscriber(TOPIC_FORCE).await?;
    let pub_position = session.declare_publisher(TOPIC_POSITION).await?;

    let mut device: Box<dyn HapticDevice> = if MOTOR_ENABLED {
        let mut driver = RoboclawDriver::new(MOTOR_PORT)?;
        driver.reset_encoders()?;
        Box::new(driver)
    } else {
        warn!("Motor control disabled, running against the null device");
        Box::new(NullDevice)
    };

    let mut runtime = Runtime::new();
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));

    info!("Runtime started: {}Hz loop", LOOP_HZ);
    info!("Subscribed to: {}", TOPIC_FORCE);
    info!("Publishing to: {}", TOPIC_POSITION);

    loop {
        tick.tick().await;

        // 1. Drain all pending force commands (non-blocking), keep latest.
        // Anything arriving after this point is visible next tick.
        while let Ok(Some(sample)) = subscriber.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<ForceCommand>(&payload) {
                Ok(cmd) => {
                    runtime.on_force(cmd);
                }
                Err(e) => {
                    warn!("Failed to parse force command: {}", e);
                }
            }
        }

        // 2. One iteration: read encoders, convert, apply current force
        let position = runtime.step(device.as_mut());

        // 3. Publish position (suppressed when the read was invalid)
        if let Some(position) = position {
            let position_json = serde_json::to_string(&position)?;
            pub_position.put(position_json).await?;
        }
    }
}
