// Haptic device interface for the surgitouch
//
// Defines the device boundary the control loop runs against, and the
// production implementation backed by the RoboClaw packet-serial bus.

use tracing::{debug, info, warn};

use super::roboclaw::{Command, Result, RoboclawBus};
use crate::config::MOTOR_ADDRESS;

/// The two actuated axes. X maps to motor channel M1, Y to M2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Motor drive direction, as wired on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One successful read of both encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderReading {
    pub enc1: i32,
    pub enc2: i32,
}

/// Device boundary the control loop runs against.
///
/// `read_encoders` fails if either per-axis read fails; counts from a
/// failed read are never surfaced. `reset_encoders` is a one-time startup
/// operation zeroing both counters.
pub trait HapticDevice {
    fn read_encoders(&mut self) -> Result<EncoderReading>;
    fn drive_axis(&mut self, axis: Axis, direction: Direction, pwm: u8) -> Result<()>;
    fn reset_encoders(&mut self) -> Result<()>;
}

/// Production haptic device driver over a RoboClaw controller
pub struct RoboclawDriver {
    bus: RoboclawBus,
}

impl RoboclawDriver {
    /// Connect to the controller on the given serial port
    pub fn new(port: &str) -> Result<Self> {
        Self::with_address(port, MOTOR_ADDRESS)
    }

    /// Connect with a custom packet-serial address
    pub fn with_address(port: &str, address: u8) -> Result<Self> {
        info!("Opening motor controller on {} (address 0x{:02X})", port, address);
        let bus = RoboclawBus::open(port, address)?;
        Ok(Self { bus })
    }

    fn drive_command(axis: Axis, direction: Direction) -> Command {
        match (axis, direction) {
            (Axis::X, Direction::Forward) => Command::M1Forward,
            (Axis::X, Direction::Backward) => Command::M1Backward,
            (Axis::Y, Direction::Forward) => Command::M2Forward,
            (Axis::Y, Direction::Backward) => Command::M2Backward,
        }
    }
}

impl HapticDevice for RoboclawDriver {
    fn read_encoders(&mut self) -> Result<EncoderReading> {
        let enc1 = self.bus.read_encoder(Command::ReadEncM1)?;
        let enc2 = self.bus.read_encoder(Command::ReadEncM2)?;
        Ok(EncoderReading {
            enc1: enc1.count,
            enc2: enc2.count,
        })
    }

    fn drive_axis(&mut self, axis: Axis, direction: Direction, pwm: u8) -> Result<()> {
        self.bus.drive(Self::drive_command(axis, direction), pwm)
    }

    fn reset_encoders(&mut self) -> Result<()> {
        info!("Zeroing encoder counters");
        self.bus.reset_encoders()
    }
}

impl Drop for RoboclawDriver {
    fn drop(&mut self) {
        // Leave both motors unpowered when the driver goes away
        for command in [Command::M1Backward, Command::M2Backward] {
            if let Err(e) = self.bus.drive(command, 0) {
                warn!("Failed to stop motor on drop: {}", e);
            }
        }
    }
}

/// Stand-in device used when hardware motor control is disabled.
/// Reports the handle as centered and discards drive commands.
#[derive(Debug, Default)]
pub struct NullDevice;

impl HapticDevice for NullDevice {
    fn read_encoders(&mut self) -> Result<EncoderReading> {
        Ok(EncoderReading { enc1: 0, enc2: 0 })
    }

    fn drive_axis(&mut self, axis: Axis, direction: Direction, pwm: u8) -> Result<()> {
        debug!("Simulated drive: {:?} {:?} pwm={}", axis, direction, pwm);
        Ok(())
    }

    fn reset_encoders(&mut self) -> Result<()> {
        Ok(())
    }
}
