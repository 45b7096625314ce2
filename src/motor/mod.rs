// Motor control module for the surgitouch haptic device
//
// Provides:
// - Pivot-arm kinematics (encoder counts -> normalized position)
// - Force -> direction/PWM mapping
// - RoboClaw packet-serial protocol implementation
// - Device interface contract and RoboClaw-backed driver

mod driver;
pub mod force;
pub mod kinematics;
pub mod roboclaw;

pub use driver::{Axis, Direction, EncoderReading, HapticDevice, NullDevice, RoboclawDriver};
pub use force::{drive_from_force, drive_from_force_with_curve, AxisDrive, ForceCurve};
pub use kinematics::positions_from_encoders;
pub use roboclaw::{RoboclawBus, RoboclawError};
