// Topics, serial configuration, device geometry

// Control loop frequency
pub const LOOP_HZ: u64 = 100;

// Zenoh topics
pub const TOPIC_POSITION: &str = "surgitouch/position"; // normalized position out
pub const TOPIC_FORCE: &str = "surgitouch/force"; // force commands in

// Serial port for the RoboClaw motor controller
pub const MOTOR_PORT: &str = "/dev/ttyACM0";

// Packet-serial address of the controller on the bus
pub const MOTOR_ADDRESS: u8 = 0x80;

// Enable hardware motor control (set to false for simulation/testing)
pub const MOTOR_ENABLED: bool = true;

// Device geometry: each encoder measures the angle of a pivoting arm,
// and the tangent of that angle projects onto a linear displacement at
// HEIGHT above the sensed plane. CENTRE_DISTANCE is the linear travel
// that maps to a normalized position of 1.0.
pub const HEIGHT: f32 = 10.0;
pub const COUNTS_PER_REV: f32 = 4096.0;
pub const CENTRE_DISTANCE: f32 = 5.0;
