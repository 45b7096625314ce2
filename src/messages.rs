// Define message types for the runtime

use serde::{Deserialize, Serialize};

/// Desired force per axis, from the external controller -> runtime.
///
/// Values are expected in [-1, 1]; anything outside is saturated before it
/// reaches the motors. The last received command stays in effect until the
/// next one arrives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct ForceCommand {
    pub x: f32,
    pub y: f32,
}

/// Normalized device position, runtime -> external controller.
/// Both fields are always within [-1, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}
