// Force -> motor drive mapping
// Saturates the commanded force and converts it into a direction plus a
// 7-bit PWM duty for one axis.

use super::driver::Direction;
use super::roboclaw::PWM_MAX;

/// Transfer function from a clamped force in [-1, 1] to an (unclamped)
/// PWM duty. Swappable for a calibrated curve without touching the
/// direction or clamp logic.
pub type ForceCurve = fn(f32) -> f32;

/// Default transfer function: duty proportional to force magnitude
pub fn linear(force: f32) -> f32 {
    force.abs() * PWM_MAX as f32
}

/// Drive decision for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDrive {
    pub direction: Direction,
    pub pwm: u8,
}

/// Map a desired axis force to a drive command using the default curve
pub fn drive_from_force(force: f32) -> AxisDrive {
    drive_from_force_with_curve(force, linear)
}

/// Map a desired axis force to a drive command
///
/// The force is saturated to [-1, 1] first (commands may arrive
/// out-of-range from the transport; no error is raised). The curve output
/// is rounded and clamped to [0, 127]. Zero force still produces a
/// command: backward at zero duty.
pub fn drive_from_force_with_curve(force: f32, curve: ForceCurve) -> AxisDrive {
    let force = force.clamp(-1.0, 1.0);
    let pwm = curve(force).round().clamp(0.0, PWM_MAX as f32) as u8;

    // Sign convention fixed by the device wiring: negative force means
    // forward, non-negative (including exactly zero) means backward.
    let direction = if force < 0.0 {
        Direction::Forward
    } else {
        Direction::Backward
    };

    AxisDrive { direction, pwm }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_force_idles_backward() {
        let drive = drive_from_force(0.0);
        assert_eq!(drive.direction, Direction::Backward);
        assert_eq!(drive.pwm, 0);
    }

    #[test]
    fn test_full_negative_force() {
        let drive = drive_from_force(-1.0);
        assert_eq!(drive.direction, Direction::Forward);
        assert_eq!(drive.pwm, 127);
    }

    #[test]
    fn test_overrange_force_saturates() {
        // 2.0 must behave exactly like 1.0
        assert_eq!(drive_from_force(2.0), drive_from_force(1.0));
        let drive = drive_from_force(2.0);
        assert_eq!(drive.direction, Direction::Backward);
        assert_eq!(drive.pwm, 127);

        let drive = drive_from_force(-3.0);
        assert_eq!(drive.direction, Direction::Forward);
        assert_eq!(drive.pwm, 127);
    }

    #[test]
    fn test_linear_midpoint() {
        let drive = drive_from_force(0.5);
        assert_eq!(drive.direction, Direction::Backward);
        assert_eq!(drive.pwm, 64); // 63.5 rounds away from zero
    }

    #[test]
    fn test_small_negative_force_keeps_direction() {
        let drive = drive_from_force(-0.01);
        assert_eq!(drive.direction, Direction::Forward);
        assert_eq!(drive.pwm, 1);
    }

    #[test]
    fn test_substituted_curve() {
        fn quadratic(force: f32) -> f32 {
            force * force * PWM_MAX as f32
        }
        let drive = drive_from_force_with_curve(-0.5, quadratic);
        // Direction logic is untouched by the curve choice
        assert_eq!(drive.direction, Direction::Forward);
        assert_eq!(drive.pwm, 32); // 31.75 rounds to 32
    }
}
