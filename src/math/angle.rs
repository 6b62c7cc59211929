use std::f32::consts::{PI, TAU};

/// Wrap an angle into [-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Frame-rate independent lerp factor: `1 - exp(-rate * dt)`, in [0, 1]
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` along the shortest arc by fraction `t`
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * t.clamp(0.0, 1.0))
}
