//! Light-responsive shade angle for the medicine compartment.
//!
//! ```text
//! θ = θ_offset + (180 − θ_offset) · I · γ · ln(t_s / t_u) · (T / T_med)
//! ```
//!
//! `I` is the averaged light intensity (0–1), `t_s`/`t_u` the sampling and
//! reporting periods, `γ` the controlling factor, `T` the measured
//! temperature and `T_med` the ideal storage temperature. The result is
//! clamped to the servo's mechanical range and truncated.

/// Maximum servo travel in degrees.
pub const MAX_ANGLE: f32 = 180.0;

/// Compute the servo angle.
///
/// Degenerate inputs (non-positive periods or a zero reference temperature)
/// return `angle_offset` unchanged, truncated to an integer. The return
/// type is signed for that reason: a remotely pushed offset is not
/// range-checked, and the servo driver clamps what it finally writes.
#[allow(clippy::too_many_arguments)]
pub fn compute_angle(
    intensity: f32,
    sampling_interval: f32,
    reporting_period: f32,
    temperature: f32,
    angle_offset: f32,
    gain: f32,
    reference_temperature: f32,
) -> i32 {
    if sampling_interval <= 0.0 || reporting_period <= 0.0 || reference_temperature == 0.0 {
        return angle_offset as i32;
    }

    let ln_ratio = (sampling_interval / reporting_period).ln();
    let theta = angle_offset
        + (MAX_ANGLE - angle_offset)
            * intensity
            * gain
            * ln_ratio
            * (temperature / reference_temperature);

    // inf · 0 on extreme inputs
    if theta.is_nan() {
        return angle_offset.clamp(0.0, MAX_ANGLE) as i32;
    }

    theta.clamp(0.0, MAX_ANGLE) as i32
}
