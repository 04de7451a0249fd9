// Decorative waveform drawn across the icon's disc.
// The points follow a fixed sweep, not real audio data.

use crate::constants::waveform::{HORIZONTAL_SCALE, SAWTOOTH_PERIOD, SWEEP_STEP, VERTICAL_SCALE};

/// Compute the waveform polyline for a disc at (`center`, `center`) with `radius`.
///
/// One point per sweep angle 0, 20, ..., 340. The horizontal position moves
/// linearly with the sweep; the vertical position follows a sawtooth with a
/// 60 degree period. Offsets truncate toward zero.
pub fn waveform_points(center: i32, radius: i32) -> Vec<(i32, i32)> {
    let radius = f64::from(radius);
    let half_period = SAWTOOTH_PERIOD / 2;

    (0..360)
        .step_by(SWEEP_STEP)
        .map(|angle: i32| {
            let dx = radius * HORIZONTAL_SCALE * f64::from(angle - 180) / 180.0;
            let phase = angle % SAWTOOTH_PERIOD - half_period;
            let dy = radius * VERTICAL_SCALE * f64::from(phase) / f64::from(half_period);
            (center + dx as i32, center + dy as i32)
        })
        .collect()
}

/// Consecutive point pairs, one per straight segment.
pub fn segments(points: &[(i32, i32)]) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
    points.windows(2).map(|pair| (pair[0], pair[1]))
}
