//! Test-signal rendering driven by the fast exp2
//!
//! Renders a sine whose pitch glides linearly in note space, which makes
//! the frequency an exponential function of time. Each sample's frequency is
//! computed with [`FastMaths::note_to_frequency`], so the rendered file is an
//! audible check of the tables in use.

use std::f32::consts::TAU;
use std::time::Duration;

use crate::maths::FastMaths;
use crate::pitch::Note;

/// Peak amplitude of rendered sweeps, leaving headroom like the WAV export
pub const SWEEP_AMPLITUDE: f32 = 0.5;

/// Render a sine sweep from `start` to `end`.
///
/// `start == end` renders a steady tone.
pub fn render_sweep(
    maths: &FastMaths<'_>,
    start: Note,
    end: Note,
    sample_rate: u32,
    duration: Duration,
) -> Vec<f32> {
    let n_samples = (duration.as_secs_f64() * sample_rate as f64) as usize;
    let inv_sample_rate = 1.0 / sample_rate as f32;
    let span = end - start;

    let mut phase = 0.0f32;
    let mut output = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let position = i as f32 / n_samples as f32;
        let frequency = maths.note_to_frequency(start + span * position);

        output.push(SWEEP_AMPLITUDE * (TAU * phase).sin());

        phase += frequency.0 * inv_sample_rate;
        phase -= phase.floor();
    }

    output
}
