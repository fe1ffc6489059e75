//! Frequency / Volts / Note conversions on top of the fast exp2 and log2
//!
//! Volts follow the 1 V/octave convention with 0 V at A4 (440 Hz). Notes
//! are MIDI note numbers, fractional values allowed, with 69 at A4.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::maths::FastMaths;

/// Reference frequency of A4 in Hz
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI note number of A4
pub const A4_NOTE: f32 = 69.0;

/// Frequency in Hz
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Frequency(pub f32);

/// Control voltage, 1 V/octave
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Volts(pub f32);

/// MIDI note number
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Note(pub f32);

impl From<f32> for Volts {
    fn from(value: f32) -> Self {
        Volts(value)
    }
}

impl From<Note> for Volts {
    fn from(note: Note) -> Self {
        Volts((note.0 - A4_NOTE) / 12.0)
    }
}

impl From<Volts> for Note {
    fn from(volts: Volts) -> Self {
        Note(volts.0 * 12.0 + A4_NOTE)
    }
}

impl From<u8> for Note {
    fn from(note: u8) -> Self {
        Note(note as f32)
    }
}

/// Transpose by a number of semitones
impl Add<f32> for Note {
    type Output = Note;

    fn add(self, semitones: f32) -> Self::Output {
        Note(self.0 + semitones)
    }
}

/// Interval in semitones
impl Sub for Note {
    type Output = f32;

    fn sub(self, rhs: Note) -> Self::Output {
        self.0 - rhs.0
    }
}

impl<'a> FastMaths<'a> {
    /// `440 * 2^volts`
    #[inline]
    pub fn volts_to_frequency(&self, volts: impl Into<Volts>) -> Frequency {
        Frequency(A4_FREQUENCY * self.exp2_unchecked(volts.into().0))
    }

    /// `log2(frequency / 440)`
    ///
    /// # Errors
    ///
    /// [`DomainError::NonPositive`] for frequencies at or below 0 Hz.
    #[inline]
    pub fn frequency_to_volts(&self, frequency: Frequency) -> Result<Volts, DomainError> {
        Ok(Volts(self.log2(frequency.0 / A4_FREQUENCY)?))
    }

    /// Frequency of a (possibly fractional) MIDI note
    #[inline]
    pub fn note_to_frequency(&self, note: impl Into<Note>) -> Frequency {
        let note: Note = note.into();
        self.volts_to_frequency(Volts::from(note))
    }

    /// Fractional MIDI note of a frequency
    #[inline]
    pub fn frequency_to_note(&self, frequency: Frequency) -> Result<Note, DomainError> {
        Ok(self.frequency_to_volts(frequency)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(a: f32, b: f32) -> f32 {
        1200.0 * (a / b).log2().abs()
    }

    #[test]
    fn test_note_volts() {
        assert_eq!(Volts::from(Note(81.0)), Volts(1.0));
        assert_eq!(Note::from(Volts(-1.0)), Note(57.0));
        assert_eq!(Note::from(60u8) + 12.0, Note(72.0));
        assert_eq!(Note(72.0) - Note(60.0), 12.0);
    }

    #[test]
    fn test_note_to_frequency() {
        let maths = FastMaths::with_defaults();
        assert_eq!(maths.note_to_frequency(69u8), Frequency(440.0));
        assert_eq!(maths.note_to_frequency(81u8), Frequency(880.0));
        for note in 0..=127u8 {
            let expected = 440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0);
            let actual = maths.note_to_frequency(note).0;
            assert!(cents(actual, expected) < 0.01, "note {}", note);
        }
    }

    #[test]
    fn test_frequency_to_note() {
        let maths = FastMaths::with_defaults();
        assert_eq!(maths.frequency_to_note(Frequency(440.0)), Ok(Note(69.0)));
        let note = maths.frequency_to_note(Frequency(261.625_58)).unwrap();
        assert!((note.0 - 60.0).abs() < 1.0e-3);
        assert_eq!(
            maths.frequency_to_volts(Frequency(0.0)),
            Err(DomainError::NonPositive(0.0))
        );
    }
}
