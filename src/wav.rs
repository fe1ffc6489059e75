use std::io::Cursor;

use hound::{WavSpec, WavWriter};

/// Encodes mono samples as a 32-bit float WAV file.
pub fn generate_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let wav_spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut wav = vec![];
    let mut cursor = Cursor::new(&mut wav);

    let mut wav_writer = WavWriter::new(&mut cursor, wav_spec)?;
    for sample in samples {
        wav_writer.write_sample(*sample)?;
    }
    wav_writer.finalize()?;

    Ok(wav)
}
