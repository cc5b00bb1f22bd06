use std::path::Path;

use hound::SampleFormat;
use log::info;

use super::error::AudioError;

/// Read a WAV file as mono f32 in `[-1.0, 1.0]`, averaging all channels.
///
/// Returns the samples together with the file's sample rate; no resampling
/// is done because silence windows are measured in seconds.
pub fn load_wav_mono_f32<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32), AudioError> {
    let path = path.as_ref();
    info!("📖 Reading WAV file: {}", path.display());
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    info!(
        "📊 WAV spec: {} Hz, {} channels, {} bits, {:?}",
        spec.sample_rate, spec.channels, spec.bits_per_sample, spec.sample_format
    );

    if spec.sample_rate == 0 {
        return Err(AudioError::Wav(hound::Error::FormatError(
            "invalid sample rate",
        )));
    }
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits @ 8..=32) => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
        (format, bits) => {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?} at {} bits",
                format, bits
            )))
        }
    };

    let samples: Vec<f32> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    info!("✓ Loaded {} mono samples from file", samples.len());
    Ok((samples, spec.sample_rate))
}
