//! Audio file loading
//!
//! Decodes an uploaded clip into a mono [`AudioBuffer`]. WAV is read with
//! `hound`; MP3 and anything else is handed to the `symphonia` probe.
//!
//! Samples keep the scale the container gives them: integer PCM is mapped to
//! [-1.0, 1.0) by dividing by 2^(bits-1), float PCM is passed through.

use std::io::{Cursor, ErrorKind, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::{debug, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::buffer::{downmix_interleaved, AudioBuffer};
use crate::error::{MixError, Result};

/// Load an audio file from disk and downmix it to mono
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `Decode` - If the container is malformed or unsupported
/// * `EmptyAudio` - If the file decodes to zero samples
pub fn load(path: &Path) -> Result<AudioBuffer> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MixError::FileNotFound {
            path: path.display().to_string(),
            source: Some(e),
        },
        _ => MixError::Io(e),
    })?;

    let extension = path.extension().and_then(|ext| ext.to_str());
    load_bytes(&bytes, extension)
}

/// Decode an in-memory audio file and downmix it to mono
///
/// `extension` is only a hint for the compressed-format probe; WAV data is
/// recognised from its header regardless of the hint.
pub fn load_bytes(bytes: &[u8], extension: Option<&str>) -> Result<AudioBuffer> {
    let decoded = if is_wav(bytes) {
        decode_wav(bytes)?
    } else {
        decode_compressed(bytes, extension)?
    };

    debug!(
        "Decoded {} interleaved samples ({} ch @ {} Hz)",
        decoded.samples.len(),
        decoded.channels,
        decoded.sample_rate
    );

    if decoded.samples.is_empty() {
        return Err(MixError::EmptyAudio);
    }

    AudioBuffer::from_interleaved(&decoded.samples, decoded.channels, decoded.sample_rate)
}

/// Interleaved samples straight out of a decoder
struct Decoded {
    samples: Vec<f64>,
    channels: usize,
    sample_rate: u32,
}

fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

// ============================================================================
// WAV
// ============================================================================

fn decode_wav(bytes: &[u8]) -> Result<Decoded> {
    let mut reader =
        WavReader::new(Cursor::new(bytes)).map_err(|e| MixError::decode("failed to open WAV data", e))?;

    let spec = reader.spec();
    let bits = spec.bits_per_sample;

    let samples = match (spec.sample_format, bits) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| MixError::decode("failed to read float samples", e))?,
        (SampleFormat::Int, 1..=8) => read_int_samples::<i8, _>(&mut reader, bits)?,
        (SampleFormat::Int, 9..=16) => read_int_samples::<i16, _>(&mut reader, bits)?,
        (SampleFormat::Int, 17..=32) => read_int_samples::<i32, _>(&mut reader, bits)?,
        (format, bits) => {
            return Err(MixError::Decode {
                reason: format!("unsupported {}-bit {:?} WAV", bits, format),
                source: None,
            })
        }
    };

    Ok(Decoded {
        samples,
        channels: spec.channels as usize,
        sample_rate: spec.sample_rate,
    })
}

/// Read integer PCM and scale it by 2^(bits-1)
fn read_int_samples<S, R>(reader: &mut WavReader<R>, bits: u16) -> Result<Vec<f64>>
where
    S: hound::Sample + Into<i32>,
    R: Read,
{
    let full_scale = (1u64 << (bits - 1)) as f64;

    reader
        .samples::<S>()
        .map(|s| {
            s.map(|v| {
                let v: i32 = v.into();
                v as f64 / full_scale
            })
        })
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|e| MixError::decode(format!("failed to read {}-bit samples", bits), e))
}

// ============================================================================
// MP3 and other compressed containers
// ============================================================================

fn decode_compressed(bytes: &[u8], extension: Option<&str>) -> Result<Decoded> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| MixError::decode("unrecognised audio container", e))?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MixError::Decode {
            reason: "no decodable audio track".to_string(),
            source: None,
        })?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| MixError::decode("unsupported codec", e))?;

    let mut samples: Vec<f64> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(MixError::decode("failed to read packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate.get_or_insert(spec.rate);
                channels.get_or_insert(spec.channels.count());

                let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                sample_buf.copy_interleaved_ref(decoded);
                samples.extend(sample_buf.samples().iter().map(|&s| f64::from(s)));
            }
            Err(SymphoniaError::DecodeError(reason)) => {
                warn!("Skipping undecodable packet: {}", reason);
                continue;
            }
            Err(e) => return Err(MixError::decode("failed to decode packet", e)),
        }
    }

    if samples.is_empty() {
        return Err(MixError::EmptyAudio);
    }

    let sample_rate = sample_rate.ok_or_else(|| MixError::Decode {
        reason: "unknown sample rate".to_string(),
        source: None,
    })?;

    Ok(Decoded {
        samples,
        channels: channels.unwrap_or(1),
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hound::{WavSpec, WavWriter};
    use tempfile::tempdir;

    fn write_wav_i16(path: &Path, channels: u16, frames: &[Vec<i16>]) {
        let spec = WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_mono_16bit_scaling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav_i16(&path, 1, &[vec![16384], vec![-32768], vec![0]]);

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.samples(), &[0.5, -1.0, 0.0]);
    }

    #[test]
    fn test_load_stereo_downmixes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav_i16(&path, 2, &[vec![16384, 0], vec![-16384, -16384]]);

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_relative_eq!(buffer.samples()[0], 0.25);
        assert_relative_eq!(buffer.samples()[1], -0.5);
    }

    #[test]
    fn test_load_float_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.25_f32).unwrap();
        writer.write_sample(-0.75_f32).unwrap();
        writer.finalize().unwrap();

        let buffer = load(&path).unwrap();
        assert_eq!(buffer.samples(), &[0.25, -0.75]);
        assert_eq!(buffer.sample_rate(), 48000);
    }

    #[test]
    fn test_load_24bit_scaling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("24bit.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 96000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(4194304_i32).unwrap();
        writer.finalize().unwrap();

        let buffer = load(&path).unwrap();
        assert_relative_eq!(buffer.samples()[0], 0.5);
    }

    #[test]
    fn test_load_empty_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav_i16(&path, 1, &[]);

        let result = load(&path);
        assert!(matches!(result, Err(MixError::EmptyAudio)));
    }

    #[test]
    fn test_load_garbage_bytes() {
        let result = load_bytes(b"definitely not an audio file, just some text", Some("mp3"));
        assert!(matches!(result, Err(MixError::Decode { .. })));
    }

    #[test]
    fn test_load_truncated_wav_header() {
        let result = load_bytes(b"RIFF\x24\x00\x00\x00WAVEfmt ", Some("wav"));
        assert!(matches!(result, Err(MixError::Decode { .. })));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load(Path::new("/nonexistent/path/mix.wav"));

        match result.unwrap_err() {
            MixError::FileNotFound { path, .. } => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected FileNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_bytes_matches_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("same.wav");
        write_wav_i16(&path, 2, &[vec![100, 200], vec![300, -400]]);

        let from_path = load(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let from_bytes = load_bytes(&bytes, None).unwrap();
        assert_eq!(from_path, from_bytes);
    }

    /// `frames` MPEG-1 Layer III stereo frames at 44.1 kHz / 128 kbps whose
    /// granules carry no spectral data, so they decode to silence
    fn silent_stereo_mp3(frames: usize) -> Vec<u8> {
        const FRAME_LEN: usize = 417;
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        frame.repeat(frames)
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_load_mp3_fixture() {
        let buffer = load(&fixture("lame_mono_22050.mp3")).unwrap();

        assert_eq!(buffer.sample_rate(), 22050);
        // 45 MPEG-2 frames of 576 samples
        assert_relative_eq!(buffer.duration(), 1.1755, epsilon = 0.03);
        assert!(buffer.samples().iter().all(|s| s.is_finite()));
        assert!(crate::analysis::extract(&buffer).is_ok());
    }

    #[test]
    fn test_load_stereo_mp3_downmixes() {
        const FRAMES: usize = 20;
        const SAMPLES_PER_FRAME: usize = 1152;

        let buffer = load_bytes(&silent_stereo_mp3(FRAMES), Some("mp3")).unwrap();

        assert_eq!(buffer.sample_rate(), 44100);
        // Interleaved stereo would give twice as many samples
        assert!(buffer.len() <= FRAMES * SAMPLES_PER_FRAME);
        assert_eq!(buffer.len() % SAMPLES_PER_FRAME, 0);
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_load_mp3_bytes_matches_path() {
        let path = fixture("lame_mono_22050.mp3");
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(load(&path).unwrap(), load_bytes(&bytes, None).unwrap());
    }

    #[test]
    fn test_load_64bit_float_wav_is_a_decode_error() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&44u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&3u16.to_le_bytes()); // IEEE float
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&44100u32.to_le_bytes());
        bytes.extend_from_slice(&(44100u32 * 8).to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(&64u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&0.5f64.to_le_bytes());

        let result = load_bytes(&bytes, Some("wav"));
        assert!(matches!(result, Err(MixError::Decode { .. })));
    }
}
