//! Audio file loading: decodes a file into a mono waveform via symphonia.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded audio, downmixed to mono and normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source file (before downmix)
    pub channels: usize,
}

impl LoadedAudio {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Load an audio file and downmix it to a mono f32 waveform.
///
/// # Arguments
/// * `path` - Path to the audio file (WAV, MP3 or FLAC)
///
/// # Returns
/// The decoded waveform with its sample rate, or an error message
pub fn load_audio(path: &Path) -> Result<LoadedAudio, String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }

    let file = File::open(path)
        .map_err(|e| format!("Failed to open file: {}", e))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| format!("Failed to probe file: {}", e))?;

    let mut format_reader = probed.format;

    let track = format_reader.tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or("No audio tracks found")?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate
        .ok_or("Sample rate not specified in file")?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| format!("Failed to create decoder: {}", e))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut channels = 0usize;

    loop {
        // symphonia reports end of stream as an error from next_packet
        let packet = match format_reader.next_packet() {
            Ok(packet) => packet,
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet)
            .map_err(|e| format!("Decode error: {}", e))?;

        channels = decoded.spec().channels.count();
        downmix_into(&decoded, &mut samples);
    }

    Ok(LoadedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// Downmix an AudioBufferRef to mono f32 by averaging channels, appending to `out`.
fn downmix_into(audio_buf: &AudioBufferRef, out: &mut Vec<f32>) {
    let num_channels = audio_buf.spec().channels.count();
    if num_channels == 0 {
        return;
    }

    match audio_buf {
        AudioBufferRef::U8(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += (buf.chan(ch)[i] as f32 - 128.0) / 128.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::U16(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += (buf.chan(ch)[i] as f32 - 32768.0) / 32768.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::U24(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += (buf.chan(ch)[i].inner() as f32 - 8388608.0) / 8388608.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::U32(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += ((buf.chan(ch)[i] as f64 - 2147483648.0) / 2147483648.0) as f32;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::S8(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += buf.chan(ch)[i] as f32 / 128.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::S16(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += buf.chan(ch)[i] as f32 / 32768.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::S24(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += buf.chan(ch)[i].inner() as f32 / 8388608.0;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::S32(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += (buf.chan(ch)[i] as f64 / 2147483648.0) as f32;
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::F32(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f32;
                for ch in 0..num_channels {
                    sum += buf.chan(ch)[i];
                }
                out.push(sum / num_channels as f32);
            }
        }
        AudioBufferRef::F64(buf) => {
            for i in 0..buf.frames() {
                let mut sum = 0.0_f64;
                for ch in 0..num_channels {
                    sum += buf.chan(ch)[i];
                }
                out.push((sum / num_channels as f64) as f32);
            }
        }
    }
}
