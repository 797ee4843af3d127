//! Pause detection over a recorded audio file.
//!
//! Classifies each frame of the RMS energy profile as pause or speech with a
//! fixed threshold, then merges contiguous pause frames into intervals and
//! drops any interval shorter than the configured minimum duration.

use std::path::Path;

use crate::audio_loader::load_audio;
use crate::energy::{compute_energy_profile, EnergyProfile};

/// Detection parameters, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct PauseConfig {
    /// Frames with RMS strictly below this linear amplitude count as pause
    pub threshold: f32,
    /// Minimum pause length in seconds; shorter runs are discarded
    pub min_pause_duration: f64,
}

impl Default for PauseConfig {
    fn default() -> Self {
        PauseConfig {
            threshold: 0.01,
            min_pause_duration: 0.2,
        }
    }
}

/// A detected pause interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseSegment {
    pub start: f64,
    pub end: f64,
}

impl PauseSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Scan state: outside a low-energy run, or inside one since `start`.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    Active,
    Silent { start: f64 },
}

pub struct PauseDetector {
    config: PauseConfig,
}

impl PauseDetector {
    pub fn new(config: PauseConfig) -> Self {
        PauseDetector { config }
    }

    pub fn config(&self) -> &PauseConfig {
        &self.config
    }

    /// Detect pauses in an audio file.
    ///
    /// Loads the file, computes the energy profile and scans it. Any failure
    /// from the loader aborts the call; no validation is done here.
    ///
    /// # Returns
    /// Detected pause intervals in chronological order
    pub fn detect_pauses(&self, path: &Path) -> Result<Vec<PauseSegment>, String> {
        let audio = load_audio(path)?;
        let profile = compute_energy_profile(&audio.samples, audio.sample_rate);
        Ok(self.scan(&profile))
    }

    /// Scan an energy profile for pause intervals.
    ///
    /// A frame is a pause candidate iff its RMS is strictly below the
    /// threshold. A run that is still open when the profile ends is closed at
    /// the last frame's own timestamp and filtered like any other.
    pub fn scan(&self, profile: &EnergyProfile) -> Vec<PauseSegment> {
        let mut segments = Vec::new();
        let mut state = ScanState::Active;

        for (&rms, &time) in profile.rms.iter().zip(profile.times.iter()) {
            let is_pause = rms < self.config.threshold;

            state = match (state, is_pause) {
                (ScanState::Active, true) => ScanState::Silent { start: time },
                (ScanState::Silent { start }, false) => {
                    if time - start >= self.config.min_pause_duration {
                        segments.push(PauseSegment { start, end: time });
                    }
                    ScanState::Active
                }
                (state, _) => state,
            };
        }

        if let ScanState::Silent { start } = state {
            if let Some(&last) = profile.times.last() {
                if last - start >= self.config.min_pause_duration {
                    segments.push(PauseSegment { start, end: last });
                }
            }
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rms: &[f32], times: &[f64]) -> EnergyProfile {
        EnergyProfile {
            rms: rms.to_vec(),
            times: times.to_vec(),
        }
    }

    fn detector(threshold: f32, min_pause_duration: f64) -> PauseDetector {
        PauseDetector::new(PauseConfig {
            threshold,
            min_pause_duration,
        })
    }

    #[test]
    fn test_default_config() {
        let config = PauseConfig::default();
        assert_eq!(config.threshold, 0.01);
        assert_eq!(config.min_pause_duration, 0.2);
    }

    #[test]
    fn test_single_pause_detected() {
        let p = profile(
            &[0.02, 0.02, 0.005, 0.005, 0.005, 0.02, 0.02],
            &[0.0, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06],
        );
        let segments = detector(0.01, 0.02).scan(&p);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], PauseSegment { start: 0.02, end: 0.04 });
    }

    #[test]
    fn test_pause_below_minimum_duration_dropped() {
        let p = profile(
            &[0.02, 0.02, 0.005, 0.005, 0.005, 0.02, 0.02],
            &[0.0, 0.01, 0.02, 0.03, 0.04, 0.05, 0.06],
        );
        let segments = detector(0.01, 0.03).scan(&p);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_pause_open_at_end_closes_at_last_timestamp() {
        let p = profile(&[0.02, 0.005, 0.005], &[0.0, 0.01, 0.02]);
        let segments = detector(0.01, 0.01).scan(&p);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], PauseSegment { start: 0.01, end: 0.02 });
    }

    #[test]
    fn test_all_frames_above_threshold() {
        let p = profile(
            &[0.05, 0.03, 0.02, 0.04],
            &[0.0, 0.01, 0.02, 0.03],
        );
        let segments = detector(0.01, 0.01).scan(&p);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_frame_at_threshold_is_not_pause() {
        // Strict less-than: a frame exactly at the threshold is not a pause
        let p = profile(
            &[0.05, 0.01, 0.01, 0.05],
            &[0.0, 0.01, 0.02, 0.03],
        );
        let segments = detector(0.01, 0.01).scan(&p);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_duration_exactly_at_minimum_is_kept() {
        // Run lasts exactly min_pause_duration: inclusive comparison keeps it
        let p = profile(
            &[0.05, 0.005, 0.005, 0.05],
            &[0.0, 0.5, 1.0, 1.5],
        );
        let segments = detector(0.01, 1.0).scan(&p);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], PauseSegment { start: 0.5, end: 1.5 });
    }

    #[test]
    fn test_whole_signal_below_threshold() {
        let p = profile(
            &[0.001, 0.002, 0.001, 0.003],
            &[0.0, 0.1, 0.2, 0.3],
        );
        let segments = detector(0.01, 0.2).scan(&p);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], PauseSegment { start: 0.0, end: 0.3 });
    }

    #[test]
    fn test_empty_profile() {
        let segments = detector(0.01, 0.2).scan(&EnergyProfile::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_segments_ordered_and_disjoint() {
        let p = profile(
            &[0.05, 0.005, 0.005, 0.005, 0.05, 0.05, 0.005, 0.005, 0.005, 0.05],
            &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9],
        );
        let segments = detector(0.01, 0.1).scan(&p);

        assert_eq!(segments.len(), 2);
        for segment in &segments {
            assert!(segment.end > segment.start);
            assert!(segment.duration() >= 0.1);
        }
        for pair in segments.windows(2) {
            assert!(pair[1].start >= pair[0].end);
            assert!(pair[1].start > pair[0].start);
        }
    }

    #[test]
    fn test_detect_pauses_on_wav_file() {
        use std::fs::File;
        use std::io::Write;

        // 0.5 s tone, 0.5 s silence, 0.5 s tone at 8 kHz mono
        let mut samples: Vec<i16> = Vec::new();
        samples.extend(std::iter::repeat(16384i16).take(4000));
        samples.extend(std::iter::repeat(0i16).take(4000));
        samples.extend(std::iter::repeat(16384i16).take(4000));

        let data_size = (samples.len() * 2) as u32;
        let mut buf: Vec<u8> = Vec::new();
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&8000u32.to_le_bytes());
        buf.extend_from_slice(&16000u32.to_le_bytes());
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in &samples {
            buf.extend_from_slice(&s.to_le_bytes());
        }

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("pause.wav");
        File::create(&path)
            .and_then(|mut f| f.write_all(&buf))
            .expect("Failed to write test WAV");

        let segments = detector(0.01, 0.2)
            .detect_pauses(&path)
            .expect("Detection failed");

        assert_eq!(segments.len(), 1);
        assert!((segments[0].start - 0.5).abs() < 0.03);
        assert!((segments[0].end - 1.0).abs() < 0.03);
    }

    #[test]
    fn test_detect_pauses_missing_file() {
        let result = detector(0.01, 0.2).detect_pauses(Path::new("/no/such/file.wav"));
        assert!(result.is_err());
    }
}
