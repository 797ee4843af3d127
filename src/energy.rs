//! Frame-level RMS energy profile computation.

/// Analysis hop between consecutive frames (10 ms)
pub const HOP_SECONDS: f64 = 0.01;

/// Per-frame RMS energy with a parallel timestamp for each frame.
#[derive(Debug, Clone, Default)]
pub struct EnergyProfile {
    /// Linear RMS amplitude per frame, in [0, 1]
    pub rms: Vec<f32>,
    /// Frame timestamps in seconds, strictly increasing
    pub times: Vec<f64>,
}

impl EnergyProfile {
    pub fn len(&self) -> usize {
        self.rms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rms.is_empty()
    }
}

/// Compute the RMS energy profile of a mono waveform.
///
/// Frames are placed every 10 ms. The frame length is derived as
/// `sample_rate / (sample_rate / hop)` with integer division, which works out
/// to roughly one hop, so consecutive windows do not overlap.
///
/// # Arguments
/// * `samples` - Mono waveform normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// The energy profile; empty if the input is empty or the sample rate is
/// too low to form a 10 ms hop
pub fn compute_energy_profile(samples: &[f32], sample_rate: u32) -> EnergyProfile {
    let hop = (sample_rate as f64 * HOP_SECONDS) as usize;
    if hop == 0 || samples.is_empty() {
        return EnergyProfile::default();
    }

    let frame_rate = sample_rate as usize / hop;
    let frame_length = if frame_rate > 0 {
        sample_rate as usize / frame_rate
    } else {
        hop
    };

    let mut rms = Vec::new();
    let mut times = Vec::new();

    let mut start = 0usize;
    let mut index = 0usize;
    while start < samples.len() {
        let end = (start + frame_length).min(samples.len());
        rms.push(frame_rms(&samples[start..end]));
        times.push(index as f64 * hop as f64 / sample_rate as f64);
        start += hop;
        index += 1;
    }

    EnergyProfile { rms, times }
}

/// RMS amplitude of a single frame.
pub fn frame_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = frame.iter()
        .map(|&s| {
            let s = s as f64;
            s * s
        })
        .sum();

    (sum_squares / frame.len() as f64).sqrt() as f32
}

/// Convert a linear RMS amplitude to dBFS, with a -80 dB floor.
pub fn rms_to_db(rms: f32) -> f32 {
    if rms > 0.0 {
        (20.0 * rms.log10()).max(-80.0)
    } else {
        -80.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rms() {
        // Silence
        assert_eq!(frame_rms(&vec![0.0; 100]), 0.0);

        // Constant signal: RMS equals the amplitude
        let constant = vec![0.5_f32; 100];
        assert!((frame_rms(&constant) - 0.5).abs() < 1e-6);

        // Alternating signal
        let mixed = vec![0.1, -0.1, 0.1, -0.1];
        assert!((frame_rms(&mixed) - 0.1).abs() < 1e-6);

        // Empty
        assert_eq!(frame_rms(&[]), 0.0);
    }

    #[test]
    fn test_rms_to_db() {
        // Full scale is 0 dB
        assert!((rms_to_db(1.0) - 0.0).abs() < 1e-4);
        // Half scale is about -6 dB
        assert!((rms_to_db(0.5) - (-6.02)).abs() < 0.1);
        // Silence clamps to the floor
        assert_eq!(rms_to_db(0.0), -80.0);
        assert_eq!(rms_to_db(1e-10), -80.0);
    }

    #[test]
    fn test_profile_timestamps() {
        let samples = vec![0.1_f32; 16000];
        let profile = compute_energy_profile(&samples, 16000);

        // 16000 samples at a 160-sample hop
        assert_eq!(profile.rms.len(), 100);
        assert_eq!(profile.rms.len(), profile.times.len());

        assert_eq!(profile.times[0], 0.0);
        for pair in profile.times.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - 0.01).abs() < 1e-9);
        }
    }

    #[test]
    fn test_profile_constant_signal() {
        let samples = vec![0.25_f32; 8000];
        let profile = compute_energy_profile(&samples, 8000);

        for &value in &profile.rms {
            assert!((value - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn test_profile_empty_input() {
        let profile = compute_energy_profile(&[], 16000);
        assert!(profile.is_empty());

        // Sample rate too low for a 10 ms hop
        let profile = compute_energy_profile(&[0.1; 50], 50);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_profile_trailing_partial_frame() {
        // 8000 Hz gives an 80-sample hop; 100 samples leaves a 20-sample tail
        let samples = vec![0.5_f32; 100];
        let profile = compute_energy_profile(&samples, 8000);

        assert_eq!(profile.len(), 2);
        assert!((profile.rms[1] - 0.5).abs() < 1e-6);
        assert!((profile.times[1] - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_profile_localizes_quiet_region() {
        // 1 second loud, 1 second quiet, 1 second loud at 8 kHz
        let mut samples = vec![0.5_f32; 8000];
        samples.extend(vec![0.0_f32; 8000]);
        samples.extend(vec![0.5_f32; 8000]);

        let profile = compute_energy_profile(&samples, 8000);

        // Frame at 0.5 s is loud, frame at 1.5 s is quiet
        let loud_idx = profile.times.iter().position(|&t| t >= 0.5).unwrap();
        let quiet_idx = profile.times.iter().position(|&t| t >= 1.5).unwrap();
        assert!(profile.rms[loud_idx] > 0.4);
        assert!(profile.rms[quiet_idx] < 0.01);
    }
}
