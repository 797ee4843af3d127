pub mod audio_loader;
pub mod config;
pub mod display;
pub mod energy;
pub mod pause_detector;

pub use audio_loader::{load_audio, LoadedAudio};
pub use config::Config;
pub use display::render_energy_chart;
pub use energy::{compute_energy_profile, EnergyProfile};
pub use pause_detector::{PauseConfig, PauseDetector, PauseSegment};
