//! Voice activity detection settings shared by every session of a worker.
//!
//! The detector itself runs inside the voice framework; this crate only owns
//! the tuning it is loaded with, mirroring Silero's defaults.

use std::time::Duration;
use strum::{Display, EnumString};

/// Sample rates supported by Silero VAD
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum VADSampleRate {
    #[strum(serialize = "8kHz")]
    Rate8kHz = 8000,
    #[strum(serialize = "16kHz")]
    Rate16kHz = 16000,
}

impl From<VADSampleRate> for u32 {
    fn from(rate: VADSampleRate) -> Self {
        rate as u32
    }
}

/// Configuration for Silero Voice Activity Detection
#[derive(Debug, Clone, PartialEq)]
pub struct VADConfig {
    /// Sample rate (8kHz or 16kHz)
    pub sample_rate: VADSampleRate,
    /// Speech probability threshold (0.0-1.0), default 0.5
    pub activation_threshold: f32,
    /// Speech needed before a turn starts
    pub min_speech_duration: Duration,
    /// Silence needed before a turn ends
    pub min_silence_duration: Duration,
    /// Audio kept from before speech was detected
    pub prefix_padding: Duration,
}

impl Default for VADConfig {
    fn default() -> Self {
        Self {
            sample_rate: VADSampleRate::Rate16kHz,
            activation_threshold: 0.5,
            min_speech_duration: Duration::from_millis(50),
            min_silence_duration: Duration::from_millis(550),
            prefix_padding: Duration::from_millis(500),
        }
    }
}

/// A loaded detector as handed to a session.
#[derive(Debug)]
pub struct VadModel {
    config: VADConfig,
}

impl VadModel {
    pub fn load(config: VADConfig) -> Self {
        log::info!(
            "Loading VAD ({}, threshold {:.2})",
            config.sample_rate,
            config.activation_threshold
        );
        Self { config }
    }

    pub fn config(&self) -> &VADConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sample_rate_conversions() {
        assert_eq!(u32::from(VADSampleRate::Rate16kHz), 16000);
        assert_eq!(VADSampleRate::from_str("8kHz").unwrap(), VADSampleRate::Rate8kHz);
        assert_eq!(VADSampleRate::Rate16kHz.to_string(), "16kHz");
    }

    #[test]
    fn test_default_config() {
        let model = VadModel::load(VADConfig::default());
        assert_eq!(model.config().min_silence_duration, Duration::from_millis(550));
        assert_eq!(model.config().activation_threshold, 0.5);
    }
}
