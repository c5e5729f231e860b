//! Configuration structures for the door lock simulator
//!
//! This module contains the simulation configuration structure, command line
//! arguments, configuration file loading and validation logic.

use super::{OutputFormat, TimerPolicy};
use chrono::Duration;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timing and sizing constants of the reference device
pub mod defaults {
    /// Period of the face/motion sampler in milliseconds
    pub const SAMPLE_INTERVAL_MS: u64 = 3_000;

    /// Delay before an unlocked door locks itself again
    pub const RELOCK_DELAY_MS: u64 = 5_000;

    /// How long the buzzer sounds after an alert
    pub const ALERT_CLEAR_MS: u64 = 3_000;

    /// Number of access log entries kept
    pub const ACCESS_LOG_CAPACITY: usize = 10;

    /// Number of activity points kept for the chart
    pub const ACTIVITY_HISTORY_CAPACITY: usize = 20;

    /// Reason recorded when a fingerprint does not match any template
    pub const UNREGISTERED_FINGERPRINT: &str = "Fingerprint tidak terdaftar";

    /// Name reported for a detected face that is not enrolled
    pub const UNKNOWN_PERSON: &str = "Unknown";

    /// Enrolled people the camera can recognise
    pub const KNOWN_NAMES: [&str; 3] = ["John Doe", "Jane Smith", "Admin"];

    /// Longest accepted timer period or delay (one day)
    pub const MAX_TIMER_MS: u64 = 86_400_000;

    /// Longest accepted session or scan period (one week)
    pub const MAX_SESSION_SECS: u64 = 604_800;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "smart-door-lock-simulator",
    version = "0.1.0",
    about = "Smart Door Lock Simulator - Simulates a camera, fingerprint and PIR door lock",
    long_about = "Runs a simulated smart door lock: a face/motion sampler ticks every few seconds, fingerprint scans unlock the door or raise an alert, and the door relocks itself after a delay.

EXAMPLES:
    # Run a one minute session in virtual time
    smart-door-lock-simulator

    # Press the fingerprint button every 7 seconds and watch the dashboard
    smart-door-lock-simulator --scan-every-secs 7 --watch

    # Reproducible run with a JSON report
    smart-door-lock-simulator --seed 42 --output-format json

    # Use a configuration file
    smart-door-lock-simulator --config lock.json

    # Generate configuration template
    smart-door-lock-simulator --print-config > lock.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Length of the simulated session in seconds
    #[arg(long, help = "Session length in seconds")]
    pub duration_secs: Option<u64>,

    /// Press the fingerprint button at this period
    #[arg(
        long,
        help = "Scan a fingerprint every N seconds",
        long_help = "Simulate a user pressing the fingerprint button every N seconds of session time. Omit to never scan."
    )]
    pub scan_every_secs: Option<u64>,

    /// Sensor sampling period in milliseconds
    #[arg(long, help = "Sensor sampling period in milliseconds")]
    pub sample_interval_ms: Option<u64>,

    /// Auto-relock delay in milliseconds
    #[arg(long, help = "Auto-relock delay in milliseconds")]
    pub relock_delay_ms: Option<u64>,

    /// Buzzer duration in milliseconds
    #[arg(long, help = "Buzzer duration after an alert in milliseconds")]
    pub alert_clear_ms: Option<u64>,

    /// Policy for overlapping relock/buzzer timers
    #[arg(
        long,
        help = "Timer policy (independent or debounce)",
        long_help = "How repeated unlocks or alerts treat the timer already pending. independent: every timer fires. debounce: the newest timer replaces the pending one. Default: independent"
    )]
    pub timer_policy: Option<String>,

    /// Output format for the session report
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Print the dashboard after every state change
    #[arg(short, long, help = "Print the dashboard after every state change")]
    pub watch: bool,

    /// Pace the session against the wall clock
    #[arg(long, help = "Run in real time instead of virtual time")]
    pub real_time: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Also write logs to daily rolling files in this directory
    #[arg(long, help = "Write JSON logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Sensor sampling period in milliseconds
    pub sample_interval_ms: Option<u64>,
    /// Auto-relock delay in milliseconds
    pub relock_delay_ms: Option<u64>,
    /// Buzzer duration in milliseconds
    pub alert_clear_ms: Option<u64>,
    /// Access log capacity
    pub access_log_capacity: Option<usize>,
    /// Activity history capacity
    pub activity_history_capacity: Option<usize>,
    /// A sample above this value means a face is in frame
    pub face_detection_threshold: Option<f64>,
    /// A sample above this value means the face is enrolled
    pub known_person_threshold: Option<f64>,
    /// A sample above this value means the PIR sensor fired
    pub motion_threshold: Option<f64>,
    /// A sample above this value means the fingerprint matched
    pub fingerprint_match_threshold: Option<f64>,
    /// Number of fingerprint template slots
    pub fingerprint_id_range: Option<u32>,
    /// Enrolled names
    pub known_names: Option<Vec<String>>,
    /// Overlapping timer policy
    pub timer_policy: Option<TimerPolicy>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
    /// Session length in seconds
    pub duration_secs: Option<u64>,
    /// Fingerprint button period in seconds
    pub scan_every_secs: Option<u64>,
    /// Output format for the session report
    pub output_format: Option<String>,
}

/// Configuration for the door lock simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Sensor sampling period in milliseconds
    pub sample_interval_ms: u64,

    /// Auto-relock delay in milliseconds
    pub relock_delay_ms: u64,

    /// Buzzer duration after an alert in milliseconds
    pub alert_clear_ms: u64,

    /// Maximum number of access log entries kept
    pub access_log_capacity: usize,

    /// Maximum number of activity points kept
    pub activity_history_capacity: usize,

    /// A sample above this value means a face is in frame (0.0-1.0)
    pub face_detection_threshold: f64,

    /// A sample above this value means the face is enrolled (0.0-1.0)
    pub known_person_threshold: f64,

    /// A sample above this value means the PIR sensor fired (0.0-1.0)
    pub motion_threshold: f64,

    /// A sample above this value means the fingerprint matched (0.0-1.0)
    pub fingerprint_match_threshold: f64,

    /// Fingerprint slots are drawn from `0..fingerprint_id_range`
    pub fingerprint_id_range: u32,

    /// Enrolled people the camera can recognise
    pub known_names: Vec<String>,

    /// Overlapping relock/buzzer timer policy
    pub timer_policy: TimerPolicy,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Session length in seconds (CLI runner)
    pub duration_secs: u64,

    /// Fingerprint button period in seconds (CLI runner)
    pub scan_every_secs: Option<u64>,

    /// Output format for the session report
    pub output_format: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// A CLI value could not be interpreted
    #[error("Invalid command line value: {0}")]
    InvalidArgument(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A timer period is zero
    #[error("{field} must be greater than 0 milliseconds")]
    InvalidInterval {
        /// Name of the offending field
        field: String,
    },

    /// A buffer capacity is zero
    #[error("{field} must be greater than 0")]
    InvalidCapacity {
        /// Name of the offending field
        field: String,
    },

    /// Threshold value is out of range
    #[error("Invalid threshold for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold {
        /// Name of the field with invalid threshold
        field: String,
        /// The invalid value
        value: f64,
    },

    /// No enrolled names to pick from
    #[error("known_names must contain at least one name")]
    EmptyNamePool,

    /// Fingerprint slot range is empty
    #[error("fingerprint_id_range must be greater than 0")]
    InvalidFingerprintRange,

    /// Session length is zero
    #[error("Session duration must be greater than 0 seconds")]
    InvalidDuration,

    /// Scan period is zero
    #[error("scan_every_secs must be greater than 0 when set")]
    InvalidScanInterval,

    /// A timing value exceeds what the virtual clock accepts
    #[error("{field} must be at most {max} (got {value})")]
    ValueTooLarge {
        /// Name of the offending field
        field: String,
        /// The rejected value
        value: u64,
        /// Largest accepted value
        max: u64,
    },

    /// Output format not recognised
    #[error("Unknown output format: {0}")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: defaults::SAMPLE_INTERVAL_MS,
            relock_delay_ms: defaults::RELOCK_DELAY_MS,
            alert_clear_ms: defaults::ALERT_CLEAR_MS,
            access_log_capacity: defaults::ACCESS_LOG_CAPACITY,
            activity_history_capacity: defaults::ACTIVITY_HISTORY_CAPACITY,
            face_detection_threshold: 0.7,
            known_person_threshold: 0.5,
            motion_threshold: 0.6,
            fingerprint_match_threshold: 0.3,
            fingerprint_id_range: 1000,
            known_names: defaults::KNOWN_NAMES.iter().map(|n| n.to_string()).collect(),
            timer_policy: TimerPolicy::Independent,
            seed: None,
            duration_secs: 60,
            scan_every_secs: None,
            output_format: "text".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            sample_interval_ms: file.sample_interval_ms.unwrap_or(defaults.sample_interval_ms),
            relock_delay_ms: file.relock_delay_ms.unwrap_or(defaults.relock_delay_ms),
            alert_clear_ms: file.alert_clear_ms.unwrap_or(defaults.alert_clear_ms),
            access_log_capacity: file.access_log_capacity.unwrap_or(defaults.access_log_capacity),
            activity_history_capacity: file
                .activity_history_capacity
                .unwrap_or(defaults.activity_history_capacity),
            face_detection_threshold: file
                .face_detection_threshold
                .unwrap_or(defaults.face_detection_threshold),
            known_person_threshold: file
                .known_person_threshold
                .unwrap_or(defaults.known_person_threshold),
            motion_threshold: file.motion_threshold.unwrap_or(defaults.motion_threshold),
            fingerprint_match_threshold: file
                .fingerprint_match_threshold
                .unwrap_or(defaults.fingerprint_match_threshold),
            fingerprint_id_range: file
                .fingerprint_id_range
                .unwrap_or(defaults.fingerprint_id_range),
            known_names: file.known_names.unwrap_or(defaults.known_names),
            timer_policy: file.timer_policy.unwrap_or(defaults.timer_policy),
            seed: file.seed.or(defaults.seed),
            duration_secs: file.duration_secs.unwrap_or(defaults.duration_secs),
            scan_every_secs: file.scan_every_secs.or(defaults.scan_every_secs),
            output_format: file.output_format.unwrap_or(defaults.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.duration_secs {
            config.duration_secs = value;
        }
        if let Some(value) = args.scan_every_secs {
            config.scan_every_secs = Some(value);
        }
        if let Some(value) = args.sample_interval_ms {
            config.sample_interval_ms = value;
        }
        if let Some(value) = args.relock_delay_ms {
            config.relock_delay_ms = value;
        }
        if let Some(value) = args.alert_clear_ms {
            config.alert_clear_ms = value;
        }
        if let Some(value) = args.timer_policy {
            config.timer_policy = value.parse().map_err(ConfigError::InvalidArgument)?;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        Self::validate_interval("sample_interval_ms", self.sample_interval_ms)?;
        Self::validate_interval("relock_delay_ms", self.relock_delay_ms)?;
        Self::validate_interval("alert_clear_ms", self.alert_clear_ms)?;

        if self.access_log_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity {
                field: "access_log_capacity".to_string(),
            });
        }
        if self.activity_history_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity {
                field: "activity_history_capacity".to_string(),
            });
        }

        Self::validate_threshold("face_detection_threshold", self.face_detection_threshold)?;
        Self::validate_threshold("known_person_threshold", self.known_person_threshold)?;
        Self::validate_threshold("motion_threshold", self.motion_threshold)?;
        Self::validate_threshold("fingerprint_match_threshold", self.fingerprint_match_threshold)?;

        if self.known_names.is_empty() {
            return Err(ConfigValidationError::EmptyNamePool);
        }
        if self.fingerprint_id_range == 0 {
            return Err(ConfigValidationError::InvalidFingerprintRange);
        }
        if self.duration_secs == 0 {
            return Err(ConfigValidationError::InvalidDuration);
        }
        Self::validate_at_most("duration_secs", self.duration_secs, defaults::MAX_SESSION_SECS)?;
        if let Some(scan_every) = self.scan_every_secs {
            if scan_every == 0 {
                return Err(ConfigValidationError::InvalidScanInterval);
            }
            Self::validate_at_most("scan_every_secs", scan_every, defaults::MAX_SESSION_SECS)?;
        }

        self.get_output_format().map_err(|_| {
            ConfigValidationError::InvalidOutputFormat(self.output_format.clone())
        })?;

        Ok(())
    }

    fn validate_interval(field: &str, value: u64) -> Result<(), ConfigValidationError> {
        if value == 0 {
            return Err(ConfigValidationError::InvalidInterval { field: field.to_string() });
        }
        Self::validate_at_most(field, value, defaults::MAX_TIMER_MS)
    }

    fn validate_at_most(field: &str, value: u64, max: u64) -> Result<(), ConfigValidationError> {
        if value > max {
            return Err(ConfigValidationError::ValueTooLarge { field: field.to_string(), value, max });
        }
        Ok(())
    }

    fn validate_threshold(field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Sampler period
    pub fn sample_interval(&self) -> Duration {
        bounded_millis(self.sample_interval_ms, defaults::MAX_TIMER_MS)
    }

    /// Auto-relock delay
    pub fn relock_delay(&self) -> Duration {
        bounded_millis(self.relock_delay_ms, defaults::MAX_TIMER_MS)
    }

    /// Buzzer duration after an alert
    pub fn alert_clear_delay(&self) -> Duration {
        bounded_millis(self.alert_clear_ms, defaults::MAX_TIMER_MS)
    }

    /// Session length
    pub fn session_duration(&self) -> Duration {
        bounded_secs(self.duration_secs)
    }

    /// Fingerprint button period, if any
    pub fn scan_period(&self) -> Option<Duration> {
        self.scan_every_secs.map(bounded_secs)
    }
}

// Values past the validated maximum saturate at it instead of wrapping negative
fn bounded_millis(value: u64, max: u64) -> Duration {
    let millis = i64::try_from(value.min(max)).unwrap_or(i64::MAX);
    Duration::milliseconds(millis)
}

fn bounded_secs(value: u64) -> Duration {
    let secs = i64::try_from(value.min(defaults::MAX_SESSION_SECS)).unwrap_or(i64::MAX);
    Duration::seconds(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            config: None,
            duration_secs: None,
            scan_every_secs: None,
            sample_interval_ms: None,
            relock_delay_ms: None,
            alert_clear_ms: None,
            timer_policy: None,
            output_format: None,
            seed: None,
            watch: false,
            real_time: false,
            verbose: false,
            debug: false,
            log_dir: None,
            dry_run: false,
            print_config: false,
        }
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.sample_interval_ms, 3000);
        assert_eq!(config.relock_delay_ms, 5000);
        assert_eq!(config.alert_clear_ms, 3000);
        assert_eq!(config.access_log_capacity, 10);
        assert_eq!(config.activity_history_capacity, 20);
        assert_eq!(config.face_detection_threshold, 0.7);
        assert_eq!(config.known_person_threshold, 0.5);
        assert_eq!(config.motion_threshold, 0.6);
        assert_eq!(config.fingerprint_match_threshold, 0.3);
        assert_eq!(config.fingerprint_id_range, 1000);
        assert_eq!(config.known_names, vec!["John Doe", "Jane Smith", "Admin"]);
        assert_eq!(config.timer_policy, TimerPolicy::Independent);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "relock_delay_ms": 8000,
            "timer_policy": "debounce",
            "known_names": ["Budi"],
            "seed": 7
        }"#;
        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.relock_delay_ms, 8000);
        assert_eq!(config.timer_policy, TimerPolicy::Debounce);
        assert_eq!(config.known_names, vec!["Budi"]);
        assert_eq!(config.seed, Some(7));
        // Untouched fields keep their defaults
        assert_eq!(config.sample_interval_ms, 3000);
        assert_eq!(config.access_log_capacity, 10);
    }

    #[test]
    fn test_config_file_errors() {
        use tempfile::Builder;

        assert!(matches!(
            SimulationConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let yaml = Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(yaml.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let mut args = empty_args();
        args.duration_secs = Some(30);
        args.scan_every_secs = Some(4);
        args.timer_policy = Some("debounce".to_string());
        args.seed = Some(54321);

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.scan_every_secs, Some(4));
        assert_eq!(config.timer_policy, TimerPolicy::Debounce);
        assert_eq!(config.seed, Some(54321));
        assert_eq!(config.relock_delay_ms, 5000);
    }

    #[test]
    fn test_cli_rejects_unknown_timer_policy() {
        let mut args = empty_args();
        args.timer_policy = Some("eventually".to_string());

        assert!(matches!(
            SimulationConfig::from_cli_args(args),
            Err(ConfigError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validation_interval() {
        let mut config = SimulationConfig::default();
        config.relock_delay_ms = 0;

        match config.validate() {
            Err(ConfigValidationError::InvalidInterval { field }) => {
                assert_eq!(field, "relock_delay_ms");
            }
            _ => panic!("Expected InvalidInterval error"),
        }
    }

    #[test]
    fn test_validation_threshold() {
        let mut config = SimulationConfig::default();
        config.motion_threshold = 1.5;

        match config.validate() {
            Err(ConfigValidationError::InvalidThreshold { field, value }) => {
                assert_eq!(field, "motion_threshold");
                assert_eq!(value, 1.5);
            }
            _ => panic!("Expected InvalidThreshold error"),
        }
    }

    #[test]
    fn test_validation_misc() {
        let mut config = SimulationConfig::default();
        config.known_names.clear();
        assert!(matches!(config.validate(), Err(ConfigValidationError::EmptyNamePool)));

        let mut config = SimulationConfig::default();
        config.access_log_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidCapacity { .. })));

        let mut config = SimulationConfig::default();
        config.scan_every_secs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidScanInterval)));

        let mut config = SimulationConfig::default();
        config.output_format = "xml".to_string();
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOutputFormat(_))));
    }

    #[test]
    fn test_validation_rejects_oversized_timing() {
        let mut config = SimulationConfig::default();
        config.relock_delay_ms = 1 << 62;
        match config.validate() {
            Err(ConfigValidationError::ValueTooLarge { field, max, .. }) => {
                assert_eq!(field, "relock_delay_ms");
                assert_eq!(max, defaults::MAX_TIMER_MS);
            }
            _ => panic!("Expected ValueTooLarge error"),
        }

        let mut config = SimulationConfig::default();
        config.alert_clear_ms = u64::MAX;
        assert!(matches!(config.validate(), Err(ConfigValidationError::ValueTooLarge { .. })));

        let mut config = SimulationConfig::default();
        config.duration_secs = 10_000_000_000_000;
        assert!(matches!(config.validate(), Err(ConfigValidationError::ValueTooLarge { .. })));

        let mut config = SimulationConfig::default();
        config.scan_every_secs = Some(u64::MAX);
        assert!(matches!(config.validate(), Err(ConfigValidationError::ValueTooLarge { .. })));

        let mut config = SimulationConfig::default();
        config.relock_delay_ms = defaults::MAX_TIMER_MS;
        config.duration_secs = defaults::MAX_SESSION_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duration_helpers_never_wrap_negative() {
        let mut config = SimulationConfig::default();
        config.relock_delay_ms = u64::MAX;
        config.duration_secs = u64::MAX;
        config.scan_every_secs = Some(u64::MAX);

        assert_eq!(config.relock_delay(), Duration::milliseconds(defaults::MAX_TIMER_MS as i64));
        assert_eq!(config.session_duration(), Duration::seconds(defaults::MAX_SESSION_SECS as i64));
        assert!(config.scan_period().unwrap() > Duration::zero());
    }

    #[test]
    fn test_duration_helpers() {
        let config = SimulationConfig::default();
        assert_eq!(config.sample_interval(), Duration::seconds(3));
        assert_eq!(config.relock_delay(), Duration::seconds(5));
        assert_eq!(config.alert_clear_delay(), Duration::seconds(3));
        assert_eq!(config.session_duration(), Duration::seconds(60));
    }
}
