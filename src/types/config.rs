//! Configuration structures for the parcel sorting simulator
//!
//! This module contains the simulation configuration, its command line and file
//! sources, and the validation rules applied before a run starts.

use super::LogFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default values used when no configuration is supplied or it cannot be used
pub mod defaults {
    /// Number of ticks to simulate
    pub const MAX_TICKS: u64 = 300;

    /// Arrival buffer capacity
    pub const QUEUE_CAPACITY: usize = 30;

    /// Ticks between terminal rotations
    pub const TERMINAL_ROTATION_INTERVAL: u64 = 5;

    /// Minimum parcels generated per tick
    pub const PARCEL_PER_TICK_MIN: usize = 1;

    /// Maximum parcels generated per tick
    pub const PARCEL_PER_TICK_MAX: usize = 3;

    /// Probability that a dispatch attempt is misrouted
    pub const MISROUTING_RATE: f64 = 0.1;

    /// Destination cities in rotation order
    pub const CITY_LIST: [&str; 5] = ["Istanbul", "Ankara", "Izmir", "Bursa", "Antalya"];

    /// Per-tick log file
    pub const LOG_FILE: &str = "log.txt";

    /// Final report file
    pub const REPORT_FILE: &str = "report.txt";
}

/// Command line arguments structure
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "parcel-sort-simulator",
    version,
    about = "Parcel Sort Simulator - Tick-driven simulation of a parcel sorting network",
    long_about = "Simulates a parcel sorting network in discrete ticks: parcels arrive into a bounded buffer, are sorted into per-destination buckets, and are dispatched when the rotating active terminal matches their destination. Misrouted parcels are recirculated through a return stack.

EXAMPLES:
    # Run with default settings
    parcel-sort-simulator

    # Use a KEY=VALUE or JSON configuration file
    parcel-sort-simulator --config config.txt

    # Override specific settings
    parcel-sort-simulator --max-ticks 1000 --cities Ankara,Izmir --seed 42

    # Generate configuration template
    parcel-sort-simulator --print-config > my-config.json

    # Validate configuration without running
    parcel-sort-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json) and KEY=VALUE text
    (.txt, .conf, .cfg, .properties or no extension).

    A configuration file that cannot be read or is invalid is replaced by the
    default configuration; the run never aborts because of configuration."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON or KEY=VALUE)",
        long_help = "Path to a configuration file. CLI arguments override file settings."
    )]
    pub config: Option<String>,

    /// Number of ticks to simulate
    #[arg(long, help = "Number of ticks to simulate")]
    pub max_ticks: Option<u64>,

    /// Arrival buffer capacity
    #[arg(long, help = "Arrival buffer capacity")]
    pub queue_capacity: Option<usize>,

    /// Ticks between terminal rotations
    #[arg(long, help = "Ticks between terminal rotations")]
    pub rotation_interval: Option<u64>,

    /// Minimum parcels generated per tick
    #[arg(long, help = "Minimum parcels generated per tick")]
    pub parcels_min: Option<usize>,

    /// Maximum parcels generated per tick
    #[arg(long, help = "Maximum parcels generated per tick")]
    pub parcels_max: Option<usize>,

    /// Probability that a dispatch is misrouted (0.0-1.0)
    #[arg(
        long,
        help = "Misrouting rate (0.0-1.0)",
        long_help = "Probability that a dispatch attempt is misrouted and recirculated. Range: 0.0-1.0. Default: 0.1"
    )]
    pub misrouting_rate: Option<f64>,

    /// Destination cities, comma separated, in rotation order
    #[arg(long, value_delimiter = ',', help = "Comma-separated destination cities")]
    pub cities: Option<Vec<String>>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Per-tick log file path
    #[arg(long, help = "Per-tick log file path")]
    pub log_file: Option<String>,

    /// Final report file path
    #[arg(long, help = "Final report file path")]
    pub report_file: Option<String>,

    /// Per-tick log format
    #[arg(long, help = "Per-tick log format (text or json)")]
    pub log_format: Option<String>,

    /// Disable the per-tick log file
    #[arg(long, help = "Do not write the per-tick log file")]
    pub no_log_file: bool,

    /// Disable the final report file
    #[arg(long, help = "Do not write the final report file")]
    pub no_report: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// JSON configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of ticks to simulate
    pub max_ticks: Option<u64>,

    /// Arrival buffer capacity
    pub queue_capacity: Option<usize>,

    /// Ticks between terminal rotations
    pub terminal_rotation_interval: Option<u64>,

    /// Minimum parcels generated per tick
    pub parcel_per_tick_min: Option<usize>,

    /// Maximum parcels generated per tick
    pub parcel_per_tick_max: Option<usize>,

    /// Probability that a dispatch attempt is misrouted
    pub misrouting_rate: Option<f64>,

    /// Destination cities in rotation order
    pub city_list: Option<Vec<String>>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Per-tick log file path
    pub log_file: Option<String>,

    /// Final report file path
    pub report_file: Option<String>,

    /// Per-tick log format
    pub log_format: Option<LogFormat>,
}

/// Configuration for a parcel sorting simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of ticks to simulate
    pub max_ticks: u64,

    /// Arrival buffer capacity
    pub queue_capacity: usize,

    /// Ticks between terminal rotations
    pub terminal_rotation_interval: u64,

    /// Minimum parcels generated per tick
    pub parcel_per_tick_min: usize,

    /// Maximum parcels generated per tick
    pub parcel_per_tick_max: usize,

    /// Probability that a dispatch attempt is misrouted (0.0-1.0)
    pub misrouting_rate: f64,

    /// Destination cities in rotation order
    pub city_list: Vec<String>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Per-tick log file path
    pub log_file: Option<String>,

    /// Final report file path
    pub report_file: Option<String>,

    /// Per-tick log format
    pub log_format: LogFormat,
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

    /// A KEY=VALUE entry has a value that cannot be parsed
    #[error("Invalid value for {key} on line {line}: '{value}'")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Offending raw value
        value: String,
        /// 1-based line number
        line: usize,
    },

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json, .txt, .conf, .cfg, .properties)")]
    UnsupportedFormat(String),

    /// Merged configuration failed validation
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Tick count is invalid
    #[error("Max ticks must be greater than 0, got {0}")]
    InvalidMaxTicks(u64),

    /// Queue capacity is invalid
    #[error("Queue capacity must be greater than 0, got {0}")]
    InvalidQueueCapacity(usize),

    /// Rotation interval is invalid
    #[error("Terminal rotation interval must be greater than 0, got {0}")]
    InvalidRotationInterval(u64),

    /// Parcel-per-tick range is invalid
    #[error("Invalid parcels per tick range: min ({0}) must be <= max ({1})")]
    InvalidParcelRange(usize, usize),

    /// Misrouting rate is out of range
    #[error("Invalid misrouting rate: {0} (must be between 0.0 and 1.0)")]
    InvalidMisroutingRate(f64),

    /// City list is empty
    #[error("City list must contain at least one destination")]
    EmptyCityList,

    /// A city name is blank
    #[error("City list entry {0} is blank")]
    BlankCityName(usize),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_ticks: defaults::MAX_TICKS,
            queue_capacity: defaults::QUEUE_CAPACITY,
            terminal_rotation_interval: defaults::TERMINAL_ROTATION_INTERVAL,
            parcel_per_tick_min: defaults::PARCEL_PER_TICK_MIN,
            parcel_per_tick_max: defaults::PARCEL_PER_TICK_MAX,
            misrouting_rate: defaults::MISROUTING_RATE,
            city_list: defaults::CITY_LIST.iter().map(|c| c.to_string()).collect(),
            seed: None,
            log_file: Some(defaults::LOG_FILE.to_string()),
            report_file: Some(defaults::REPORT_FILE.to_string()),
            log_format: LogFormat::Text,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments, failing on any file error
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Self::apply_cli_overrides(&mut config, &args);
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from parsed CLI arguments, never failing
    ///
    /// A configuration file that is missing, unreadable or malformed is replaced
    /// by the defaults. CLI overrides are then applied; if the result is still
    /// invalid the plain defaults are used.
    pub fn load_or_default(args: &CliArgs) -> Self {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                warn!("Using default configuration: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };

        if let Err(e) = config.validate() {
            warn!("Configuration file is invalid, using defaults: {}", e);
            config = Self::default();
        }

        Self::apply_cli_overrides(&mut config, args);

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Command line overrides are invalid, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a file (JSON or KEY=VALUE)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        debug!("Loaded {} bytes of configuration from {}", content.len(), path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some("txt") | Some("conf") | Some("cfg") | Some("properties") | None => {
                Self::from_key_value_str(&content)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Parse `KEY=VALUE` configuration text
    ///
    /// Blank lines and lines starting with `#` are skipped, as are unknown keys and
    /// lines that do not split into exactly one key and one value.
    pub fn from_key_value_str(content: &str) -> Result<Self, ConfigError> {
        let mut file = ConfigFile::default();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() != 2 {
                debug!("Skipping configuration line {}: {}", index + 1, line);
                continue;
            }

            let key = parts[0].trim();
            let value = parts[1].trim();
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                line: index + 1,
            };

            match key {
                "MAX_TICKS" => file.max_ticks = Some(value.parse().map_err(|_| invalid())?),
                "QUEUE_CAPACITY" => {
                    file.queue_capacity = Some(value.parse().map_err(|_| invalid())?)
                }
                "TERMINAL_ROTATION_INTERVAL" => {
                    file.terminal_rotation_interval = Some(value.parse().map_err(|_| invalid())?)
                }
                "PARCEL_PER_TICK_MIN" => {
                    file.parcel_per_tick_min = Some(value.parse().map_err(|_| invalid())?)
                }
                "PARCEL_PER_TICK_MAX" => {
                    file.parcel_per_tick_max = Some(value.parse().map_err(|_| invalid())?)
                }
                "MISROUTING_RATE" => {
                    file.misrouting_rate = Some(value.parse().map_err(|_| invalid())?)
                }
                "CITY_LIST" => {
                    file.city_list = Some(value.split(',').map(|c| c.trim().to_string()).collect())
                }
                "SEED" => file.seed = Some(value.parse().map_err(|_| invalid())?),
                other => debug!("Ignoring unknown configuration key {}", other),
            }
        }

        Ok(Self::from_config_file(file))
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            max_ticks: config_file.max_ticks.unwrap_or(defaults.max_ticks),
            queue_capacity: config_file.queue_capacity.unwrap_or(defaults.queue_capacity),
            terminal_rotation_interval: config_file
                .terminal_rotation_interval
                .unwrap_or(defaults.terminal_rotation_interval),
            parcel_per_tick_min: config_file
                .parcel_per_tick_min
                .unwrap_or(defaults.parcel_per_tick_min),
            parcel_per_tick_max: config_file
                .parcel_per_tick_max
                .unwrap_or(defaults.parcel_per_tick_max),
            misrouting_rate: config_file.misrouting_rate.unwrap_or(defaults.misrouting_rate),
            city_list: config_file.city_list.unwrap_or(defaults.city_list),
            seed: config_file.seed.or(defaults.seed),
            log_file: config_file.log_file.or(defaults.log_file),
            report_file: config_file.report_file.or(defaults.report_file),
            log_format: config_file.log_format.unwrap_or(defaults.log_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: &CliArgs) {
        if let Some(value) = args.max_ticks {
            config.max_ticks = value;
        }
        if let Some(value) = args.queue_capacity {
            config.queue_capacity = value;
        }
        if let Some(value) = args.rotation_interval {
            config.terminal_rotation_interval = value;
        }
        if let Some(value) = args.parcels_min {
            config.parcel_per_tick_min = value;
        }
        if let Some(value) = args.parcels_max {
            config.parcel_per_tick_max = value;
        }
        if let Some(value) = args.misrouting_rate {
            config.misrouting_rate = value;
        }
        if let Some(cities) = &args.cities {
            config.city_list = cities.iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = &args.log_file {
            config.log_file = Some(value.clone());
        }
        if let Some(value) = &args.report_file {
            config.report_file = Some(value.clone());
        }
        if let Some(value) = &args.log_format {
            match value.parse() {
                Ok(format) => config.log_format = format,
                Err(e) => warn!("Ignoring --log-format: {}", e),
            }
        }
        if args.no_log_file {
            config.log_file = None;
        }
        if args.no_report {
            config.report_file = None;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_ticks == 0 {
            return Err(ConfigValidationError::InvalidMaxTicks(self.max_ticks));
        }

        if self.queue_capacity == 0 {
            return Err(ConfigValidationError::InvalidQueueCapacity(self.queue_capacity));
        }

        if self.terminal_rotation_interval == 0 {
            return Err(ConfigValidationError::InvalidRotationInterval(
                self.terminal_rotation_interval,
            ));
        }

        if self.parcel_per_tick_min > self.parcel_per_tick_max {
            return Err(ConfigValidationError::InvalidParcelRange(
                self.parcel_per_tick_min,
                self.parcel_per_tick_max,
            ));
        }

        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&self.misrouting_rate) {
            return Err(ConfigValidationError::InvalidMisroutingRate(self.misrouting_rate));
        }

        if self.city_list.is_empty() {
            return Err(ConfigValidationError::EmptyCityList);
        }

        if let Some(index) = self.city_list.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigValidationError::BlankCityName(index));
        }

        Ok(())
    }

    /// Get the parcels-per-tick range as a tuple
    pub fn parcels_per_tick(&self) -> (usize, usize) {
        (self.parcel_per_tick_min, self.parcel_per_tick_max)
    }

    /// Distinct destination names in first-seen order
    pub fn distinct_cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = Vec::with_capacity(self.city_list.len());
        for city in &self.city_list {
            if !cities.contains(&city.as_str()) {
                cities.push(city);
            }
        }
        cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.max_ticks, 300);
        assert_eq!(config.queue_capacity, 30);
        assert_eq!(config.terminal_rotation_interval, 5);
        assert_eq!(config.parcels_per_tick(), (1, 3));
        assert_eq!(config.misrouting_rate, 0.1);
        assert_eq!(config.city_list, vec!["Istanbul", "Ankara", "Izmir", "Bursa", "Antalya"]);
        assert!(config.seed.is_none());
        assert_eq!(config.log_file.as_deref(), Some("log.txt"));
        assert_eq!(config.report_file.as_deref(), Some("report.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_key_value_parsing() {
        let content = "# ParcelSort configuration\n\
                       MAX_TICKS=50\n\
                       QUEUE_CAPACITY = 10\n\
                       \n\
                       TERMINAL_ROTATION_INTERVAL=3\n\
                       PARCEL_PER_TICK_MIN=0\n\
                       PARCEL_PER_TICK_MAX=4\n\
                       MISROUTING_RATE=0.25\n\
                       CITY_LIST= Ankara , Izmir,Bursa\n\
                       UNKNOWN_KEY=ignored\n\
                       not a pair\n";

        let config = SimulationConfig::from_key_value_str(content).unwrap();
        assert_eq!(config.max_ticks, 50);
        assert_eq!(config.queue_capacity, 10);
        assert_eq!(config.terminal_rotation_interval, 3);
        assert_eq!(config.parcels_per_tick(), (0, 4));
        assert_eq!(config.misrouting_rate, 0.25);
        assert_eq!(config.city_list, vec!["Ankara", "Izmir", "Bursa"]);
    }

    #[test]
    fn test_key_value_missing_keys_use_defaults() {
        let config = SimulationConfig::from_key_value_str("MAX_TICKS=7").unwrap();
        assert_eq!(config.max_ticks, 7);
        assert_eq!(config.queue_capacity, defaults::QUEUE_CAPACITY);
        assert_eq!(config.city_list.len(), 5);
    }

    #[test]
    fn test_key_value_rejects_malformed_number() {
        let result = SimulationConfig::from_key_value_str("MAX_TICKS=lots");
        match result {
            Err(ConfigError::InvalidValue { key, line, .. }) => {
                assert_eq!(key, "MAX_TICKS");
                assert_eq!(line, 1);
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rules() {
        let mut config = SimulationConfig::default();
        config.max_ticks = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxTicks(0)));

        let mut config = SimulationConfig::default();
        config.queue_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidQueueCapacity(0)));

        let mut config = SimulationConfig::default();
        config.terminal_rotation_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRotationInterval(0))
        ));

        let mut config = SimulationConfig::default();
        config.parcel_per_tick_min = 5;
        config.parcel_per_tick_max = 2;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidParcelRange(5, 2)));

        let mut config = SimulationConfig::default();
        config.misrouting_rate = 1.5;
        assert!(config.validate().is_err());
        config.misrouting_rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.city_list.clear();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyCityList));

        let mut config = SimulationConfig::default();
        config.city_list.push("  ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::BlankCityName(5)));
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let args = CliArgs::try_parse_from([
            "test",
            "--max-ticks",
            "20",
            "--cities",
            "A,B,C",
            "--seed",
            "9",
            "--misrouting-rate",
            "0.5",
            "--no-report",
            "--log-format",
            "json",
        ])
        .unwrap();

        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.max_ticks, 20);
        assert_eq!(config.city_list, vec!["A", "B", "C"]);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.misrouting_rate, 0.5);
        assert!(config.report_file.is_none());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let args = CliArgs {
            config: Some("/definitely/not/here.txt".to_string()),
            seed: Some(3),
            ..Default::default()
        };

        let config = SimulationConfig::load_or_default(&args);
        assert_eq!(config.max_ticks, defaults::MAX_TICKS);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_load_or_default_falls_back_on_invalid_overrides() {
        let args = CliArgs { queue_capacity: Some(0), ..Default::default() };
        let config = SimulationConfig::load_or_default(&args);
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_from_file_json_partial() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"max_ticks": 12, "city_list": ["X", "Y"]}}"#).unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_ticks, 12);
        assert_eq!(config.city_list, vec!["X", "Y"]);
        assert_eq!(config.queue_capacity, defaults::QUEUE_CAPACITY);
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_distinct_cities_keeps_first_seen_order() {
        let config = SimulationConfig {
            city_list: vec!["B".into(), "A".into(), "B".into()],
            ..Default::default()
        };
        assert_eq!(config.distinct_cities(), vec!["B", "A"]);
    }

    #[test]
    fn test_print_json_round_trip() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
