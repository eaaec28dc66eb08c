//! Error types and handling
//!
//! This module contains error types for running the simulation and writing its
//! outputs. Nothing inside a tick can fail: overflow and empty-source conditions are
//! modeled as return values. These errors cover engine construction and output I/O.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(#[from] ConfigValidationError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Tick log file could not be created
    #[error("Cannot create tick log {}", path.display())]
    TickLogError {
        /// Requested log path
        path: PathBuf,
        /// Underlying file error
        #[source]
        source: io::Error,
    },

    /// Report file could not be written
    #[error("Cannot write report {}", path.display())]
    ReportError {
        /// Requested report path
        path: PathBuf,
        /// Underlying file error
        #[source]
        source: io::Error,
    },
}

impl SimulationError {
    /// Create a tick log error for `path`
    pub fn tick_log_error(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::TickLogError { path: path.as_ref().to_path_buf(), source }
    }

    /// Create a report error for `path`
    pub fn report_error(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::ReportError { path: path.as_ref().to_path_buf(), source }
    }

    /// Check if this is a recoverable error
    ///
    /// Output failures are recoverable: the run itself still completes and its
    /// counters stay valid. Configuration failures are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
            SimulationError::TickLogError { .. } => true,
            SimulationError::ReportError { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::TickLogError { .. } => "Tick Log",
            SimulationError::ReportError { .. } => "Report",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
    }

    #[test]
    fn test_error_creation() {
        let error = SimulationError::tick_log_error("out/log.txt", denied());
        assert!(matches!(error, SimulationError::TickLogError { .. }));
        assert_eq!(error.to_string(), "Cannot create tick log out/log.txt");

        let error = SimulationError::report_error("out/report.txt", denied());
        assert!(matches!(error, SimulationError::ReportError { .. }));
        assert_eq!(error.to_string(), "Cannot write report out/report.txt");
    }

    #[test]
    fn test_output_errors_keep_their_source() {
        let error = SimulationError::tick_log_error("log.txt", denied());
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "permission denied");

        let error = SimulationError::report_error("report.txt", denied());
        assert!(error.source().unwrap().downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_error_from_validation_error() {
        let error: SimulationError = ConfigValidationError::EmptyCityList.into();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
        assert!(!error.is_recoverable());
        assert_eq!(error.category(), "Configuration");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert!(sim_error.is_recoverable());
        assert_eq!(sim_error.category(), "IO");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::tick_log_error("x", denied()).category(), "Tick Log");
        assert_eq!(SimulationError::report_error("x", denied()).category(), "Report");
        assert!(SimulationError::report_error("x", denied()).is_recoverable());
    }

    #[test]
    fn test_simulation_result_type() {
        fn validate(ok: bool) -> SimulationResult<u64> {
            if ok {
                Ok(7)
            } else {
                Err(ConfigValidationError::InvalidMaxTicks(0).into())
            }
        }

        assert_eq!(validate(true).unwrap(), 7);
        assert!(validate(false).is_err());
    }
}
