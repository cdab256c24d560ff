// src/error.rs - Error handling for generation, configuration and export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::data::random::RandomError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration {
        key: Option<String>,
        validation_errors: Vec<String>,
    },
    /// A primitive generator rejected its arguments.
    Generation {
        factory: Option<String>,
        parameter: Option<String>,
    },
    /// A factory ran before a collection it references was generated.
    MissingDependency {
        factory: String,
        dependency: String,
    },
    /// Filtering employees by role left nobody to assign.
    EmptyPopulation {
        factory: String,
        role: String,
    },
    Validation {
        field: Option<String>,
        rules: Vec<String>,
    },
    Io,
    Serialization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    pub severity: ErrorSeverity,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: crate::types::Metadata,
    pub causes: Vec<String>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            severity: ErrorSeverity::Medium,
            source: "unknown".to_string(),
            timestamp: Utc::now(),
            metadata: std::collections::HashMap::new(),
            causes: Vec::new(),
        }
    }

    /// Sets the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the error source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Adds metadata to the error
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Adds a cause to the error chain
    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Checks if the error is critical
    pub fn is_critical(&self) -> bool {
        matches!(self.severity, ErrorSeverity::Critical)
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors: Vec::new(),
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a configuration error for a specific key
    pub fn config_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::Configuration {
                key: Some(key.into()),
                validation_errors: vec![message.clone()],
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a generation error raised inside a factory
    pub fn generation(
        factory: impl Into<String>,
        parameter: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        let factory = factory.into();
        Self::new(
            ErrorKind::Generation {
                factory: Some(factory.clone()),
                parameter,
            },
            message,
        )
        .source(factory)
        .severity(ErrorSeverity::High)
    }

    /// Creates an ordering violation error
    pub fn missing_dependency(factory: impl Into<String>, dependency: impl Into<String>) -> Self {
        let factory = factory.into();
        let dependency = dependency.into();
        let message = format!(
            "{} requires a non-empty {} collection; generate {} first",
            factory, dependency, dependency
        );
        Self::new(
            ErrorKind::MissingDependency {
                factory: factory.clone(),
                dependency,
            },
            message,
        )
        .source(factory)
        .severity(ErrorSeverity::Critical)
    }

    /// Creates an error for a role filter that matched no employees
    pub fn empty_population(factory: impl Into<String>, role: impl fmt::Display) -> Self {
        let factory = factory.into();
        let role = role.to_string();
        let message = format!("{} needs at least one employee with role {}", factory, role);
        Self::new(
            ErrorKind::EmptyPopulation {
                factory: factory.clone(),
                role,
            },
            message,
        )
        .source(factory)
        .severity(ErrorSeverity::Critical)
    }

    /// Creates a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::Validation {
                field: Some(field.into()),
                rules: vec![message.clone()],
            },
            message,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.source, self.id, self.message
        )
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let msg = err.to_string();

        let mut error = Error::new(ErrorKind::Io, msg);
        error.source = "std::io::Error".to_string();
        error.severity = ErrorSeverity::High;

        error
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Serialization, err.to_string()).source("serde_json")
    }
}

impl From<RandomError> for Error {
    fn from(err: RandomError) -> Self {
        let parameter = match &err {
            RandomError::InvalidRange { .. } => "range",
            RandomError::EmptyCurrencyRange { .. } => "range",
            RandomError::EmptyCollection => "collection",
            RandomError::InvalidDateRange { .. } => "date_range",
            RandomError::InvalidProbability(_) => "probability",
        };
        Error::new(
            ErrorKind::Generation {
                factory: None,
                parameter: Some(parameter.to_string()),
            },
            err.to_string(),
        )
        .source("generator")
        .severity(ErrorSeverity::High)
    }
}

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Adds context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Attributes a primitive generator failure to the factory that made the call
    fn in_factory(self, factory: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let cause = e.message.clone();
            Error {
                message: f(),
                ..e
            }
            .caused_by(cause)
        })
    }

    fn in_factory(self, factory: &str) -> Result<T> {
        self.map_err(|e| match e.kind {
            ErrorKind::Generation {
                factory: None,
                parameter,
            } => Error::generation(factory, parameter, e.message),
            _ => e,
        })
    }
}
