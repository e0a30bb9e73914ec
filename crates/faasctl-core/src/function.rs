use crate::error::{Error, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};

pub const TIMEOUT_MIN_SECONDS: u64 = 1;
pub const TIMEOUT_MAX_SECONDS: u64 = 60;

/// A function record as held by the backend store. The client only ever
/// holds a transient, possibly-stale copy; the `id` is backend-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub id: String,
    pub name: String,
    pub language: Language,
    pub code: String,
    pub timeout_seconds: u64,
}

/// Payload for creating or updating a function. Validated on
/// construction; the `code` may be empty (executing it will fail
/// backend-side, which is the backend's call to make).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub language: Language,
    pub code: String,
    pub timeout_seconds: u64,
}

impl FunctionSpec {
    pub fn new(name: String, language: Language, code: String, timeout_seconds: u64) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        validate_timeout(timeout_seconds)?;

        Ok(Self {
            name,
            language,
            code,
            timeout_seconds,
        })
    }
}

pub fn validate_timeout(timeout_seconds: u64) -> Result<()> {
    if !(TIMEOUT_MIN_SECONDS..=TIMEOUT_MAX_SECONDS).contains(&timeout_seconds) {
        return Err(Error::TimeoutOutOfRange {
            value: timeout_seconds,
            min: TIMEOUT_MIN_SECONDS,
            max: TIMEOUT_MAX_SECONDS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_creation() {
        let spec = FunctionSpec::new(
            "hello".to_string(),
            Language::Python,
            "print(1)".to_string(),
            5,
        )
        .unwrap();

        assert_eq!(spec.name, "hello");
        assert_eq!(spec.language, Language::Python);
        assert_eq!(spec.timeout_seconds, 5);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = FunctionSpec::new(
            "   ".to_string(),
            Language::Python,
            "print(1)".to_string(),
            5,
        )
        .unwrap_err();

        assert!(matches!(err, Error::EmptyName));
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(FunctionSpec::new("f".into(), Language::Python, "".into(), 1).is_ok());
        assert!(FunctionSpec::new("f".into(), Language::Python, "".into(), 60).is_ok());

        let err = FunctionSpec::new("f".into(), Language::Python, "".into(), 0).unwrap_err();
        assert!(matches!(err, Error::TimeoutOutOfRange { value: 0, .. }));

        let err = FunctionSpec::new("f".into(), Language::Python, "".into(), 61).unwrap_err();
        assert!(matches!(err, Error::TimeoutOutOfRange { value: 61, .. }));
    }

    #[test]
    fn test_empty_code_allowed() {
        assert!(FunctionSpec::new("f".into(), Language::Javascript, String::new(), 5).is_ok());
    }
}
