use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use validator::ValidateEmail;

/// Submitted form values plus the per-field messages collected while checking them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Form {
    values: HashMap<String, String>,
    errors: BTreeMap<String, Vec<String>>,
}

impl Form {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values, errors: BTreeMap::new() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn required(&mut self, fields: &[&str]) -> &mut Self {
        for field in fields {
            if self.get(field).trim().is_empty() {
                self.add_error(field, "This field cannot be blank".to_string());
            }
        }
        self
    }

    pub fn min_length(&mut self, field: &str, length: usize) -> &mut Self {
        if self.get(field).chars().count() < length {
            self.add_error(field, format!("This field must be at least {} characters long", length));
        }
        self
    }

    pub fn is_email(&mut self, field: &str) -> &mut Self {
        if !self.get(field).validate_email() {
            self.add_error(field, "Invalid email address".to_string());
        }
        self
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// First message for a field, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(|e| e.first()).map(String::as_str)
    }

    fn add_error(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }
}
