use std::fmt;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Blank,
    Taken,
}

impl Reason {
    /// Short machine-readable tag.
    pub fn tag(self) -> &'static str {
        match self {
            Reason::Blank => "blank",
            Reason::Taken => "taken",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Reason::Blank => "can't be blank",
            Reason::Taken => "has already been taken",
        }
    }
}

/// A single field-level validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub reason: Reason,
}

/// The complete set of validation problems for one save attempt. Rules are
/// evaluated together, so every failing field is present, not just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    failures: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, reason: Reason) {
        self.failures.push(ValidationFailure { field, reason });
    }

    /// Records a `Blank` failure when the value is empty or whitespace-only.
    pub fn require_present(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, Reason::Blank);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Failure reasons recorded for one field.
    pub fn on(&self, field: &str) -> Vec<Reason> {
        self.failures
            .iter()
            .filter(|f| f.field == field)
            .map(|f| f.reason)
            .collect()
    }

    /// Human-readable messages, one per failure ("email has already been taken").
    pub fn messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("{} {}", f.field, f.reason.message()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
