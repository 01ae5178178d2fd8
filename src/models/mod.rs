//! Patient record extraction and folder-name derivation.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing identifier: cpf not found in payload")]
    MissingCpf,

    #[error("incomplete data: first and last name are required")]
    IncompleteData,
}

/// Identity fields extracted from an inbound lead payload. Request-scoped,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
}

impl PatientRecord {
    /// Extract a record from a loosely-typed payload. The originating CRM
    /// sends either flat fields or a `properties.<field>.value` wrapper, and
    /// names the fields in English or Portuguese depending on the call site,
    /// so each field is looked up under every accepted key in both shapes.
    pub fn from_payload(payload: &Value) -> Result<Self, RecordError> {
        let cpf = lookup_field(payload, &["cpf"]).ok_or(RecordError::MissingCpf)?;
        let first_name =
            lookup_field(payload, &["firstname", "nome"]).ok_or(RecordError::IncompleteData)?;
        let last_name =
            lookup_field(payload, &["lastname", "sobrenome"]).ok_or(RecordError::IncompleteData)?;

        Ok(Self {
            first_name,
            last_name,
            cpf,
        })
    }

    /// Canonical folder name: `"Lastname, Firstname - cpf"`. Names get their
    /// first character upper-cased and the remainder lower-cased; the cpf is
    /// passed through verbatim.
    pub fn folder_name(&self) -> String {
        format!(
            "{}, {} - {}",
            capitalize(&self.last_name),
            capitalize(&self.first_name),
            self.cpf
        )
    }
}

/// Flat key first, then the `properties.<key>.value` wrapper. Only non-empty
/// strings count as resolved.
fn lookup_field(payload: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        let flat = payload.get(*key).and_then(Value::as_str);
        let wrapped = payload
            .get("properties")
            .and_then(|props| props.get(*key))
            .and_then(|field| field.get("value"))
            .and_then(Value::as_str);

        for candidate in [flat, wrapped].into_iter().flatten() {
            let trimmed = candidate.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    None
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
