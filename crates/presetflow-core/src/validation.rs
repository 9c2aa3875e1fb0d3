//! Write-time preset validation

use crate::error::{PresetError, Result};
use crate::model::Preset;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum length of a preset name
pub const MAX_NAME_LENGTH: usize = 253;

static DNS1123_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS-1123 pattern is a valid regex")
});

/// Check a preset before it is written to a store.
///
/// Presets without any credential bundle are valid.
pub fn validate_preset(preset: &Preset) -> Result<()> {
    validate_name(&preset.name)?;

    for entry in &preset.spec.required_emails {
        validate_email_entry(entry)?;
    }

    let mut seen = HashSet::new();
    for project in &preset.spec.projects {
        if project.is_empty() {
            return Err(PresetError::invalid_argument(format!(
                "preset {}: project ID cannot be empty",
                preset.name
            )));
        }
        if !seen.insert(project.as_str()) {
            return Err(PresetError::invalid_argument(format!(
                "preset {}: duplicate project ID {}",
                preset.name, project
            )));
        }
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PresetError::invalid_argument("preset name cannot be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(PresetError::invalid_argument(format!(
            "preset name too long (max {} characters)",
            MAX_NAME_LENGTH
        )));
    }

    if !DNS1123_SUBDOMAIN_REGEX.is_match(name) {
        return Err(PresetError::invalid_argument(format!(
            "invalid preset name {:?}: must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character",
            name
        )));
    }

    Ok(())
}

fn validate_email_entry(entry: &str) -> Result<()> {
    if entry.is_empty() {
        return Err(PresetError::invalid_argument(
            "required email entry cannot be empty",
        ));
    }

    if entry.chars().any(char::is_whitespace) {
        return Err(PresetError::invalid_argument(format!(
            "required email entry {:?} contains whitespace",
            entry
        )));
    }

    if entry.contains('@') {
        let valid = match entry.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if !valid {
            return Err(PresetError::invalid_argument(format!(
                "required email entry {:?} is not a valid address",
                entry
            )));
        }
    }

    Ok(())
}
