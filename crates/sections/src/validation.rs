//! Validation rules for sections and section requests
//!
//! Field problems are reported as `SiteError::FieldValidation` so the editor
//! can attach them to the offending input; whole-request problems (a bad
//! reorder list) are reported as `SiteError::InvalidReorder`.

use crate::section::{CreateSection, ReorderEntry, Section, UpdateSection};
use homestretch_core::{SectionOrder, SiteError, SiteResult, Validatable};
use std::collections::HashSet;

/// Longest accepted section name
pub const MAX_NAME_LEN: usize = 120;

/// Longest accepted `type` tag
pub const MAX_TYPE_LEN: usize = 40;

// ============================================================================
// Field rules
// ============================================================================

/// Section names are required and short enough for an editor card
pub fn validate_name(name: &str) -> SiteResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SiteError::field_validation("name", "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(SiteError::field_validation(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// Component keys are identifiers, never blank
pub fn validate_component(component: &str) -> SiteResult<()> {
    if component.trim().is_empty() {
        return Err(SiteError::field_validation("component", "must not be empty"));
    }
    if component.chars().any(char::is_whitespace) {
        return Err(SiteError::field_validation(
            "component",
            "must not contain whitespace",
        ));
    }
    Ok(())
}

/// `type` tags are short lowercase words
pub fn validate_type(section_type: &str) -> SiteResult<()> {
    if section_type.is_empty() || section_type.len() > MAX_TYPE_LEN {
        return Err(SiteError::field_validation(
            "type",
            format!("must be between 1 and {MAX_TYPE_LEN} characters"),
        ));
    }
    if !section_type
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(SiteError::field_validation(
            "type",
            "may only contain lowercase letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

/// Ranks must be finite numbers
pub fn validate_order(order: SectionOrder) -> SiteResult<()> {
    if !order.is_finite() {
        return Err(SiteError::field_validation("order", "must be a finite number"));
    }
    Ok(())
}

/// A reorder list must be non-empty, free of duplicates and finite
///
/// Existence of the ids is checked by the store, which owns the records.
pub fn validate_reorder(entries: &[ReorderEntry]) -> SiteResult<()> {
    if entries.is_empty() {
        return Err(SiteError::invalid_reorder("no sections given"));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(SiteError::invalid_reorder(format!(
                "section {} listed more than once",
                entry.id
            )));
        }
        if !entry.order.is_finite() {
            return Err(SiteError::invalid_reorder(format!(
                "section {} has a non-finite order",
                entry.id
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Validatable impls
// ============================================================================

impl Validatable for Section {
    fn validate(&self) -> SiteResult<()> {
        validate_name(&self.name)?;
        validate_component(self.component())?;
        validate_type(&self.section_type)?;
        validate_order(self.order)
    }
}

impl Validatable for CreateSection {
    fn validate(&self) -> SiteResult<()> {
        validate_name(&self.name)?;
        validate_component(&self.component)?;
        if let Some(section_type) = &self.section_type {
            validate_type(section_type)?;
        }
        if let Some(order) = self.order {
            validate_order(order)?;
        }
        Ok(())
    }
}

impl Validatable for UpdateSection {
    fn validate(&self) -> SiteResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(component) = &self.component {
            validate_component(component)?;
        }
        if let Some(section_type) = &self.section_type {
            validate_type(section_type)?;
        }
        if let Some(order) = self.order {
            validate_order(order)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
