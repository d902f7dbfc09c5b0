use crate::utils::{EditorError, EditorResult};

/// Trims a user-typed instruction. Blank input yields `None`.
pub fn normalize_instruction(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validates that a slider value lies within its range
pub fn validate_range(name: &str, value: i32, min: i32, max: i32) -> EditorResult<()> {
    if value < min || value > max {
        return Err(EditorError::instruction(format!(
            "Invalid {} value: {}. Must be between {} and {}",
            name, value, min, max
        )));
    }
    Ok(())
}
