//! Turns a user intention into the instruction string sent to the model.

use serde::{Deserialize, Serialize};
use crate::instructions::catalog::{find_ai_tool, find_preset};
use crate::utils::{EditorError, EditorResult, normalize_instruction, validate_range};

pub const RESET_ADJUSTMENTS_PROMPT: &str =
    "Reset brightness, contrast, and sharpness to their default, neutral values.";

/// Slider-driven global adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Brightness,
    Contrast,
    Sharpness,
}

impl Adjustment {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Sharpness => "sharpness",
        }
    }

    /// Inclusive slider range
    pub fn range(&self) -> (i32, i32) {
        match self {
            Self::Brightness | Self::Contrast => (-50, 50),
            Self::Sharpness => (0, 100),
        }
    }

    fn intensity(&self, level: u32) -> &'static str {
        let (slight, moderate) = match self {
            Self::Sharpness => (33, 66),
            Self::Brightness | Self::Contrast => (16, 33),
        };
        if level <= slight {
            "slightly"
        } else if level <= moderate {
            "moderately"
        } else {
            "significantly"
        }
    }
}

/// A point on the image, as fractions of width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

/// Every way the UI can ask for an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditInstruction {
    Preset { id: String },
    AiTool { id: String },
    Adjustment { adjustment: Adjustment, value: i32 },
    ResetAdjustments,
    Localized {
        prompt: String,
        #[serde(default)]
        point: Option<FocusPoint>,
    },
    LocalizedBlur {
        strength: u8,
        #[serde(default)]
        point: Option<FocusPoint>,
    },
    FreeText { prompt: String },
}

impl EditInstruction {
    /// Builds the instruction text.
    ///
    /// `Ok(None)` means the intention maps to no edit at all (a blank prompt,
    /// a sharpness or blur slider released at zero). Unknown ids and values
    /// outside a slider's range are errors.
    pub fn to_prompt(&self) -> EditorResult<Option<String>> {
        match self {
            Self::Preset { id } => find_preset(id)
                .map(|p| Some(p.prompt.to_string()))
                .ok_or_else(|| EditorError::instruction(format!("Unknown preset: {}", id))),
            Self::AiTool { id } => find_ai_tool(id)
                .map(|t| Some(t.prompt.to_string()))
                .ok_or_else(|| EditorError::instruction(format!("Unknown AI tool: {}", id))),
            Self::Adjustment { adjustment, value } => adjustment_prompt(*adjustment, *value),
            Self::ResetAdjustments => Ok(Some(RESET_ADJUSTMENTS_PROMPT.to_string())),
            Self::Localized { prompt, point } => {
                Ok(normalize_instruction(prompt).map(|p| localized_prompt(&p, *point)))
            }
            Self::LocalizedBlur { strength, point } => {
                Ok(blur_prompt(*strength)?.map(|p| localized_prompt(&p, *point)))
            }
            Self::FreeText { prompt } => Ok(normalize_instruction(prompt)),
        }
    }
}

fn adjustment_prompt(adjustment: Adjustment, value: i32) -> EditorResult<Option<String>> {
    let (min, max) = adjustment.range();
    validate_range(adjustment.name(), value, min, max)?;

    let intensity = adjustment.intensity(value.unsigned_abs());
    let name = adjustment.name();

    let prompt = match adjustment {
        Adjustment::Sharpness if value == 0 => return Ok(None),
        Adjustment::Sharpness => format!("Make the image {} sharper.", intensity),
        _ if value == 0 => format!("Reset the {} to a neutral level.", name),
        _ if value > 0 => format!("{} increase the {}.", capitalize(intensity), name),
        _ => format!("{} decrease the {}.", capitalize(intensity), name),
    };

    Ok(Some(prompt))
}

fn blur_prompt(strength: u8) -> EditorResult<Option<String>> {
    validate_range("blur", i32::from(strength), 0, 100)?;

    let intensity = match strength {
        0 => return Ok(None),
        1..=33 => "light",
        34..=66 => "moderate",
        _ => "strong",
    };

    Ok(Some(format!(
        "Apply a {} photographic blur (bokeh) to the selected area.",
        intensity
    )))
}

fn localized_prompt(edit: &str, point: Option<FocusPoint>) -> String {
    let location = point
        .map(|p| {
            format!(
                " The point lies about {}% from the left and {}% from the top of the image.",
                percent(p.x),
                percent(p.y)
            )
        })
        .unwrap_or_default();

    format!(
        "A user has indicated a specific point of interest in the image.{} Apply the following edit to that localized area: \"{}\". Keep the changes focused on that region and blend them naturally with the surroundings.",
        location, edit
    )
}

fn percent(fraction: f32) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
