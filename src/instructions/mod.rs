//! Instruction builders keyed by edit kind, plus the preset catalog.

pub mod builder;
pub mod catalog;

pub use builder::{Adjustment, EditInstruction, FocusPoint, RESET_ADJUSTMENTS_PROMPT};
pub use catalog::{
    AI_TOOLS, AiTool, PRESETS, Preset, PresetCatalog, PresetCategory, catalog, find_ai_tool,
    find_preset, presets_by_category,
};
