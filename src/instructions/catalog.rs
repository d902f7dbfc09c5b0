//! Built-in one-click edits.

use serde::Serialize;

/// A preset filter shown in the presets tab.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: &'static str,
    pub category: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

/// A heavier AI operation with a longer description.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AiTool {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

/// Presets in display order. Categories are contiguous.
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "auto-enhance",
        category: "Enhancements",
        label: "Auto Enhance",
        prompt: "Perform an auto-enhancement on the image. Improve brightness, contrast, and color saturation for a balanced and vibrant look.",
    },
    Preset {
        id: "face-tone",
        category: "Enhancements",
        label: "Face Tone",
        prompt: "Enhance the facial features, smooth the skin slightly, and balance the skin tone for a natural, healthy look.",
    },
    Preset {
        id: "hdr",
        category: "Enhancements",
        label: "HDR",
        prompt: "Apply a dramatic High Dynamic Range (HDR) effect, boosting details in both shadows and highlights.",
    },
    Preset {
        id: "recolor",
        category: "Enhancements",
        label: "Recolor",
        prompt: "Subtly recolor the image, enhancing the separation between the foreground and background with complementary colors.",
    },
    Preset {
        id: "cinematic",
        category: "Artistic Styles",
        label: "Cinematic",
        prompt: "Apply a cinematic, teal and orange color grade to the image.",
    },
    Preset {
        id: "vintage",
        category: "Artistic Styles",
        label: "Vintage",
        prompt: "Apply a warm, vintage film effect with slight grain and faded colors.",
    },
    Preset {
        id: "black-and-white",
        category: "Artistic Styles",
        label: "B & W",
        prompt: "Convert the image to a high-contrast, dramatic black and white.",
    },
    Preset {
        id: "golden-hour",
        category: "Artistic Styles",
        label: "Golden Hour",
        prompt: "Bathe the image in the warm, soft, golden light of a sunset.",
    },
    Preset {
        id: "neon-punk",
        category: "Artistic Styles",
        label: "Neon Punk",
        prompt: "Give the image a futuristic, cyberpunk feel with neon pink and blue lighting.",
    },
    Preset {
        id: "sunlight",
        category: "Effects & Objects",
        label: "Sunlight",
        prompt: "Add warm, natural-looking sunlight rays into the scene.",
    },
    Preset {
        id: "moonshine",
        category: "Effects & Objects",
        label: "Moonshine",
        prompt: "Bathe the scene in cool, ethereal moonlight with soft glows.",
    },
    Preset {
        id: "remove-bg",
        category: "Effects & Objects",
        label: "Remove BG",
        prompt: "Remove the background and replace it with a solid, neutral gray background.",
    },
    Preset {
        id: "long-wavy",
        category: "Hairstyles",
        label: "Long Wavy",
        prompt: "Add beautiful, long wavy hair to the person in the photo.",
    },
    Preset {
        id: "short-bob",
        category: "Hairstyles",
        label: "Short Bob",
        prompt: "Give the person in the photo a chic, short bob haircut.",
    },
    Preset {
        id: "pink-hair",
        category: "Hairstyles",
        label: "Pink Hair",
        prompt: "Change the hair color of the person in the photo to a vibrant pink.",
    },
];

pub const AI_TOOLS: &[AiTool] = &[
    AiTool {
        id: "skin-retouch",
        label: "AI Skin Retouch",
        description: "Automatically smooths skin and removes blemishes for a flawless portrait.",
        prompt: "Perform a professional-grade skin retouch. Smooth skin, remove blemishes, and even out skin tone for a natural, high-quality finish, paying close attention to preserving skin texture.",
    },
    AiTool {
        id: "upscaler",
        label: "AI Upscaler",
        description: "Increases image resolution and enhances fine details for a clearer picture.",
        prompt: "Upscale this image to a higher resolution. Enhance details, sharpen lines, and improve overall clarity without introducing artifacts.",
    },
    AiTool {
        id: "face-cutout",
        label: "Face Cutout",
        description: "Detects and isolates the main face from its background.",
        prompt: "Detect the primary face in the image, carefully cut it out from the background, and provide a transparent background.",
    },
];

pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

pub fn find_ai_tool(id: &str) -> Option<&'static AiTool> {
    AI_TOOLS.iter().find(|t| t.id == id)
}

/// Presets grouped by category, preserving display order.
pub fn presets_by_category() -> Vec<(&'static str, Vec<&'static Preset>)> {
    let mut groups: Vec<(&'static str, Vec<&'static Preset>)> = Vec::new();
    for preset in PRESETS {
        match groups.last_mut() {
            Some((category, items)) if *category == preset.category => items.push(preset),
            _ => groups.push((preset.category, vec![preset])),
        }
    }
    groups
}

/// Everything the tool panels list, ready for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetCatalog {
    pub categories: Vec<PresetCategory>,
    pub ai_tools: &'static [AiTool],
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetCategory {
    pub name: &'static str,
    pub presets: Vec<&'static Preset>,
}

pub fn catalog() -> PresetCatalog {
    PresetCatalog {
        categories: presets_by_category()
            .into_iter()
            .map(|(name, presets)| PresetCategory { name, presets })
            .collect(),
        ai_tools: AI_TOOLS,
    }
}
