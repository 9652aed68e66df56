use egui::{Color32, Vec2, vec2};
use serde::{Deserialize, Serialize};

/// Fixed brush parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // partial configs fall back to the stock values
pub struct BrushConfig {
    /// Width of continuous thread strokes and shape outlines
    pub thread_width: f32,
    pub seed_radius: f32,
    /// Minimum distance between consecutive seed beads
    pub seed_spacing: f32,
    /// Length of a long bead along the direction of travel
    pub long_width: f32,
    /// Thickness of a long bead across the direction of travel
    pub long_height: f32,
    pub long_spacing: f32,
    /// Longest side of a custom stamp once placed on the canvas
    pub custom_size: f32,
    pub custom_spacing: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            thread_width: 2.0,
            seed_radius: 4.0,
            seed_spacing: 10.0,
            long_width: 15.0,
            long_height: 6.0,
            long_spacing: 18.0,
            custom_size: 24.0,
            custom_spacing: 20.0,
        }
    }
}

impl BrushConfig {
    pub fn long_size(&self) -> Vec2 {
        vec2(self.long_width, self.long_height)
    }
}

/// Everything the editor needs to set itself up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Side length of the custom stamp authoring pad
    pub stamp_pad_size: u32,
    /// Snapshots retained for undo; the oldest are evicted beyond this
    pub max_history: usize,
    pub default_color: Color32,
    pub brush: BrushConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            stamp_pad_size: 100,
            max_history: 20,
            default_color: Color32::BLACK,
            brush: BrushConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "max_history": 5, "brush": { "seed_spacing": 12.0 } }"#)
                .unwrap();
        assert_eq!(config.max_history, 5);
        assert_eq!(config.brush.seed_spacing, 12.0);
        assert_eq!(config.brush.long_spacing, 18.0);
        assert_eq!(config.canvas_width, 800);
    }
}
