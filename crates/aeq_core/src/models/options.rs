//! Render options as collected from the options panel.

use serde::{Deserialize, Serialize};

/// All options required for one render run.
///
/// The simulator only inspects the flags that gate pipeline stages;
/// the quality and comment fields are carried along for the panels
/// that edit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Output-module template used for the render stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Encode an MP4 preview.
    #[serde(default)]
    pub mp4: bool,

    /// MP4 encode quality (0-100).
    #[serde(default = "default_mp4_quality")]
    pub mp4_quality: u32,

    /// Encode a GIF preview.
    #[serde(default)]
    pub gif: bool,

    /// GIF encode quality (0-100).
    #[serde(default = "default_gif_quality")]
    pub gif_quality: u32,

    /// Upload the result for review.
    #[serde(default)]
    pub sg: bool,

    /// Comment attached to the review upload.
    #[serde(default)]
    pub sg_comment: String,
}

fn default_mp4_quality() -> u32 {
    80
}

fn default_gif_quality() -> u32 {
    50
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module: Some("Lossless".to_string()),
            mp4: true,
            mp4_quality: default_mp4_quality(),
            gif: true,
            gif_quality: default_gif_quality(),
            sg: true,
            sg_comment: String::new(),
        }
    }
}
