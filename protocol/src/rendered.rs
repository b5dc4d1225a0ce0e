use serde::Deserialize;
use serde::Serialize;

use crate::chat_block::ChatBlockRole;

/// One rendered chat block's line span within `RenderedContent::plain_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpan {
    pub block_index: usize,
    pub role: ChatBlockRole,
    pub start_line: usize,
    pub end_line: usize,
}

/// The pure-function output of the RenderPipeline collaborator (see
/// `fleet_tui::render`). Regenerated iff (render_width | content_version |
/// selected_block | timestamp_mode | relative_bucket) changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderedContent {
    pub version: u64,
    pub plain_lines: Vec<String>,
    pub ansi_text: String,
    pub block_spans: Vec<BlockSpan>,
}
