//! Caches the wrapped/rendered form of a transcript keyed on everything that
//! can change its appearance: width + content, so unicode text isn't
//! re-wrapped on every frame when nothing relevant has changed.

use fleet_protocol::RenderedContent;
use fleet_protocol::TimestampMode;

use crate::sidebar::RowKey;
use crate::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub render_width: u16,
    pub content_version: u64,
    pub selected_block: Option<usize>,
    pub timestamp_mode: TimestampMode,
    pub relative_bucket_id: u32,
}

#[derive(Debug, Default)]
pub struct RenderPipeline {
    cached_key: Option<CacheKey>,
    cached_content: RenderedContent,
}

impl RenderPipeline {
    /// Returns the rendered content for `key`, recomputing from `transcript`
    /// only if `key` differs from the last one served.
    pub fn render(&mut self, key: CacheKey, transcript: &Transcript) -> &RenderedContent {
        if self.cached_key.as_ref() != Some(&key) {
            self.cached_content = wrap(transcript, key.render_width, key.selected_block);
            self.cached_key = Some(key);
        }
        &self.cached_content
    }

    pub fn invalidate(&mut self) {
        self.cached_key = None;
    }
}

fn wrap(transcript: &Transcript, width: u16, selected_block: Option<usize>) -> RenderedContent {
    let wrap_width = width.max(1) as usize;
    let mut plain_lines = Vec::new();
    let mut block_spans = Vec::new();
    for (index, block) in transcript.blocks.iter().enumerate() {
        let start_line = plain_lines.len();
        for wrapped in textwrap::wrap(&block.text, wrap_width) {
            plain_lines.push(wrapped.into_owned());
        }
        if plain_lines.len() == start_line {
            plain_lines.push(String::new());
        }
        let end_line = plain_lines.len();
        block_spans.push(fleet_protocol::BlockSpan { block_index: index, role: block.role, start_line, end_line });
        let _ = selected_block;
    }
    RenderedContent { version: transcript.content_version, plain_lines, ansi_text: String::new(), block_spans }
}

/// Buckets "how long ago" into a coarse id so relative timestamps (e.g.
/// "2m ago") only force a re-render a few times a minute rather than once a
/// render pass, per the cache key's `relative_bucket_id` field.
pub fn relative_bucket(now: chrono::DateTime<chrono::Utc>, timestamp: Option<chrono::DateTime<chrono::Utc>>) -> u32 {
    let Some(timestamp) = timestamp else { return 0 };
    let seconds = (now - timestamp).num_seconds().max(0);
    match seconds {
        0..=59 => 0,
        60..=3599 => 1 + (seconds / 60) as u32,
        _ => 1000 + (seconds / 3600) as u32,
    }
}

pub fn cursor_row_key_fallback() -> Option<RowKey> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_protocol::ChatBlockRole;

    #[test]
    fn render_reuses_cache_when_key_unchanged() {
        let mut transcript = Transcript::default();
        transcript.push_delta_line(ChatBlockRole::Agent, "hello world".into());
        let mut pipeline = RenderPipeline::default();
        let key = CacheKey { render_width: 80, content_version: transcript.content_version, selected_block: None, timestamp_mode: TimestampMode::None, relative_bucket_id: 0 };
        let first = pipeline.render(key.clone(), &transcript).plain_lines.clone();
        transcript.blocks[0].text = "mutated but version not bumped".into();
        let second = pipeline.render(key, &transcript).plain_lines.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn render_recomputes_when_content_version_changes() {
        let mut transcript = Transcript::default();
        transcript.push_delta_line(ChatBlockRole::Agent, "hello".into());
        let mut pipeline = RenderPipeline::default();
        let key1 = CacheKey { render_width: 80, content_version: transcript.content_version, selected_block: None, timestamp_mode: TimestampMode::None, relative_bucket_id: 0 };
        pipeline.render(key1, &transcript);
        transcript.push_delta_line(ChatBlockRole::Agent, "world".into());
        let key2 = CacheKey { render_width: 80, content_version: transcript.content_version, selected_block: None, timestamp_mode: TimestampMode::None, relative_bucket_id: 0 };
        let rendered = pipeline.render(key2, &transcript);
        assert_eq!(rendered.block_spans.len(), 2);
    }
}
