//! Stage list construction from render options.

use crate::models::{ItemStatus, RenderOptions};

/// Build the ordered stage list the given options enable.
///
/// Percentage buckets map linearly onto this list, so a stage that
/// appears twice (MP4 and GIF both encode) gets twice the progress
/// span. Queued is the resting state before the first tick and never
/// maps to a progress bucket. Copying and Done are unconditional, so
/// the result always has at least two entries.
pub fn stages_for_options(options: &RenderOptions) -> Vec<ItemStatus> {
    let gates = [
        (false, ItemStatus::Queued),
        (options.module.is_some(), ItemStatus::Rendering),
        (options.mp4, ItemStatus::Encoding),
        (options.gif, ItemStatus::Encoding),
        (true, ItemStatus::Copying),
        (options.sg, ItemStatus::Uploading),
        (true, ItemStatus::Done),
    ];
    gates
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, stage)| *stage)
        .collect()
}
