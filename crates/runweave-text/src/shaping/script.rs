//! Script Itemization
//!
//! Splits a range of text into runs of one script and one orientation.
//! Boundaries only ever fall between extended grapheme clusters, so a
//! combining mark or variation selector stays with its base character.

use std::ops::Range;

use unicode_script::UnicodeScript;
use unicode_segmentation::UnicodeSegmentation;

pub use unicode_script::Script;

use super::orientation::{FontOrientation, RunOrientation};
use crate::buffer::TextBuffer;

/// A maximal range sharing one script and one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRun {
    /// Start offset (UTF-16, absolute)
    pub start: u32,
    /// End offset (exclusive)
    pub end: u32,
    /// Resolved script
    pub script: Script,
    /// Orientation the run is shaped in
    pub orientation: RunOrientation,
}

impl ScriptRun {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<u32> {
        self.start..self.end
    }
}

/// Script of a single character, with the catch-all values folded together
fn resolved_script(c: char) -> Option<Script> {
    match c.script() {
        Script::Common | Script::Inherited | Script::Unknown => None,
        script => Some(script),
    }
}

/// Stateless script and orientation segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSegmenter;

impl RunSegmenter {
    /// Segment `range` of `buffer` into script runs.
    ///
    /// Graphemes without a script of their own attach to the preceding
    /// resolved script; leading ones take the first script found. A range
    /// with no resolvable script at all uses `context_script`, or
    /// `Script::Common` when none is given.
    pub fn segment(
        buffer: &TextBuffer,
        range: Range<u32>,
        orientation: FontOrientation,
        context_script: Option<Script>,
    ) -> Vec<ScriptRun> {
        let end = range.end.min(buffer.len());
        let start = range.start.min(end);
        if start == end {
            return Vec::new();
        }

        let text = buffer.to_string_lossy(start..end);
        let mut graphemes = Vec::new();
        let mut offset = start;
        for grapheme in text.graphemes(true) {
            let len: u32 = grapheme.chars().map(|c| c.len_utf16() as u32).sum();
            let script = grapheme.chars().find_map(resolved_script);
            let run_orientation = grapheme
                .chars()
                .next()
                .map(|c| orientation.resolve(c))
                .unwrap_or_default();
            graphemes.push((offset, offset + len, script, run_orientation));
            offset += len;
        }

        let fallback = graphemes
            .iter()
            .find_map(|&(_, _, script, _)| script)
            .or(context_script)
            .unwrap_or(Script::Common);

        let mut runs: Vec<ScriptRun> = Vec::new();
        let mut current = fallback;
        for (grapheme_start, grapheme_end, script, run_orientation) in graphemes {
            if let Some(script) = script {
                current = script;
            }
            match runs.last_mut() {
                Some(run) if run.script == current && run.orientation == run_orientation => {
                    run.end = grapheme_end;
                }
                _ => runs.push(ScriptRun {
                    start: grapheme_start,
                    end: grapheme_end,
                    script: current,
                    orientation: run_orientation,
                }),
            }
        }

        tracing::trace!("Segmented {}..{} into {} runs", start, end, runs.len());
        runs
    }
}
