//! Range composition
//!
//! Copies the glyphs of a character range out of one result and appends
//! them to another, never cutting a cluster.

use super::{GlyphData, GlyphRun, ShapeResult};

impl ShapeResult {
    /// Cluster boundaries in ascending order, end index included
    fn cluster_boundaries(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs
            .iter()
            .flat_map(|run| run.clusters().map(move |c| run.start_index() + c.start))
            .chain(std::iter::once(self.end_index_for_result()))
    }

    fn cluster_boundary_at_or_before(&self, offset: u32) -> u32 {
        self.cluster_boundaries()
            .take_while(|&b| b <= offset)
            .last()
            .unwrap_or(self.start_index)
    }

    fn cluster_boundary_at_or_after(&self, offset: u32) -> u32 {
        self.cluster_boundaries()
            .find(|&b| b >= offset)
            .unwrap_or_else(|| self.end_index_for_result())
    }

    /// Append the glyphs covering `[start, end)` to `target`.
    ///
    /// The range is widened to whole clusters. Characters `target` already
    /// covers are skipped, and a gap between `target`'s end and the copied
    /// range is closed by moving the copied runs back onto that end.
    pub fn copy_range(&self, start: u32, end: u32, target: &mut ShapeResult) {
        let end = end.clamp(self.start_index, self.end_index_for_result());
        let start = start.clamp(self.start_index, end);
        if start == end {
            return;
        }

        let mut from = self.cluster_boundary_at_or_before(start);
        let to = self.cluster_boundary_at_or_after(end);
        if from != start || to != end {
            tracing::debug!("Widened copy {}..{} to clusters {}..{}", start, end, from, to);
        }

        if target.direction != self.direction {
            if target.is_empty() {
                target.direction = self.direction;
            } else {
                tracing::warn!(
                    "Copying {:?} glyphs into a {:?} result",
                    self.direction,
                    target.direction
                );
                debug_assert!(false, "direction mismatch in copy_range");
            }
        }

        let shift = if target.is_empty() {
            target.start_index = from;
            0
        } else {
            let target_start = target.start_index_for_result();
            let target_end = target.end_index_for_result();
            if to <= target_start {
                tracing::debug!(
                    "Copy {}..{} precedes target {}..{}, appending at {}",
                    from,
                    to,
                    target_start,
                    target_end,
                    target_end
                );
            } else if from < target_end {
                if from < target_start {
                    tracing::warn!(
                        "Copy {}..{} straddles the start of target {}..{}, dropping {}..{}",
                        from,
                        to,
                        target_start,
                        target_end,
                        from,
                        target_start
                    );
                }
                from = self.cluster_boundary_at_or_after(target_end);
                if from >= to {
                    return;
                }
            }
            target_end as i64 - from as i64
        };

        for run in &self.runs {
            let sub_start = run.start_index().max(from);
            let sub_end = run.end_index().min(to);
            if sub_start >= sub_end {
                continue;
            }
            let rel_start = sub_start - run.start_index();
            let rel_end = sub_end - run.start_index();
            let glyphs: Vec<GlyphData> = run
                .glyphs()
                .iter()
                .filter(|g| g.character_index >= rel_start && g.character_index < rel_end)
                .map(|g| GlyphData {
                    character_index: g.character_index - rel_start,
                    ..*g
                })
                .collect();

            target.push_run(GlyphRun::new(
                (sub_start as i64 + shift) as u32,
                sub_end - sub_start,
                run.script(),
                run.orientation(),
                run.direction(),
                glyphs,
            ));
        }
        target.recompute_bounds();
    }

    /// New result holding the glyphs of `[start, end)`
    pub fn sub_range(&self, start: u32, end: u32) -> ShapeResult {
        let anchor = start.clamp(self.start_index, self.end_index_for_result());
        let mut result = ShapeResult::new(self.direction, anchor);
        self.copy_range(start, end, &mut result);
        result
    }
}
