//! Track Animator
//!
//! Keeps the active column pinned to the rightmost slot of the filmstrip and
//! decides whether a depth change snaps or slides. Slides are identified by a
//! monotonic generation: only the completion carrying the current generation
//! may commit the final offset and clear `sliding`.

use std::time::{Duration, Instant};

use super::types::TabId;
use crate::logic::layout::{track_geometry, track_offset, TrackGeometry};

/// One in-flight slide
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub generation: u64,
    pub from: i32,
    pub to: i32,
    pub started: Instant,
}

/// Decision taken by [`TrackAnimator::sync`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do
    Unchanged,
    /// Jumped straight to the target offset
    Snap,
    /// Slide started; completion must be reported with this generation
    Animate { generation: u64, duration: Duration },
}

#[derive(Clone, Debug)]
pub struct TrackAnimator {
    min_column_width: u16,
    max_visible_columns: usize,
    duration: Duration,
    reduce_motion: bool,

    viewport_width: u16,
    geometry: TrackGeometry,
    width_changed: bool,

    painted: bool,
    last_depth: Option<usize>,
    last_tab: Option<TabId>,

    rendered_offset: i32,
    target_offset: i32,
    slide: Option<Slide>,
    generation: u64,
}

impl TrackAnimator {
    pub fn new(min_column_width: u16, max_visible_columns: usize, duration: Duration, reduce_motion: bool) -> Self {
        Self {
            min_column_width,
            max_visible_columns,
            duration,
            reduce_motion,
            viewport_width: 0,
            geometry: track_geometry(0, min_column_width, max_visible_columns),
            width_changed: false,
            painted: false,
            last_depth: None,
            last_tab: None,
            rendered_offset: 0,
            target_offset: 0,
            slide: None,
            generation: 0,
        }
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    /// Offset written by the last [`sample`](Self::sample) or commit
    pub fn rendered_offset(&self) -> i32 {
        self.rendered_offset
    }

    pub fn offset_for(&self, depth: usize) -> i32 {
        track_offset(self.geometry.visible_columns, self.geometry.col_width, depth)
    }

    /// Recompute geometry for a new viewport width. Returns whether the column
    /// width changed, in which case the next sync snaps.
    pub fn resize(&mut self, viewport_width: u16) -> bool {
        if viewport_width == self.viewport_width {
            return false;
        }
        self.viewport_width = viewport_width;
        let geometry = track_geometry(viewport_width, self.min_column_width, self.max_visible_columns);
        let changed = geometry != self.geometry;
        self.geometry = geometry;
        if changed {
            self.width_changed = true;
        }
        changed
    }

    /// Bring the track in line with the active tab's depth
    pub fn sync(&mut self, depth: usize, tab: TabId, now: Instant) -> Transition {
        let target = self.offset_for(depth);
        let depth_changed = self.last_depth != Some(depth);
        let tab_changed = self.last_tab.is_some_and(|t| t != tab);

        let snap = !self.painted || !depth_changed || self.width_changed || self.reduce_motion || tab_changed;

        if !depth_changed && !tab_changed && !self.width_changed && self.painted && target == self.target_offset {
            return Transition::Unchanged;
        }

        self.painted = true;
        self.last_depth = Some(depth);
        self.last_tab = Some(tab);
        self.width_changed = false;
        self.target_offset = target;

        if snap {
            // A snap supersedes any slide still running
            self.generation += 1;
            self.slide = None;
            self.rendered_offset = target;
            return Transition::Snap;
        }

        self.generation += 1;
        self.slide = Some(Slide {
            generation: self.generation,
            from: self.rendered_offset,
            to: target,
            started: now,
        });
        Transition::Animate {
            generation: self.generation,
            duration: self.duration,
        }
    }

    /// Offset to draw at `now`; remembered as the last rendered offset
    pub fn sample(&mut self, now: Instant) -> i32 {
        if let Some(slide) = &self.slide {
            let elapsed = now.saturating_duration_since(slide.started);
            let t = if self.duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            };
            let eased = ease_out_cubic(t);
            let value = slide.from as f64 + (slide.to - slide.from) as f64 * eased;
            self.rendered_offset = value.round() as i32;
        }
        self.rendered_offset
    }

    /// Completion of a slide. Stale generations are ignored.
    pub fn finish(&mut self, generation: u64) -> bool {
        match &self.slide {
            Some(slide) if slide.generation == generation && generation == self.generation => {
                self.rendered_offset = slide.to;
                self.slide = None;
                true
            }
            _ => false,
        }
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
