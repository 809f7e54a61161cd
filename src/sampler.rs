//! Path sampler: turns path operations into normalized keyframes
//!
//! The sampler walks every operation of every path in a run, drops points
//! that sit on the viewport border, thins the rest by accumulated path
//! distance, and rescales accepted points into clip space. When two
//! disjoint curves meet it pads the sequence with hold-frames around a
//! break marker so the runtime can hide the jump between them.

use serde::Serialize;

use crate::models::{Keyframes, Point};
use crate::path::{PathError, PathOp, PathParser};

/// Tunable sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerSettings {
    /// Viewport width in source units
    pub width: f64,
    /// Viewport height in source units
    pub height: f64,
    /// Points closer than this to any viewport edge are dropped
    pub edge: f64,
    /// Minimum accumulated path distance between accepted points
    pub spacing: f64,
    /// Amount subtracted from the width before halving it into the divisor
    pub scale_inset: f64,
    /// Negate the normalized x axis
    pub invert_x: bool,
    /// Negate the normalized y axis
    pub invert_y: bool,
    /// Insert hold-frames and break markers between disjoint curves
    pub breaks: bool,
    /// Hold-frames inserted on each side of a break
    pub break_margin: usize,
}

impl SamplerSettings {
    /// Settings for the oscilloscope mod script.
    pub fn oscilloscope() -> Self {
        Self {
            width: 14400.0,
            height: 10800.0,
            edge: 30.0,
            spacing: 0.0,
            scale_inset: 2000.0,
            invert_x: true,
            invert_y: false,
            breaks: true,
            break_margin: 4,
        }
    }

    /// Settings for plain animation clips.
    pub fn flat() -> Self {
        Self {
            edge: 50.0,
            spacing: 100.0,
            invert_y: true,
            breaks: false,
            ..Self::oscilloscope()
        }
    }

    /// Divisor mapping source units to clip units.
    pub fn divisor(&self) -> f64 {
        (self.width - self.scale_inset) / 2.0
    }

    /// Whether a source point lies within the edge margin.
    pub fn is_near_edge(&self, p: Point) -> bool {
        p.x < self.edge
            || p.y < self.edge
            || p.x > self.width - self.edge
            || p.y > self.height - self.edge
    }

    /// Rescale a source point into clip space, centered on the viewport.
    pub fn normalize(&self, p: Point) -> Point {
        let divisor = self.divisor();
        let sx = if self.invert_x { -1.0 } else { 1.0 };
        let sy = if self.invert_y { -1.0 } else { 1.0 };
        Point::new(
            sx * (p.x - self.width / 2.0) / divisor,
            sy * (p.y - self.height / 2.0) / divisor,
        )
    }
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self::oscilloscope()
    }
}

/// Counters describing what the sampler did with its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SamplerStats {
    /// Points considered
    pub candidates: usize,
    /// Points accepted as keyframes (hold-frames not included)
    pub accepted: usize,
    /// Points dropped for lying on the viewport border
    pub near_edge: usize,
    /// Points dropped for being too close to the previous keyframe
    pub too_close: usize,
    /// Curve breaks recorded
    pub breaks: usize,
}

/// Run-wide sampling state.
#[derive(Debug, Clone)]
pub struct Sampler {
    settings: SamplerSettings,
    previous: Point,
    distance: f64,
    new_curve: bool,
    keyframes: Keyframes,
    stats: SamplerStats,
}

impl Sampler {
    pub fn new(settings: SamplerSettings) -> Self {
        Self {
            settings,
            previous: Point::ORIGIN,
            distance: 0.0,
            new_curve: false,
            keyframes: Keyframes::new(),
            stats: SamplerStats::default(),
        }
    }

    pub fn settings(&self) -> &SamplerSettings {
        &self.settings
    }

    pub fn keyframes(&self) -> &Keyframes {
        &self.keyframes
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn into_keyframes(self) -> Keyframes {
        self.keyframes
    }

    /// Parse one `d` attribute and feed every operation.
    ///
    /// Returns the number of points accepted from this path.
    ///
    /// # Errors
    ///
    /// Returns the first `PathError` hit; operations before it have already
    /// been sampled.
    pub fn feed_path(&mut self, data: &str) -> Result<usize, PathError> {
        let before = self.stats.accepted;
        for op in PathParser::new(data) {
            self.feed(op?);
        }
        Ok(self.stats.accepted - before)
    }

    /// Feed a single path operation.
    pub fn feed(&mut self, op: PathOp) {
        match op {
            PathOp::MoveTo(p) => {
                self.distance = 0.0;
                self.previous = p;
                self.new_curve = true;
                self.consider(p);
            }
            PathOp::LineTo(p) => self.consider(p),
        }
    }

    fn consider(&mut self, current: Point) {
        self.stats.candidates += 1;

        if self.settings.is_near_edge(current) {
            // A clipped point splits the curve
            self.stats.near_edge += 1;
            self.new_curve = true;
            self.distance = 0.0;
        } else {
            self.distance += self.previous.distance(current);
            if self.distance >= self.settings.spacing {
                self.distance = 0.0;
                self.accept(self.settings.normalize(current));
            } else {
                self.stats.too_close += 1;
            }
        }

        self.previous = current;
    }

    fn accept(&mut self, point: Point) {
        if self.settings.breaks && self.new_curve {
            if let Some(last) = self.keyframes.last() {
                let margin = self.settings.break_margin;
                self.keyframes.hold(last, margin);
                self.keyframes.mark_break();
                self.keyframes.hold(point, margin);
                self.stats.breaks += 1;
            }
        }
        self.new_curve = false;
        self.keyframes.push(point);
        self.stats.accepted += 1;
    }
}
