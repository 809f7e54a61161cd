//! Data models for sampled keyframes (points, keyframe sequences, curve breaks)

use serde::Serialize;

/// A 2D point, either in SVG source space or normalized clip space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by a relative delta.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Straight-line distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An append-only sequence of keyframes plus the indices where disjoint
/// curves meet.
///
/// The index of a keyframe doubles as its playback time: keyframe `i` plays
/// at `i / sample_rate` seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keyframes {
    points: Vec<Point>,
    breaks: Vec<usize>,
}

impl Keyframes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one keyframe.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Append `count` copies of `point`.
    pub fn hold(&mut self, point: Point, count: usize) {
        self.points.extend(std::iter::repeat(point).take(count));
    }

    /// Record a curve break at the current end of the sequence.
    pub fn mark_break(&mut self) {
        self.breaks.push(self.points.len());
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Break marker indices, in increasing order.
    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Playback time in seconds of the keyframe at `index`.
    pub fn time_at(index: usize, sample_rate: u32) -> f64 {
        index as f64 / f64::from(sample_rate)
    }

    /// Total clip duration in seconds.
    pub fn duration(&self, sample_rate: u32) -> f64 {
        Self::time_at(self.points.len(), sample_rate)
    }
}
