//! Time-varying volumetric fields.
//!
//! A field is built in two stages:
//!
//! - [`GridBuilder`] accumulates `(time, position, value)` samples in arrival
//!   order.
//! - [`GridBuilder::build`] consumes the builder into an immutable
//!   [`TimeVaryingGrid`], queryable by time and 3D position.
//!
//! Consuming the builder by move makes feeding an already-finalized builder a
//! compile error rather than a runtime hazard.

use std::cmp::Ordering;

/// A 3-component position in the field's coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a position from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Mutable, single-use accumulator of `(time, position, value)` samples.
#[derive(Debug, Clone)]
pub struct GridBuilder<T, V> {
    samples: Vec<(T, Vec3, V)>,
}

impl<T, V> Default for GridBuilder<T, V> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
        }
    }
}

impl<T, V> GridBuilder<T, V> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Append one sample.
    ///
    /// Arrival order is preserved and breaks ties among samples that share a
    /// timestamp.
    pub fn add_point(&mut self, time: T, position: Vec3, value: V) {
        self.samples.push((time, position, value));
    }

    /// Finalize into an immutable [`TimeVaryingGrid`], consuming the builder.
    ///
    /// Samples are stable-sorted by time (ties keep arrival order) and grouped
    /// into one session per distinct timestamp. Times that do not compare
    /// (e.g. NaN) are left in arrival order.
    pub fn build(mut self) -> TimeVaryingGrid<T, V>
    where
        T: PartialOrd,
    {
        self.samples
            .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut sessions: Vec<Session<T, V>> = Vec::new();
        for (time, position, value) in self.samples {
            if let Some(last) = sessions.last_mut() {
                if last.time == time {
                    last.points.push((position, value));
                    continue;
                }
            }
            sessions.push(Session {
                time,
                points: vec![(position, value)],
            });
        }

        TimeVaryingGrid { sessions }
    }
}

/// One timestamp's worth of spatial samples.
#[derive(Debug, Clone, PartialEq)]
struct Session<T, V> {
    time: T,
    points: Vec<(Vec3, V)>,
}

impl<T, V> Session<T, V> {
    fn nearest(&self, position: Vec3) -> Option<&V> {
        let mut best: Option<(f64, &V)> = None;
        for (p, v) in &self.points {
            let d = p.distance_squared(position);
            match best {
                Some((best_d, _)) if best_d <= d => {}
                _ => best = Some((d, v)),
            }
        }
        best.map(|(_, v)| v)
    }
}

/// An immutable field of `V` samples laid out over 3D space and time.
///
/// Samples are grouped into sessions of identical timestamp, ascending in
/// time. A query resolves to the last session at or before the queried time,
/// then to the nearest sample within that session (earliest arrival wins
/// exact ties).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVaryingGrid<T, V> {
    sessions: Vec<Session<T, V>>,
}

impl<T, V> Default for TimeVaryingGrid<T, V> {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }
}

impl<T, V> TimeVaryingGrid<T, V> {
    /// Returns `true` if the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of distinct timestamps.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Total number of samples across all sessions.
    pub fn sample_count(&self) -> usize {
        self.sessions.iter().map(|s| s.points.len()).sum()
    }

    /// Iterate the distinct timestamps in ascending order.
    pub fn session_times(&self) -> impl Iterator<Item = &T> {
        self.sessions.iter().map(|s| &s.time)
    }

    /// Iterate all `(time, position, value)` samples, grouped by session.
    pub fn samples(&self) -> impl Iterator<Item = (&T, Vec3, &V)> {
        self.sessions
            .iter()
            .flat_map(|s| s.points.iter().map(move |(p, v)| (&s.time, *p, v)))
    }

    /// Earliest and latest timestamps, or `None` for an empty grid.
    pub fn time_bounds(&self) -> Option<(&T, &T)> {
        Some((&self.sessions.first()?.time, &self.sessions.last()?.time))
    }

    /// Axis-aligned bounding box of all sample positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self
            .sessions
            .iter()
            .flat_map(|s| s.points.iter().map(|(p, _)| *p));
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }
}

impl<T: PartialOrd, V> TimeVaryingGrid<T, V> {
    /// Look up the sample value for `(time, position)`.
    ///
    /// Returns `None` if the grid is empty or `time` precedes the first
    /// session. Queries between sessions resolve to the most recent session
    /// (step semantics), not an interpolation.
    pub fn value_at(&self, time: &T, position: Vec3) -> Option<&V> {
        self.session_at_or_before(time)?.nearest(position)
    }

    fn session_at_or_before(&self, time: &T) -> Option<&Session<T, V>> {
        let idx = self.sessions.partition_point(|s| s.time <= *time);
        if idx == 0 {
            None
        } else {
            Some(&self.sessions[idx - 1])
        }
    }
}
