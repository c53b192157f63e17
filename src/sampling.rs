//! Parallel read-side sampling of time-varying grids.
//!
//! This module sits "above" [`crate::grid`] and provides:
//!
//! - Parallel (chunked) evaluation of many point queries at one time
//! - Regular [`Lattice`] sweeps for rasterizing a field into a volume
//!
//! Results always come back in query order, regardless of how the work was
//! split across threads.

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::grid::{TimeVaryingGrid, Vec3};

/// Configuration for the [`GridSampler`].
#[derive(Debug, Clone)]
pub struct SamplerOptions {
    /// Number of worker threads used by the sampler.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of queries per chunk.
    pub chunk_size: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            num_threads: Some(n),
            chunk_size: 1_024,
        }
    }
}

/// A configurable parallel sampler for [`TimeVaryingGrid`]s.
pub struct GridSampler {
    pool: ThreadPool,
    opts: SamplerOptions,
}

impl GridSampler {
    /// Create a new sampler with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size == 0` or `num_threads == Some(0)`.
    pub fn new(opts: SamplerOptions) -> Self {
        assert!(opts.chunk_size > 0, "chunk_size must be > 0");
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .expect("failed to build rayon thread pool");

        Self { pool, opts }
    }

    /// Sample the grid at many positions for one query time.
    ///
    /// The output has one entry per input position, in input order; positions
    /// the grid cannot answer (before its first session, or an empty grid)
    /// come back as `None`.
    pub fn sample_points<T, V>(
        &self,
        grid: &TimeVaryingGrid<T, V>,
        time: &T,
        positions: &[Vec3],
    ) -> Vec<Option<V>>
    where
        T: PartialOrd + Sync,
        V: Clone + Send + Sync,
    {
        self.pool.install(|| {
            let per_chunk: Vec<Vec<Option<V>>> =
                chunk_ranges(positions.len(), self.opts.chunk_size)
                    .into_par_iter()
                    .map(|range| {
                        positions[range]
                            .iter()
                            .map(|&position| grid.value_at(time, position).cloned())
                            .collect()
                    })
                    .collect();

            per_chunk.into_iter().flatten().collect()
        })
    }

    /// Sample the grid over a regular lattice for one query time.
    ///
    /// Equivalent to [`Self::sample_points`] over every lattice position in
    /// [`Lattice::position_at`] order.
    pub fn sample_lattice<T, V>(
        &self,
        grid: &TimeVaryingGrid<T, V>,
        time: &T,
        lattice: &Lattice,
    ) -> Vec<Option<V>>
    where
        T: PartialOrd + Sync,
        V: Clone + Send + Sync,
    {
        self.pool.install(|| {
            let per_chunk: Vec<Vec<Option<V>>> = chunk_ranges(lattice.len(), self.opts.chunk_size)
                .into_par_iter()
                .map(|range| {
                    range
                        .map(|index| grid.value_at(time, lattice.position_at(index)).cloned())
                        .collect()
                })
                .collect();

            per_chunk.into_iter().flatten().collect()
        })
    }
}

/// A regular axis-aligned grid of sample positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    /// Corner with the smallest coordinates.
    pub min: Vec3,
    /// Corner with the largest coordinates.
    pub max: Vec3,
    /// Number of sample positions along each axis.
    pub resolution: [usize; 3],
}

impl Lattice {
    /// Create a lattice spanning `min..=max` with the given per-axis counts.
    pub fn new(min: Vec3, max: Vec3, resolution: [usize; 3]) -> Self {
        Self {
            min,
            max,
            resolution,
        }
    }

    /// Total number of sample positions.
    pub fn len(&self) -> usize {
        self.resolution[0] * self.resolution[1] * self.resolution[2]
    }

    /// Whether the lattice has no sample positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The position of sample `index`, with x varying fastest, then y, then z.
    ///
    /// An axis with a single sample position sits at `min`; `index` must be
    /// below [`Self::len`].
    pub fn position_at(&self, index: usize) -> Vec3 {
        let [nx, ny, _] = self.resolution;
        let ix = index % nx;
        let iy = (index / nx) % ny;
        let iz = index / (nx * ny);
        Vec3::new(
            axis_value(self.min.x, self.max.x, nx, ix),
            axis_value(self.min.y, self.max.y, ny, iy),
            axis_value(self.min.z, self.max.z, self.resolution[2], iz),
        )
    }
}

fn axis_value(min: f64, max: f64, count: usize, index: usize) -> f64 {
    if count <= 1 {
        min
    } else {
        min + (max - min) * (index as f64) / ((count - 1) as f64)
    }
}

fn chunk_ranges(count: usize, chunk_size: usize) -> Vec<std::ops::Range<usize>> {
    if count == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity((count + chunk_size - 1) / chunk_size);
    let mut start = 0usize;
    while start < count {
        let end = (start + chunk_size).min(count);
        out.push(start..end);
        start = end;
    }
    out
}
