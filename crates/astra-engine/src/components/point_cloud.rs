use glam::Vec3;

/// Flat stride-3 position buffer for batched point rendering.
///
/// Every mutation path sets `dirty`. The frame engine clears it once the
/// renderer has seen the frame.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    positions: Vec<f32>,
    dirty: bool,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cloud with room for `points` points.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            positions: Vec::with_capacity(points * 3),
            dirty: true,
        }
    }

    /// Wrap an existing flat buffer. Returns `None` if its length is not a multiple of 3.
    pub fn from_flat(positions: Vec<f32>) -> Option<Self> {
        if positions.len() % 3 != 0 {
            return None;
        }
        Some(Self {
            positions,
            dirty: true,
        })
    }

    pub fn push(&mut self, point: Vec3) {
        self.positions.extend_from_slice(&[point.x, point.y, point.z]);
        self.dirty = true;
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Read a single point.
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Mutable `[x, y, z]` chunks. Marks the buffer dirty.
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.dirty = true;
        self.positions.chunks_exact_mut(3)
    }

    /// The raw flat buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    /// Raw pointer for zero-copy reads from WASM memory.
    pub fn as_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
