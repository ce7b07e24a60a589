//! Grid extent for the 3D voxel index space.

/// The extent of the 3D voxel index space in each axis.
///
/// Used for normalizing X/Y coordinates into the coverage strategy's bin
/// space. Callers at a data boundary can legitimately hold a malformed or
/// empty grid, so zero dimensions are tolerated: the `clamped_*` accessors
/// floor every axis at 1 rather than erroring.
///
/// # Example
///
/// ```
/// use heatmap_types::GridDims;
///
/// let grid = GridDims::new(64, 32, 16);
/// assert_eq!(grid.clamped_x(), 64);
///
/// // Degenerate grids clamp instead of failing
/// let empty = GridDims::new(0, 0, 0);
/// assert!(empty.is_degenerate());
/// assert_eq!(empty.clamped_x(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    /// Number of voxels along the X axis.
    pub num_voxels_x: u32,
    /// Number of voxels along the Y axis.
    pub num_voxels_y: u32,
    /// Number of voxels along the Z axis.
    pub num_voxels_z: u32,
}

impl GridDims {
    /// Creates a new grid extent.
    #[must_use]
    pub const fn new(num_voxels_x: u32, num_voxels_y: u32, num_voxels_z: u32) -> Self {
        Self {
            num_voxels_x,
            num_voxels_y,
            num_voxels_z,
        }
    }

    /// X extent clamped to at least 1.
    #[must_use]
    pub const fn clamped_x(self) -> u32 {
        if self.num_voxels_x == 0 {
            1
        } else {
            self.num_voxels_x
        }
    }

    /// Y extent clamped to at least 1.
    #[must_use]
    pub const fn clamped_y(self) -> u32 {
        if self.num_voxels_y == 0 {
            1
        } else {
            self.num_voxels_y
        }
    }

    /// Z extent clamped to at least 1.
    #[must_use]
    pub const fn clamped_z(self) -> u32 {
        if self.num_voxels_z == 0 {
            1
        } else {
            self.num_voxels_z
        }
    }

    /// Returns `true` when any axis has zero extent.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.num_voxels_x == 0 || self.num_voxels_y == 0 || self.num_voxels_z == 0
    }

    /// Total number of cells in the index space, using clamped extents.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::GridDims;
    ///
    /// assert_eq!(GridDims::new(4, 4, 2).cell_count(), 32);
    /// assert_eq!(GridDims::new(0, 0, 0).cell_count(), 1);
    /// ```
    #[must_use]
    pub const fn cell_count(self) -> u64 {
        self.clamped_x() as u64 * self.clamped_y() as u64 * self.clamped_z() as u64
    }
}
