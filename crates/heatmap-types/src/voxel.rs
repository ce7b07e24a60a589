//! Voxel coordinate and populated-voxel types.

use nalgebra::{Point3, Vector3};

use crate::error::{SelectionError, SelectionResult};

/// A discrete 3D coordinate in voxel/grid space.
///
/// Uses `i32` coordinates to support both positive and negative indices,
/// allowing the grid origin to be placed anywhere in world space. The
/// coordinate is `Eq + Hash` and serves directly as a voxel's unique key;
/// [`VoxelCoord::key`] provides the canonical `"x,y,z"` string form for
/// interop with callers that address voxels by string.
///
/// # Example
///
/// ```
/// use heatmap_types::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.key(), "1,2,3");
///
/// // Supports negative coordinates
/// let neg = VoxelCoord::new(-5, -10, -15);
/// assert_eq!(neg.key(), "-5,-10,-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (width axis).
    pub x: i32,
    /// Y coordinate (depth axis).
    pub y: i32,
    /// Z coordinate (height axis).
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::VoxelCoord;
    ///
    /// let coord = VoxelCoord::new(10, 20, 30);
    /// assert_eq!(coord.x, 10);
    /// ```
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the canonical string key `"x,y,z"` for this coordinate.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::VoxelCoord;
    ///
    /// assert_eq!(VoxelCoord::new(3, 4, 0).key(), "3,4,0");
    /// ```
    #[must_use]
    pub fn key(self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }

    /// Parses a canonical `"x,y,z"` key back into a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidKey`] when the string is not three
    /// comma-separated integers.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::VoxelCoord;
    ///
    /// let coord = VoxelCoord::parse_key("3,4,0").unwrap();
    /// assert_eq!(coord, VoxelCoord::new(3, 4, 0));
    ///
    /// assert!(VoxelCoord::parse_key("3,4").is_err());
    /// assert!(VoxelCoord::parse_key("a,b,c").is_err());
    /// ```
    pub fn parse_key(key: &str) -> SelectionResult<Self> {
        let mut parts = key.split(',');
        let invalid = || SelectionError::InvalidKey(key.to_owned());
        let x = parts.next().ok_or_else(invalid)?;
        let y = parts.next().ok_or_else(invalid)?;
        let z = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(
            x.trim().parse().map_err(|_| invalid())?,
            y.trim().parse().map_err(|_| invalid())?,
            z.trim().parse().map_err(|_| invalid())?,
        ))
    }

    /// Returns the coordinate as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to a floating-point point.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let coord = VoxelCoord::new(1, 2, 3);
    /// assert_eq!(coord.to_point(), Point3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Converts to a floating-point vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for (i32, i32, i32) {
    fn from(coord: VoxelCoord) -> Self {
        coord.as_tuple()
    }
}

impl From<VoxelCoord> for [i32; 3] {
    fn from(coord: VoxelCoord) -> Self {
        coord.as_array()
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// A populated cell of the 3D occupancy grid.
///
/// Carries the cell's grid coordinate and the number of source points
/// binned into it. Only non-empty voxels are selection candidates, so a
/// well-formed `count` is finite and positive; the selection engine
/// treats non-finite counts as a data anomaly (see `heatmap-select`).
///
/// Voxels are small value objects owned by the caller; selection only
/// reads them.
///
/// # Example
///
/// ```
/// use heatmap_types::{Voxel, VoxelCoord};
///
/// let voxel = Voxel::new(VoxelCoord::new(2, 5, 1), 42.0);
/// assert_eq!(voxel.count, 42.0);
/// assert_eq!(voxel.coord.key(), "2,5,1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voxel {
    /// The cell's grid coordinate, which doubles as its unique key.
    pub coord: VoxelCoord,
    /// Number of source points binned into this cell.
    pub count: f64,
}

impl Voxel {
    /// Creates a new populated voxel.
    #[must_use]
    pub const fn new(coord: VoxelCoord, count: f64) -> Self {
        Self { coord, count }
    }

    /// Returns the canonical string key of this voxel's coordinate.
    #[must_use]
    pub fn key(&self) -> String {
        self.coord.key()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let coord = VoxelCoord::new(1, 2, 3);
        assert_eq!(coord.x, 1);
        assert_eq!(coord.y, 2);
        assert_eq!(coord.z, 3);
    }

    #[test]
    fn test_origin() {
        assert_eq!(VoxelCoord::origin(), VoxelCoord::new(0, 0, 0));
    }

    #[test]
    fn test_key_round_trip() {
        let coord = VoxelCoord::new(-3, 0, 17);
        assert_eq!(VoxelCoord::parse_key(&coord.key()).unwrap(), coord);
    }

    #[test]
    fn test_parse_key_rejects_malformed() {
        assert!(VoxelCoord::parse_key("").is_err());
        assert!(VoxelCoord::parse_key("1,2").is_err());
        assert!(VoxelCoord::parse_key("1,2,3,4").is_err());
        assert!(VoxelCoord::parse_key("1,two,3").is_err());
        assert!(VoxelCoord::parse_key("1.5,2,3").is_err());
    }

    #[test]
    fn test_parse_key_tolerates_whitespace() {
        assert_eq!(
            VoxelCoord::parse_key(" 1, 2, 3").unwrap(),
            VoxelCoord::new(1, 2, 3)
        );
    }

    #[test]
    fn test_as_tuple_and_array() {
        let coord = VoxelCoord::new(1, 2, 3);
        assert_eq!(coord.as_tuple(), (1, 2, 3));
        assert_eq!(coord.as_array(), [1, 2, 3]);
    }

    #[test]
    fn test_to_point() {
        let point = VoxelCoord::new(1, 2, 3).to_point();
        assert_eq!(point.x, 1.0);
        assert_eq!(point.y, 2.0);
        assert_eq!(point.z, 3.0);
    }

    #[test]
    fn test_to_vector() {
        let vec = VoxelCoord::new(1, 2, 3).to_vector();
        assert_eq!(vec.x, 1.0);
        assert_eq!(vec.y, 2.0);
        assert_eq!(vec.z, 3.0);
    }

    #[test]
    fn test_from_tuple_and_array() {
        let a: VoxelCoord = (1, 2, 3).into();
        let b: VoxelCoord = [1, 2, 3].into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_into_tuple_and_array() {
        let coord = VoxelCoord::new(1, 2, 3);
        let tuple: (i32, i32, i32) = coord.into();
        let array: [i32; 3] = coord.into();
        assert_eq!(tuple, (1, 2, 3));
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn test_display_matches_key() {
        let coord = VoxelCoord::new(-1, 0, 9);
        assert_eq!(format!("{coord}"), coord.key());
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(VoxelCoord::new(1, 2, 3));
        set.insert(VoxelCoord::new(1, 2, 3)); // Duplicate
        set.insert(VoxelCoord::new(4, 5, 6));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_voxel_new() {
        let voxel = Voxel::new(VoxelCoord::new(1, 2, 3), 7.0);
        assert_eq!(voxel.count, 7.0);
        assert_eq!(voxel.key(), "1,2,3");
    }
}
