//! Error types for voxel selection.

use crate::voxel::VoxelCoord;

/// Errors that can occur during voxel selection.
///
/// These indicate a caller bug rather than a runtime data condition: the
/// strict density layer fails loudly on them, while the coverage layer
/// clamps and continues at the data boundary (see the `heatmap-select`
/// crate for the split).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SelectionError {
    /// A candidate voxel carries a NaN or infinite occupancy count.
    #[error("voxel {coord} has non-finite count {count}")]
    NonFiniteCount {
        /// Coordinate of the offending voxel.
        coord: VoxelCoord,
        /// The non-finite count.
        count: f64,
    },

    /// A string voxel key is not of the canonical `"x,y,z"` form.
    #[error("invalid voxel key {0:?}, expected \"x,y,z\"")]
    InvalidKey(String),
}

/// Result type for selection operations.
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectionError::NonFiniteCount {
            coord: VoxelCoord::new(1, 2, 3),
            count: f64::NAN,
        };
        let msg = format!("{err}");
        assert!(msg.contains("1,2,3"));
        assert!(msg.contains("NaN"));

        let err = SelectionError::InvalidKey("bogus".to_owned());
        assert!(format!("{err}").contains("bogus"));
    }
}
