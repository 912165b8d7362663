//! Shape of the Keccak-f state and the helpers to move between its slice and lane views.
//!
//! The state is a 5x5xL bit cube. Coordinates follow the Keccak reference:
//! - x: 0..4, position inside a row
//! - y: 0..4, row inside a slice
//! - z: 0..L-1, slice inside the state, or bit inside a lane
//!
//! A slice stores bit (x, y) at position `x + 5 * y`, so row `y` occupies bits `[5y, 5y + 5)`.
//! A lane-oriented state stores lane (x, y) at index `x + 5 * y`, bit `z` of the lane being
//! the bit of slice `z`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ParityError, PACKED_SLOTS};

/// 5 bits along x at a fixed (y, z). Only the low 5 bits are meaningful.
pub type RowValue = u8;

/// 25 bits of the (x, y) cross-section at a fixed z.
pub type SliceValue = u32;

/// Up to 64 bits along z at a fixed (x, y), bounded by the lane size.
pub type LaneValue = u64;

pub const ROW_SIZE: usize = 5;
pub const COLUMN_SIZE: usize = 5;
pub const SLICE_SIZE: usize = ROW_SIZE * COLUMN_SIZE;
pub const MAX_LANE_SIZE: usize = 64;

pub const ROW_MASK: RowValue = 0x1F;
pub const SLICE_MASK: SliceValue = (1 << SLICE_SIZE) - 1;

/// Width of a lane, i.e. the number of slices of the state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum LaneSize {
    L1 = 1,
    L2 = 2,
    L4 = 4,
    L8 = 8,
    L16 = 16,
    L32 = 32,
    #[default]
    L64 = 64,
}

impl LaneSize {
    pub const ALL: [LaneSize; 7] = [
        LaneSize::L1,
        LaneSize::L2,
        LaneSize::L4,
        LaneSize::L8,
        LaneSize::L16,
        LaneSize::L32,
        LaneSize::L64,
    ];

    #[inline]
    pub const fn bits(self) -> usize {
        self as usize
    }

    /// Mask with the low `bits()` bits set.
    #[inline]
    pub const fn mask(self) -> LaneValue {
        match self {
            LaneSize::L64 => LaneValue::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }

    /// Whether a parity of this many slices fits in a `PackedParity`.
    #[inline]
    pub const fn is_packable(self) -> bool {
        self.bits() <= PACKED_SLOTS
    }

    pub fn all() -> impl Iterator<Item = LaneSize> {
        Self::ALL.into_iter()
    }
}

/// Lane size matching the length of a per-slice sequence.
impl TryFrom<usize> for LaneSize {
    type Error = ParityError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LaneSize::L1),
            2 => Ok(LaneSize::L2),
            4 => Ok(LaneSize::L4),
            8 => Ok(LaneSize::L8),
            16 => Ok(LaneSize::L16),
            32 => Ok(LaneSize::L32),
            64 => Ok(LaneSize::L64),
            _ => Err(ParityError::InvalidLaneSize(value)),
        }
    }
}

impl TryFrom<u32> for LaneSize {
    type Error = ParityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_from(value as usize)
    }
}

impl From<LaneSize> for u32 {
    fn from(lane_size: LaneSize) -> Self {
        lane_size as u32
    }
}

impl fmt::Display for LaneSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Slice value with only bit (x, y) set.
#[inline]
pub const fn slice_point(x: usize, y: usize) -> SliceValue {
    debug_assert!(x < ROW_SIZE && y < COLUMN_SIZE);
    1 << (x + ROW_SIZE * y)
}

/// Index of lane (x, y) in a lane-oriented state.
#[inline]
pub const fn lane_index(x: usize, y: usize) -> usize {
    debug_assert!(x < ROW_SIZE && y < COLUMN_SIZE);
    x + ROW_SIZE * y
}

#[inline]
pub const fn row_from_slice(slice: SliceValue, y: usize) -> RowValue {
    debug_assert!(y < COLUMN_SIZE);
    ((slice >> (ROW_SIZE * y)) as RowValue) & ROW_MASK
}

#[inline]
pub const fn slice_from_row(row: RowValue, y: usize) -> SliceValue {
    debug_assert!(y < COLUMN_SIZE);
    debug_assert!(row <= ROW_MASK);
    (row as SliceValue) << (ROW_SIZE * y)
}

/// Cyclic shift of a row along x: bit x moves to (x + dx) mod 5.
#[inline]
pub const fn translate_row(row: RowValue, dx: usize) -> RowValue {
    debug_assert!(row <= ROW_MASK);
    let dx = dx % ROW_SIZE;
    if dx == 0 {
        return row;
    }
    ((row << dx) | (row >> (ROW_SIZE - dx))) & ROW_MASK
}

/// Converts a lane-oriented state into `lane_size` slices.
///
/// Bits of the lanes at or above `lane_size` are not part of the state and are ignored.
pub fn lanes_to_slices(lanes: &[LaneValue; SLICE_SIZE], lane_size: LaneSize) -> Vec<SliceValue> {
    let mut slices = vec![0; lane_size.bits()];
    for (z, slice) in slices.iter_mut().enumerate() {
        for (i, &lane) in lanes.iter().enumerate() {
            *slice |= (((lane >> z) & 1) as SliceValue) << i;
        }
    }
    slices
}

/// Converts a slice-oriented state into 25 lanes. The number of slices is the lane size.
pub fn slices_to_lanes(slices: &[SliceValue]) -> Result<[LaneValue; SLICE_SIZE], ParityError> {
    LaneSize::try_from(slices.len())?;

    let mut lanes = [0; SLICE_SIZE];
    for (z, &slice) in slices.iter().enumerate() {
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane |= (((slice >> i) & 1) as LaneValue) << z;
        }
    }
    Ok(lanes)
}
