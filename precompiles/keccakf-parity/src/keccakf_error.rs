use thiserror::Error;

use crate::LaneSize;

#[derive(Debug, Error)]
pub enum ParityError {
    #[error("Invalid lane size {0}, expected one of 1, 2, 4, 8, 16, 32 or 64")]
    InvalidLaneSize(usize),
    #[error("Lane size {0} does not fit in a packed parity (at most 8 slices)")]
    LaneSizeNotPackable(LaneSize),
    #[error("Packed parity holds at most 8 slices, got {0}")]
    TooManySlices(usize),
    #[error("Packed parity slot {0} out of range (0..8)")]
    SlotOutOfRange(usize),
    #[error("Parity of slice {z} has value {value:#x}, which does not fit in 5 bits")]
    RowOutOfRange { z: usize, value: u8 },
    #[error("Parity of sheet {x} has value {lane:#x} with bits beyond lane size {lane_size}")]
    LaneOutOfRange { x: usize, lane: u64, lane_size: LaneSize },
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid parity configuration: {0}")]
    Config(#[from] serde_json::Error),
}
