//! Parity of the state as slices (one row per z) or as sheets (one lane per x).
//!
//! Both hold the same 5xL bit matrix: bit x of slice parity z is bit z of sheet parity x.
//! Moving between the two is a bit-by-bit transpose.

use crate::keccakf_packed_parity::check_row;
use crate::{
    LaneSize, LaneValue, PackedParity, ParityError, RowValue, MAX_LANE_SIZE, ROW_MASK, ROW_SIZE,
};

/// Parity of a state, one 5-bit row per slice.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SliceParity {
    rows: Vec<RowValue>,
    lane_size: LaneSize,
}

impl SliceParity {
    /// All-zero parity of `lane_size` slices.
    pub fn zero(lane_size: LaneSize) -> Self {
        SliceParity { rows: vec![0; lane_size.bits()], lane_size }
    }

    pub fn new(rows: Vec<RowValue>) -> Result<Self, ParityError> {
        let lane_size = LaneSize::try_from(rows.len())?;
        for (z, &row) in rows.iter().enumerate() {
            check_row(row, z)?;
        }
        Ok(SliceParity { rows, lane_size })
    }

    pub(crate) fn from_valid_rows(rows: Vec<RowValue>, lane_size: LaneSize) -> Self {
        debug_assert_eq!(rows.len(), lane_size.bits());
        debug_assert!(rows.iter().all(|&row| row <= ROW_MASK));
        SliceParity { rows, lane_size }
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn rows(&self) -> &[RowValue] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RowValue> {
        self.rows
    }

    pub fn to_sheets(&self) -> SheetParity {
        SheetParity { lanes: transpose_to_sheets(&self.rows), lane_size: self.lane_size }
    }

    pub fn pack(&self) -> Result<PackedParity, ParityError> {
        PackedParity::from_rows(&self.rows)
    }
}

/// Parity of a state, one lane per sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SheetParity {
    lanes: [LaneValue; ROW_SIZE],
    lane_size: LaneSize,
}

impl SheetParity {
    pub fn zero(lane_size: LaneSize) -> Self {
        SheetParity { lanes: [0; ROW_SIZE], lane_size }
    }

    pub fn new(lanes: [LaneValue; ROW_SIZE], lane_size: LaneSize) -> Result<Self, ParityError> {
        check_lanes(&lanes, lane_size)?;
        Ok(SheetParity { lanes, lane_size })
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn lanes(&self) -> &[LaneValue; ROW_SIZE] {
        &self.lanes
    }

    pub fn to_slices(&self) -> SliceParity {
        let mut rows = vec![0; self.lane_size.bits()];
        transpose_to_slices(&self.lanes, &mut rows);
        SliceParity { rows, lane_size: self.lane_size }
    }
}

fn check_lanes(lanes: &[LaneValue; ROW_SIZE], lane_size: LaneSize) -> Result<(), ParityError> {
    match lanes.iter().position(|&lane| lane & !lane_size.mask() != 0) {
        Some(x) => Err(ParityError::LaneOutOfRange { x, lane: lanes[x], lane_size }),
        None => Ok(()),
    }
}

fn transpose_to_sheets(slices: &[RowValue]) -> [LaneValue; ROW_SIZE] {
    debug_assert!(slices.len() <= MAX_LANE_SIZE);
    let mut sheets = [0; ROW_SIZE];
    for (x, sheet) in sheets.iter_mut().enumerate() {
        for (z, &row) in slices.iter().enumerate() {
            *sheet |= (((row >> x) & 1) as LaneValue) << z;
        }
    }
    sheets
}

fn transpose_to_slices(sheets: &[LaneValue; ROW_SIZE], slices: &mut [RowValue]) {
    debug_assert!(slices.len() <= MAX_LANE_SIZE);
    for (z, row) in slices.iter_mut().enumerate() {
        *row = 0;
        for (x, &sheet) in sheets.iter().enumerate() {
            *row |= (((sheet >> z) & 1) as RowValue) << x;
        }
    }
}

/// Converts per-slice parities into per-sheet parities. The number of slices is the lane size.
pub fn slices_to_sheets(parity_slices: &[RowValue]) -> Result<[LaneValue; ROW_SIZE], ParityError> {
    LaneSize::try_from(parity_slices.len())?;
    for (z, &row) in parity_slices.iter().enumerate() {
        check_row(row, z)?;
    }
    Ok(transpose_to_sheets(parity_slices))
}

/// Converts per-sheet parities into per-slice parities.
///
/// `parity_slices` must already have the lane size as length, and the sheets must not have
/// bits at or above it.
pub fn sheets_to_slices(
    parity_sheets: &[LaneValue; ROW_SIZE],
    parity_slices: &mut [RowValue],
) -> Result<(), ParityError> {
    let lane_size = LaneSize::try_from(parity_slices.len())?;
    check_lanes(parity_sheets, lane_size)?;
    transpose_to_slices(parity_sheets, parity_slices);
    Ok(())
}
