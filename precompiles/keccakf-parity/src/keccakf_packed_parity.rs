//! Packed parity: up to 8 slice parities in one 64-bit word.
//!
//! The parity of slice z lives in bits `[5z, 5z + 5)`, i.e. it contributes `(0..=31) * 32^z`
//! to the word. Other components exchange packed parities with this exact layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LaneSize, ParityError, RowValue, SliceParity, ROW_MASK, ROW_SIZE};

/// Number of slice parities a `PackedParity` can hold.
pub const PACKED_SLOTS: usize = 8;

/// Width of each slot.
pub const PACKED_FIELD_BITS: usize = ROW_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedParity(u64);

impl PackedParity {
    pub const ZERO: PackedParity = PackedParity(0);

    /// Wraps a raw word. Bits above slot 7 (40 and up) are carried but never read.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        PackedParity(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Packed parity where only slot `z` is set, to `parity`.
    pub fn from_row(parity: RowValue, z: usize) -> Result<Self, ParityError> {
        check_slot(z)?;
        check_row(parity, z)?;
        Ok(Self::from_row_unchecked(parity, z))
    }

    /// Packs `parity[z]` into slot `z` for every z. Slots past the end stay zero.
    pub fn from_rows(parity: &[RowValue]) -> Result<Self, ParityError> {
        check_slice_count(parity.len())?;

        let mut packed = 0u64;
        for (z, &row) in parity.iter().enumerate() {
            check_row(row, z)?;
            packed |= (row as u64) << (PACKED_FIELD_BITS * z);
        }
        Ok(PackedParity(packed))
    }

    /// Parity of slice `z`.
    pub fn row(self, z: usize) -> Result<RowValue, ParityError> {
        check_slot(z)?;
        Ok(self.row_unchecked(z))
    }

    /// Writes the parities of the first `slices` slices into `out`, resizing it.
    pub fn unpack_into(self, out: &mut Vec<RowValue>, slices: usize) -> Result<(), ParityError> {
        check_slice_count(slices)?;

        out.clear();
        out.extend((0..slices).map(|z| self.row_unchecked(z)));
        Ok(())
    }

    pub fn unpack(self, lane_size: LaneSize) -> Result<SliceParity, ParityError> {
        if !lane_size.is_packable() {
            return Err(ParityError::LaneSizeNotPackable(lane_size));
        }

        let mut rows = Vec::with_capacity(lane_size.bits());
        self.unpack_into(&mut rows, lane_size.bits())?;
        Ok(SliceParity::from_valid_rows(rows, lane_size))
    }

    #[inline]
    pub(crate) fn from_row_unchecked(parity: RowValue, z: usize) -> Self {
        debug_assert!(z < PACKED_SLOTS && parity <= ROW_MASK);
        PackedParity((parity as u64) << (PACKED_FIELD_BITS * z))
    }

    #[inline]
    fn row_unchecked(self, z: usize) -> RowValue {
        debug_assert!(z < PACKED_SLOTS);
        ((self.0 >> (PACKED_FIELD_BITS * z)) as RowValue) & ROW_MASK
    }
}

impl std::ops::BitOr for PackedParity {
    type Output = PackedParity;

    fn bitor(self, rhs: PackedParity) -> PackedParity {
        PackedParity(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for PackedParity {
    fn bitor_assign(&mut self, rhs: PackedParity) {
        self.0 |= rhs.0;
    }
}

impl From<PackedParity> for u64 {
    fn from(packed: PackedParity) -> Self {
        packed.0
    }
}

impl fmt::Display for PackedParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for z in 0..PACKED_SLOTS {
            if z > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:05b}", self.row_unchecked(z))?;
        }
        write!(f, "]")
    }
}

#[inline]
pub(crate) fn check_slice_count(slices: usize) -> Result<(), ParityError> {
    if slices <= PACKED_SLOTS {
        Ok(())
    } else {
        Err(ParityError::TooManySlices(slices))
    }
}

#[inline]
fn check_slot(z: usize) -> Result<(), ParityError> {
    if z < PACKED_SLOTS {
        Ok(())
    } else {
        Err(ParityError::SlotOutOfRange(z))
    }
}

#[inline]
pub(crate) fn check_row(value: RowValue, z: usize) -> Result<(), ParityError> {
    if value <= ROW_MASK {
        Ok(())
    } else {
        Err(ParityError::RowOutOfRange { z, value })
    }
}

/// Packed parity holding `parity` at slot `z` and zero elsewhere.
pub fn pack(parity: RowValue, z: usize) -> Result<PackedParity, ParityError> {
    PackedParity::from_row(parity, z)
}

pub fn pack_all(parity: &[RowValue]) -> Result<PackedParity, ParityError> {
    PackedParity::from_rows(parity)
}

/// The 5-bit field at slot `z`.
pub fn unpack(packed: PackedParity, z: usize) -> Result<RowValue, ParityError> {
    packed.row(z)
}

pub fn unpack_all(
    packed: PackedParity,
    out: &mut Vec<RowValue>,
    slices: usize,
) -> Result<(), ParityError> {
    packed.unpack_into(out, slices)
}
