//! Parity operations bound to the lane size of one permutation instance.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    keccakf_packed_parity, keccakf_parity, keccakf_parity_conversion, LaneSize, LaneValue,
    PackedParity, ParityError, RowValue, SheetParity, SliceParity, SliceValue, ROW_SIZE,
    SLICE_SIZE,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityConfig {
    pub lane_size: LaneSize,
}

impl ParityConfig {
    pub fn new(lane_size: LaneSize) -> Self {
        Self { lane_size }
    }

    /// Parses a configuration such as `{ "lane_size": 8 }`. A missing lane size means 64.
    pub fn from_json(json: &str) -> Result<Self, ParityError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Checks every sequence against the configured lane size before handing it to the parity
/// functions.
#[derive(Clone, Debug)]
pub struct ParityEngine {
    config: ParityConfig,
}

impl ParityEngine {
    pub fn new(config: ParityConfig) -> Self {
        debug!(
            "ParityEngine: lane size {} ({})",
            config.lane_size,
            if config.lane_size.is_packable() { "packable" } else { "not packable" }
        );
        Self { config }
    }

    pub fn config(&self) -> &ParityConfig {
        &self.config
    }

    #[inline]
    pub fn lane_size(&self) -> LaneSize {
        self.config.lane_size
    }

    #[inline]
    pub fn parity_of_slice(&self, slice: SliceValue) -> RowValue {
        trace!("parity_of_slice: {slice:#09x}");
        keccakf_parity::parity_of_slice(slice)
    }

    pub fn parity_from_slices(
        &self,
        state: &[SliceValue],
        parity: &mut [RowValue],
    ) -> Result<(), ParityError> {
        trace!("parity_from_slices: {} slices", state.len());
        let result = self
            .check_len(state.len())
            .and_then(|_| keccakf_parity::parity_from_slices(state, parity));
        self.logged("parity_from_slices", result)
    }

    pub fn parity_from_slices_packed(
        &self,
        state: &[SliceValue],
    ) -> Result<PackedParity, ParityError> {
        trace!("parity_from_slices_packed: {} slices", state.len());
        let result = self
            .check_packable()
            .and_then(|_| self.check_len(state.len()))
            .and_then(|_| keccakf_parity::parity_from_slices_packed(state));
        self.logged("parity_from_slices_packed", result)
    }

    pub fn parity_from_lanes(
        &self,
        state: &[LaneValue; SLICE_SIZE],
    ) -> Result<SheetParity, ParityError> {
        trace!("parity_from_lanes");
        let result = keccakf_parity::sheet_parity(state, self.lane_size());
        self.logged("parity_from_lanes", result)
    }

    /// Packs the parity of slice `z`, which must be one of the configured slices.
    pub fn pack(&self, parity: RowValue, z: usize) -> Result<PackedParity, ParityError> {
        trace!("pack: slot {z}");
        let result = self
            .check_packable()
            .and_then(|_| self.check_slice(z))
            .and_then(|_| keccakf_packed_parity::pack(parity, z));
        self.logged("pack", result)
    }

    pub fn pack_all(&self, parity: &[RowValue]) -> Result<PackedParity, ParityError> {
        trace!("pack_all: {} slices", parity.len());
        let result = self
            .check_packable()
            .and_then(|_| self.check_len(parity.len()))
            .and_then(|_| keccakf_packed_parity::pack_all(parity));
        self.logged("pack_all", result)
    }

    pub fn unpack(&self, packed: PackedParity, z: usize) -> Result<RowValue, ParityError> {
        trace!("unpack: slot {z}");
        let result = self
            .check_packable()
            .and_then(|_| self.check_slice(z))
            .and_then(|_| keccakf_packed_parity::unpack(packed, z));
        self.logged("unpack", result)
    }

    pub fn unpack_all(
        &self,
        packed: PackedParity,
        out: &mut Vec<RowValue>,
    ) -> Result<(), ParityError> {
        trace!("unpack_all: {packed}");
        let result = self
            .check_packable()
            .and_then(|_| keccakf_packed_parity::unpack_all(packed, out, self.lane_size().bits()));
        self.logged("unpack_all", result)
    }

    /// Per-sheet parity of a per-slice parity of the configured lane size.
    pub fn to_sheets(&self, parity: &SliceParity) -> Result<SheetParity, ParityError> {
        trace!("to_sheets: {} slices", parity.lane_size());
        let result = self.check_len(parity.lane_size().bits()).map(|_| parity.to_sheets());
        self.logged("to_sheets", result)
    }

    /// Per-slice parity of a per-sheet parity of the configured lane size.
    pub fn to_slices(&self, parity: &SheetParity) -> Result<SliceParity, ParityError> {
        trace!("to_slices: {} slices", parity.lane_size());
        let result = self.check_len(parity.lane_size().bits()).map(|_| parity.to_slices());
        self.logged("to_slices", result)
    }

    /// Untyped form of `to_sheets`, for callers that keep parities in plain buffers.
    pub fn slices_to_sheets(
        &self,
        parity_slices: &[RowValue],
    ) -> Result<[LaneValue; ROW_SIZE], ParityError> {
        trace!("slices_to_sheets: {} slices", parity_slices.len());
        let result = self
            .check_len(parity_slices.len())
            .and_then(|_| keccakf_parity_conversion::slices_to_sheets(parity_slices));
        self.logged("slices_to_sheets", result)
    }

    /// Untyped form of `to_slices`. `parity_slices` must hold one entry per slice.
    pub fn sheets_to_slices(
        &self,
        parity_sheets: &[LaneValue; ROW_SIZE],
        parity_slices: &mut [RowValue],
    ) -> Result<(), ParityError> {
        trace!("sheets_to_slices: {} slices", parity_slices.len());
        let result = self.check_len(parity_slices.len()).and_then(|_| {
            keccakf_parity_conversion::sheets_to_slices(parity_sheets, parity_slices)
        });
        self.logged("sheets_to_slices", result)
    }

    fn check_len(&self, actual: usize) -> Result<(), ParityError> {
        let expected = self.lane_size().bits();
        if actual == expected {
            Ok(())
        } else {
            Err(ParityError::LengthMismatch { expected, actual })
        }
    }

    fn check_slice(&self, z: usize) -> Result<(), ParityError> {
        if z < self.lane_size().bits() {
            Ok(())
        } else {
            Err(ParityError::SlotOutOfRange(z))
        }
    }

    fn check_packable(&self) -> Result<(), ParityError> {
        if self.lane_size().is_packable() {
            Ok(())
        } else {
            Err(ParityError::LaneSizeNotPackable(self.lane_size()))
        }
    }

    fn logged<T>(&self, op: &str, result: Result<T, ParityError>) -> Result<T, ParityError> {
        if let Err(e) = &result {
            warn!("ParityEngine::{op}() rejected with lane size {}: {e}", self.lane_size());
        }
        result
    }
}

impl Default for ParityEngine {
    fn default() -> Self {
        Self::new(ParityConfig::default())
    }
}
