//! Column parity of the state, as used by the θ step:
//!     C\[x, z] = A\[x, 0, z] ^ A\[x, 1, z] ^ A\[x, 2, z] ^ A\[x, 3, z] ^ A\[x, 4, z]

use crate::keccakf_packed_parity::check_slice_count;
use crate::{
    lane_index, row_from_slice, LaneSize, LaneValue, PackedParity, ParityError, RowValue,
    SheetParity, SliceParity, SliceValue, COLUMN_SIZE, ROW_SIZE, SLICE_MASK, SLICE_SIZE,
};

/// Parity of a slice: the XOR of its 5 rows. Bits above 25 are ignored.
#[inline]
pub const fn parity_of_slice(slice: SliceValue) -> RowValue {
    let slice = slice & SLICE_MASK;
    row_from_slice(slice, 0)
        ^ row_from_slice(slice, 1)
        ^ row_from_slice(slice, 2)
        ^ row_from_slice(slice, 3)
        ^ row_from_slice(slice, 4)
}

/// Parity of a slice-oriented state of at most 8 slices, packed.
pub fn parity_from_slices_packed(state: &[SliceValue]) -> Result<PackedParity, ParityError> {
    check_slice_count(state.len())?;

    Ok(state
        .iter()
        .enumerate()
        .fold(PackedParity::ZERO, |packed, (z, &slice)| {
            packed | PackedParity::from_row_unchecked(parity_of_slice(slice), z)
        }))
}

/// Parity of a slice-oriented state, one row per slice. `parity` must have one entry per slice.
pub fn parity_from_slices(
    state: &[SliceValue],
    parity: &mut [RowValue],
) -> Result<(), ParityError> {
    if state.len() != parity.len() {
        return Err(ParityError::LengthMismatch { expected: state.len(), actual: parity.len() });
    }

    for (row, &slice) in parity.iter_mut().zip(state) {
        *row = parity_of_slice(slice);
    }
    Ok(())
}

/// Parity of a slice-oriented state of `lane_size` slices.
pub fn slice_parity(state: &[SliceValue]) -> Result<SliceParity, ParityError> {
    let lane_size = LaneSize::try_from(state.len())?;
    let rows = state.iter().map(|&slice| parity_of_slice(slice)).collect();
    Ok(SliceParity::from_valid_rows(rows, lane_size))
}

/// Parity of a lane-oriented state, one lane per sheet: the XOR of the 5 lanes of sheet x.
pub fn parity_from_lanes(state: &[LaneValue; SLICE_SIZE], parity: &mut [LaneValue; ROW_SIZE]) {
    for (x, sheet) in parity.iter_mut().enumerate() {
        *sheet = (0..COLUMN_SIZE).fold(0, |acc: LaneValue, y| acc ^ state[lane_index(x, y)]);
    }
}

/// Parity of a lane-oriented state whose lanes are confined to `lane_size` bits.
pub fn sheet_parity(
    state: &[LaneValue; SLICE_SIZE],
    lane_size: LaneSize,
) -> Result<SheetParity, ParityError> {
    let mut lanes = [0; ROW_SIZE];
    parity_from_lanes(state, &mut lanes);
    SheetParity::new(lanes, lane_size)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        lanes_to_slices, pack_all, slice_from_row, slice_point, slices_to_sheets, unpack_all,
        PACKED_SLOTS, ROW_MASK,
    };

    fn random_lanes(rng: &mut StdRng, lane_size: LaneSize) -> [LaneValue; SLICE_SIZE] {
        std::array::from_fn(|_| rng.random::<u64>() & lane_size.mask())
    }

    #[test]
    fn test_parity_of_slice() {
        assert_eq!(parity_of_slice(0), 0);
        assert_eq!(parity_of_slice(slice_point(2, 3)), 0b00100);
        assert_eq!(parity_of_slice(slice_point(2, 3) | slice_point(2, 0)), 0);
        assert_eq!(parity_of_slice(SLICE_MASK), ROW_MASK);
        assert_eq!(parity_of_slice(!SLICE_MASK), 0);

        let slice = slice_from_row(0b10101, 0) | slice_from_row(0b00111, 4);
        assert_eq!(parity_of_slice(slice), 0b10010);
    }

    #[test]
    fn test_parity_of_slice_linear() {
        let mut rng = StdRng::seed_from_u64(0x4c696e65);
        for _ in 0..256 {
            let slice: SliceValue = rng.random::<u32>() & SLICE_MASK;
            let part: SliceValue = rng.random::<u32>() & slice;
            assert_eq!(
                parity_of_slice(slice),
                parity_of_slice(part) ^ parity_of_slice(slice ^ part)
            );

            let by_rows = (0..COLUMN_SIZE)
                .map(|y| parity_of_slice(slice_from_row(row_from_slice(slice, y), y)))
                .fold(0, |acc: RowValue, p| acc ^ p);
            assert_eq!(parity_of_slice(slice), by_rows);
        }
    }

    #[test]
    fn test_parity_from_slices_packed() {
        let state = [
            slice_point(0, 0),
            slice_point(0, 1) | slice_point(1, 4),
            slice_point(2, 2) | slice_point(0, 3),
            slice_point(3, 0) | slice_point(3, 1),
        ];
        let packed = parity_from_slices_packed(&state).unwrap();
        assert_eq!(packed.bits(), 0b00000_00101_00011_00001);

        let mut parity = [0; 4];
        parity_from_slices(&state, &mut parity).unwrap();
        assert_eq!(parity, [1, 3, 5, 0]);
        assert_eq!(slice_parity(&state).unwrap().pack().unwrap(), packed);
    }

    #[test]
    fn test_parity_from_slices_rejections() {
        assert!(matches!(parity_from_slices_packed(&[0; 16]), Err(ParityError::TooManySlices(16))));
        assert!(matches!(parity_from_slices_packed(&[0; 9]), Err(ParityError::TooManySlices(9))));
        assert_eq!(parity_from_slices_packed(&[]).unwrap(), PackedParity::ZERO);

        let mut parity = [0; 3];
        assert!(matches!(
            parity_from_slices(&[0; 4], &mut parity),
            Err(ParityError::LengthMismatch { expected: 4, actual: 3 })
        ));
        assert!(slice_parity(&[0; 12]).is_err());
    }

    #[test]
    fn test_packed_extraction_matches_pack_all() {
        let mut rng = StdRng::seed_from_u64(0x50616b64);
        for slices in 0..=PACKED_SLOTS {
            let state: Vec<SliceValue> =
                (0..slices).map(|_| rng.random::<u32>() & SLICE_MASK).collect();
            let mut parity = vec![0; slices];
            parity_from_slices(&state, &mut parity).unwrap();

            let packed = parity_from_slices_packed(&state).unwrap();
            assert_eq!(packed, pack_all(&parity).unwrap());

            let mut unpacked = Vec::new();
            unpack_all(packed, &mut unpacked, slices).unwrap();
            assert_eq!(unpacked, parity);
        }
    }

    #[test]
    fn test_parity_from_slices_any_length() {
        let state: Vec<SliceValue> = (0..64u32).map(|z| (z * 0x12345) & SLICE_MASK).collect();
        let mut parity = vec![0; state.len()];
        parity_from_slices(&state, &mut parity).unwrap();
        for (z, &row) in parity.iter().enumerate() {
            assert_eq!(row, parity_of_slice(state[z]));
        }
    }

    #[test]
    fn test_parity_from_lanes_matches_theta_columns() {
        let mut rng = StdRng::seed_from_u64(0x54686574);
        let state = random_lanes(&mut rng, LaneSize::L64);

        // Column parities as the fast round function computes them
        let mut columns = [0u64; 5];
        for x in 0..5 {
            for y_count in 0..5 {
                columns[x] ^= state[x + y_count * 5];
            }
        }

        let mut parity = [0; ROW_SIZE];
        parity_from_lanes(&state, &mut parity);
        assert_eq!(parity, columns);
    }

    #[test]
    fn test_extraction_equivalence() {
        let mut rng = StdRng::seed_from_u64(0x45717569);
        for lane_size in LaneSize::all() {
            for _ in 0..16 {
                let lanes = random_lanes(&mut rng, lane_size);
                let slices = lanes_to_slices(&lanes, lane_size);

                let mut from_slices = vec![0; slices.len()];
                parity_from_slices(&slices, &mut from_slices).unwrap();

                let mut from_lanes = [0; ROW_SIZE];
                parity_from_lanes(&lanes, &mut from_lanes);

                assert_eq!(slices_to_sheets(&from_slices).unwrap(), from_lanes);
                assert_eq!(
                    slice_parity(&slices).unwrap().to_sheets(),
                    sheet_parity(&lanes, lane_size).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_sheet_parity_rejects_wide_lanes() {
        let mut state = [0u64; SLICE_SIZE];
        state[lane_index(1, 2)] = 1 << 8;
        assert!(matches!(
            sheet_parity(&state, LaneSize::L8),
            Err(ParityError::LaneOutOfRange { x: 1, .. })
        ));
        assert!(sheet_parity(&state, LaneSize::L16).is_ok());
    }
}
