//! Parity bookkeeping for the Keccak-f state: column parities per slice or per sheet, their
//! packed form and the transposition between both layouts.

mod keccakf_error;
mod keccakf_packed_parity;
mod keccakf_parity;
mod keccakf_parity_conversion;
mod keccakf_parity_engine;
mod keccakf_parts;

pub use keccakf_error::*;
pub use keccakf_packed_parity::{
    pack, pack_all, unpack, unpack_all, PackedParity, PACKED_FIELD_BITS, PACKED_SLOTS,
};
pub use keccakf_parity::*;
pub use keccakf_parity_conversion::*;
pub use keccakf_parity_engine::*;
pub use keccakf_parts::*;
