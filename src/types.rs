use bitvec::prelude::*;

/// Payload carried by a codeword, low `data_bit_len()` bits significant.
pub type DataWord = u64;
pub type BVRep = BitVec<u8, Msb0>;
