use phf::phf_map;

/// Parity bit counts for the supported SEC-DED data widths: the smallest k
/// with 2^k >= W + k + 1. The overall parity bit comes on top of these.
pub static PARITY_BITS: phf::Map<u32, u32> = phf_map! {
  8u32 => 4,
  16u32 => 5,
  32u32 => 6,
  64u32 => 7,
};
