use crate::error::*;
use bitvec::prelude::*;

pub fn hexdump_bitslice<T: BitStore, O: BitOrder>(bs: &BitSlice<T, O>) -> Result<String> {
  let mut res = BitVec::<T, O>::new();
  if bs.len() % 8 > 0 {
    res.extend_from_bitslice(&bitvec![u8, O; 0; 8 - bs.len() % 8]);
  }
  res.extend_from_bitslice(bs);
  let (pfx, mid, sfx) = unsafe { res.align_to::<u8>() };
  ensure!(
    pfx.is_empty() && mid.len() % 8 == 0 && sfx.is_empty(),
    "Invalid bitslice"
  );

  let v = mid
    .to_bitvec()
    .as_raw_slice()
    .iter()
    .fold("".to_owned(), |s, b| format!("{}{:02X}", s, b));
  Ok(v)
}

pub fn bitdump_bitslice<T, O>(bits: &BitSlice<T, O>) -> String
where
  T: BitStore,
  O: BitOrder,
{
  bits.iter().fold("".to_owned(), |s, b| {
    format!("{}{}", s, if *b { 1 } else { 0 })
  })
}
