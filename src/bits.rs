use crate::types::*;

/// Capacity of a `BitContainer`, two raw 64-bit words.
pub const MAX_BITS: usize = 128;

/// Fixed-capacity bit storage. Out-of-range positions are silently clamped:
/// `get` returns false, `set`/`flip` are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitContainer {
  words: [u64; 2],
}

impl BitContainer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_words(low: u64, high: u64) -> Self {
    BitContainer { words: [low, high] }
  }

  pub fn get(&self, pos: usize) -> bool {
    if pos >= MAX_BITS {
      return false;
    }
    (self.words[pos / 64] >> (pos % 64)) & 1 == 1
  }

  pub fn set(&mut self, pos: usize, value: bool) {
    if pos >= MAX_BITS {
      return;
    }
    if value {
      self.words[pos / 64] |= 1 << (pos % 64);
    } else {
      self.words[pos / 64] &= !(1 << (pos % 64));
    }
  }

  pub fn flip(&mut self, pos: usize) {
    if pos >= MAX_BITS {
      return;
    }
    self.words[pos / 64] ^= 1 << (pos % 64);
  }

  pub fn popcount(&self) -> u32 {
    self.words[0].count_ones() + self.words[1].count_ones()
  }

  pub fn words(&self) -> [u64; 2] {
    self.words
  }
}

/// GF(2) syndrome engine: each row is a bitmask over codeword positions,
/// syndrome bit i is the XOR-fold of the positions selected by row i.
#[derive(Debug, Clone, Default)]
pub struct ParityCheckMatrix {
  rows: Vec<[u64; 2]>,
}

impl ParityCheckMatrix {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_row(&mut self, row: [u64; 2]) {
    self.rows.push(row);
  }

  pub fn rows(&self) -> &[[u64; 2]] {
    &self.rows
  }

  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  pub fn syndrome(&self, cw: &BitContainer) -> BitContainer {
    let w = cw.words();
    let mut syn = BitContainer::new();
    for (i, row) in self.rows.iter().enumerate() {
      let parity = ((row[0] & w[0]).count_ones() + (row[1] & w[1]).count_ones()) & 1;
      if parity == 1 {
        syn.set(i, true);
      }
    }
    syn
  }
}

/// Fixed-length codeword, the value passed across encode/decode boundaries.
/// Positions are 0-indexed; positions at or beyond `len` are clamped no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
  bits: BitContainer,
  len: usize,
}

impl Codeword {
  pub fn new(len: usize) -> Self {
    Codeword {
      bits: BitContainer::new(),
      len: len.min(MAX_BITS),
    }
  }

  pub fn from_words(low: u64, high: u64, len: usize) -> Self {
    let len = len.min(MAX_BITS);
    let mut bits = BitContainer::from_words(low, high);
    for pos in len..MAX_BITS {
      bits.set(pos, false);
    }
    Codeword { bits, len }
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn get(&self, pos: usize) -> bool {
    if pos >= self.len {
      return false;
    }
    self.bits.get(pos)
  }

  pub fn set(&mut self, pos: usize, value: bool) {
    if pos >= self.len {
      return;
    }
    self.bits.set(pos, value);
  }

  pub fn flip(&mut self, pos: usize) {
    if pos >= self.len {
      return;
    }
    self.bits.flip(pos);
  }

  pub fn popcount(&self) -> u32 {
    self.bits.popcount()
  }

  /// Hamming distance to another codeword of the same length.
  pub fn count_errors(&self, other: &Codeword) -> u32 {
    let a = self.bits.words();
    let b = other.bits.words();
    (a[0] ^ b[0]).count_ones() + (a[1] ^ b[1]).count_ones()
  }

  pub fn bits(&self) -> &BitContainer {
    &self.bits
  }

  pub fn words(&self) -> [u64; 2] {
    self.bits.words()
  }

  pub fn to_bitvec(&self) -> BVRep {
    (0..self.len).map(|pos| self.bits.get(pos)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn container_clamps_out_of_range() {
    let mut bc = BitContainer::new();
    bc.set(200, true);
    bc.flip(128);
    assert_eq!(bc, BitContainer::new());
    assert!(!bc.get(500));

    bc.set(127, true);
    bc.set(0, true);
    assert_eq!(bc.popcount(), 2);
    assert_eq!(bc.words(), [1, 1 << 63]);
  }

  #[test]
  fn codeword_clamps_to_length() {
    let mut cw = Codeword::new(39);
    cw.set(38, true);
    cw.set(39, true);
    cw.flip(64);
    assert!(cw.get(38));
    assert_eq!(cw.popcount(), 1);
  }

  #[test]
  fn from_words_masks_above_length() {
    let cw = Codeword::from_words(u64::MAX, u64::MAX, 63);
    assert_eq!(cw.popcount(), 63);
    assert_eq!(cw.words(), [(1u64 << 63) - 1, 0]);
  }

  #[test]
  fn count_errors_is_hamming_distance() {
    let a = Codeword::from_words(0b1011, 0, 8);
    let b = Codeword::from_words(0b0010, 0, 8);
    assert_eq!(a.count_errors(&b), 2);
    assert_eq!(a.count_errors(&a), 0);
  }

  // Parity check matrix of the (7,4) Hamming code:
  // [ 1110 100
  //   0111 010
  //   1101 001 ]
  #[test]
  fn syndrome_of_small_hamming_code() {
    let mut h = ParityCheckMatrix::new();
    h.push_row([0b0010111, 0]);
    h.push_row([0b0101110, 0]);
    h.push_row([0b1001011, 0]);

    // 1000101 (MSB first) is a valid codeword of the code above.
    let valid = BitContainer::from_words(0b1010001, 0);
    assert_eq!(h.syndrome(&valid), BitContainer::new());

    // Flipping any single position yields that position's column as syndrome.
    for pos in 0..7 {
      let mut corrupted = valid;
      corrupted.flip(pos);
      let syn = h.syndrome(&corrupted);
      let expected: u64 = (0..3)
        .filter(|&r| (h.rows()[r][0] >> pos) & 1 == 1)
        .fold(0, |acc, r| acc | 1 << r);
      assert_eq!(syn.words()[0], expected);
    }
  }
}
