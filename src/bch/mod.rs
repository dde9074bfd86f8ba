mod field;

use crate::{
  bits::Codeword,
  error::*,
  types::*,
  BlockCode,
};
use field::Gf64;

/// BCH(63, 51) over GF(2^6), correcting up to two bit errors per block.
///
/// Systematic encoding: the 51 message bits occupy the high positions of the
/// 63-bit codeword and the 12 parity bits the low positions, with codeword
/// bit j holding the coefficient of x^j.
#[derive(Debug, Clone)]
pub struct Bch63 {
  field: Gf64,
  /// Generator polynomial as a GF(2) coefficient mask, bit i = coeff of x^i.
  generator: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BchDecoded {
  pub data: DataWord,
  /// Received codeword with any correction applied.
  pub codeword: Codeword,
  /// 0-indexed corrected bit positions, ascending. Empty unless `success`
  /// with at least one error.
  pub error_locations: Vec<usize>,
  pub detected: bool,
  /// True when the post-correction syndromes re-verified to zero.
  pub success: bool,
}

impl Bch63 {
  pub const N: usize = 63;
  pub const K: usize = 51;
  pub const T: usize = 2;
  const NUM_SYNDROMES: usize = 2 * Self::T;

  pub fn new() -> Result<Self> {
    let field = Gf64::new();
    // g(x) = m_1(x) * m_3(x), the minimal polynomials of alpha and alpha^3.
    let m1 = minimal_polynomial(&field, 1)?;
    let m3 = minimal_polynomial(&field, 3)?;
    let generator = poly_multiply_gf2(m1, m3);
    ensure!(
      generator.leading_zeros() as usize == 63 - (Self::N - Self::K),
      "Generator polynomial degree mismatch"
    );
    Ok(Bch63 { field, generator })
  }

  pub fn parity_bit_len(&self) -> usize {
    Self::N - Self::K
  }

  /// Generator polynomial coefficients, ascending from x^0.
  pub fn generator_polynomial(&self) -> Vec<u8> {
    (0..64 - self.generator.leading_zeros() as usize)
      .map(|i| ((self.generator >> i) & 1) as u8)
      .collect()
  }

  pub fn generator_mask(&self) -> u64 {
    self.generator
  }

  fn compute_syndromes(&self, cw: u64) -> [u8; Self::NUM_SYNDROMES] {
    let mut s = [0u8; Self::NUM_SYNDROMES];
    for j in 0..Self::N {
      if (cw >> j) & 1 == 1 {
        for (i, si) in s.iter_mut().enumerate() {
          *si ^= self.field.alpha((i + 1) * j);
        }
      }
    }
    s
  }

  /// Error locator polynomial from the syndromes, coefficients ascending
  /// with sigma[0] = 1, plus the register length reached.
  fn berlekamp_massey(&self, s: &[u8; Self::NUM_SYNDROMES]) -> (Vec<u8>, usize) {
    let mut sigma = vec![1u8];
    let mut prev = vec![1u8];
    let mut len = 0usize;
    let mut shift = 1usize;
    let mut prev_discrepancy = 1u8;

    for n in 0..Self::NUM_SYNDROMES {
      let mut d = s[n];
      for i in 1..=len {
        if i < sigma.len() {
          d ^= self.field.mul(sigma[i], s[n - i]);
        }
      }
      if d == 0 {
        shift += 1;
        continue;
      }
      let coef = self.field.mul(d, self.field.inv(prev_discrepancy));
      let mut next = sigma.clone();
      if next.len() < prev.len() + shift {
        next.resize(prev.len() + shift, 0);
      }
      for (i, &c) in prev.iter().enumerate() {
        next[i + shift] ^= self.field.mul(coef, c);
      }
      if 2 * len <= n {
        prev = sigma;
        prev_discrepancy = d;
        len = n + 1 - len;
        shift = 1;
      } else {
        shift += 1;
      }
      sigma = next;
    }
    (sigma, len)
  }

  /// Roots of sigma over the codeword positions: position p is in error when
  /// sigma(alpha^{-p}) = 0.
  fn chien_search(&self, sigma: &[u8]) -> Vec<usize> {
    let mut locations = Vec::new();
    for p in 0..Self::N {
      let mut v = 0u8;
      for (k, &c) in sigma.iter().enumerate() {
        if c != 0 {
          v ^= self.field.mul(c, self.field.alpha((63 - p) * k));
        }
      }
      if v == 0 {
        locations.push(p);
      }
    }
    locations
  }

  fn extract_data(cw: u64) -> DataWord {
    (cw >> (Self::N - Self::K)) & ((1u64 << Self::K) - 1)
  }
}

impl BlockCode for Bch63 {
  type Decoded = BchDecoded;

  fn encode(&self, data: DataWord) -> Codeword {
    let msg = data & ((1u64 << Self::K) - 1);
    let shifted = msg << (Self::N - Self::K);
    let cw = shifted ^ poly_mod_gf2(shifted, self.generator);
    Codeword::from_words(cw, 0, Self::N)
  }

  fn decode(&self, received: &Codeword) -> BchDecoded {
    let word = received.words()[0] & ((1u64 << Self::N) - 1);
    let syndromes = self.compute_syndromes(word);

    if syndromes.iter().all(|&s| s == 0) {
      return BchDecoded {
        data: Self::extract_data(word),
        codeword: *received,
        error_locations: Vec::new(),
        detected: false,
        success: true,
      };
    }

    let (sigma, len) = self.berlekamp_massey(&syndromes);
    let locations = self.chien_search(&sigma);

    if len <= Self::T && locations.len() == len {
      let mut corrected = word;
      for &p in &locations {
        corrected ^= 1 << p;
      }
      if self.compute_syndromes(corrected).iter().all(|&s| s == 0) {
        return BchDecoded {
          data: Self::extract_data(corrected),
          codeword: Codeword::from_words(corrected, 0, Self::N),
          error_locations: locations,
          detected: true,
          success: true,
        };
      }
    }

    BchDecoded {
      data: Self::extract_data(word),
      codeword: *received,
      error_locations: Vec::new(),
      detected: true,
      success: false,
    }
  }

  fn code_bit_len(&self) -> usize {
    Self::N
  }

  fn data_bit_len(&self) -> usize {
    Self::K
  }
}

/// Minimal polynomial of alpha^e over GF(2), as an ascending coefficient
/// mask. Fails if the conjugate product does not collapse to binary
/// coefficients.
fn minimal_polynomial(field: &Gf64, e: usize) -> Result<u64> {
  let mut class = Vec::new();
  let mut c = e % 63;
  while !class.contains(&c) {
    class.push(c);
    c = (c * 2) % 63;
  }

  // Product over the conjugacy class of (x + alpha^c), in GF(2^6).
  let mut poly = vec![1u8];
  for &c in &class {
    let a = field.alpha(c);
    let mut next = vec![0u8; poly.len() + 1];
    for (i, &co) in poly.iter().enumerate() {
      next[i + 1] ^= co;
      next[i] ^= field.mul(co, a);
    }
    poly = next;
  }

  let mut mask = 0u64;
  for (i, &co) in poly.iter().enumerate() {
    ensure!(co <= 1, "Minimal polynomial has a non-binary coefficient");
    mask |= (co as u64) << i;
  }
  Ok(mask)
}

/// Carry-less product of two GF(2) polynomials in mask form.
fn poly_multiply_gf2(mut a: u64, mut b: u64) -> u64 {
  let mut r = 0u64;
  while b != 0 {
    if b & 1 == 1 {
      r ^= a;
    }
    a <<= 1;
    b >>= 1;
  }
  r
}

/// Remainder of dividend / divisor over GF(2), mask form.
fn poly_mod_gf2(mut dividend: u64, divisor: u64) -> u64 {
  let divisor_bits = 64 - divisor.leading_zeros();
  loop {
    let dividend_bits = 64 - dividend.leading_zeros();
    if dividend_bits < divisor_bits {
      return dividend;
    }
    dividend ^= divisor << (dividend_bits - divisor_bits);
  }
}
