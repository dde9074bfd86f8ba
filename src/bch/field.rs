/// GF(2^6) arithmetic backed by log/antilog tables over the primitive
/// polynomial x^6 + x + 1.
pub const PRIMITIVE_POLY: u8 = 0x43;

#[derive(Debug, Clone)]
pub struct Gf64 {
  alpha_to: [u8; 63],
  index_of: [i8; 64],
}

impl Gf64 {
  pub fn new() -> Self {
    let mut alpha_to = [0u8; 63];
    let mut index_of = [-1i8; 64];
    let mut x = 1u8;
    for i in 0..63 {
      alpha_to[i] = x;
      index_of[x as usize] = i as i8;
      x <<= 1;
      if x & 0x40 != 0 {
        x ^= PRIMITIVE_POLY;
      }
    }
    Gf64 { alpha_to, index_of }
  }

  /// alpha^i, exponent taken mod 63.
  pub fn alpha(&self, i: usize) -> u8 {
    self.alpha_to[i % 63]
  }

  pub fn mul(&self, a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
      return 0;
    }
    let e = self.index_of[a as usize] as usize + self.index_of[b as usize] as usize;
    self.alpha_to[e % 63]
  }

  /// Multiplicative inverse; zero maps to zero.
  pub fn inv(&self, a: u8) -> u8 {
    if a == 0 {
      return 0;
    }
    self.alpha_to[(63 - self.index_of[a as usize] as usize) % 63]
  }
}

impl Default for Gf64 {
  fn default() -> Self {
    Self::new()
  }
}
