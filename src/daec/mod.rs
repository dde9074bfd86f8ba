use crate::{
  bits::{BitContainer, Codeword, ParityCheckMatrix},
  error::*,
  types::*,
  BlockCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaecErrorKind {
  NoError,
  OverallParityError,
  SingleErrorCorrectable,
  DoubleAdjacentCorrected,
  DoubleNonAdjacentDetected,
  MultipleErrorUncorrectable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaecDecoded {
  pub data: DataWord,
  /// Received codeword with any correction applied.
  pub codeword: Codeword,
  /// Full 8-bit syndrome: 7 Hamming bits plus the DAEC bit on top.
  pub syndrome: u32,
  pub kind: DaecErrorKind,
  pub corrected: bool,
  pub detected: bool,
}

/// Hamming SEC-DED over 64 data bits extended with one parity bit sensitive
/// to adjacent data-bit pairs, enabling correction of (a subset of) double
/// adjacent errors on top of the SEC-DED guarantees.
///
/// 73-bit codeword, 1-indexed: Hamming parity at the power-of-two positions,
/// the DAEC parity at position 70, the overall parity at position 73, data
/// at the remaining 64 positions.
#[derive(Debug, Clone)]
pub struct SecDaec64 {
  matrix: ParityCheckMatrix,
  data_positions: Vec<usize>,
  /// 8-bit syndrome -> adjacent data-index pair producing it. Built eagerly
  /// and exhaustively at construction; syndromes shared by several pairs are
  /// left unmapped and decode reports them detected-only.
  adjacency: Vec<Option<(u8, u8)>>,
}

impl SecDaec64 {
  pub const DATA_BITS: usize = 64;
  pub const PARITY_BITS: usize = 8; // 7 Hamming + 1 DAEC
  pub const TOTAL_BITS: usize = Self::DATA_BITS + Self::PARITY_BITS + 1;
  /// 1-indexed position of the DAEC parity bit.
  pub const DAEC_POSITION: usize = 70;

  pub fn new() -> Result<Self> {
    let hamming_positions: [usize; 7] = [1, 2, 4, 8, 16, 32, 64];
    let data_positions: Vec<usize> = (1..Self::TOTAL_BITS)
      .filter(|pos| !pos.is_power_of_two() && *pos != Self::DAEC_POSITION)
      .collect();
    ensure!(
      data_positions.len() == Self::DATA_BITS,
      "Inconsistent code layout"
    );

    let mut matrix = ParityCheckMatrix::new();
    for p in hamming_positions {
      let mut row = [0u64; 2];
      for pos in 1..Self::TOTAL_BITS {
        if pos & p != 0 {
          row[(pos - 1) / 64] |= 1 << ((pos - 1) % 64);
        }
      }
      matrix.push_row(row);
    }

    // DAEC row: XOR-fold of the masks of all adjacent data-bit pairs, plus
    // its own column so clean codewords stay syndrome-zero.
    let mut daec_row = [0u64; 2];
    for i in 0..Self::DATA_BITS - 1 {
      for pos in [data_positions[i], data_positions[i + 1]] {
        daec_row[(pos - 1) / 64] ^= 1 << ((pos - 1) % 64);
      }
    }
    daec_row[(Self::DAEC_POSITION - 1) / 64] |= 1 << ((Self::DAEC_POSITION - 1) % 64);
    matrix.push_row(daec_row);

    let mut adjacency: Vec<Option<(u8, u8)>> = vec![None; 256];
    let mut ambiguous = [false; 256];
    for i in 0..Self::DATA_BITS - 1 {
      let mut pattern = BitContainer::new();
      pattern.set(data_positions[i] - 1, true);
      pattern.set(data_positions[i + 1] - 1, true);
      let key = (matrix.syndrome(&pattern).words()[0] & 0xFF) as usize;
      if adjacency[key].is_some() || ambiguous[key] {
        ambiguous[key] = true;
        adjacency[key] = None;
      } else {
        adjacency[key] = Some((i as u8, i as u8 + 1));
      }
    }

    Ok(SecDaec64 {
      matrix,
      data_positions,
      adjacency,
    })
  }

  /// 1-indexed codeword positions holding data bits, in payload bit order.
  pub fn data_positions(&self) -> &[usize] {
    &self.data_positions
  }

  fn extract_data(&self, cw: &Codeword) -> DataWord {
    self
      .data_positions
      .iter()
      .enumerate()
      .fold(0, |acc, (i, pos)| {
        if cw.get(pos - 1) {
          acc | 1 << i
        } else {
          acc
        }
      })
  }
}

impl BlockCode for SecDaec64 {
  type Decoded = DaecDecoded;

  fn encode(&self, data: DataWord) -> Codeword {
    let mut cw = Codeword::new(Self::TOTAL_BITS);
    for (i, pos) in self.data_positions.iter().enumerate() {
      cw.set(pos - 1, (data >> i) & 1 == 1);
    }

    let mut daec = false;
    for i in 0..Self::DATA_BITS - 1 {
      daec ^= (data >> i) & 1 != (data >> (i + 1)) & 1;
    }
    cw.set(Self::DAEC_POSITION - 1, daec);

    // The DAEC column participates in the Hamming rows covering position 70,
    // so it must be in place before the Hamming parities are read off.
    let parities = self.matrix.syndrome(cw.bits());
    for (i, pos) in [1usize, 2, 4, 8, 16, 32, 64].iter().enumerate() {
      cw.set(pos - 1, parities.get(i));
    }

    let overall = cw.popcount() & 1 == 1;
    cw.set(Self::TOTAL_BITS - 1, overall);
    cw
  }

  fn decode(&self, received: &Codeword) -> DaecDecoded {
    let syndrome = (self.matrix.syndrome(received.bits()).words()[0] & 0xFF) as u32;
    let hamming_syndrome = (syndrome & 0x7F) as usize;
    let daec_bit = syndrome >> 7 == 1;
    let overall_parity = received.popcount() & 1 == 1;
    let mut cw = *received;

    let (kind, corrected) = if syndrome == 0 && !overall_parity {
      (DaecErrorKind::NoError, false)
    } else if overall_parity {
      // Odd number of errors; a single one is locatable.
      if syndrome == 0 {
        cw.flip(Self::TOTAL_BITS - 1);
        (DaecErrorKind::OverallParityError, true)
      } else if hamming_syndrome == 0 && daec_bit {
        cw.flip(Self::DAEC_POSITION - 1);
        (DaecErrorKind::SingleErrorCorrectable, true)
      } else if hamming_syndrome < Self::TOTAL_BITS {
        cw.flip(hamming_syndrome - 1);
        (DaecErrorKind::SingleErrorCorrectable, true)
      } else {
        (DaecErrorKind::MultipleErrorUncorrectable, false)
      }
    } else {
      match self.adjacency[syndrome as usize] {
        Some((i, j)) if j - i == 1 => {
          cw.flip(self.data_positions[i as usize] - 1);
          cw.flip(self.data_positions[j as usize] - 1);
          (DaecErrorKind::DoubleAdjacentCorrected, true)
        }
        _ => (DaecErrorKind::DoubleNonAdjacentDetected, false),
      }
    };

    DaecDecoded {
      data: self.extract_data(&cw),
      codeword: cw,
      syndrome,
      kind,
      corrected,
      detected: kind != DaecErrorKind::NoError,
    }
  }

  fn code_bit_len(&self) -> usize {
    Self::TOTAL_BITS
  }

  fn data_bit_len(&self) -> usize {
    Self::DATA_BITS
  }
}
