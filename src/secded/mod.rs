mod constant;

use crate::{
  bits::{Codeword, ParityCheckMatrix},
  error::*,
  types::*,
  BlockCode,
};
use constant::PARITY_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecdedErrorKind {
  NoError,
  OverallParityError,
  SingleErrorCorrectable,
  DoubleErrorDetectable,
  MultipleErrorUncorrectable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecdedDecoded {
  pub data: DataWord,
  /// Received codeword with any correction applied.
  pub codeword: Codeword,
  pub syndrome: u32,
  pub kind: SecdedErrorKind,
  pub corrected: bool,
  pub detected: bool,
}

impl SecdedDecoded {
  /// Relabel using an externally tracked error count. The syndrome/parity
  /// pair alone cannot tell three or more errors from the other classes;
  /// harnesses that know how many bits they flipped apply this afterwards.
  pub fn relabel_with_error_count(mut self, actual_errors: usize) -> Self {
    if actual_errors > 2 {
      self.kind = SecdedErrorKind::MultipleErrorUncorrectable;
      self.corrected = false;
    }
    self
  }
}

/// Hamming SEC-DED codec over a runtime-selected data width.
///
/// Codeword layout follows the classical construction, 1-indexed: parity
/// bits at the power-of-two positions, data bits at the remaining positions
/// in increasing order, and one overall parity bit at the final position.
#[derive(Debug, Clone)]
pub struct HammingSecded {
  data_bits: usize,
  parity_bits: usize,
  total_bits: usize,
  parity_positions: Vec<usize>,
  data_positions: Vec<usize>,
  matrix: ParityCheckMatrix,
}

impl HammingSecded {
  pub fn new(data_bits: usize) -> Result<Self> {
    let parity_bits = if let Some(p) = PARITY_BITS.get(&(data_bits as u32)) {
      *p as usize
    } else {
      bail!("Unsupported data width");
    };
    let total_bits = data_bits + parity_bits + 1;

    let parity_positions: Vec<usize> = (0..parity_bits).map(|i| 1usize << i).collect();
    let data_positions: Vec<usize> = (1..total_bits)
      .filter(|pos| !pos.is_power_of_two())
      .collect();
    ensure!(data_positions.len() == data_bits, "Inconsistent code layout");

    // Row for parity position p covers every position whose index has bit p
    // set, excluding the overall parity bit.
    let mut matrix = ParityCheckMatrix::new();
    for p in &parity_positions {
      let mut row = [0u64; 2];
      for pos in 1..total_bits {
        if pos & p != 0 {
          row[(pos - 1) / 64] |= 1 << ((pos - 1) % 64);
        }
      }
      matrix.push_row(row);
    }

    Ok(HammingSecded {
      data_bits,
      parity_bits,
      total_bits,
      parity_positions,
      data_positions,
      matrix,
    })
  }

  pub fn parity_bit_len(&self) -> usize {
    self.parity_bits
  }

  /// 1-indexed codeword positions holding data bits, in payload bit order.
  pub fn data_positions(&self) -> &[usize] {
    &self.data_positions
  }

  /// 1-indexed power-of-two parity positions.
  pub fn parity_positions(&self) -> &[usize] {
    &self.parity_positions
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

impl BlockCode for HammingSecded {
  type Decoded = SecdedDecoded;

  fn encode(&self, data: DataWord) -> Codeword {
    let mut cw = Codeword::new(self.total_bits);
    for (i, pos) in self.data_positions.iter().enumerate() {
      cw.set(pos - 1, (data >> i) & 1 == 1);
    }

    // Power-of-two positions are never covered by another parity row, so the
    // data-only syndrome gives every parity bit in one pass.
    let parities = self.matrix.syndrome(cw.bits());
    for (i, pos) in self.parity_positions.iter().enumerate() {
      cw.set(pos - 1, parities.get(i));
    }

    let overall = cw.popcount() & 1 == 1;
    cw.set(self.total_bits - 1, overall);
    cw
  }

  fn decode(&self, received: &Codeword) -> SecdedDecoded {
    let syndrome = self.matrix.syndrome(received.bits()).words()[0] as u32;
    let overall_parity = received.popcount() & 1 == 1;
    let mut cw = *received;

    let (kind, corrected) = match (syndrome, overall_parity) {
      (0, false) => (SecdedErrorKind::NoError, false),
      (0, true) => {
        cw.flip(self.total_bits - 1);
        (SecdedErrorKind::OverallParityError, true)
      }
      (s, true) => {
        if (s as usize) < self.total_bits {
          cw.flip(s as usize - 1);
          (SecdedErrorKind::SingleErrorCorrectable, true)
        } else {
          // No single flip can produce a syndrome past the last position.
          (SecdedErrorKind::MultipleErrorUncorrectable, false)
        }
      }
      (_, false) => (SecdedErrorKind::DoubleErrorDetectable, false),
    };

    SecdedDecoded {
      data: self.extract_data(&cw),
      codeword: cw,
      syndrome,
      kind,
      corrected,
      detected: kind != SecdedErrorKind::NoError,
    }
  }

  fn code_bit_len(&self) -> usize {
    self.total_bits
  }

  fn data_bit_len(&self) -> usize {
    self.data_bits
  }
}
