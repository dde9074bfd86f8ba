mod bits;
mod error;
pub mod types;
mod util;

mod bch;
mod daec;
mod secded;

use types::*;

pub use bch::{Bch63, BchDecoded};
pub use bits::{BitContainer, Codeword, ParityCheckMatrix, MAX_BITS};
pub use daec::{DaecDecoded, DaecErrorKind, SecDaec64};
pub use secded::{HammingSecded, SecdedDecoded, SecdedErrorKind};
pub use util::{bitdump_bitslice, hexdump_bitslice};

/// A binary linear block code with a fixed data width and codeword length.
///
/// `encode` truncates `data` to the low `data_bit_len()` bits; `decode`
/// accepts any bit pattern of `code_bit_len()` bits and always returns a
/// classification. Codecs hold only immutable construction-time tables, so
/// a shared instance may serve any number of concurrent calls.
pub trait BlockCode {
  type Decoded;

  fn encode(&self, data: DataWord) -> Codeword;
  fn decode(&self, received: &Codeword) -> Self::Decoded;
  fn code_bit_len(&self) -> usize;
  fn data_bit_len(&self) -> usize;
}

pub trait BitDump {
  fn bitdump(&self) -> String;
}
impl BitDump for Codeword {
  fn bitdump(&self) -> String {
    bitdump_bitslice(self.to_bitvec().as_bitslice())
  }
}

pub trait HexDump {
  fn hexdump(&self) -> error::Result<String>;
}
impl HexDump for Codeword {
  fn hexdump(&self) -> error::Result<String> {
    hexdump_bitslice(self.to_bitvec().as_bitslice())
  }
}
