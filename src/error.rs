pub use anyhow::{bail, ensure, Error, Result};
