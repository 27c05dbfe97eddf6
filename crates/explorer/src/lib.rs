//! Block explorer client.
//!
//! Downloads verified contract ABIs from an Etherscan-compatible API and
//! stores them as pretty-printed JSON files.

mod abi;

pub use abi::{abi_path, save_abi, Explorer, ExplorerError};
