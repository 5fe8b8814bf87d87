//! Error types for lanewise
//!
//! Vector arithmetic never fails. Errors only arise at the dispatch boundary,
//! when a caller asks for proof that a tier can run on this machine.

use thiserror::Error;

use crate::features::Level;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("{vector} needs a level {required} CPU, this one is level {detected}")]
    UnsupportedCpu {
        vector: &'static str,
        required: Level,
        detected: Level,
    },

    #[error("invalid microarchitecture level {0}, expected 0..=4")]
    InvalidLevel(u8),
}

pub type Result<T> = core::result::Result<T, Error>;
