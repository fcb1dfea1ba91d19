#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod channel;
pub use channel::*;

pub mod protocol;

pub mod transport;
