#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod instructions;
pub mod pack;
pub mod state;
