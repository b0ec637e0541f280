//! # Synchronization primitives for the LPC bridge

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod once_init;
mod spin_mutex;

pub use once_init::OnceInit;
pub use spin_mutex::{SpinMutex, SpinMutexGuard};
