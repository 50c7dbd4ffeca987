//! I/O utilities for buffer handling
//!
//! This module provides the byte order strategies used by the IFD walkers
//! and the bounded read that feeds every decoder.

pub mod seekable;
pub mod byte_order;
pub mod byte_source;
