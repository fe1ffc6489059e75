// Copyright 2025 Tyler Neely (tylerneely@gmail.com).
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.
//
// See http://creativecommons.org/licenses/MIT/ for more information.

//! Fast maths functions using lookup tables.
//!
//! Approximates `log2(x)` and `x^y` (and the `ln`, `log10`, `exp`, `exp2`,
//! `exp10` variants derived from them) for real-time audio and control code
//! where the standard transcendental functions are too slow. Both rely on a
//! pair of lookup tables that can be swapped at startup to trade accuracy
//! for memory.
//!
//! # Example:
//! ```
//! use fastmaths::FastFloat as _;
//!
//! fastmaths::set_default_tables();
//!
//! assert_eq!(2.0f32.fast_pow(10.0), 1024.0);
//! assert!((92.0f32.fast_log2() - 92.0f32.log2()).abs() < 1.0e-5);
//! ```
//!
//! [`set_default_tables`], or [`set_log_table`] *and* [`set_pow_table`],
//! should be called before any evaluation. Until then evaluation falls back
//! to the built-in tables. For code that wants explicit control over its
//! tables, build a [`FastMaths`] evaluator directly.

#![warn(missing_docs)]

pub mod accuracy;
pub mod atan;
pub mod bits;
pub mod config;
pub mod error;
mod fast_float;
pub mod logarithm;
mod maths;
pub mod pitch;
pub mod pow;
pub mod registry;
pub mod sweep;
pub mod table;

pub use config::TableConfig;
pub use error::{ConfigError, DomainError, Error};
pub use fast_float::FastFloat;
pub use maths::FastMaths;
pub use registry::{
    approx_log, approx_pow, registry, set_default_tables, set_log_table, set_pow_table,
    TableRegistry, TableSlot,
};
pub use table::{ApproxTable, TableFamily};
