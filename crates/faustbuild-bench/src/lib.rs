#![deny(clippy::all)]
#![warn(clippy::pedantic)]

//! Benchmark harness for faustbuild.
//!
//! Run benchmarks with: `cargo bench -p faustbuild-bench`
//!
//! The crate only holds criterion benchmarks for the scanners.
