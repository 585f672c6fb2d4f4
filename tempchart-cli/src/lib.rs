//! Shared front-end for the `tempchart` binaries.
//!
//! This crate focuses on:
//! - Parsing the `--lat`/`--lon` arguments
//! - Logging setup (stderr only, stdout carries the image)
//! - Running the chart pipeline with the preset fixed by each binary

pub mod cli;
pub mod logging;
