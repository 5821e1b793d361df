//! Simulation engine composition for frame advancement.
//! This file wires focused engine submodules together.

use super::*;

mod advance;

#[cfg(test)]
mod tests;
