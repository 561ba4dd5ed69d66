// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `grid`: uniform grid keyed by `floor(coordinate / cell_size)`. With the cell
//!   size equal to the query radius, a query touches at most a 3×3 block of cells.
//! - `flatvec`: flat vector with linear scans (small, simple, and a handy oracle in tests).

pub mod flatvec;
pub mod grid;

pub use flatvec::FlatVec;
pub use grid::Grid;
