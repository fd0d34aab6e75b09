#![forbid(unsafe_code)]

//! N-dimensional byte lookup tables over flat buffers.
//!
//! A [`MapTbl`] stores panel command data (gamma curves, timing windows,
//! dimming frames) as one contiguous byte buffer addressed by up to four
//! per-dimension indices (`box`, `layer`, `row`, `col`, column innermost).
//! Dimensions may be bound to named properties so that the live panel state
//! selects which row gets copied to the hardware command buffer.
//!
//! # Layout
//!
//! Bytes are stored row-major: the flat index of `(box, layer, row, col)`
//! is the sum of each index times the byte size of one unit of the next
//! lower dimension. For a `[5][4][3][2]` table that is
//! `box*24 + layer*6 + row*2 + col`.
//!
//! # Example
//!
//! ```
//! use panelkit_maptbl::{Dimension, MapTbl, Shape};
//! use panelkit_props::PropertyRegistry;
//!
//! let mut props = PropertyRegistry::new();
//! props.add_range("brightness_step", 1, 0, 2).unwrap();
//!
//! let mut tbl = MapTbl::builder("gamma", Shape::d2(3, 2).unwrap())
//!     .init_bytes(vec![0x10, 0x11, 0x20, 0x21, 0x30, 0x31])
//!     .bind(Dimension::Row, "brightness_step")
//!     .build()
//!     .unwrap();
//! tbl.mark_initialized();
//!
//! let mut row = [0u8; 2];
//! tbl.copy_row_out(&props, &mut row).unwrap();
//! assert_eq!(row, [0x20, 0x21]);
//! ```

mod error;
mod maptbl;
mod set;
mod shape;

pub use error::MaptblError;
pub use maptbl::{GetIdxFn, InitFn, MapTbl, MapTblBuilder};
pub use set::MaptblSet;
pub use shape::{Dimension, MAX_DIMENSIONS, Position, Shape};
