use std::cmp::Ordering;
use std::fmt;

use crate::error::MaptblError;

/// Maximum number of table dimensions.
pub const MAX_DIMENSIONS: usize = 4;

/// Table dimensions, innermost first.
///
/// A 1-D table has columns only; a 4-D table is addressed as
/// `(box, layer, row, col)` with the column varying fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Col = 0,
    Row = 1,
    Layer = 2,
    Box = 3,
}

impl Dimension {
    pub const ALL: [Dimension; MAX_DIMENSIONS] =
        [Dimension::Col, Dimension::Row, Dimension::Layer, Dimension::Box];

    #[inline]
    pub const fn axis(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Col => "col",
            Self::Row => "row",
            Self::Layer => "layer",
            Self::Box => "box",
        };
        f.write_str(name)
    }
}

/// Extents of a 1–4 dimensional table.
///
/// Extents are stored innermost-first; unused dimensions read as extent 1
/// for address arithmetic, so a 1-D table's "layer size" is the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    extents: [usize; MAX_DIMENSIONS],
    ndim: usize,
}

impl Shape {
    /// Build a shape from outermost-first extents, the way a nested array is
    /// declared: `Shape::new(&[boxes, layers, rows, cols])`.
    ///
    /// All extents must be positive; 1 to 4 dimensions.
    pub fn new(dims: &[usize]) -> Result<Self, MaptblError> {
        if dims.is_empty() || dims.len() > MAX_DIMENSIONS {
            return Err(MaptblError::InvalidArgument {
                reason: format!("shape must have 1 to {MAX_DIMENSIONS} dimensions, got {}", dims.len()),
            });
        }
        if dims.iter().any(|&d| d == 0) {
            return Err(MaptblError::InvalidArgument {
                reason: format!("shape extents must be positive: {dims:?}"),
            });
        }
        let mut extents = [0usize; MAX_DIMENSIONS];
        for (axis, &extent) in dims.iter().rev().enumerate() {
            extents[axis] = extent;
        }
        Ok(Self {
            extents,
            ndim: dims.len(),
        })
    }

    pub fn d1(cols: usize) -> Result<Self, MaptblError> {
        Self::new(&[cols])
    }

    pub fn d2(rows: usize, cols: usize) -> Result<Self, MaptblError> {
        Self::new(&[rows, cols])
    }

    pub fn d3(layers: usize, rows: usize, cols: usize) -> Result<Self, MaptblError> {
        Self::new(&[layers, rows, cols])
    }

    pub fn d4(boxes: usize, layers: usize, rows: usize, cols: usize) -> Result<Self, MaptblError> {
        Self::new(&[boxes, layers, rows, cols])
    }

    #[inline]
    pub const fn ndim(&self) -> usize {
        self.ndim
    }

    /// Element count along one dimension; 1 for dimensions beyond `ndim`.
    #[inline]
    pub fn countof(&self, dim: Dimension) -> usize {
        self.extents[dim.axis()].max(1)
    }

    /// Raw extent along one dimension; 0 for dimensions beyond `ndim`.
    #[inline]
    pub fn extent(&self, dim: Dimension) -> usize {
        self.extents[dim.axis()]
    }

    /// Bytes in one row: the innermost 1-D slice.
    #[inline]
    pub fn sizeof_row(&self) -> usize {
        self.countof(Dimension::Col)
    }

    /// Bytes in one layer: a 2-D slice (the whole table below 3 dimensions).
    #[inline]
    pub fn sizeof_layer(&self) -> usize {
        self.sizeof_row() * self.countof(Dimension::Row)
    }

    /// Bytes in one box: a 3-D slice (the whole table below 4 dimensions).
    #[inline]
    pub fn sizeof_box(&self) -> usize {
        self.sizeof_layer() * self.countof(Dimension::Layer)
    }

    /// Total byte count.
    #[inline]
    pub fn len(&self) -> usize {
        self.sizeof_box() * self.countof(Dimension::Box)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte stride of one step along `dim`.
    #[inline]
    pub fn stride(&self, dim: Dimension) -> usize {
        match dim {
            Dimension::Col => 1,
            Dimension::Row => self.sizeof_row(),
            Dimension::Layer => self.sizeof_layer(),
            Dimension::Box => self.sizeof_box(),
        }
    }

    /// Byte offset contributed by `index` along `dim`, or `None` when the
    /// index is outside that dimension's extent.
    #[inline]
    pub fn offset_of(&self, dim: Dimension, index: usize) -> Option<usize> {
        if index < self.countof(dim) {
            Some(index * self.stride(dim))
        } else {
            None
        }
    }

    /// Flat byte index of a full position, or `None` on any per-dimension
    /// overrun.
    pub fn pos_to_index(&self, pos: &Position) -> Option<usize> {
        let mut index = 0;
        for dim in Dimension::ALL {
            index += self.offset_of(dim, pos.index[dim.axis()])?;
        }
        Some(index)
    }

    /// Decompose a flat byte index into per-dimension indices. `None` when
    /// the index is past the end of the table.
    pub fn index_to_pos(&self, index: usize) -> Option<Position> {
        if index >= self.len() {
            return None;
        }
        let mut pos = Position::default();
        for dim in Dimension::ALL {
            pos.index[dim.axis()] = (index / self.stride(dim)) % self.countof(dim);
        }
        Some(pos)
    }

    /// Order shapes by extent, most significant dimension first, with
    /// missing dimensions reading as extent 0 (as a raw shape comparison,
    /// not an element-count comparison).
    pub fn cmp_extents(&self, other: &Self) -> Ordering {
        for dim in Dimension::ALL.iter().rev() {
            match self.extent(*dim).cmp(&other.extent(*dim)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dim) in Dimension::ALL[..self.ndim].iter().rev().enumerate() {
            if i > 0 {
                f.write_str("x")?;
            }
            write!(f, "{}", self.extent(*dim))?;
        }
        Ok(())
    }
}

/// Per-dimension element indices addressing one byte of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Indexed by [`Dimension::axis`]; col first.
    pub index: [usize; MAX_DIMENSIONS],
}

impl Position {
    pub fn new(boxi: usize, layer: usize, row: usize, col: usize) -> Self {
        Self {
            index: [col, row, layer, boxi],
        }
    }
}
