use std::fmt;
use std::sync::Arc;

use panelkit_props::PropertyRegistry;
use tracing::warn;

use crate::error::MaptblError;
use crate::shape::{Dimension, MAX_DIMENSIONS, Position, Shape};

/// Hook run once by [`MapTbl::init`], typically to rewrite the backing
/// buffer from chip-read resources before first use.
pub type InitFn = Arc<dyn Fn(&mut MapTbl) -> Result<(), MaptblError> + Send + Sync>;

/// Hook overriding property-driven index selection.
pub type GetIdxFn =
    Arc<dyn Fn(&MapTbl, &PropertyRegistry) -> Result<usize, MaptblError> + Send + Sync>;

/// An up-to-4-dimensional byte lookup table over one contiguous buffer.
///
/// Rows are selected either through per-dimension property bindings (the
/// common case: a dimension indexed by the live value of a named property)
/// or through an explicit `getidx` hook, and copied out to a caller buffer
/// for transmission. All addressing is bounds-checked; an out-of-bounds
/// index is an error, never a wraparound.
///
/// # Invariants
///
/// 1. `bytes().len() == shape().len()` for the table's whole lifetime.
/// 2. A selected copy window always satisfies `index + sizeof_copy <= len`.
/// 3. `copy_row_out`/`select` fail until the table is initialized.
#[derive(Clone)]
pub struct MapTbl {
    name: String,
    shape: Shape,
    arr: Box<[u8]>,
    bindings: [Option<String>; MAX_DIMENSIONS],
    sizeof_copy: usize,
    init: Option<InitFn>,
    getidx: Option<GetIdxFn>,
    initialized: bool,
}

impl MapTbl {
    /// Create a table from a shape and an initial byte snapshot.
    ///
    /// The snapshot is deep-copied; its length must equal the shape's byte
    /// count exactly.
    pub fn new(name: impl Into<String>, shape: Shape, init_bytes: &[u8]) -> Result<Self, MaptblError> {
        let name = name.into();
        if init_bytes.len() != shape.len() {
            return Err(MaptblError::SizeMismatch {
                table: name,
                expected: shape.len(),
                actual: init_bytes.len(),
            });
        }
        Ok(Self {
            name,
            shape,
            arr: init_bytes.into(),
            bindings: Default::default(),
            sizeof_copy: shape.sizeof_row(),
            init: None,
            getidx: None,
            initialized: false,
        })
    }

    /// Start building a table with bindings and hooks.
    pub fn builder(name: impl Into<String>, shape: Shape) -> MapTblBuilder {
        MapTblBuilder {
            name: name.into(),
            shape,
            init_bytes: Vec::new(),
            bindings: Default::default(),
            sizeof_copy: None,
            init: None,
            getidx: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.arr
    }

    /// Total byte count.
    #[inline]
    pub fn len(&self) -> usize {
        self.arr.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    /// Bytes copied out per selection; defaults to one full row.
    #[inline]
    pub fn sizeof_copy(&self) -> usize {
        self.sizeof_copy
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Property bound to one dimension, if any.
    pub fn binding(&self, dim: Dimension) -> Option<&str> {
        self.bindings[dim.axis()].as_deref()
    }

    /// Mark the table usable without running an init hook.
    ///
    /// For tables whose snapshot is already final; the counterpart of
    /// [`MapTbl::init`] for hook-less tables.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Run the init hook exactly once and mark the table initialized.
    ///
    /// Subsequent calls are no-ops. Fails with `NoInitCallback` when no hook
    /// was installed, or `InitFailed` when the hook errors (the table then
    /// stays uninitialized).
    pub fn init(&mut self) -> Result<(), MaptblError> {
        if self.initialized {
            return Ok(());
        }
        let Some(hook) = self.init.clone() else {
            return Err(MaptblError::NoInitCallback {
                table: self.name.clone(),
            });
        };
        hook(self).map_err(|err| MaptblError::InitFailed {
            table: self.name.clone(),
            reason: err.to_string(),
        })?;
        self.initialized = true;
        Ok(())
    }

    /// Byte offset contributed by `index` along `dim`.
    pub fn index_of(&self, dim: Dimension, index: usize) -> Result<usize, MaptblError> {
        self.shape
            .offset_of(dim, index)
            .ok_or_else(|| MaptblError::OutOfBounds {
                table: self.name.clone(),
                index,
                bound: self.shape.countof(dim),
            })
    }

    /// Flat byte index of `(box, layer, row, col)`, innermost last.
    ///
    /// A pure function of its inputs and the table shape; any per-dimension
    /// overrun propagates as `OutOfBounds`.
    pub fn flat_index(
        &self,
        boxi: usize,
        layer: usize,
        row: usize,
        col: usize,
    ) -> Result<usize, MaptblError> {
        Ok(self.index_of(Dimension::Box, boxi)?
            + self.index_of(Dimension::Layer, layer)?
            + self.index_of(Dimension::Row, row)?
            + self.index_of(Dimension::Col, col)?)
    }

    /// Flat byte index of a [`Position`].
    pub fn pos_to_index(&self, pos: &Position) -> Result<usize, MaptblError> {
        self.flat_index(
            pos.index[Dimension::Box.axis()],
            pos.index[Dimension::Layer.axis()],
            pos.index[Dimension::Row.axis()],
            pos.index[Dimension::Col.axis()],
        )
    }

    /// Decompose a flat byte index back into a [`Position`].
    pub fn index_to_pos(&self, index: usize) -> Result<Position, MaptblError> {
        self.shape
            .index_to_pos(index)
            .ok_or_else(|| MaptblError::OutOfBounds {
                table: self.name.clone(),
                index,
                bound: self.len(),
            })
    }

    /// Whether a copy of `size` bytes starting at `index` fits the buffer.
    #[inline]
    pub fn is_index_in_bound(&self, index: usize, size: usize) -> bool {
        index
            .checked_add(size)
            .is_some_and(|end| end <= self.len())
    }

    /// Flat index selected by the live values of bound properties.
    ///
    /// Each bound dimension reads its property's current value as the
    /// element index; unbound dimensions use 0. A value past the dimension
    /// extent is `OutOfBounds`, never clamped.
    pub fn index_from_properties(
        &self,
        props: &PropertyRegistry,
    ) -> Result<usize, MaptblError> {
        let mut index = 0;
        for dim in Dimension::ALL {
            let element = match &self.bindings[dim.axis()] {
                Some(prop) => props.get_value(prop)? as usize,
                None => 0,
            };
            index += self.index_of(dim, element)?;
        }
        Ok(index)
    }

    /// Flat index the next copy will read from: the `getidx` hook when
    /// installed, property-driven selection otherwise.
    ///
    /// Requires the table to be initialized, and rejects any selection that
    /// does not admit a full `sizeof_copy` window.
    pub fn select(&self, props: &PropertyRegistry) -> Result<usize, MaptblError> {
        if !self.initialized {
            return Err(MaptblError::NotInitialized {
                table: self.name.clone(),
            });
        }
        let index = match &self.getidx {
            Some(hook) => hook(self, props)?,
            None => self.index_from_properties(props)?,
        };
        if !self.is_index_in_bound(index, self.sizeof_copy) {
            warn!(
                table = %self.name,
                index,
                len = self.len(),
                "selected index does not fit a copy window"
            );
            return Err(MaptblError::OutOfBounds {
                table: self.name.clone(),
                index,
                bound: self.len(),
            });
        }
        Ok(index)
    }

    /// Copy the currently-selected window (`sizeof_copy` bytes) into `dst`.
    ///
    /// Returns the number of bytes copied. `dst` must hold at least
    /// `sizeof_copy` bytes.
    pub fn copy_row_out(
        &self,
        props: &PropertyRegistry,
        dst: &mut [u8],
    ) -> Result<usize, MaptblError> {
        let index = self.select(props)?;
        if dst.len() < self.sizeof_copy {
            return Err(MaptblError::SizeMismatch {
                table: self.name.clone(),
                expected: self.sizeof_copy,
                actual: dst.len(),
            });
        }
        dst[..self.sizeof_copy].copy_from_slice(&self.arr[index..index + self.sizeof_copy]);
        Ok(self.sizeof_copy)
    }

    /// Write `src` into the table at `pos`.
    ///
    /// `src` may not be longer than one row, and the write window must fit
    /// the buffer; nothing is written on failure.
    pub fn fill(&mut self, pos: &Position, src: &[u8]) -> Result<(), MaptblError> {
        if src.len() > self.shape.sizeof_row() {
            return Err(MaptblError::SizeMismatch {
                table: self.name.clone(),
                expected: self.shape.sizeof_row(),
                actual: src.len(),
            });
        }
        let index = self.pos_to_index(pos)?;
        if !self.is_index_in_bound(index, src.len()) {
            return Err(MaptblError::OutOfBounds {
                table: self.name.clone(),
                index,
                bound: self.len(),
            });
        }
        self.arr[index..index + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Structural shape equality: same dimension count, same extents.
    #[inline]
    pub fn shape_eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }

    /// Order two tables by shape, most significant dimension first.
    pub fn cmp_shape(&self, other: &Self) -> std::cmp::Ordering {
        self.shape.cmp_extents(&other.shape)
    }

    /// Bulk-copy another table's bytes into this one. Shapes must match.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), MaptblError> {
        if !self.shape_eq(src) {
            return Err(MaptblError::ShapeMismatch {
                dst: self.name.clone(),
                src: src.name.clone(),
            });
        }
        self.arr.copy_from_slice(&src.arr);
        Ok(())
    }

    /// Iterate over row slices in flat order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.arr.chunks_exact(self.shape.sizeof_row())
    }

    /// Write a hex dump: a head line with name and shape, then one line per
    /// row prefixed with its flat byte offset.
    pub fn dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "{} ({}) {} bytes", self.name, self.shape, self.len())?;
        let row = self.shape.sizeof_row();
        for (i, chunk) in self.rows().enumerate() {
            write!(out, "[{:04x}]", i * row)?;
            for byte in chunk {
                write!(out, " {byte:02x}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl fmt::Debug for MapTbl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapTbl")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("len", &self.arr.len())
            .field("sizeof_copy", &self.sizeof_copy)
            .field("bindings", &self.bindings)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

/// Builder for tables with property bindings, hooks, or a custom copy size.
pub struct MapTblBuilder {
    name: String,
    shape: Shape,
    init_bytes: Vec<u8>,
    bindings: [Option<String>; MAX_DIMENSIONS],
    sizeof_copy: Option<usize>,
    init: Option<InitFn>,
    getidx: Option<GetIdxFn>,
}

impl MapTblBuilder {
    /// Initial byte snapshot; must match the shape's byte count at build.
    pub fn init_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.init_bytes = bytes.into();
        self
    }

    /// Bind a dimension's index to the live value of a property.
    pub fn bind(mut self, dim: Dimension, property: impl Into<String>) -> Self {
        self.bindings[dim.axis()] = Some(property.into());
        self
    }

    /// Override the per-selection copy size (defaults to one row).
    pub fn sizeof_copy(mut self, size: usize) -> Self {
        self.sizeof_copy = Some(size);
        self
    }

    /// Install an init hook, run once by [`MapTbl::init`].
    pub fn on_init(mut self, hook: InitFn) -> Self {
        self.init = Some(hook);
        self
    }

    /// Install a selection hook overriding property-driven indexing.
    pub fn on_getidx(mut self, hook: GetIdxFn) -> Self {
        self.getidx = Some(hook);
        self
    }

    pub fn build(self) -> Result<MapTbl, MaptblError> {
        let mut tbl = MapTbl::new(self.name, self.shape, &self.init_bytes)?;
        if let Some(size) = self.sizeof_copy {
            if size == 0 || size > tbl.len() {
                return Err(MaptblError::InvalidArgument {
                    reason: format!(
                        "copy size {size} invalid for table {:?} of {} bytes",
                        tbl.name,
                        tbl.len()
                    ),
                });
            }
            tbl.sizeof_copy = size;
        }
        tbl.bindings = self.bindings;
        tbl.init = self.init;
        tbl.getidx = self.getidx;
        Ok(tbl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bytes(n: usize) -> Vec<u8> {
        (0..n).map(|i| i as u8).collect()
    }

    fn table_4d() -> MapTbl {
        // [5][4][3][2], 120 bytes 0x00..0x77.
        MapTbl::new("t4", Shape::d4(5, 4, 3, 2).unwrap(), &bytes(120)).unwrap()
    }

    #[test]
    fn new_deep_copies_and_checks_length() {
        let init = bytes(120);
        let tbl = MapTbl::new("t", Shape::d4(5, 4, 3, 2).unwrap(), &init).unwrap();
        assert_eq!(tbl.bytes(), init.as_slice());

        let err = MapTbl::new("t", Shape::d4(5, 4, 3, 2).unwrap(), &bytes(119)).unwrap_err();
        assert_eq!(
            err,
            MaptblError::SizeMismatch {
                table: "t".into(),
                expected: 120,
                actual: 119,
            }
        );
    }

    #[test]
    fn flat_index_is_the_sum_of_dimension_offsets() {
        let tbl = table_4d();
        assert_eq!(tbl.flat_index(0, 0, 0, 0).unwrap(), 0);
        assert_eq!(tbl.flat_index(1, 1, 1, 1).unwrap(), 24 + 6 + 2 + 1);
        assert_eq!(tbl.flat_index(4, 3, 2, 1).unwrap(), 96 + 18 + 4 + 1);
    }

    #[test]
    fn flat_index_never_wraps() {
        let tbl = table_4d();
        assert!(tbl.flat_index(5, 0, 0, 0).is_err());
        assert!(tbl.flat_index(0, 4, 0, 0).is_err());
        assert!(tbl.flat_index(0, 0, 3, 0).is_err());
        assert!(tbl.flat_index(0, 0, 0, 2).is_err());
    }

    #[test]
    fn lower_dimensional_tables_admit_only_zero_above_their_rank() {
        let tbl = MapTbl::new("t1", Shape::d1(2).unwrap(), &bytes(2)).unwrap();
        assert_eq!(tbl.flat_index(0, 0, 0, 1).unwrap(), 1);
        assert!(tbl.flat_index(0, 0, 1, 0).is_err());
        assert!(tbl.flat_index(0, 1, 0, 0).is_err());
        assert!(tbl.flat_index(1, 0, 0, 0).is_err());
    }

    #[test]
    fn pos_and_index_are_mutually_inverse() {
        let tbl = table_4d();
        let pos = Position::new(4, 3, 2, 1);
        let index = tbl.pos_to_index(&pos).unwrap();
        assert_eq!(tbl.index_to_pos(index).unwrap(), pos);
        assert!(tbl.index_to_pos(tbl.len()).is_err());
    }

    #[test]
    fn property_bound_selection() {
        let mut props = PropertyRegistry::new();
        props.add_range("rate_idx", 2, 0, 10).unwrap();
        props.add_range("mode_idx", 1, 0, 10).unwrap();

        let mut tbl = MapTbl::builder("t", Shape::d3(4, 3, 2).unwrap())
            .init_bytes(bytes(24))
            .bind(Dimension::Layer, "rate_idx")
            .bind(Dimension::Row, "mode_idx")
            .build()
            .unwrap();
        tbl.mark_initialized();

        // layer 2, row 1 -> 2 * 6 + 1 * 2.
        assert_eq!(tbl.select(&props).unwrap(), 14);

        let mut dst = [0u8; 2];
        assert_eq!(tbl.copy_row_out(&props, &mut dst).unwrap(), 2);
        assert_eq!(dst, [14, 15]);

        // Binding values track the store.
        props.set_value("rate_idx", 0).unwrap();
        assert_eq!(tbl.select(&props).unwrap(), 2);
    }

    #[test]
    fn bound_property_value_past_extent_is_out_of_bounds() {
        let mut props = PropertyRegistry::new();
        props.add_range("idx", 3, 0, 10).unwrap();
        let mut tbl = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .bind(Dimension::Row, "idx")
            .build()
            .unwrap();
        tbl.mark_initialized();
        assert!(matches!(
            tbl.select(&props),
            Err(MaptblError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unknown_binding_propagates_not_found() {
        let props = PropertyRegistry::new();
        let mut tbl = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .bind(Dimension::Row, "missing")
            .build()
            .unwrap();
        tbl.mark_initialized();
        assert!(matches!(
            tbl.select(&props),
            Err(MaptblError::Property(_))
        ));
    }

    #[test]
    fn select_requires_initialization() {
        let props = PropertyRegistry::new();
        let tbl = MapTbl::new("t", Shape::d1(2).unwrap(), &bytes(2)).unwrap();
        assert_eq!(
            tbl.select(&props),
            Err(MaptblError::NotInitialized { table: "t".into() })
        );
    }

    #[test]
    fn init_runs_hook_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut tbl = MapTbl::builder("t", Shape::d1(2).unwrap())
            .init_bytes(bytes(2))
            .on_init(Arc::new(move |tbl: &mut MapTbl| {
                seen.fetch_add(1, Ordering::SeqCst);
                tbl.fill(&Position::new(0, 0, 0, 0), &[0xaa])
            }))
            .build()
            .unwrap();

        tbl.init().unwrap();
        tbl.init().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(tbl.is_initialized());
        assert_eq!(tbl.bytes()[0], 0xaa);
    }

    #[test]
    fn init_without_hook_fails() {
        let mut tbl = MapTbl::new("t", Shape::d1(2).unwrap(), &bytes(2)).unwrap();
        assert_eq!(
            tbl.init(),
            Err(MaptblError::NoInitCallback { table: "t".into() })
        );
        assert!(!tbl.is_initialized());
    }

    #[test]
    fn failing_init_hook_leaves_table_uninitialized() {
        let mut tbl = MapTbl::builder("t", Shape::d1(2).unwrap())
            .init_bytes(bytes(2))
            .on_init(Arc::new(|tbl: &mut MapTbl| {
                Err(MaptblError::InvalidArgument {
                    reason: format!("no source data for {}", tbl.name()),
                })
            }))
            .build()
            .unwrap();
        assert!(matches!(tbl.init(), Err(MaptblError::InitFailed { .. })));
        assert!(!tbl.is_initialized());
    }

    #[test]
    fn getidx_hook_overrides_bindings_and_is_bounds_checked() {
        let props = PropertyRegistry::new();
        let mut tbl = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .on_getidx(Arc::new(|tbl: &MapTbl, _: &PropertyRegistry| {
                tbl.flat_index(0, 0, 2, 0)
            }))
            .build()
            .unwrap();
        tbl.mark_initialized();
        assert_eq!(tbl.select(&props).unwrap(), 4);

        // A hook returning an index with no room for the copy window fails.
        let mut bad = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .on_getidx(Arc::new(|tbl: &MapTbl, _: &PropertyRegistry| Ok(tbl.len() - 1)))
            .build()
            .unwrap();
        bad.mark_initialized();
        assert!(matches!(
            bad.select(&props),
            Err(MaptblError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn copy_row_out_rejects_short_destination() {
        let mut props = PropertyRegistry::new();
        props.add_range("idx", 0, 0, 10).unwrap();
        let mut tbl = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .bind(Dimension::Row, "idx")
            .build()
            .unwrap();
        tbl.mark_initialized();
        let mut dst = [0u8; 1];
        assert!(matches!(
            tbl.copy_row_out(&props, &mut dst),
            Err(MaptblError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn fill_writes_at_position() {
        let mut tbl = table_4d();
        let pos = Position::new(1, 2, 1, 0);
        tbl.fill(&pos, &[0xde, 0xad]).unwrap();
        let index = tbl.pos_to_index(&pos).unwrap();
        assert_eq!(&tbl.bytes()[index..index + 2], &[0xde, 0xad]);
    }

    #[test]
    fn fill_rejects_oversized_source_and_bad_position() {
        let mut tbl = table_4d();
        let before = tbl.bytes().to_vec();

        assert!(matches!(
            tbl.fill(&Position::new(0, 0, 0, 0), &[0; 3]),
            Err(MaptblError::SizeMismatch { .. })
        ));
        assert!(matches!(
            tbl.fill(&Position::new(5, 0, 0, 0), &[0]),
            Err(MaptblError::OutOfBounds { .. })
        ));
        assert_eq!(tbl.bytes(), before.as_slice());
    }

    #[test]
    fn clone_owns_an_independent_buffer() {
        let tbl = table_4d();
        let mut copy = tbl.clone();
        copy.fill(&Position::new(0, 0, 0, 0), &[0xff]).unwrap();
        assert_eq!(tbl.bytes()[0], 0x00);
        assert_eq!(copy.bytes()[0], 0xff);
        assert!(tbl.shape_eq(&copy));
    }

    #[test]
    fn copy_from_requires_matching_shape() {
        let src = table_4d();
        let mut same = MapTbl::new("dst", Shape::d4(5, 4, 3, 2).unwrap(), &vec![0; 120]).unwrap();
        same.copy_from(&src).unwrap();
        assert_eq!(same.bytes(), src.bytes());

        let mut other = MapTbl::new("dst", Shape::d2(3, 2).unwrap(), &vec![0; 6]).unwrap();
        assert_eq!(
            other.copy_from(&src),
            Err(MaptblError::ShapeMismatch {
                dst: "dst".into(),
                src: "t4".into(),
            })
        );
    }

    #[test]
    fn builder_validates_copy_size() {
        assert!(
            MapTbl::builder("t", Shape::d2(3, 2).unwrap())
                .init_bytes(bytes(6))
                .sizeof_copy(0)
                .build()
                .is_err()
        );
        assert!(
            MapTbl::builder("t", Shape::d2(3, 2).unwrap())
                .init_bytes(bytes(6))
                .sizeof_copy(7)
                .build()
                .is_err()
        );
        let tbl = MapTbl::builder("t", Shape::d2(3, 2).unwrap())
            .init_bytes(bytes(6))
            .sizeof_copy(4)
            .build()
            .unwrap();
        assert_eq!(tbl.sizeof_copy(), 4);
    }

    #[test]
    fn dump_format_is_stable() {
        let tbl = MapTbl::new("gamma", Shape::d2(2, 2).unwrap(), &[0, 1, 2, 3]).unwrap();
        let mut out = String::new();
        tbl.dump(&mut out).unwrap();
        assert_eq!(out, "gamma (2x2) 4 bytes\n[0000] 00 01\n[0002] 02 03\n");
    }

    #[test]
    fn rows_iterates_in_flat_order() {
        let tbl = MapTbl::new("t", Shape::d2(3, 2).unwrap(), &bytes(6)).unwrap();
        let rows: Vec<&[u8]> = tbl.rows().collect();
        assert_eq!(rows, vec![&[0, 1][..], &[2, 3][..], &[4, 5][..]]);
    }
}
