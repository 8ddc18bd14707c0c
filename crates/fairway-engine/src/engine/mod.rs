//! Sheet table pipeline API.
//!
//! Everything here is a pure transform over immutable inputs:
//!
//! - [`decode_csv`] - CSV export text to a [`Matrix`] of trimmed cells
//! - [`CellRef`], [`RangeSpec`] - A1 addressing and inclusive ranges
//! - [`slice`] - Extract a range, padding short or missing rows
//! - [`trim_right`], [`trim_bottom`], [`normalize`], [`has_data`] - Table trimming
//! - [`HeaderInfo`] - Header row and total column detection
//! - [`annotate`] - Header, trend, medal and matchplay classification
//! - [`MaskAlignment`], [`PlayerRowOffset`] - Matchplay mask alignment

mod annotate;
mod cell_ref;
mod csv;
mod header;
mod matchplay;
mod matrix;
mod range;
mod table;
mod trim;

pub use annotate::{
    AnnotatedCell, AnnotatedRow, AnnotatedTable, CHAMPION_COLUMN, CellStyle, DOWN_MARKERS, Tier,
    Trend, UP_MARKERS, annotate, annotated_text, classify_medal, classify_trend,
};
pub use cell_ref::{CellRef, column_index, row_index};
pub use csv::decode_csv;
pub use header::{HEADER_SCAN_ROWS, HeaderInfo, locate_header, locate_total_column};
pub use matchplay::{
    DEFAULT_FIRST_OVERLAY_COLUMN, MIN_NAME_RUN, MaskAlignment, OffsetSource, OffsetStrategy,
    PlayerRowOffset, RESERVED_LABELS, looks_like_name,
};
pub use matrix::{Matrix, Row, cell_at, is_blank, is_blank_row};
pub use range::{RangeSpec, read_cell, slice};
pub use table::{LogicalTable, MatchplayOverlay, TableKind};
pub use trim::{has_data, normalize, trim_bottom, trim_right};
