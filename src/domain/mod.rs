//! Grid storage.
//! Every grid is one contiguous row-major `n x n` buffer.
//! Workers never see a whole grid mutably,
//! they get a `RowChunk` carved out of the output buffer,
//! so two workers can never write the same row.

mod view;

pub use view::*;
