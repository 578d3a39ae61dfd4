use crate::foundation::error::{LyrError, LyrResult};
use crate::lyrics::document::{BlockName, LyricsDocument};
use std::collections::BTreeMap;

/// Vertical budget shared by all rows of a frame, in font-size units.
pub const FRAME_ROW_BUDGET: u32 = 200;

/// One slide: an ordered run of whole blocks whose rows fit the frame capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    blocks: Vec<BlockName>,
    rows: usize,
}

impl Frame {
    /// Block names in display order.
    pub fn blocks(&self) -> &[BlockName] {
        &self.blocks
    }

    /// Total rows occupied by the blocks of this frame.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Rows per frame for a font size: `floor(200 / font_size)`.
///
/// Fails only for a zero font size. Sizes above the budget give a capacity of 0, which
/// [`pack`] rejects as a layout overflow on the first block holding any row.
pub fn rows_per_frame(font_size: u32) -> LyrResult<usize> {
    if font_size == 0 {
        return Err(LyrError::malformed("font_size must be > 0"));
    }
    Ok((FRAME_ROW_BUDGET / font_size) as usize)
}

enum PackState {
    Accumulating { blocks: Vec<BlockName>, remaining: usize },
    Closed,
}

/// Greedy first-fit packing of blocks into frames.
///
/// Blocks keep their input order and are never split; a block that does not fit the open frame
/// closes it and starts the next one. Frames are never empty.
pub fn pack(
    order: &[BlockName],
    lengths: &BTreeMap<&str, usize>,
    capacity: usize,
) -> LyrResult<Vec<Frame>> {
    tracing::debug!(capacity, "rows per frame");

    let mut frames = Vec::new();
    let mut state = PackState::Accumulating {
        blocks: Vec::new(),
        remaining: capacity,
    };

    for name in order {
        let len = *lengths.get(name.as_str()).ok_or_else(|| {
            LyrError::malformed(format!("no row count for block '{name}'"))
        })?;
        if len > capacity {
            return Err(LyrError::LayoutOverflow {
                block: name.clone(),
                rows: len,
                capacity,
            });
        }

        loop {
            let (next, placed) = match state {
                PackState::Accumulating {
                    mut blocks,
                    remaining,
                } if remaining >= len => {
                    tracing::debug!(block = %name, rows = len, available = remaining, "place block");
                    blocks.push(name.clone());
                    let next = PackState::Accumulating {
                        blocks,
                        remaining: remaining - len,
                    };
                    (next, true)
                }
                PackState::Accumulating { blocks, remaining } => {
                    close_frame(&mut frames, blocks, capacity - remaining);
                    (PackState::Closed, false)
                }
                PackState::Closed => {
                    let next = PackState::Accumulating {
                        blocks: Vec::new(),
                        remaining: capacity,
                    };
                    (next, false)
                }
            };
            state = next;
            if placed {
                break;
            }
        }
    }

    if let PackState::Accumulating { blocks, remaining } = state {
        close_frame(&mut frames, blocks, capacity - remaining);
    }
    tracing::debug!(frames = frames.len(), "packing done");
    Ok(frames)
}

/// Pack a whole document at its declared font size.
///
/// A font too large for even one row is a [`LyrError::LayoutOverflow`] naming the first block
/// with rows; a document with no rows at all at that size is malformed.
pub fn pack_document(doc: &LyricsDocument) -> LyrResult<Vec<Frame>> {
    let capacity = rows_per_frame(doc.font_size())?;
    let frames = pack(doc.order(), &doc.block_lengths(), capacity)?;
    if capacity == 0 {
        return Err(LyrError::malformed(format!(
            "font_size {} exceeds {FRAME_ROW_BUDGET}; no row fits in a frame",
            doc.font_size()
        )));
    }
    Ok(frames)
}

fn close_frame(frames: &mut Vec<Frame>, blocks: Vec<BlockName>, rows: usize) {
    if blocks.is_empty() {
        return;
    }
    tracing::debug!(blocks = ?blocks, rows, "end of frame");
    frames.push(Frame { blocks, rows });
}

#[cfg(test)]
#[path = "../../tests/unit/layout/packer.rs"]
mod tests;
