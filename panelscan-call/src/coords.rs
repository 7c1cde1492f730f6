//! Translation between alignment columns and ungapped reference positions.
//!
//! All variant arithmetic runs in original reference coordinates, never in
//! core-substring indices. The forward direction counts non-gap reference
//! columns; the inverse direction is a bounded walk that clamps its target
//! back toward the anchor in whole-codon steps when the literal target
//! falls outside the core alignment.

use crate::align::{CoreAlignment, GAP};
use crate::errors::CallError;

/// Retry budget for the inverse walk. Each retry pulls the displacement
/// three reference bases toward the anchor, preserving codon-frame parity.
pub const MAX_FRAME_RETRIES: usize = 8;

/// Where an inverse walk landed: the alignment column and the 0-based
/// reference position of the base in that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub column: usize,
    pub ref_pos: usize,
}

pub struct CoordinateMapper<'a> {
    reference: &'a [u8],
    /// Per-column 0-based reference position; None on reference-gap columns.
    ref_positions: Vec<Option<usize>>,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(core: &'a CoreAlignment) -> Self {
        let reference = core.aligned_reference.as_bytes();
        let mut ref_positions = Vec::with_capacity(reference.len());
        let mut next = core.ref_start;
        for &base in reference {
            if base == GAP {
                ref_positions.push(None);
            } else {
                ref_positions.push(Some(next));
                next += 1;
            }
        }
        CoordinateMapper {
            reference,
            ref_positions,
        }
    }

    /// Reference position of a column, None on reference-gap columns.
    pub fn ref_pos_at(&self, column: usize) -> Option<usize> {
        self.ref_positions.get(column).copied().flatten()
    }

    /// Forward map: column holding the given reference base, if the base
    /// lies inside the core alignment.
    pub fn column_of(&self, ref_pos: usize) -> Option<usize> {
        self.ref_positions
            .iter()
            .position(|&p| p == Some(ref_pos))
    }

    /// Inverse walk: starting from `anchor` (which must hold a reference
    /// base), move `displacement` reference bases forward or backward.
    ///
    /// If the walk would exit the core alignment before consuming the
    /// displacement, the target is pulled back toward the anchor in steps
    /// of three and the walk retried, up to [`MAX_FRAME_RETRIES`] times.
    /// Exhausting the budget is a contract violation and fails with
    /// [`CallError::CoordinateOverflow`].
    pub fn resolve_column(
        &self,
        anchor: usize,
        displacement: i64,
    ) -> Result<ResolvedColumn, CallError> {
        debug_assert!(self.ref_pos_at(anchor).is_some());

        let mut n = displacement;
        for _ in 0..=MAX_FRAME_RETRIES {
            if let Some(resolved) = self.try_walk(anchor, n) {
                return Ok(resolved);
            }
            // pull the target one codon away from the boundary it exited;
            // the sign may flip (e.g. -1 -> +2), parity mod 3 never does
            n -= 3 * n.signum();
        }
        Err(CallError::CoordinateOverflow {
            column: anchor,
            displacement,
        })
    }

    /// One walk attempt; None if the displacement cannot be consumed
    /// inside the core alignment.
    fn try_walk(&self, anchor: usize, displacement: i64) -> Option<ResolvedColumn> {
        if displacement == 0 {
            return Some(ResolvedColumn {
                column: anchor,
                ref_pos: self.ref_pos_at(anchor)?,
            });
        }

        let step: i64 = displacement.signum();
        let mut remaining = displacement.abs();
        let mut column = anchor as i64;
        loop {
            column += step;
            if column < 0 || column as usize >= self.reference.len() {
                return None;
            }
            if self.reference[column as usize] != GAP {
                remaining -= 1;
                if remaining == 0 {
                    let column = column as usize;
                    return Some(ResolvedColumn {
                        column,
                        ref_pos: self.ref_pos_at(column)?,
                    });
                }
            }
        }
    }
}
