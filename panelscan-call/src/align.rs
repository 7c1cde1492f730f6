//! The pairwise-alignment capability and its `bio`-backed implementation.
//!
//! The pipeline never runs dynamic programming itself; it consumes an
//! injected [`PairwiseDnaAligner`] that hands back a gapped query/reference
//! pair. [`BioPairwiseAligner`] backs the capability with
//! `bio::alignment::pairwise` in semiglobal mode, which aligns the whole
//! query against the best-scoring stretch of the reference (zero end-gap
//! penalty on the reference side).

use bio::alignment::pairwise::Aligner;
use bio::alignment::{Alignment, AlignmentOperation};

use crate::errors::CallError;

pub const GAP: u8 = b'-';

/// Affine-gap scoring parameters for the reference scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        ScoringParams {
            match_score: 1,
            mismatch: -1,
            gap_open: -5,
            gap_extend: -2,
        }
    }
}

/// One pairwise alignment of the query against a reference.
///
/// `aligned_query` and `aligned_reference` are equal-length gapped strings
/// over the aligned region; the gap symbol never occupies the same column
/// in both. `ref_start` is the 0-based index of the first aligned base in
/// the ungapped reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub score: i32,
    pub aligned_query: String,
    pub aligned_reference: String,
    pub ref_start: usize,
}

/// The alignment collaborator: score and align a query against one
/// reference entry.
pub trait PairwiseDnaAligner {
    fn align(&self, query: &[u8], reference: &[u8]) -> Result<AlignmentResult, CallError>;
}

/// `bio`-backed affine-gap aligner.
pub struct BioPairwiseAligner {
    scoring: ScoringParams,
}

impl BioPairwiseAligner {
    pub fn new(scoring: ScoringParams) -> Self {
        BioPairwiseAligner { scoring }
    }
}

impl Default for BioPairwiseAligner {
    fn default() -> Self {
        Self::new(ScoringParams::default())
    }
}

impl PairwiseDnaAligner for BioPairwiseAligner {
    fn align(&self, query: &[u8], reference: &[u8]) -> Result<AlignmentResult, CallError> {
        if query.is_empty() || reference.is_empty() {
            return Err(CallError::Alignment(
                "empty query or reference".to_string(),
            ));
        }
        let score = |a: u8, b: u8| {
            if a == b {
                self.scoring.match_score
            } else {
                self.scoring.mismatch
            }
        };
        let mut aligner = Aligner::with_capacity(
            query.len(),
            reference.len(),
            self.scoring.gap_open,
            self.scoring.gap_extend,
            &score,
        );
        let alignment = aligner.semiglobal(query, reference);
        Ok(gapped_pair(query, reference, &alignment))
    }
}

/// Rebuild the gapped query/reference pair from the aligner's operation
/// list, covering the aligned region only.
fn gapped_pair(query: &[u8], reference: &[u8], alignment: &Alignment) -> AlignmentResult {
    let mut qi = alignment.xstart;
    let mut ri = alignment.ystart;
    let mut aligned_query = String::with_capacity(alignment.operations.len());
    let mut aligned_reference = String::with_capacity(alignment.operations.len());

    for op in &alignment.operations {
        match op {
            AlignmentOperation::Match | AlignmentOperation::Subst => {
                aligned_query.push(query[qi] as char);
                aligned_reference.push(reference[ri] as char);
                qi += 1;
                ri += 1;
            }
            AlignmentOperation::Ins => {
                aligned_query.push(query[qi] as char);
                aligned_reference.push(GAP as char);
                qi += 1;
            }
            AlignmentOperation::Del => {
                aligned_query.push(GAP as char);
                aligned_reference.push(reference[ri] as char);
                ri += 1;
            }
            AlignmentOperation::Xclip(n) => qi += n,
            AlignmentOperation::Yclip(n) => ri += n,
        }
    }

    AlignmentResult {
        score: alignment.score,
        aligned_query,
        aligned_reference,
        ref_start: alignment.ystart,
    }
}

/// An alignment with leading/trailing all-gap-on-query padding stripped.
///
/// Every downstream coordinate is computed against the original ungapped
/// reference, so the stripped lengths are kept for offset bookkeeping and
/// `ref_start` is advanced over the stripped reference bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreAlignment {
    pub aligned_query: String,
    pub aligned_reference: String,
    /// 0-based reference position of the first core column's base.
    pub ref_start: usize,
    pub start_gaps: usize,
    pub end_gaps: usize,
}

impl CoreAlignment {
    pub fn from_result(result: &AlignmentResult) -> Self {
        let query = result.aligned_query.as_bytes();
        let first = query.iter().position(|&b| b != GAP).unwrap_or(query.len());
        let last = query.iter().rposition(|&b| b != GAP).map_or(0, |i| i + 1);
        let (start_gaps, end_gaps) = if first >= last {
            (query.len(), 0)
        } else {
            (first, query.len() - last)
        };

        // padding columns carry a reference base apiece, so the core's
        // first reference position moves forward by start_gaps
        CoreAlignment {
            aligned_query: result.aligned_query[start_gaps..query.len() - end_gaps].to_string(),
            aligned_reference: result.aligned_reference[start_gaps..query.len() - end_gaps]
                .to_string(),
            ref_start: result.ref_start + start_gaps,
            start_gaps,
            end_gaps,
        }
    }

    pub fn len(&self) -> usize {
        self.aligned_query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_query.is_empty()
    }

    /// The aligned query read as amino acids: gap-stripped, trimmed to the
    /// reading frame implied by `cds_start`, whole codons only.
    pub fn query_protein(&self, cds_start: usize) -> String {
        let mut nt: String = self
            .aligned_query
            .chars()
            .filter(|&c| c != GAP as char)
            .collect();
        let shift = (self.ref_start as i64 - cds_start as i64).rem_euclid(3) as usize;
        if shift > 0 {
            let lead = (3 - shift).min(nt.len());
            nt.drain(..lead);
        }
        panelscan_core::sequence::translate(&nt)
    }
}
