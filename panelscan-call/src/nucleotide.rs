//! Column-by-column variant calling over a core alignment.
//!
//! Primitive edits (one column each) are merged into resolved variants: a
//! run of one pure kind keeps that kind, anything mixed collapses to a
//! delins whose payload is the gap-stripped reference and query spans.
//! Positions are 1-based ungapped reference coordinates, rendered in the
//! `r.` grammar.

use crate::align::{CoreAlignment, GAP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Substitution,
    Insertion,
    Deletion,
    DelIns,
}

/// One or more merged primitive edits, reportable as a single
/// nucleotide-level change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    pub kind: VariantKind,
    /// 1-based inclusive reference range. For an insertion both bounds name
    /// the reference base preceding the inserted bases.
    pub ref_lo: usize,
    pub ref_hi: usize,
    /// Inclusive column range in the core alignment.
    pub col_lo: usize,
    pub col_hi: usize,
    /// Inclusive codon-index range (0-based from cds_start; negative
    /// upstream of the CDS).
    pub codon_lo: i64,
    pub codon_hi: i64,
    pub description: String,
}

/// Codon index of a 0-based reference position, negative upstream of the
/// CDS.
pub fn codon_index(ref_pos0: usize, cds_start: usize) -> i64 {
    (ref_pos0 as i64 - cds_start as i64).div_euclid(3)
}

#[derive(Debug)]
struct OpenRun {
    col_lo: usize,
    col_hi: usize,
    /// 1-based reference positions touched by the run.
    ref_lo: usize,
    ref_hi: usize,
    ref_bases: String,
    query_bases: String,
    has_sub: bool,
    has_ins: bool,
    has_del: bool,
    columns: usize,
}

impl OpenRun {
    fn resolve(self, cds_start: usize) -> ResolvedVariant {
        let (ref_lo, ref_hi) = (self.ref_lo, self.ref_hi);
        let pure_kinds = self.has_sub as u8 + self.has_ins as u8 + self.has_del as u8;

        let (kind, description) = if pure_kinds == 1 && self.has_sub && self.columns == 1 {
            (
                VariantKind::Substitution,
                format!("r.{}{}>{}", ref_lo, self.ref_bases, self.query_bases),
            )
        } else if pure_kinds == 1 && self.has_ins {
            (
                VariantKind::Insertion,
                format!("r.{}_{}ins{}", ref_lo, ref_lo + 1, self.query_bases),
            )
        } else if pure_kinds == 1 && self.has_del {
            let description = if ref_lo == ref_hi {
                format!("r.{ref_lo}del")
            } else {
                format!("r.{ref_lo}_{ref_hi}del")
            };
            (VariantKind::Deletion, description)
        } else {
            // mixed kinds, or a substitution run wider than one column:
            // the substitution grammar is single-position
            (
                VariantKind::DelIns,
                format!(
                    "r.{}_{}delins{}>{}",
                    ref_lo, ref_hi, self.ref_bases, self.query_bases
                ),
            )
        };

        ResolvedVariant {
            kind,
            ref_lo,
            ref_hi,
            col_lo: self.col_lo,
            col_hi: self.col_hi,
            codon_lo: codon_index(ref_lo.saturating_sub(1), cds_start),
            codon_hi: codon_index(ref_hi.saturating_sub(1), cds_start),
            description,
        }
    }
}

/// Resolve a finished run. A query overhang inserted before the first
/// reference base has no anchoring base in the 1-based grammar and is not
/// reportable.
fn flush(run: OpenRun, cds_start: usize, variants: &mut Vec<ResolvedVariant>) {
    let variant = run.resolve(cds_start);
    if variant.kind == VariantKind::Insertion && variant.ref_lo == 0 {
        return;
    }
    variants.push(variant);
}

/// Walk the core alignment and emit resolved variants in ascending
/// reference order.
pub fn call_nucleotide_variants(core: &CoreAlignment, cds_start: usize) -> Vec<ResolvedVariant> {
    let query = core.aligned_query.as_bytes();
    let reference = core.aligned_reference.as_bytes();

    let mut variants = Vec::new();
    let mut open: Option<OpenRun> = None;
    // count of reference bases consumed so far; doubles as the 1-based
    // position of the last consumed base
    let mut ref_count = core.ref_start;

    for col in 0..core.len() {
        let (qb, rb) = (query[col], reference[col]);
        if rb != GAP {
            ref_count += 1;
        }
        if qb == rb {
            if let Some(run) = open.take() {
                flush(run, cds_start, &mut variants);
            }
            continue;
        }

        // 1-based position this column is charged to; an insertion column
        // hangs off the last consumed reference base
        let ref_pos = ref_count;
        let run = open.get_or_insert_with(|| OpenRun {
            col_lo: col,
            col_hi: col,
            ref_lo: ref_pos,
            ref_hi: ref_pos,
            ref_bases: String::new(),
            query_bases: String::new(),
            has_sub: false,
            has_ins: false,
            has_del: false,
            columns: 0,
        });
        run.col_hi = col;
        run.ref_lo = run.ref_lo.min(ref_pos);
        run.ref_hi = run.ref_hi.max(ref_pos);
        run.columns += 1;
        if rb != GAP {
            run.ref_bases.push(rb as char);
        }
        if qb != GAP {
            run.query_bases.push(qb as char);
        }
        match (qb, rb) {
            (GAP, _) => run.has_del = true,
            (_, GAP) => run.has_ins = true,
            _ => run.has_sub = true,
        }
    }

    if let Some(run) = open.take() {
        flush(run, cds_start, &mut variants);
    }
    variants
}
