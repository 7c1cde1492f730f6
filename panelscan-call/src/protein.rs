//! Amino-acid-level consequences of resolved nucleotide variants.
//!
//! Each resolved variant (merged with neighbors sharing a codon) is
//! re-projected onto the full in-frame nucleotide window covering every
//! touched codon. The window boundaries travel through the coordinate
//! mapper's inverse walk, so windows that poke past the core alignment are
//! clamped inward in whole-codon steps. Both aligned substrings are
//! gap-stripped independently; a stripped query length off the codon grid
//! is a frameshift and ends evaluation for that unit.

use panelscan_core::sequence::translate;

use crate::align::{CoreAlignment, GAP};
use crate::coords::CoordinateMapper;
use crate::errors::CallError;
use crate::nucleotide::ResolvedVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProteinVariantKind {
    Substitution,
    DelIns,
    Deletion,
    Insertion,
    FrameShift,
}

/// One protein-level consequence, with its 0-based codon range for domain
/// intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinVariant {
    pub kind: ProteinVariantKind,
    pub codon_lo: i64,
    pub codon_hi: i64,
    pub description: String,
}

/// A group of resolved variants whose codon ranges share a codon; protein
/// consequences are evaluated per unit, not per variant.
#[derive(Debug)]
struct Unit {
    codon_lo: i64,
    codon_hi: i64,
    col_lo: usize,
    col_hi: usize,
}

fn group_units(variants: &[ResolvedVariant]) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    for v in variants {
        match units.last_mut() {
            Some(unit) if v.codon_lo <= unit.codon_hi => {
                unit.codon_hi = unit.codon_hi.max(v.codon_hi);
                unit.col_hi = unit.col_hi.max(v.col_hi);
            }
            _ => units.push(Unit {
                codon_lo: v.codon_lo,
                codon_hi: v.codon_hi,
                col_lo: v.col_lo,
                col_hi: v.col_hi,
            }),
        }
    }
    units
}

/// Derive protein variants for all resolved nucleotide variants.
/// Synonymous units are dropped.
pub fn derive_protein_variants(
    core: &CoreAlignment,
    variants: &[ResolvedVariant],
    cds_start: usize,
) -> Result<Vec<ProteinVariant>, CallError> {
    let mapper = CoordinateMapper::new(core);
    let mut out = Vec::new();

    for unit in group_units(variants) {
        // units entirely upstream of the CDS have no protein consequence
        if unit.codon_hi < 0 {
            continue;
        }
        let codon_lo = unit.codon_lo.max(0);

        let Some(anchor) = anchor_column(core, &unit) else {
            continue;
        };
        let anchor_ref = mapper
            .ref_pos_at(anchor)
            .expect("anchor column holds a reference base") as i64;

        let window_start = codon_lo * 3 + cds_start as i64;
        let window_end = unit.codon_hi * 3 + 3 + cds_start as i64;
        let start = mapper.resolve_column(anchor, window_start - anchor_ref)?;
        let end = mapper.resolve_column(anchor, window_end - 1 - anchor_ref)?;
        // a clamped window can collapse entirely; nothing to call then
        if end.ref_pos < start.ref_pos {
            continue;
        }

        // cover trailing insertion columns that belong to the unit
        let reference = core.aligned_reference.as_bytes();
        let mut col_hi = end.column;
        while col_hi + 1 < core.len() && col_hi + 1 <= unit.col_hi && reference[col_hi + 1] == GAP
        {
            col_hi += 1;
        }

        let codon_lo_actual = (start.ref_pos as i64 - cds_start as i64).div_euclid(3);
        let codon_hi_actual = (end.ref_pos as i64 - cds_start as i64).div_euclid(3);
        if codon_hi_actual < codon_lo_actual {
            continue;
        }

        let ref_span = gap_stripped(&core.aligned_reference[start.column..=col_hi]);
        let query_span = gap_stripped(&core.aligned_query[start.column..=col_hi]);

        if let Some(variant) = classify(
            &ref_span,
            &query_span,
            codon_lo_actual,
            codon_hi_actual,
        ) {
            out.push(variant);
        }
    }
    Ok(out)
}

/// First column of the unit that carries a reference base, scanning
/// outward if the unit itself is all insertion columns.
fn anchor_column(core: &CoreAlignment, unit: &Unit) -> Option<usize> {
    let reference = core.aligned_reference.as_bytes();
    (unit.col_lo..=unit.col_hi.min(core.len().saturating_sub(1)))
        .find(|&c| reference[c] != GAP)
        .or_else(|| (0..unit.col_lo).rev().find(|&c| reference[c] != GAP))
        .or_else(|| (unit.col_hi + 1..core.len()).find(|&c| reference[c] != GAP))
}

fn gap_stripped(aligned: &str) -> String {
    aligned.chars().filter(|&c| c != GAP as char).collect()
}

fn classify(
    ref_span: &str,
    query_span: &str,
    codon_lo: i64,
    codon_hi: i64,
) -> Option<ProteinVariant> {
    let ra = translate(ref_span);
    if query_span.len() % 3 != 0 {
        let first = ra.chars().next().unwrap_or('X');
        return Some(ProteinVariant {
            kind: ProteinVariantKind::FrameShift,
            codon_lo,
            codon_hi,
            description: format!("p.{}{}fs", first, codon_lo + 1),
        });
    }
    let qa = translate(query_span);
    if qa == ra {
        return None;
    }

    let ra_chars: Vec<char> = ra.chars().collect();
    let qa_chars: Vec<char> = qa.chars().collect();

    if ra_chars.len() == qa_chars.len() {
        let diffs: Vec<usize> = (0..ra_chars.len())
            .filter(|&i| ra_chars[i] != qa_chars[i])
            .collect();
        if diffs.len() == 1 {
            let i = diffs[0];
            let pos = codon_lo + i as i64;
            return Some(ProteinVariant {
                kind: ProteinVariantKind::Substitution,
                codon_lo: pos,
                codon_hi: pos,
                description: format!("p.{}{}{}", ra_chars[i], pos + 1, qa_chars[i]),
            });
        }
        return Some(trimmed_change(&ra_chars, &qa_chars, codon_lo));
    }

    if qa_chars.is_empty() || (ra_chars.len() > qa_chars.len() && ra.starts_with(&qa)) {
        // reference residues with no query counterpart
        let from = qa_chars.len();
        let lo = codon_lo + from as i64;
        let description = if from + 1 == ra_chars.len() {
            format!("p.{}{}del", ra_chars[from], lo + 1)
        } else {
            format!(
                "p.{}{}_{}{}del",
                ra_chars[from],
                lo + 1,
                ra_chars[ra_chars.len() - 1],
                codon_hi + 1
            )
        };
        return Some(ProteinVariant {
            kind: ProteinVariantKind::Deletion,
            codon_lo: lo,
            codon_hi,
            description,
        });
    }

    if qa_chars.len() > ra_chars.len() && qa.starts_with(&ra) {
        // query-only residues inserted after the last shared codon
        let extra: String = qa_chars[ra_chars.len()..].iter().collect();
        return Some(ProteinVariant {
            kind: ProteinVariantKind::Insertion,
            codon_lo: codon_hi,
            codon_hi,
            description: format!("p.{}ins{}", codon_hi + 1, extra),
        });
    }

    Some(trimmed_change(&ra_chars, &qa_chars, codon_lo))
}

/// Build the change left after equal flanking residues are trimmed away:
/// the reported range covers the affected residues only, not the whole
/// re-projected window.
fn trimmed_change(ra_chars: &[char], qa_chars: &[char], codon_lo: i64) -> ProteinVariant {
    let mut lead = 0;
    while lead < ra_chars.len() && lead < qa_chars.len() && ra_chars[lead] == qa_chars[lead] {
        lead += 1;
    }
    let mut trail = 0;
    while trail < ra_chars.len() - lead
        && trail < qa_chars.len() - lead
        && ra_chars[ra_chars.len() - 1 - trail] == qa_chars[qa_chars.len() - 1 - trail]
    {
        trail += 1;
    }

    let ra = &ra_chars[lead..ra_chars.len() - trail];
    let qa: String = qa_chars[lead..qa_chars.len() - trail].iter().collect();
    let lo = codon_lo + lead as i64;
    let hi = lo + ra.len() as i64 - 1;

    if qa.is_empty() {
        let description = if ra.len() == 1 {
            format!("p.{}{}del", ra[0], lo + 1)
        } else {
            format!("p.{}{}_{}{}del", ra[0], lo + 1, ra[ra.len() - 1], hi + 1)
        };
        return ProteinVariant {
            kind: ProteinVariantKind::Deletion,
            codon_lo: lo,
            codon_hi: hi,
            description,
        };
    }
    if ra.is_empty() {
        return ProteinVariant {
            kind: ProteinVariantKind::Insertion,
            codon_lo: lo - 1,
            codon_hi: lo - 1,
            description: format!("p.{}ins{}", lo, qa),
        };
    }

    let description = if ra.len() == 1 {
        format!("p.{}{}delins{}", ra[0], lo + 1, qa)
    } else {
        format!(
            "p.{}{}_{}{}delins{}",
            ra[0],
            lo + 1,
            ra[ra.len() - 1],
            hi + 1,
            qa
        )
    };
    ProteinVariant {
        kind: ProteinVariantKind::DelIns,
        codon_lo: lo,
        codon_hi: hi,
        description,
    }
}
