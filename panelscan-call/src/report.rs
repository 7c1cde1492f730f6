//! Minimal sequence-search-style report rendering.
//!
//! The shape mirrors the leaf of a BLAST JSON2 result (`hits` → `hsps`)
//! so downstream consumers built against that schema keep working;
//! consumers must not assume fields beyond the ones here.

use serde::Serialize;

use panelscan_core::ReferenceEntry;

use crate::align::{CoreAlignment, GAP};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub hits: Vec<ReportHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHit {
    pub description: Vec<HitDescription>,
    pub hsps: Vec<Hsp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitDescription {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hsp {
    pub score: i32,
    pub query_strand: String,
    pub hit_strand: String,
    pub align_len: usize,
    /// 1-based reference offset of the first aligned column.
    pub aln_start: usize,
    pub qseq: String,
    pub midline: String,
    pub hseq: String,
}

/// `|` on identity, `-` where either side is gapped, `.` on mismatch.
fn midline(query: &str, reference: &str) -> String {
    query
        .bytes()
        .zip(reference.bytes())
        .map(|(q, r)| {
            if q == GAP || r == GAP {
                '-'
            } else if q == r {
                '|'
            } else {
                '.'
            }
        })
        .collect()
}

pub fn build_report(entry: &ReferenceEntry, core: &CoreAlignment, score: i32) -> Report {
    Report {
        hits: vec![ReportHit {
            description: vec![HitDescription {
                id: entry.name.clone(),
                title: entry.display_name.clone(),
            }],
            hsps: vec![Hsp {
                score,
                query_strand: "Plus".to_string(),
                hit_strand: "Plus".to_string(),
                align_len: core.len(),
                aln_start: core.ref_start + 1,
                qseq: core.aligned_query.clone(),
                midline: midline(&core.aligned_query, &core.aligned_reference),
                hseq: core.aligned_reference.clone(),
            }],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignmentResult;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_midline_symbols() {
        assert_eq!(midline("AC-GA", "ACTG-"), "||-|-");
        assert_eq!(midline("ACGT", "ACCT"), "||.|");
    }

    #[rstest]
    fn test_report_fields() {
        let entry = ReferenceEntry {
            name: "beta".to_string(),
            gene_name: "HBB".to_string(),
            display_name: "Hemoglobin beta".to_string(),
            sequence: "ACGTACGT".to_string(),
            cds_start: 0,
            domains: vec![],
        };
        let core = CoreAlignment::from_result(&AlignmentResult {
            score: 6,
            aligned_query: "GTACGT".to_string(),
            aligned_reference: "GTACGT".to_string(),
            ref_start: 2,
        });
        let report = build_report(&entry, &core, 6);

        let hsp = &report.hits[0].hsps[0];
        assert_eq!(hsp.aln_start, 3);
        assert_eq!(hsp.align_len, 6);
        assert_eq!(hsp.midline, "||||||");
        assert_eq!(report.hits[0].description[0].title, "Hemoglobin beta");
    }
}
