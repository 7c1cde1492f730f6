//! The per-query pipeline: match → trim → call → derive → annotate.
//!
//! One straight pass per call, no state surviving it except the read-only
//! panel the caller holds.

use panelscan_core::sequence::normalize_nt;
use panelscan_core::{Domain, ReferencePanel};

use crate::align::{BioPairwiseAligner, CoreAlignment, PairwiseDnaAligner, ScoringParams};
use crate::domains::annotate_domains;
use crate::errors::CallError;
use crate::matcher::match_reference;
use crate::nucleotide::call_nucleotide_variants;
use crate::protein::derive_protein_variants;
use crate::report::{Report, build_report};

pub const NO_MATCH_REFERENCE: &str = "general";
pub const NO_MATCH_GENE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
    /// Minimum identity fraction a candidate must clear (0.5–0.7 typical).
    pub min_identity: f64,
    pub scoring: ScoringParams,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            min_identity: 0.7,
            scoring: ScoringParams::default(),
        }
    }
}

/// Everything a caller gets back for one read.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub reference_name: String,
    pub gene_name: String,
    pub nucleotide_variants: Vec<String>,
    pub protein_variants: Vec<String>,
    pub domain_hits: Vec<Domain>,
    pub report: Option<Report>,
    /// Aligned query read as amino acids (whole in-frame codons).
    pub query_protein: Option<String>,
}

impl QueryOutcome {
    fn no_match() -> Self {
        QueryOutcome {
            reference_name: NO_MATCH_REFERENCE.to_string(),
            gene_name: NO_MATCH_GENE.to_string(),
            nucleotide_variants: Vec::new(),
            protein_variants: Vec::new(),
            domain_hits: Vec::new(),
            report: None,
            query_protein: None,
        }
    }
}

/// Run the full pipeline with the default `bio`-backed aligner.
pub fn query_sequence(
    panel: &ReferencePanel,
    raw_read: &str,
    options: &QueryOptions,
) -> Result<QueryOutcome, CallError> {
    let aligner = BioPairwiseAligner::new(options.scoring);
    query_sequence_with(panel, raw_read, options, &aligner)
}

/// Run the full pipeline with an injected alignment collaborator.
pub fn query_sequence_with(
    panel: &ReferencePanel,
    raw_read: &str,
    options: &QueryOptions,
    aligner: &dyn PairwiseDnaAligner,
) -> Result<QueryOutcome, CallError> {
    let query = normalize_nt(raw_read);
    if query.is_empty() {
        return Ok(QueryOutcome::no_match());
    }

    let Some((entry, result)) = match_reference(panel, &query, options.min_identity, aligner)?
    else {
        return Ok(QueryOutcome::no_match());
    };

    let core = CoreAlignment::from_result(&result);
    let resolved = call_nucleotide_variants(&core, entry.cds_start);
    let protein = derive_protein_variants(&core, &resolved, entry.cds_start)?;
    let domain_hits = annotate_domains(entry, &protein);
    let report = build_report(entry, &core, result.score);

    Ok(QueryOutcome {
        reference_name: entry.name.clone(),
        gene_name: entry.gene_name.clone(),
        nucleotide_variants: resolved.into_iter().map(|v| v.description).collect(),
        protein_variants: protein.into_iter().map(|v| v.description).collect(),
        domain_hits,
        query_protein: Some(core.query_protein(entry.cds_start)),
        report: Some(report),
    })
}
