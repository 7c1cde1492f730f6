use std::fmt::{self, Display};

use serde::Deserialize;
use serde_json::Value;

use crate::errors::PanelError;
use crate::models::domain::{Domain, DomainSpan};
use crate::sequence::{is_valid_dna, normalize_nt};

/// One curated reference gene fragment: the alignment target, its coding
/// offset, and its annotated functional domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// Panel key, e.g. "insulin".
    pub name: String,
    /// Gene symbol reported alongside the match.
    pub gene_name: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Normalized nucleotide sequence over {A, C, G, T}.
    pub sequence: String,
    /// 0-based nucleotide offset of the first coding base.
    pub cds_start: usize,
    /// Functional domains in declared order.
    pub domains: Vec<Domain>,
}

/// On-disk shape of one panel entry.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    pub sequence: String,
    pub cds_start: usize,
    pub gene: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub features: serde_json::Map<String, Value>,
}

impl ReferenceEntry {
    /// Validate a raw panel entry into a usable reference. Invalid entries
    /// are rejected here so the matcher never sees them.
    pub(crate) fn from_raw(name: &str, raw: RawEntry) -> Result<Self, PanelError> {
        let malformed = |reason: String| PanelError::MalformedReference {
            name: name.to_string(),
            reason,
        };

        let sequence = normalize_nt(&raw.sequence);
        if sequence.is_empty() {
            return Err(malformed("empty sequence".to_string()));
        }
        if !is_valid_dna(&sequence) {
            return Err(malformed("sequence contains non-ACGT bases".to_string()));
        }
        if raw.cds_start >= sequence.len() {
            return Err(malformed(format!(
                "cds_start {} out of bounds for sequence of length {}",
                raw.cds_start,
                sequence.len()
            )));
        }

        let mut domains = Vec::with_capacity(raw.features.len());
        for (feature_name, value) in raw.features {
            let span: DomainSpan = serde_json::from_value(value)
                .map_err(|e| malformed(format!("feature '{feature_name}': {e}")))?;
            if span.start_codon > span.end_codon {
                return Err(malformed(format!(
                    "feature '{}' has start_codon {} > end_codon {}",
                    feature_name, span.start_codon, span.end_codon
                )));
            }
            domains.push(Domain {
                name: feature_name,
                span,
            });
        }

        Ok(ReferenceEntry {
            name: name.to_string(),
            gene_name: raw.gene,
            display_name: raw.example.unwrap_or_else(|| name.to_string()),
            sequence,
            cds_start: raw.cds_start,
            domains,
        })
    }
}

impl Display for ReferenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} nt, {} domains)",
            self.name,
            self.gene_name,
            self.sequence.len(),
            self.domains.len()
        )
    }
}
