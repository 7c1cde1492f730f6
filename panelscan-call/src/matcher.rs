//! Scan the panel and pick the best-matching reference.

use log::{debug, warn};

use panelscan_core::{ReferenceEntry, ReferencePanel};

use crate::align::{AlignmentResult, PairwiseDnaAligner};
use crate::errors::CallError;

/// Align the normalized query against every panel entry and keep the
/// strictly-highest-scoring one clearing `query.len() * min_identity`.
///
/// Ties keep the first entry in panel order. Entries whose alignment fails
/// are skipped and logged; if every attempted entry fails, that is an
/// error rather than a quiet no-match.
pub fn match_reference<'p>(
    panel: &'p ReferencePanel,
    query: &str,
    min_identity: f64,
    aligner: &dyn PairwiseDnaAligner,
) -> Result<Option<(&'p ReferenceEntry, AlignmentResult)>, CallError> {
    let min_score = query.len() as f64 * min_identity;
    let mut best: Option<(&ReferenceEntry, AlignmentResult)> = None;
    let mut attempted = 0usize;
    let mut failed = 0usize;

    for entry in panel.entries() {
        attempted += 1;
        let result = match aligner.align(query.as_bytes(), entry.sequence.as_bytes()) {
            Ok(result) => result,
            Err(e) => {
                warn!("skipping reference '{}': {e}", entry.name);
                failed += 1;
                continue;
            }
        };
        debug!(
            "reference '{}' scored {} (threshold {min_score})",
            entry.name, result.score
        );
        if (result.score as f64) < min_score {
            continue;
        }
        let replace = match &best {
            Some((_, incumbent)) => result.score > incumbent.score,
            None => true,
        };
        if replace {
            best = Some((entry, result));
        }
    }

    if best.is_none() && attempted > 0 && failed == attempted {
        return Err(CallError::AllAlignmentsFailed);
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    struct FailingAligner;

    impl PairwiseDnaAligner for FailingAligner {
        fn align(&self, _query: &[u8], _reference: &[u8]) -> Result<AlignmentResult, CallError> {
            Err(CallError::Alignment("boom".to_string()))
        }
    }

    /// Scores every reference identically; for tie-break testing.
    struct ConstantAligner(i32);

    impl PairwiseDnaAligner for ConstantAligner {
        fn align(&self, query: &[u8], reference: &[u8]) -> Result<AlignmentResult, CallError> {
            let _ = reference;
            Ok(AlignmentResult {
                score: self.0,
                aligned_query: String::from_utf8_lossy(query).into_owned(),
                aligned_reference: String::from_utf8_lossy(query).into_owned(),
                ref_start: 0,
            })
        }
    }

    fn panel() -> ReferencePanel {
        ReferencePanel::from_json_str(
            r#"{
                "first": {"sequence": "ATGAAACCCGGGTTT", "cds_start": 0, "gene": "F", "features": {}},
                "second": {"sequence": "ATGAAACCCGGGTTT", "cds_start": 0, "gene": "S", "features": {}}
            }"#,
        )
        .unwrap()
    }

    #[rstest]
    fn test_ties_keep_first_panel_entry() {
        let panel = panel();
        let aligner = ConstantAligner(15);
        let (entry, _) = match_reference(&panel, "ATGAAACCCGGGTTT", 0.7, &aligner)
            .unwrap()
            .unwrap();
        assert_eq!(entry.name, "first");
    }

    #[rstest]
    fn test_below_threshold_is_no_match() {
        let panel = panel();
        let aligner = ConstantAligner(3);
        let best = match_reference(&panel, "ATGAAACCCGGGTTT", 0.7, &aligner).unwrap();
        assert!(best.is_none());
    }

    #[rstest]
    fn test_every_failure_is_an_error() {
        let panel = panel();
        let err = match_reference(&panel, "ATGAAACCC", 0.7, &FailingAligner).unwrap_err();
        assert!(matches!(err, CallError::AllAlignmentsFailed));
    }
}
