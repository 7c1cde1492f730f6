//! Intersect protein-variant codon ranges with annotated domains.

use panelscan_core::{Domain, ReferenceEntry};

use crate::protein::ProteinVariant;

/// Domains of the matched reference whose codon span overlaps any
/// variant's codon range (closed intervals), in the reference's declared
/// order, each at most once.
pub fn annotate_domains(entry: &ReferenceEntry, variants: &[ProteinVariant]) -> Vec<Domain> {
    entry
        .domains
        .iter()
        .filter(|domain| {
            variants
                .iter()
                .any(|v| domain.span.overlaps(v.codon_lo, v.codon_hi))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protein::ProteinVariantKind;

    use panelscan_core::DomainSpan;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn variant_at(codon: i64) -> ProteinVariant {
        ProteinVariant {
            kind: ProteinVariantKind::Substitution,
            codon_lo: codon,
            codon_hi: codon,
            description: format!("p.A{}V", codon + 1),
        }
    }

    fn entry() -> ReferenceEntry {
        ReferenceEntry {
            name: "ref1".to_string(),
            gene_name: "G".to_string(),
            display_name: "ref1".to_string(),
            sequence: "ATG".repeat(30),
            cds_start: 0,
            domains: vec![Domain {
                name: "BindingSite".to_string(),
                span: DomainSpan {
                    start_codon: 10,
                    end_codon: 15,
                },
            }],
        }
    }

    #[rstest]
    fn test_variant_inside_domain_is_a_hit() {
        let hits = annotate_domains(&entry(), &[variant_at(12)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "BindingSite");
    }

    #[rstest]
    fn test_variant_outside_domain_is_no_hit() {
        let hits = annotate_domains(&entry(), &[variant_at(20)]);
        assert!(hits.is_empty());
    }

    #[rstest]
    fn test_domain_reported_once_for_multiple_variants() {
        let hits = annotate_domains(&entry(), &[variant_at(11), variant_at(14)]);
        assert_eq!(hits.len(), 1);
    }
}
