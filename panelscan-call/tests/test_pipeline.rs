use panelscan_call::{QueryOptions, query_sequence};
use panelscan_core::ReferencePanel;

use pretty_assertions::assert_eq;

// 20 codons; codon 5 is ATG, codon 12 is ATC.
const REF1: &str = "ATGAAACCCGGGTTTATGCATACGTACGTACGTACGATCGATCGATTTAAACCCGGGTTT";

fn panel() -> ReferencePanel {
    let contents = format!(
        r#"{{
            "ref1": {{
                "sequence": "{REF1}",
                "cds_start": 0,
                "gene": "DEMO1",
                "example": "Demo gene one",
                "features": {{
                    "BindingSite": {{"start_codon": 10, "end_codon": 15}},
                    "Tail": {{"start_codon": 17, "end_codon": 19}}
                }}
            }},
            "decoy": {{
                "sequence": "CCTCCTCCTCCTCCTCCTCCTCCTCCTCCT",
                "cds_start": 0,
                "gene": "DECOY1",
                "features": {{}}
            }}
        }}"#
    );
    ReferencePanel::from_json_str(&contents).unwrap()
}

#[test]
fn test_exact_in_frame_slice_has_no_variants() {
    let panel = panel();
    let query = &REF1[15..45];
    let outcome = query_sequence(&panel, query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.reference_name, "ref1");
    assert_eq!(outcome.gene_name, "DEMO1");
    assert_eq!(outcome.nucleotide_variants, Vec::<String>::new());
    assert_eq!(outcome.protein_variants, Vec::<String>::new());
    assert!(outcome.domain_hits.is_empty());
}

#[test]
fn test_matched_score_clears_identity_threshold() {
    let panel = panel();
    let options = QueryOptions::default();
    let query = &REF1[15..45];
    let outcome = query_sequence(&panel, query, &options).unwrap();

    let report = outcome.report.expect("matched query carries a report");
    let score = report.hits[0].hsps[0].score;
    assert!(score as f64 >= query.len() as f64 * options.min_identity);
}

#[test]
fn test_repeated_queries_are_idempotent() {
    let panel = panel();
    let query = "ATGAAACCCGGGTTTATCCAT";
    let first = query_sequence(&panel, query, &QueryOptions::default()).unwrap();
    let second = query_sequence(&panel, query, &QueryOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_substitution_fixture() {
    let panel = panel();
    // full reference with the third base of codon 5 (ATG -> ATC) changed
    let mut query = REF1.to_string();
    query.replace_range(17..18, "C");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.reference_name, "ref1");
    assert_eq!(outcome.nucleotide_variants, vec!["r.18G>C"]);
    assert_eq!(outcome.protein_variants, vec!["p.M6I"]);
    assert!(outcome.domain_hits.is_empty());
}

#[test]
fn test_synonymous_substitution_yields_no_protein_variants() {
    let panel = panel();
    // codon 2 CCC -> CCT, still proline
    let mut query = REF1.to_string();
    query.replace_range(8..9, "T");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.nucleotide_variants, vec!["r.9C>T"]);
    assert_eq!(outcome.protein_variants, Vec::<String>::new());
    assert!(outcome.domain_hits.is_empty());
}

#[test]
fn test_frameshift_fixture() {
    let panel = panel();
    // drop the middle base of codon 5 (ATG)
    let mut query = REF1.to_string();
    query.replace_range(16..17, "");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.nucleotide_variants, vec!["r.17del"]);
    assert_eq!(outcome.protein_variants.len(), 1);
    assert!(outcome.protein_variants[0].ends_with("fs"));
    assert_eq!(outcome.protein_variants[0], "p.M6fs");
}

#[test]
fn test_variant_inside_domain_flags_it() {
    let panel = panel();
    // codon 12 ATC -> ATG (I -> M), inside BindingSite (10..15)
    let mut query = REF1.to_string();
    query.replace_range(38..39, "G");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.protein_variants, vec!["p.I13M"]);
    let names: Vec<&str> = outcome.domain_hits.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["BindingSite"]);
}

#[test]
fn test_variant_outside_all_domains_flags_nothing() {
    let panel = panel();
    // codon 16 AAA -> CAA (K -> Q), between BindingSite and Tail
    let mut query = REF1.to_string();
    query.replace_range(48..49, "C");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.protein_variants, vec!["p.K17Q"]);
    assert!(outcome.domain_hits.is_empty());
}

#[test]
fn test_unrecognizable_read_is_the_general_outcome() {
    let panel = panel();
    let outcome =
        query_sequence(&panel, "GGGGGGGGGGGGGGGG", &QueryOptions::default()).unwrap();

    assert_eq!(outcome.reference_name, "general");
    assert_eq!(outcome.gene_name, "unknown");
    assert_eq!(outcome.nucleotide_variants, Vec::<String>::new());
    assert_eq!(outcome.protein_variants, Vec::<String>::new());
    assert!(outcome.domain_hits.is_empty());
    assert!(outcome.report.is_none());
}

#[test]
fn test_empty_read_is_the_general_outcome() {
    let panel = panel();
    let outcome = query_sequence(&panel, "  \n ", &QueryOptions::default()).unwrap();
    assert_eq!(outcome.reference_name, "general");
}

#[test]
fn test_rna_style_read_is_normalized() {
    let panel = panel();
    let query = REF1[15..45].to_lowercase().replace('t', "u");
    let outcome = query_sequence(&panel, &query, &QueryOptions::default()).unwrap();

    assert_eq!(outcome.reference_name, "ref1");
    assert_eq!(outcome.nucleotide_variants, Vec::<String>::new());
}

#[test]
fn test_report_shape_for_clean_match() {
    let panel = panel();
    let query = &REF1[15..45];
    let outcome = query_sequence(&panel, query, &QueryOptions::default()).unwrap();

    let report = outcome.report.unwrap();
    let hsp = &report.hits[0].hsps[0];
    assert_eq!(hsp.aln_start, 16);
    assert_eq!(hsp.align_len, 30);
    assert_eq!(hsp.qseq, hsp.hseq);
    assert!(hsp.midline.chars().all(|c| c == '|'));
    assert_eq!(hsp.query_strand, "Plus");
    assert_eq!(hsp.hit_strand, "Plus");
    assert_eq!(report.hits[0].description[0].title, "Demo gene one");
}

#[test]
fn test_query_protein_reads_through_the_frame() {
    let panel = panel();
    let outcome = query_sequence(&panel, REF1, &QueryOptions::default()).unwrap();
    assert_eq!(
        outcome.query_protein.as_deref(),
        Some("MKPGFMHTYVRTIDRFKPGF")
    );
}
