//! Alignment-to-annotation pipeline over a curated reference panel.
//!
//! Given a short nucleotide read, panelscan picks the best-matching
//! reference from the panel, calls nucleotide-level variants against it,
//! derives amino-acid-level consequences (including frameshifts), and
//! flags annotated functional domains the variants touch. Output is shaped
//! like a conventional sequence-search report.
//!
//! ## Quick Start
//!
//! ```
//! use panelscan_core::ReferencePanel;
//! use panelscan_call::{query_sequence, QueryOptions};
//!
//! let panel = ReferencePanel::from_json_str(r#"{
//!     "demo": {
//!         "sequence": "ATGAAACCCGGGTTTATGCATACGACG",
//!         "cds_start": 0,
//!         "gene": "DEMO1",
//!         "features": {"Core": {"start_codon": 2, "end_codon": 5}}
//!     }
//! }"#).unwrap();
//!
//! let outcome = query_sequence(&panel, "ATGAAACCCGGGTTTATCCATACGACG", &QueryOptions::default()).unwrap();
//! assert_eq!(outcome.reference_name, "demo");
//! assert_eq!(outcome.nucleotide_variants, vec!["r.18G>C"]);
//! assert_eq!(outcome.protein_variants, vec!["p.M6I"]);
//! ```
//!
//! The pipeline is synchronous and holds no mutable state between calls;
//! the panel is read-only and safely shared by concurrent queries.

/// Pairwise alignment capability and core-alignment trimming.
pub mod align;

/// Alignment-column / reference-position / codon translation.
pub mod coords;

/// Domain interval intersection.
pub mod domains;

/// Pipeline error taxonomy.
pub mod errors;

/// Best-reference selection.
pub mod matcher;

/// Nucleotide-level variant calling and merging.
pub mod nucleotide;

/// Protein-level consequence derivation.
pub mod protein;

/// Sequence-search-style report rendering.
pub mod report;

/// The `query_sequence` entry point.
pub mod pipeline;

// re-exports
pub use self::align::{
    AlignmentResult, BioPairwiseAligner, CoreAlignment, PairwiseDnaAligner, ScoringParams,
};
pub use self::coords::{CoordinateMapper, ResolvedColumn};
pub use self::errors::CallError;
pub use self::nucleotide::{ResolvedVariant, VariantKind};
pub use self::pipeline::{
    NO_MATCH_GENE, NO_MATCH_REFERENCE, QueryOptions, QueryOutcome, query_sequence,
    query_sequence_with,
};
pub use self::protein::{ProteinVariant, ProteinVariantKind};
pub use self::report::Report;
