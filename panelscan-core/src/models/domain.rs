use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A closed codon interval, relative to the CDS start of its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSpan {
    pub start_codon: u32,
    pub end_codon: u32,
}

impl DomainSpan {
    /// Closed-interval overlap against another codon range.
    pub fn overlaps(&self, lo: i64, hi: i64) -> bool {
        i64::from(self.start_codon) <= hi && lo <= i64::from(self.end_codon)
    }
}

/// An annotated functional region of a reference entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub span: DomainSpan,
}

impl Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..{}]",
            self.name, self.span.start_codon, self.span.end_codon
        )
    }
}
