//! Nucleotide normalization and the standard genetic code.

/// Normalize a raw read: strip ASCII whitespace, uppercase, and map RNA
/// uracil to thymine.
pub fn normalize_nt(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'U' => 'T',
            other => other,
        })
        .collect()
}

/// True if every base is one of A, C, G, T.
pub fn is_valid_dna(seq: &str) -> bool {
    seq.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

/// Translate one codon to its one-letter amino acid under the standard
/// genetic code. Stops are `*`; anything unrecognized is `X`.
pub fn codon_to_aa(codon: &[u8]) -> u8 {
    match codon {
        b"TTT" | b"TTC" => b'F',
        b"TTA" | b"TTG" | b"CTT" | b"CTC" | b"CTA" | b"CTG" => b'L',
        b"ATT" | b"ATC" | b"ATA" => b'I',
        b"ATG" => b'M',
        b"GTT" | b"GTC" | b"GTA" | b"GTG" => b'V',
        b"TCT" | b"TCC" | b"TCA" | b"TCG" | b"AGT" | b"AGC" => b'S',
        b"CCT" | b"CCC" | b"CCA" | b"CCG" => b'P',
        b"ACT" | b"ACC" | b"ACA" | b"ACG" => b'T',
        b"GCT" | b"GCC" | b"GCA" | b"GCG" => b'A',
        b"TAT" | b"TAC" => b'Y',
        b"TAA" | b"TAG" | b"TGA" => b'*',
        b"CAT" | b"CAC" => b'H',
        b"CAA" | b"CAG" => b'Q',
        b"AAT" | b"AAC" => b'N',
        b"AAA" | b"AAG" => b'K',
        b"GAT" | b"GAC" => b'D',
        b"GAA" | b"GAG" => b'E',
        b"TGT" | b"TGC" => b'C',
        b"TGG" => b'W',
        b"CGT" | b"CGC" | b"CGA" | b"CGG" | b"AGA" | b"AGG" => b'R',
        b"GGT" | b"GGC" | b"GGA" | b"GGG" => b'G',
        _ => b'X',
    }
}

/// Translate a nucleotide string codon by codon, ignoring any trailing
/// partial codon.
pub fn translate(nt: &str) -> String {
    let bytes = nt.as_bytes();
    let mut aa = String::with_capacity(bytes.len() / 3);
    for codon in bytes.chunks_exact(3) {
        aa.push(codon_to_aa(codon) as char);
    }
    aa
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("acgt", "ACGT")]
    #[case("AC GT\n", "ACGT")]
    #[case("augc", "ATGC")]
    #[case("", "")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_nt(raw), expected);
    }

    #[rstest]
    fn test_is_valid_dna() {
        assert!(is_valid_dna("ACGTACGT"));
        assert!(!is_valid_dna("ACGN"));
        assert!(!is_valid_dna("acgt"));
    }

    #[rstest]
    #[case(b"ATG", b'M')]
    #[case(b"ATC", b'I')]
    #[case(b"TAA", b'*')]
    #[case(b"NNN", b'X')]
    fn test_codon_to_aa(#[case] codon: &[u8; 3], #[case] expected: u8) {
        assert_eq!(codon_to_aa(codon), expected);
    }

    #[rstest]
    fn test_translate_drops_partial_codon() {
        assert_eq!(translate("ATGATCAA"), "MI");
        assert_eq!(translate("ATGTGGTAG"), "MW*");
    }
}
