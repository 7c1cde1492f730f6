use std::fs;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use serde_json::{Map, Value, json};

use panelscan_call::{QueryOptions, QueryOutcome, query_sequence};
use panelscan_core::ReferencePanel;

pub fn run_query(matches: &ArgMatches) -> Result<()> {
    let panel_file = matches
        .get_one::<String>("panel")
        .expect("A path to a panel file is required.");

    let sequence = match matches.get_one::<String>("sequence") {
        Some(sequence) => sequence.clone(),
        None => {
            let input = matches.get_one::<String>("input").ok_or_else(|| {
                anyhow::anyhow!("Provide a sequence on the command line or via --input")
            })?;
            fs::read_to_string(input)
                .with_context(|| format!("Could not read query sequence from {input}"))?
        }
    };

    let mut options = QueryOptions::default();
    if let Some(fraction) = matches.get_one::<String>("min-identity") {
        options.min_identity = fraction
            .parse::<f64>()
            .with_context(|| format!("Invalid minimum identity fraction: {fraction}"))?;
        if !(0.0..=1.0).contains(&options.min_identity) {
            return Err(anyhow::anyhow!(
                "Minimum identity must be between 0 and 1, got {}",
                options.min_identity
            ));
        }
    }

    let panel = ReferencePanel::from_json_file(panel_file)
        .with_context(|| format!("Could not load reference panel from {panel_file}"))?;
    info!("loaded panel with {} entries", panel.len());

    let outcome = query_sequence(&panel, &sequence, &options)?;
    println!("{}", serde_json::to_string_pretty(&outcome_to_json(&outcome)?)?);

    Ok(())
}

fn outcome_to_json(outcome: &QueryOutcome) -> Result<Value> {
    // Domain hits render as a name -> interval mapping in declared order.
    let mut domain_hits = Map::new();
    for domain in &outcome.domain_hits {
        domain_hits.insert(domain.name.clone(), serde_json::to_value(domain.span)?);
    }

    let report = match &outcome.report {
        Some(report) => serde_json::to_value(report)?,
        None => json!({}),
    };

    Ok(json!({
        "reference": outcome.reference_name,
        "gene": outcome.gene_name,
        "nucleotide_variants": outcome.nucleotide_variants,
        "protein_variants": outcome.protein_variants,
        "domain_hits": domain_hits,
        "query_protein": outcome.query_protein,
        "report": report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use panelscan_core::{Domain, DomainSpan};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_match_outcome_renders_empty_report() {
        let outcome = QueryOutcome {
            reference_name: "general".to_string(),
            gene_name: "unknown".to_string(),
            nucleotide_variants: Vec::new(),
            protein_variants: Vec::new(),
            domain_hits: Vec::new(),
            report: None,
            query_protein: None,
        };
        let value = outcome_to_json(&outcome).unwrap();
        assert_eq!(value["reference"], "general");
        assert_eq!(value["gene"], "unknown");
        assert_eq!(value["report"], json!({}));
        assert_eq!(value["query_protein"], Value::Null);
    }

    #[test]
    fn test_domain_hits_render_as_a_mapping() {
        let outcome = QueryOutcome {
            reference_name: "ref1".to_string(),
            gene_name: "DEMO1".to_string(),
            nucleotide_variants: vec!["r.18G>C".to_string()],
            protein_variants: vec!["p.M6I".to_string()],
            domain_hits: vec![Domain {
                name: "BindingSite".to_string(),
                span: DomainSpan {
                    start_codon: 10,
                    end_codon: 15,
                },
            }],
            report: None,
            query_protein: Some("MKP".to_string()),
        };
        let value = outcome_to_json(&outcome).unwrap();
        assert_eq!(
            value["domain_hits"],
            json!({"BindingSite": {"start_codon": 10, "end_codon": 15}})
        );
        assert_eq!(value["nucleotide_variants"], json!(["r.18G>C"]));
    }
}
