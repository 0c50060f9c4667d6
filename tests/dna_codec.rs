use fractaltree::engines::dna::{
    compress, gene::encode_block, parse_strand, uncompress, GeneId, Genome, SCHEMA, STRAND_LEN,
};
use fractaltree::FractalTreeError;
use proptest::prelude::*;

fn strand_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[GTAC]{108}").expect("valid regex")
}

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    SCHEMA
        .iter()
        .map(|spec| i64::from(spec.min)..=i64::from(spec.max))
        .collect::<Vec<_>>()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_compress_round_trip(strand in "[GTAC]{0,300}") {
        let compressed = compress(&strand);
        prop_assert!(compressed.len() <= strand.len());
        prop_assert_eq!(uncompress(&compressed).unwrap(), strand);
    }

    #[test]
    fn prop_in_range_values_survive_a_round_trip(values in values_strategy()) {
        let mut genome = Genome::new();
        for (id, value) in GeneId::ALL.into_iter().zip(&values) {
            prop_assert_eq!(i64::from(genome.set(id, *value)), *value);
        }

        let copy = Genome::from_strand(&genome.compressed()).unwrap();
        prop_assert_eq!(copy.values(), genome.values());
    }

    #[test]
    fn prop_decode_encode_is_stable(strand in strand_strategy()) {
        let first = Genome::from_strand(&strand).unwrap();
        let second = Genome::from_strand(&first.encode()).unwrap();
        prop_assert_eq!(second.encode(), first.encode());
    }

    #[test]
    fn prop_set_always_clamps(index in 0..SCHEMA.len(), value in any::<i64>()) {
        let spec = &SCHEMA[index];
        let mut genome = Genome::new();
        let stored = genome.set(spec.id, value);
        prop_assert!(spec.min <= stored && stored <= spec.max);
        if (i64::from(spec.min)..=i64::from(spec.max)).contains(&value) {
            prop_assert_eq!(i64::from(stored), value);
        }
    }

    #[test]
    fn prop_rejected_strand_changes_nothing(strand in "[GTACX]{1,120}") {
        let mut genome = Genome::new();
        genome.set(GeneId::MaxBranches, 77);
        let before = genome.values();
        if genome.decode(&strand).is_err() {
            prop_assert_eq!(genome.values(), before);
        }
    }
}

#[test]
fn test_block_examples() {
    assert_eq!(encode_block(0), "GGGGGG");
    assert_eq!(encode_block(1), "GGGGGT");
    assert_eq!(encode_block(4095), "CCCCCC");
}

#[test]
fn test_run_length_examples() {
    assert_eq!(compress("AAAACCCCTT"), "4A4CTT");
    assert_eq!(uncompress("4A4CTT").unwrap(), "AAAACCCCTT");
}

#[test]
fn test_share_code_of_defaults() {
    let genome = Genome::new();
    let code = genome.compressed();
    assert!(code.len() < STRAND_LEN);
    assert!(code.chars().any(|c| c.is_ascii_digit()));
    assert_eq!(uncompress(&code).unwrap(), genome.encode());
}

#[test]
fn test_out_of_range_block_is_clamped_on_decode() {
    // branchAngle1 block set to 4095
    let mut strand = Genome::new().encode();
    strand.replace_range(12..18, "CCCCCC");
    let genome = Genome::from_strand(&strand).unwrap();
    assert_eq!(genome.value(GeneId::BranchAngle1), 150);
}

#[test]
fn test_malformed_strands() {
    let cases = [
        "",
        "GTAC",
        "0G",
        "99999999999999999999999G",
        "70000G",
    ];
    for strand in cases {
        assert!(
            matches!(parse_strand(strand), Err(FractalTreeError::MalformedStrand(_))),
            "{strand:?} should be rejected"
        );
    }

    let twenty_genes = "G".repeat(120);
    assert!(parse_strand(&twenty_genes).is_err());
}

#[test]
fn test_unknown_gene_name() {
    let mut genome = Genome::new();
    let err = genome.set_value("leafCount", 3).unwrap_err();
    assert!(matches!(err, FractalTreeError::InvalidParameter(name) if name == "leafCount"));
}
