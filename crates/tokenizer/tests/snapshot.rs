//! Snapshots serialize with serde and rebuild an equivalent tokenizer.

use pairfuse_tokenizer::{Tokenizer, TokenizerError, TokenizerSnapshot};

fn trained() -> Tokenizer {
    let mut tokenizer = Tokenizer::new();
    tokenizer
        .train(
            ["she sells sea shells by the sea shore", "the shells she sells"],
            1_000,
            25,
        )
        .unwrap();
    tokenizer
}

#[test]
fn snapshot_survives_json() {
    let tokenizer = trained();
    let json = serde_json::to_string(&tokenizer.snapshot()).unwrap();
    let snapshot: TokenizerSnapshot = serde_json::from_str(&json).unwrap();

    let restored = Tokenizer::from_snapshot(&snapshot).unwrap();
    assert_eq!(restored.stats(), tokenizer.stats());
    assert_eq!(restored.snapshot(), tokenizer.snapshot());

    let text = "she sells the shore shells";
    assert_eq!(restored.encode(text), tokenizer.encode(text));
    let tokens = tokenizer.encode(text);
    assert_eq!(restored.decode(&tokens), tokenizer.decode(&tokens));
}

#[test]
fn snapshot_lists_merges_in_rank_order() {
    let snapshot = trained().snapshot();

    assert!(!snapshot.merges.is_empty());
    for (expected, merge) in snapshot.merges.iter().enumerate() {
        assert_eq!(merge.rank as usize, expected);
        assert_eq!(merge.token, format!("{}{}", merge.pair.0, merge.pair.1));
    }
}

#[test]
fn duplicate_pairs_are_rejected() {
    let mut snapshot = trained().snapshot();
    let mut duplicate = snapshot.merges[0].clone();
    duplicate.rank = snapshot.merges.len() as u32;
    snapshot.merges.push(duplicate);

    assert!(matches!(
        Tokenizer::from_snapshot(&snapshot),
        Err(TokenizerError::InvalidMerge(_))
    ));
}

#[test]
fn stats_serialize_untrained_signal() {
    let json = serde_json::to_value(Tokenizer::new().stats()).unwrap();
    assert_eq!(json["merges_performed"], 0);
    assert!(json["average_merged_token_length"].is_null());
}
