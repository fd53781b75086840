// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::pattern::Pattern;
use crate::test_utils::{replace_chunks, replace_str, replace_trie, trie_of};
use yare::parameterized;

#[parameterized(
    single = { &[("cat", "dog")], "concatenate", "condogenate" },
    at_start = { &[("cat", "dog")], "catalog", "dogalog" },
    at_end = { &[("cat", "dog")], "tomcat", "tomdog" },
    repeated = { &[("ab", "X")], "ababab", "XXX" },
    longest_at_shared_node = { &[("he", "0"), ("she", "1")], "ushers", "u1rs" },
    shorter_inside_longer = { &[("c", "3"), ("abcd", "!")], "xabcdx", "x!x" },
    deletion = { &[("bad", "")], "a bad day", "a  day" },
    growth = { &[("a", "aaa")], "bab", "baaab" },
    no_match = { &[("zz", "y")], "plain text", "plain text" },
    empty_input = { &[("zz", "y")], "", "" },
)]
fn normal_mode(pairs: &[(&str, &str)], input: &str, expected: &str) {
    let trie = replace_trie(pairs);
    assert_eq!(replace_str(&trie, input, Mode::Normal), expected);
}

#[test]
fn normal_mode_replaces_both_overlapping_candidates() {
    let trie = replace_trie(&[("abc", "X"), ("bcd", "Y")]);
    // "abc" covers 0..3 and "bcd" 1..4; neither contains the other, so both
    // replacements are emitted and the shared bytes are not repeated.
    assert_eq!(replace_str(&trie, "abcd", Mode::Normal), "XY");
    assert_eq!(replace_str(&trie, "zabcdz", Mode::Normal), "zXYz");
}

#[test]
fn lazy_mode_keeps_first_booked_candidate() {
    let trie = replace_trie(&[("abc", "X"), ("bcd", "Y")]);
    assert_eq!(replace_str(&trie, "abcd", Mode::Lazy), "Xd");
    assert_eq!(replace_str(&trie, "zabcdz", Mode::Lazy), "zXdz");
}

#[test]
fn lazy_mode_lets_short_factor_nullify_long_pattern() {
    let trie = replace_trie(&[("bc", "1"), ("abcd", "2")]);
    assert_eq!(replace_str(&trie, "abcd", Mode::Lazy), "a1d");
    assert_eq!(replace_str(&trie, "abcd", Mode::Normal), "2");
}

#[test]
fn search_only_patterns_pass_through() {
    let mut trie = Trie::new();
    trie.add(Pattern::new("cat")).unwrap();
    trie.add(Pattern::new("dog").with_replacement("wolf")).unwrap();
    trie.finalize();

    assert_eq!(
        replace_str(&trie, "cat and dog", Mode::Normal),
        "cat and wolf"
    );
}

mod chunks {
    use super::*;

    #[test]
    fn split_pattern_matches_single_call() {
        let trie = replace_trie(&[("cat", "dog")]);
        let whole = replace_chunks(&trie, &[b"concatenate"], Mode::Normal);
        let split = replace_chunks(&trie, &[b"con", b"catenate"], Mode::Normal);
        assert_eq!(split, whole);
        assert_eq!(split, b"condogenate");
    }

    #[test]
    fn byte_at_a_time_matches_single_call() {
        let trie = replace_trie(&[("he", "0"), ("she", "1"), ("hers", "2")]);
        let input = b"ushers and shepherds";
        let whole = replace_chunks(&trie, &[input], Mode::Normal);
        let bytes: Vec<&[u8]> = input.chunks(1).collect();
        assert_eq!(replace_chunks(&trie, &bytes, Mode::Normal), whole);
    }

    #[test]
    fn backlog_holds_live_prefix() {
        let trie = replace_trie(&[("cat", "dog")]);
        let replacer = Replacer::new(&trie);
        let mut state = ReplaceState::new();
        let mut out = Vec::new();

        replacer
            .replace(&mut state, b"conca", Mode::Normal, |b| out.extend_from_slice(b))
            .unwrap();
        assert_eq!(state.backlog_len(), 2);
        assert_eq!(state.cursor(), 3);

        replacer.flush(&mut state, true, |b| out.extend_from_slice(b));
        assert_eq!(out, b"con");

        replacer
            .replace(&mut state, b"tenate", Mode::Normal, |b| out.extend_from_slice(b))
            .unwrap();
        replacer.flush(&mut state, false, |b| out.extend_from_slice(b));
        assert_eq!(out, b"condogenate");
    }

    #[test]
    fn dead_prefix_leaves_backlog_on_next_chunk() {
        let trie = replace_trie(&[("cat", "dog")]);
        assert_eq!(
            replace_chunks(&trie, &[b"ca", b"b ca", b"r"], Mode::Normal),
            b"cab car"
        );
    }

    #[test]
    fn replacement_past_boundary_is_not_repeated() {
        let trie = replace_trie(&[("abc", "X"), ("cde", "Y")]);
        // After "abcd" the "abc" replacement is committed while "cd" stays
        // live in the backlog.
        let split = replace_chunks(&trie, &[b"abcd", b"x"], Mode::Normal);
        assert_eq!(split, b"Xdx");
    }

    #[test]
    fn empty_chunks_change_nothing() {
        let trie = replace_trie(&[("cat", "dog")]);
        assert_eq!(
            replace_chunks(&trie, &[b"", b"ca", b"", b"t", b""], Mode::Normal),
            b"dog"
        );
    }
}

mod flush {
    use super::*;

    #[test]
    fn second_terminal_flush_emits_nothing() {
        let trie = replace_trie(&[("cat", "dog")]);
        let replacer = Replacer::new(&trie);
        let mut state = ReplaceState::new();
        let mut calls = 0;

        replacer
            .replace(&mut state, b"a cat", Mode::Normal, |_| calls += 1)
            .unwrap();
        replacer.flush(&mut state, false, |_| calls += 1);
        assert_eq!(calls, 1);

        replacer.flush(&mut state, false, |_| calls += 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn terminal_flush_resets_session() {
        let trie = replace_trie(&[("cat", "dog")]);
        let replacer = Replacer::new(&trie);
        let mut state = ReplaceState::with_buffer_capacity(64);

        replacer
            .replace(&mut state, b"xxca", Mode::Normal, |_| {})
            .unwrap();
        replacer.flush(&mut state, false, |_| {});

        assert_eq!(state.stream().base_position(), 0);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.backlog_len(), 0);
        assert_eq!(state.pending_nominees(), 0);
        assert_eq!(state.buffered_len(), 0);
        assert_eq!(state.buffer_capacity(), 64);

        // A new session must not see the old "ca" prefix.
        let mut out = Vec::new();
        replacer
            .replace(&mut state, b"t", Mode::Normal, |b| out.extend_from_slice(b))
            .unwrap();
        replacer.flush(&mut state, false, |b| out.extend_from_slice(b));
        assert_eq!(out, b"t");
    }

    #[test]
    fn keep_flush_only_drains_buffer() {
        let trie = replace_trie(&[("cat", "dog")]);
        let replacer = Replacer::new(&trie);
        let mut state = ReplaceState::new();
        let mut out = Vec::new();

        replacer
            .replace(&mut state, b"a ca", Mode::Normal, |b| out.extend_from_slice(b))
            .unwrap();
        replacer.flush(&mut state, true, |b| out.extend_from_slice(b));

        assert_eq!(out, b"a ");
        assert_eq!(state.stream().base_position(), 4);
        assert_eq!(state.backlog_len(), 2);
    }

    #[test]
    fn sink_receives_bounded_pushes() {
        let trie = replace_trie(&[("o", "0000")]);
        let replacer = Replacer::new(&trie);
        let mut state = ReplaceState::with_buffer_capacity(5);
        let mut pushes: Vec<Vec<u8>> = Vec::new();

        replacer
            .replace(&mut state, b"foo bar boo", Mode::Normal, |b| {
                pushes.push(b.to_vec())
            })
            .unwrap();
        replacer.flush(&mut state, false, |b| pushes.push(b.to_vec()));

        assert!(pushes.iter().all(|p| !p.is_empty() && p.len() <= 5));
        assert_eq!(
            pushes.concat(),
            b"f00000000 bar b00000000".to_vec()
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn open_trie_is_rejected() {
        let mut trie = Trie::new();
        trie.add(Pattern::new("a").with_replacement("b")).unwrap();
        let mut state = ReplaceState::new();

        let err = Replacer::new(&trie)
            .replace(&mut state, b"a", Mode::Normal, |_| {})
            .unwrap_err();
        assert_eq!(err, ReplaceError::NotFinalized);
    }

    #[test]
    fn trie_without_replacements_is_rejected() {
        let trie = trie_of(&["a"]);
        let mut state = ReplaceState::new();

        let err = Replacer::new(&trie)
            .replace(&mut state, b"a", Mode::Normal, |_| {})
            .unwrap_err();
        assert_eq!(err, ReplaceError::NoReplacementsConfigured);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[abc]{1,4}", "[XY]{0,3}"), 1..6)
    }

    fn build(pairs: &[(String, String)]) -> Trie {
        let mut seen = BTreeSet::new();
        let patterns = pairs
            .iter()
            .filter(|(search, _)| seen.insert(search.clone()))
            .map(|(search, replace)| Pattern::new(search.as_str()).with_replacement(replace.as_str()));
        Trie::from_patterns(patterns).unwrap()
    }

    fn split<'a>(bytes: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
        let mut cuts: Vec<usize> = cuts.iter().map(|c| (*c).min(bytes.len())).collect();
        cuts.sort_unstable();
        let mut chunks = Vec::new();
        let mut start = 0;
        for cut in cuts {
            chunks.push(&bytes[start..cut]);
            start = cut;
        }
        chunks.push(&bytes[start..]);
        chunks
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn chunking_does_not_change_output(
            pairs in pairs_strategy(),
            text in "[abcd]{0,48}",
            cuts in prop::collection::vec(0usize..48, 0..4),
            lazy in any::<bool>(),
        ) {
            let trie = build(&pairs);
            let mode = if lazy { Mode::Lazy } else { Mode::Normal };
            let bytes = text.as_bytes();

            let whole = replace_chunks(&trie, &[bytes], mode);
            let chunked = replace_chunks(&trie, &split(bytes, &cuts), mode);
            prop_assert_eq!(chunked, whole);
        }

        #[test]
        fn text_without_pattern_bytes_is_unchanged(
            pairs in pairs_strategy(),
            text in "[d-z ]{0,48}",
        ) {
            let trie = build(&pairs);
            prop_assert_eq!(replace_str(&trie, &text, Mode::Normal), text);
        }
    }
}
