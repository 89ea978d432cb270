//! Property-based tests for span-exact edit application.
//!
//! These tests verify that:
//! - Text outside a replaced span is byte-identical after applying a change
//! - Change order in the input never changes the result
//! - Validation and application agree on what is acceptable

use camino::Utf8Path;
use codefix_edit::{apply_text_changes, validate_changes};
use codefix_types::{TextChange, TextSpan};
use proptest::prelude::*;

fn arb_text_and_span() -> impl Strategy<Value = (String, u32, u32)> {
    "[a-z ;=]{0,40}".prop_flat_map(|text| {
        let len = text.len() as u32;
        (Just(text), 0..=len).prop_flat_map(move |(text, start)| {
            (Just(text), Just(start), 0..=(len - start))
        })
    })
}

proptest! {
    /// Only the replaced span changes.
    #[test]
    fn replacement_preserves_surrounding_text(
        (text, start, length) in arb_text_and_span(),
        new_text in "[a-z]{0,6}",
    ) {
        let file = Utf8Path::new("a.ts");
        let change = TextChange::replace(TextSpan::new(start, length), new_text.clone());
        let out = apply_text_changes(file, &text, &[change]).unwrap();

        let (s, e) = (start as usize, (start + length) as usize);
        prop_assert!(out.starts_with(&text[..s]));
        prop_assert!(out.ends_with(&text[e..]));
        prop_assert_eq!(&out[s..s + new_text.len()], new_text.as_str());
        prop_assert_eq!(out.len(), text.len() - length as usize + new_text.len());
    }

    /// Two disjoint changes give the same result in either input order.
    #[test]
    fn disjoint_changes_commute((text, start, length) in arb_text_and_span()) {
        let file = Utf8Path::new("a.ts");
        let end = start + length;
        let first = TextChange::replace(TextSpan::new(start, length), "X");
        let second = TextChange::replace(TextSpan::new(end, text.len() as u32 - end), "Y");

        let forward = apply_text_changes(file, &text, &[first.clone(), second.clone()]).unwrap();
        let backward = apply_text_changes(file, &text, &[second, first]).unwrap();
        prop_assert_eq!(forward, backward);
    }

    /// Validation never rejects a single in-bounds change over ASCII text.
    #[test]
    fn in_bounds_ascii_changes_validate((text, start, length) in arb_text_and_span()) {
        let file = Utf8Path::new("a.ts");
        let change = TextChange::replace(TextSpan::new(start, length), "z");
        prop_assert!(validate_changes(file, &text, &[change]).is_ok());
    }
}
