#![allow(unused)]
//! Filter, block and owner-token integration harness.
//!
//! # What this covers
//!
//! - **Tier disjointness**: no field is ever both loosely and strictly
//!   constrained, whatever the parsed query holds.
//! - **Address-high null**: an address lookup always carries a strict
//!   address-high constraint.
//! - **One input, one filter**: clearing any single component of a fully
//!   populated query removes exactly its loose filter, while clearing the
//!   high end keeps the strict constraint and turns it null.
//! - **Block ranges**: every number lies in its own block, blocks are 100
//!   wide and start on a multiple of 100 (negative numbers floor down).
//! - **Owner tokens**: uppercase, whitespace-free, order-preserving.
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;
use ais_core::block::{resolve_block, BlockRange, BLOCK_SIZE};
use ais_core::filter::{
    address_filters, street_filters, LOOSE_ADDRESS_FIELDS, STREET_FIELDS, STRICT_ADDRESS_FIELDS,
};
use ais_core::owner::owner_tokens;
use ais_core::parser::{AddressParser, BasicParser};
use ais_core::{AddressField, ParsedQuery};
use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn opt_word() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Z]{1,8}")
}

prop_compose! {
    fn parsed_query()(
        street_name in opt_word(),
        street_predir in opt_word(),
        street_postdir in opt_word(),
        street_suffix in opt_word(),
        address_low in proptest::option::of(1i64..10_000),
        address_high_full in proptest::option::of("[0-9]{1,5}"),
        unit_type in opt_word(),
        unit_num in proptest::option::of("[0-9A-Z]{1,3}"),
    ) -> ParsedQuery {
        ParsedQuery {
            street_name,
            street_predir,
            street_postdir,
            street_suffix,
            address_full: address_low.map(|n| n.to_string()),
            address_low,
            address_high_full,
            unit_type,
            unit_num,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn full_query()(
        street_name in "[A-Z]{1,8}",
        street_predir in "[A-Z]{1,2}",
        street_postdir in "[A-Z]{1,2}",
        street_suffix in "[A-Z]{2,4}",
        address_low in 1i64..10_000,
        address_high_full in "[0-9]{1,5}",
        unit_num in "[0-9A-Z]{1,3}",
    ) -> ParsedQuery {
        ParsedQuery {
            street_name: Some(street_name),
            street_predir: Some(street_predir),
            street_postdir: Some(street_postdir),
            street_suffix: Some(street_suffix),
            address_full: Some(address_low.to_string()),
            address_low: Some(address_low),
            address_high_full: Some(address_high_full),
            unit_num: Some(unit_num),
            ..Default::default()
        }
    }
}

/// Clears the query component behind one loose field.
fn clear(parsed: &mut ParsedQuery, field: AddressField) {
    match field {
        AddressField::StreetName => parsed.street_name = None,
        AddressField::StreetPredir => parsed.street_predir = None,
        AddressField::StreetPostdir => parsed.street_postdir = None,
        AddressField::StreetSuffix => parsed.street_suffix = None,
        AddressField::UnitNum => parsed.unit_num = None,
        AddressField::AddressLow => {
            parsed.address_low = None;
            parsed.address_full = None;
        }
        other => panic!("{other:?} has no loose input"),
    }
}

// ---------------------------------------------------------------------------
// Address filters
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tiers_are_disjoint(parsed in parsed_query(), opa_only in any::<bool>()) {
        let (spec, aux) = address_filters(&parsed, opa_only);
        for field in spec.loose_filters().keys() {
            prop_assert!(!spec.strict_filters().contains_key(field));
            prop_assert!(LOOSE_ADDRESS_FIELDS.contains(field));
        }
        for field in spec.strict_filters().keys() {
            prop_assert!(STRICT_ADDRESS_FIELDS.contains(field));
        }
        prop_assert_eq!(aux.exclude_non_opa, opa_only);
    }

    #[test]
    fn address_high_is_always_strict(parsed in parsed_query()) {
        let (spec, aux) = address_filters(&parsed, false);
        prop_assert_eq!(
            spec.constraint(AddressField::AddressHigh),
            Some(parsed.address_high_full.as_deref())
        );
        prop_assert_eq!(aux.include_child_units, parsed.address_high_full.is_some());
    }

    #[test]
    fn loose_fields_follow_presence(parsed in parsed_query()) {
        let (spec, _) = address_filters(&parsed, false);
        prop_assert_eq!(
            spec.loose_filters().contains_key(&AddressField::StreetName),
            parsed.street_name.is_some()
        );
        prop_assert_eq!(
            spec.loose_filters().contains_key(&AddressField::UnitNum),
            parsed.unit_num.is_some()
        );
    }

    #[test]
    fn clearing_one_input_drops_one_loose_filter(parsed in full_query()) {
        let (full, _) = address_filters(&parsed, false);
        prop_assert_eq!(full.loose_filters().len(), LOOSE_ADDRESS_FIELDS.len());
        prop_assert_eq!(full.strict_filters().len(), 1);

        for field in LOOSE_ADDRESS_FIELDS {
            let mut cleared = parsed.clone();
            clear(&mut cleared, field);
            let (spec, _) = address_filters(&cleared, false);
            prop_assert!(!spec.matches_nothing());
            prop_assert_eq!(spec.loose_filters().len(), full.loose_filters().len() - 1);
            prop_assert!(!spec.loose_filters().contains_key(&field));
            prop_assert_eq!(spec.strict_filters().len(), full.strict_filters().len());
        }
    }

    #[test]
    fn clearing_address_high_nulls_the_strict_filter(parsed in full_query()) {
        let (full, _) = address_filters(&parsed, false);
        let high = parsed.address_high_full.clone();
        prop_assert_eq!(full.constraint(AddressField::AddressHigh), Some(high.as_deref()));

        let cleared = ParsedQuery { address_high_full: None, ..parsed.clone() };
        let (spec, _) = address_filters(&cleared, false);
        prop_assert_eq!(spec.strict_filters().len(), full.strict_filters().len());
        prop_assert_eq!(spec.loose_filters().len(), full.loose_filters().len());
        prop_assert_eq!(spec.constraint(AddressField::AddressHigh), Some(None));
    }

    #[test]
    fn street_filters_only_touch_street_fields(parsed in parsed_query()) {
        let spec = street_filters(&parsed);
        prop_assert!(spec.strict_filters().is_empty());
        for field in spec.loose_filters().keys() {
            prop_assert!(STREET_FIELDS.contains(field));
        }
    }
}

// ---------------------------------------------------------------------------
// Block ranges
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn number_lies_in_its_block(n in -100_000i64..100_000) {
        let range = BlockRange::containing(n).unwrap();
        prop_assert!(range.contains(n));
        prop_assert_eq!(range.high - range.low, BLOCK_SIZE);
        prop_assert_eq!(range.low.rem_euclid(BLOCK_SIZE), 0);
        prop_assert!(!range.contains(range.high));
    }
}

#[rstest]
#[case("1250 market st", 1200, 1300)]
#[case("100 market st", 100, 200)]
#[case("99 market st", 0, 100)]
#[case("1234-36 market st", 1200, 1300)]
fn parsed_blocks(#[case] query: &str, #[case] low: i64, #[case] high: i64) {
    let parsed = BasicParser.parse(query);
    let (range, spec) = resolve_block(query, &parsed).unwrap();
    assert_eq!(range, BlockRange { low, high });
    assert_eq!(spec.constraint(AddressField::StreetName), Some(Some("MARKET")));
    assert_eq!(spec.constraint(AddressField::AddressLow), None);
}

#[test]
fn negative_numbers_floor_down() {
    assert_eq!(BlockRange::containing(-1), Some(BlockRange { low: -100, high: 0 }));
    assert_eq!(BlockRange::from_token("-150"), Some(BlockRange { low: -200, high: -100 }));
    assert_eq!(BlockRange::from_token("12R"), None);
}

// ---------------------------------------------------------------------------
// Owner tokens
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn owner_tokens_are_clean(query in "[a-zA-Z \t]{0,40}") {
        let tokens = owner_tokens(&query);
        prop_assert_eq!(tokens.len(), query.split_whitespace().count());
        for token in &tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert_eq!(token, &token.to_uppercase());
        }
    }
}

#[test]
fn owner_tokens_keep_order() {
    assert_eq!(owner_tokens("  Doe   jane "), vec!["DOE", "JANE"]);
    assert!(owner_tokens("").is_empty());
}
