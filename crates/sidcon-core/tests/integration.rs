//! Integration tests for sidcon-core.
//!
//! These tests exercise whole-card flows across the crate: cell splitting,
//! fallback resolution, valuing, upgrade edges, and dual-card merging.

use sidcon_core::bundle::CountedBundle;
use sidcon_core::catalog::{Catalog, CatalogBuilder};
use sidcon_core::converter::{Converter, ConverterError, ConverterKind, Output};
use sidcon_core::cost::Cost;
use sidcon_core::face::{Face, FaceError};
use sidcon_core::feature::{split_cell, Feature};
use sidcon_core::literal::UniqueFeature;
use sidcon_core::merge::{merge_sequences, Merge, MergeError};
use sidcon_core::technology::Era;
use sidcon_core::test_utils::*;
use sidcon_core::upgrade::Upgrade;
use std::sync::Arc;

// ===========================================================================
// Test 1: Dual card halves
// ===========================================================================
//
// Kt'Zr'Kt'Rtl cards are printed as left and right halves. The right half
// prints only the outputs of each converter; merged, the card reads as one
// converter per row.

#[test]
fn dual_card_halves_merge_into_one_face() {
    let left = Face::from_strings(standard(), "Ultra", &["K➾2$", "w/b➪U"], "", &[]).unwrap();
    let right = Face::from_strings(standard(), "Tech", &["$", "➪$"], "", &[]).unwrap();

    let merged = Face::merge(&left, &right).unwrap();
    assert_eq!(merged.name(), "Ultra Tech");

    let expected = Feature::parse_cell(standard(), "K➾3$,w/b➪U$").unwrap();
    assert_eq!(merged.features(), expected.as_slice());

    // Red converter: 3 in, 9 out.
    assert_eq!(merged.features()[0].net_value().unwrap(), value(6.0));
    // White converter with a choice of inputs.
    assert_eq!(merged.features()[1].min_net_value().unwrap(), value(5.0));
    assert_eq!(merged.max_input_value().unwrap(), value(3.0));
}

#[test]
fn dual_card_with_unique_feature_does_not_merge() {
    let left = vec![feature("Variable $")];
    let right = vec![feature("Ack* upgraded")];
    assert_eq!(
        merge_sequences(&left, &right),
        Err(MergeError::UnmergeableUniqueFeature {
            left: UniqueFeature::ContextualIntegratorCacheVps,
            right: UniqueFeature::ContextualIntegratorCacheAcknowledgementUpgrade,
        })
    );
}

// ===========================================================================
// Test 2: Card with an upgrade path
// ===========================================================================

#[test]
fn species_card_front_upgrades_to_back() {
    let back = Arc::new(
        Face::from_strings(standard(), "Bio-Engineering Plant", &["g➪2Y"], "", &[]).unwrap(),
    );
    let front = Face::from_strings(
        standard(),
        "Hydroponic Farm",
        &["g➪Y"],
        "2",
        &[(vec!["Genetic Engineering", "+Antimatter Power"], Arc::clone(&back))],
    )
    .unwrap();

    assert_eq!(front.era(), Ok(Some(Era::II)));
    let edge = &front.upgrades()[0];
    let names: Vec<String> = edge.conditions.iter().map(|u| u.to_string()).collect();
    assert_eq!(names, vec!["Genetic Engineering", "+Antimatter Power"]);
    match &edge.conditions[1] {
        Upgrade::Technology(t) => assert!(t.donation),
        other => panic!("expected Technology, got: {other:?}"),
    }

    let gain = edge.face.converter().unwrap().net_value().unwrap()
        - front.converter().unwrap().net_value().unwrap();
    assert_eq!(gain, value(1.5));
}

#[test]
fn face_reports_the_failing_cell() {
    match Face::from_strings(standard(), "Broken", &["w➪$", "2w➪q"], "", &[]) {
        Err(FaceError::Feature(e)) => {
            assert_eq!(e.input, "2w➪q");
            assert!(matches!(e.converter, ConverterError::Outputs(_)));
        }
        other => panic!("expected Feature error, got: {other:?}"),
    }
}

// ===========================================================================
// Test 3: Whole cells
// ===========================================================================

#[test]
fn feature_cell_with_mixed_features() {
    let cell = "2w➪$,may not use U,,+U";
    assert_eq!(split_cell(cell).len(), 3);

    let features = Feature::parse_cell(standard(), cell).unwrap();
    assert!(matches!(features[0], Feature::Converter(_)));
    assert_eq!(features[1], Feature::Unique(UniqueFeature::MayNotUseUltratech));
    assert_eq!(features[2], Feature::Bundle(bundle(&[(donation("U"), 1)])));
}

#[test]
fn cost_cells() {
    assert!(matches!(
        Cost::parse(standard(), "Die 3"),
        Ok(Cost::FactionSpecific(_))
    ));
    match Cost::parse(standard(), "Nanotechnology,+Quantum Computers") {
        Ok(Cost::Technologies(techs)) => {
            assert_eq!(techs.len(), 2);
            assert!(techs.iter().all(|t| t.era == Era::I));
        }
        other => panic!("expected Technologies, got: {other:?}"),
    }
}

// ===========================================================================
// Test 4: Custom catalog
// ===========================================================================

#[test]
fn custom_catalog_with_multi_character_keys() {
    let mut b = CatalogBuilder::new();
    b.unit("Ag", "Silver", false, Some(2.0))
        .unit("A", "Alloy", false, Some(0.5))
        .unit("$", "Victory point", false, Some(4.0));
    let catalog: Catalog = b.build().unwrap();

    let c = Converter::parse_any(&catalog, "2AgA→$").unwrap();
    assert_eq!(c.kind(), ConverterKind::Purple);
    let inputs = c.inputs().single().unwrap();
    assert_eq!(inputs.total(), 3);
    assert_eq!(c.input_value().unwrap(), value(4.5));
    assert_eq!(c.net_value().unwrap(), value(-0.5));
    assert_eq!(c.to_string(), "A2Ag→$");

    // Adjacent short keys keep their counts so they never fuse into `Ag`.
    let split = Converter::parse_any(&catalog, "AAg→$").unwrap();
    assert_eq!(split.to_string(), "A1Ag→$");
    assert_eq!(Converter::parse_any(&catalog, &split.to_string()).unwrap(), split);

    // Standard keys are unknown here.
    assert!(CountedBundle::parse(&catalog, "w").is_err());
}

#[test]
fn free_converter_merges_like_printed_output() {
    let free = Converter::free(ConverterKind::White, parse_bundle("2$"));
    let printed = converter(ConverterKind::White, "➪2$");
    assert_eq!(free, printed);
    assert_eq!(
        printed.outputs().single(),
        Some(&Output::Bundle(parse_bundle("2$")))
    );

    let merged = converter(ConverterKind::White, "U➪").merge(&free).unwrap();
    assert_eq!(merged.net_value().unwrap(), value(3.0));
}

#[test]
fn parsed_values_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Catalog>();
    assert_send_sync::<Feature>();
    assert_send_sync::<Face>();
    assert_send_sync::<Upgrade>();
}
