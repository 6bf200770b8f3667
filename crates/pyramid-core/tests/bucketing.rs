// File: crates/pyramid-core/tests/bucketing.rs
// Purpose: Combine/bucket contracts: shape checks, rule validation, pass-through policy, bar widths.

use std::collections::BTreeMap;

use pyramid_core::{
    bucket, bucket_with, combine, AgeDomain, BarWidth, BucketRule, BucketSpec, CombinedSeries, Dataset,
    PyramidError,
};

fn domain() -> AgeDomain {
    AgeDomain::new(0, 5, 21)
}

/// Two series, zero everywhere except band 30 = 100 and band 35 = 50.
fn spike() -> CombinedSeries {
    let mut a = vec![0u64; 21];
    let mut b = vec![0u64; 21];
    a[6] = 100;
    b[7] = 50;
    combine(&domain(), [("a", a), ("b", b)]).expect("combine")
}

#[test]
fn combine_is_band_wise_sum() {
    let combined = spike();
    assert_eq!(combined.len(), 21);
    assert_eq!(combined.get(30), Some(100));
    assert_eq!(combined.get(35), Some(50));
    assert_eq!(combined.get(33), None);
    assert_eq!(combined.total(), 150);
    assert!(combined.iter().filter(|&(band, _)| band != 30 && band != 35).all(|(_, v)| v == 0));
}

#[test]
fn merging_a_range_sums_into_representative() {
    let spec = BucketSpec::new().with_rule(BucketRule::merge_range(&domain(), 30, 45));
    let out = bucket(&spike(), &spec).unwrap();

    // 21 bands, 35 and 40 absorbed.
    assert_eq!(out.len(), 19);
    assert!(out.point_at(35.0).is_none());
    assert!(out.point_at(40.0).is_none());
    let p = out.point_at(30.0).unwrap();
    assert_eq!(p.y_end, 150.0);
    assert_eq!(p.x_end, 35.0);
    assert_eq!(out.total(), spike().total() as f64);
}

#[test]
fn uncovered_bands_pass_through_unchanged() {
    let combined = spike();
    let out = bucket(&combined, &BucketSpec::new()).unwrap();
    assert_eq!(out.len(), 21);
    for (band, total) in combined.iter() {
        assert_eq!(out.point_at(band as f64).unwrap().y_end, total as f64);
    }

    let explicit = BucketSpec::new().with_rule(BucketRule::pass_through(30));
    assert_eq!(bucket(&combined, &explicit).unwrap(), out);
}

#[test]
fn representative_need_not_be_lowest_member() {
    let spec = BucketSpec::new().with_rule(BucketRule::merge([30, 35, 40], 35));
    let out = bucket(&spike(), &spec).unwrap();
    assert!(out.point_at(30.0).is_none());
    assert_eq!(out.point_at(35.0).unwrap().y_end, 150.0);
}

#[test]
fn span_width_reaches_group_upper_edge() {
    let d = domain();
    let spec = BucketSpec::reference(&d);
    let combined = spike();

    let step = bucket_with(&combined, &spec, BarWidth::Step).unwrap();
    let span = bucket_with(&combined, &spec, BarWidth::Span).unwrap();
    assert_eq!(step.point_at(30.0).unwrap().x_end, 35.0);
    assert_eq!(span.point_at(0.0).unwrap().x_end, 10.0);
    assert_eq!(span.point_at(30.0).unwrap().x_end, 45.0);
    assert_eq!(span.point_at(80.0).unwrap().x_end, 105.0);
    // Untouched bars keep the step width either way.
    assert_eq!(span.point_at(50.0).unwrap().x_end, 55.0);
    assert_eq!(step.y_end(), span.y_end());
}

#[test]
fn mismatched_lengths_are_rejected() {
    let err = combine(&domain(), [("a", vec![1u64; 21]), ("b", vec![1u64; 20])]).unwrap_err();
    assert!(matches!(err, PyramidError::ShapeMismatch(ref m) if m.contains("'b'")), "{err}");
}

#[test]
fn band_sum_past_u64_is_an_error() {
    let d = AgeDomain::new(0, 5, 2);
    let err = combine(&d, [("a", vec![u64::MAX, 0]), ("b", vec![1, 0])]).unwrap_err();
    assert!(matches!(err, PyramidError::Overflow(ref m) if m.contains("band 0") && m.contains("'b'")), "{err}");

    let at_limit = combine(&d, [("a", vec![u64::MAX - 1, 0]), ("b", vec![1, 0])]).unwrap();
    assert_eq!(at_limit.total(), u64::MAX);
}

#[test]
fn total_past_u64_is_an_error_even_when_each_band_fits() {
    // Each band fits, so would any merge of them, but not all bands together.
    let d = AgeDomain::new(0, 5, 2);
    let half = u64::MAX / 2 + 1;
    let err = combine(&d, [("a", vec![half, half])]).unwrap_err();
    assert!(matches!(err, PyramidError::Overflow(_)), "{err}");
}

#[test]
fn merge_of_large_bands_keeps_exact_sum() {
    let d = AgeDomain::new(0, 5, 3);
    let combined = combine(&d, [("a", vec![u64::MAX / 4, u64::MAX / 4, 1])]).unwrap();
    let out = bucket(&combined, &BucketSpec::new().with_rule(BucketRule::merge([0, 5, 10], 0))).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.y_end()[0], (u64::MAX / 4 * 2 + 1) as f64);
}

#[test]
fn empty_inputs_are_rejected() {
    let none: BTreeMap<String, Vec<u64>> = BTreeMap::new();
    assert!(matches!(combine(&domain(), &none), Err(PyramidError::ShapeMismatch(_))));

    let empty_domain = AgeDomain::new(0, 5, 0);
    assert!(matches!(
        combine(&empty_domain, [("a", Vec::<u64>::new())]),
        Err(PyramidError::ShapeMismatch(_))
    ));

    let zero_step = Dataset::new(AgeDomain::new(0, 0, 3)).with_series("a", vec![1, 2, 3]);
    assert!(matches!(zero_step.combine(), Err(PyramidError::ShapeMismatch(_))));
}

#[test]
fn unknown_bands_are_rejected() {
    let combined = spike();
    for band in [33, 105, 500] {
        let spec = BucketSpec::new().with_rule(BucketRule::merge([30, band], 30));
        match bucket(&combined, &spec) {
            Err(PyramidError::UnknownBand { band: b }) => assert_eq!(b, band),
            other => panic!("expected UnknownBand for {band}, got {other:?}"),
        }
    }
    let spec = BucketSpec::new().with_rule(BucketRule::pass_through(7));
    assert!(matches!(bucket(&combined, &spec), Err(PyramidError::UnknownBand { band: 7 })));
}

#[test]
fn overlapping_rules_are_rejected() {
    let d = domain();
    let spec = BucketSpec::new()
        .with_rule(BucketRule::merge_range(&d, 30, 45))
        .with_rule(BucketRule::merge_range(&d, 40, 50));
    assert!(matches!(spec.validate(&d), Err(PyramidError::InvalidBucket(_))));

    let twice = BucketSpec::new().with_rule(BucketRule::merge([30, 35, 30], 30));
    assert!(matches!(twice.validate(&d), Err(PyramidError::InvalidBucket(_))));

    let pass_and_merge = BucketSpec::new()
        .with_rule(BucketRule::pass_through(35))
        .with_rule(BucketRule::merge([30, 35], 30));
    assert!(matches!(bucket(&spike(), &pass_and_merge), Err(PyramidError::InvalidBucket(_))));
}

#[test]
fn malformed_merge_rules_are_rejected() {
    let d = domain();
    let empty = BucketSpec::new().with_rule(BucketRule::merge(Vec::new(), 30));
    assert!(matches!(empty.validate(&d), Err(PyramidError::InvalidBucket(_))));

    let outsider = BucketSpec::new().with_rule(BucketRule::merge([30, 35], 40));
    assert!(matches!(outsider.validate(&d), Err(PyramidError::InvalidBucket(_))));

    // A range with no domain bands in it produces an empty merge.
    let gap = BucketSpec::new().with_rule(BucketRule::merge_range(&d, 31, 34));
    assert!(matches!(gap.validate(&d), Err(PyramidError::InvalidBucket(_))));
}

#[test]
fn labels_only_attach_to_merge_rules() {
    let d = domain();
    assert_eq!(BucketRule::pass_through(10).with_label("ten").label(), None);
    let rule = BucketRule::merge_from(&d, 80).with_label("80+");
    assert_eq!(rule.label(), Some("80+"));
    assert_eq!(rule.bands(), &[80, 85, 90, 95, 100]);
    assert_eq!(rule.representative(), 80);
}

#[test]
fn merged_ranges_report_group_edges() {
    let d = domain();
    let spec = BucketSpec::reference(&d).with_rule(BucketRule::pass_through(50));
    let ranges = spec.merged_ranges(&d);
    let edges: Vec<_> = ranges.iter().map(|r| (r.lower, r.upper, r.representative, r.label)).collect();
    assert_eq!(edges, vec![(0, 10, 0, None), (30, 45, 30, None), (80, 105, 80, Some("80+"))]);
    assert_eq!(ranges[1].members, &[30, 35, 40]);
}

#[test]
fn domain_helpers() {
    let d = domain();
    assert_eq!(d.last(), 100);
    assert_eq!(d.end(), 105);
    assert_eq!(d.index_of(35), Some(7));
    assert_eq!(d.index_of(36), None);
    assert_eq!(d.band(20), Some(100));
    assert_eq!(d.band(21), None);
    assert_eq!(AgeDomain::from_bands(&[10, 20, 30]).unwrap(), AgeDomain::new(10, 10, 3));
    assert!(matches!(AgeDomain::from_bands(&[0, 5, 15]), Err(PyramidError::ShapeMismatch(_))));
    assert!(matches!(AgeDomain::from_bands(&[5, 0]), Err(PyramidError::ShapeMismatch(_))));
    assert!(matches!(AgeDomain::from_bands(&[]), Err(PyramidError::ShapeMismatch(_))));
}
