//! End-to-end filter scenarios: inference, operator resolution, encoding and
//! local evaluation on small hand-built forms.

use formbase_core::{
    encode, evaluate, infer_profiles, operators_for, Category, ClauseDraft, Combinator, Field,
    FilterSet, Operator, Record,
};

fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn test_declared_numeric_field_filters_numerically() {
    let fields = vec![Field::new("Age", Category::PlainText).numeric()];
    let records = vec![
        Record::new(1).with_value("Age", "10"),
        Record::new(2).with_value("Age", "20"),
        Record::new(3).with_value("Age", "abc"),
    ];

    let profiles = infer_profiles(&fields, &records);
    let profile = profiles.get(Category::PlainText);
    assert!(profile.has_numeric_evidence);
    assert!(
        !profile.has_text_evidence,
        "values under a declared numeric field must not add text evidence"
    );

    let mut filters = FilterSet::new();
    filters
        .push(
            ClauseDraft::new()
                .category(Category::PlainText)
                .operator(Operator::GreaterThan)
                .value("15"),
            &profiles,
        )
        .expect("GreaterThan is legal for numeric data");

    assert_eq!(ids(&evaluate(&records, &fields, &filters)), vec![2]);
}

#[test]
fn test_undeclared_field_with_numeric_value_is_mixed() {
    let fields = vec![Field::new("Notes", Category::MultilineText)];
    let records = vec![
        Record::new(1).with_value("Notes", "Hello world"),
        Record::new(2).with_value("Notes", "42"),
    ];

    let profiles = infer_profiles(&fields, &records);
    let profile = profiles.get(Category::MultilineText);
    assert!(profile.has_numeric_evidence);
    assert!(profile.has_text_evidence);
    assert_eq!(operators_for(&profile).len(), 7);

    let mut filters = FilterSet::new();
    filters
        .push(
            ClauseDraft::new()
                .category(Category::MultilineText)
                .operator(Operator::Contains)
                .value("hello"),
            &profiles,
        )
        .unwrap();

    assert_eq!(ids(&evaluate(&records, &fields, &filters)), vec![1]);
}

#[test]
fn test_or_combinator_behaves_as_and_on_both_paths() {
    let fields = vec![
        Field::new("Name", Category::PlainText),
        Field::new("Color", Category::Dropdown).with_options(["red", "blue"]),
    ];
    let records = vec![
        Record::new(1).with_value("Name", "Ann").with_value("Color", "red"),
        Record::new(2).with_value("Name", "Ann").with_value("Color", "blue"),
        Record::new(3).with_value("Name", "Bob").with_value("Color", "red"),
    ];
    let profiles = infer_profiles(&fields, &records);

    let mut filters = FilterSet::new();
    filters
        .push(
            ClauseDraft::new()
                .category(Category::PlainText)
                .operator(Operator::Equals)
                .value("ann"),
            &profiles,
        )
        .unwrap();
    filters
        .push(
            ClauseDraft::new()
                .category(Category::Dropdown)
                .operator(Operator::Equals)
                .value("red")
                .combinator(Combinator::Or),
            &profiles,
        )
        .unwrap();

    // OR would return 1, 2 and 3
    assert_eq!(ids(&evaluate(&records, &fields, &filters)), vec![1]);
    assert_eq!(
        encode(2, &filters),
        "/record?form_id=eq.2&values->>%22plain_text%22=eq.ann&values->>%22dropdown%22=eq.red"
    );
}

#[test]
fn test_encode_percent_encodes_key_and_value() {
    let fields = vec![Field::new("Label", Category::PlainText)];
    let profiles = infer_profiles(&fields, &[]);

    let mut filters = FilterSet::new();
    filters
        .push(
            ClauseDraft::new()
                .category(Category::PlainText)
                .operator(Operator::Equals)
                .value("A B"),
            &profiles,
        )
        .unwrap();

    let query = encode(5, &filters);
    assert!(query.starts_with("/record?form_id=eq.5&"));
    assert!(query.contains("%22plain_text%22"));
    assert!(query.ends_with("=eq.A%20B"));
}

#[test]
fn test_empty_filter_set_is_identity_on_both_paths() {
    let fields = vec![Field::new("Name", Category::PlainText)];
    let records = vec![
        Record::new(1).with_value("Name", "x"),
        Record::new(2),
    ];
    let filters = FilterSet::new();

    assert_eq!(evaluate(&records, &fields, &filters), records);
    assert_eq!(encode(8, &filters), "/record?form_id=eq.8");
}

#[test]
fn test_category_without_data_cannot_be_selected() {
    let fields = vec![Field::new("Name", Category::PlainText)];
    let profiles = infer_profiles(&fields, &[]);

    assert!(operators_for(&profiles.get(Category::Dropdown)).is_empty());
    let mut filters = FilterSet::new();
    let result = filters.push(
        ClauseDraft::new()
            .category(Category::Dropdown)
            .operator(Operator::Equals)
            .value("red"),
        &profiles,
    );
    assert!(result.is_err());
    assert!(filters.is_empty());
}
