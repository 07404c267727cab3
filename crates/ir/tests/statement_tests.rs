use sql_to_postgrest_ir::{
    Atom, ColumnFilter, Filter, FilterValue, Insert, LogicalFilter, LogicalOperator, Operator,
    Select, Statement, Target,
};

#[test]
fn select_star_is_the_canonical_wildcard() {
    let select = Select::new("books", vec![Target::wildcard()]).unwrap();
    let statement = Statement::Select(select);
    match statement {
        Statement::Select(s) => assert!(Target::is_canonical_wildcard(&s.targets)),
        _ => panic!("expected Select"),
    }
}

#[test]
fn nested_logical_filter_preserves_negation_per_node() {
    let leaf_a = Filter::Column(ColumnFilter::new(
        "rating",
        Operator::Gt,
        FilterValue::Atom(Atom::Number(4.0)),
    ));
    let leaf_b = Filter::Column(ColumnFilter::new(
        "year",
        Operator::Lt,
        FilterValue::Atom(Atom::Number(2000.0)),
    ));
    let inner = Filter::Logical(LogicalFilter::new(LogicalOperator::And, vec![leaf_a, leaf_b]).unwrap());
    let leaf_c = Filter::Column(ColumnFilter::new(
        "author",
        Operator::Eq,
        FilterValue::Atom(Atom::String("asimov".into())),
    ));
    let root = LogicalFilter::new(LogicalOperator::Or, vec![inner, leaf_c]).unwrap();

    assert!(!root.negate);
    assert_eq!(root.values.len(), 2);
    if let Filter::Logical(inner) = &root.values[0] {
        assert_eq!(inner.operator, LogicalOperator::And);
        assert_eq!(inner.values.len(), 2);
    } else {
        panic!("expected nested logical filter");
    }
}

#[test]
fn insert_with_two_rows_keeps_insertion_order() {
    let insert = Insert::new(
        "books",
        vec!["title".into(), "year".into()],
        vec![
            vec![Atom::String("X".into()), Atom::Number(1999.0)],
            vec![Atom::String("Y".into()), Atom::Number(2001.0)],
        ],
    )
    .unwrap();

    assert_eq!(insert.values.len(), 2);
    assert_eq!(insert.values[0][0], Atom::String("X".into()));
    assert_eq!(insert.values[1][0], Atom::String("Y".into()));
}
