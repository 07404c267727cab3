// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use sql_to_postgrest_ir::{Atom, Statement};
use sql_to_postgrest_lowering::{translate, PipelineError};

#[test]
fn select_with_nested_filter_and_order_by() {
    let statement = translate(
        "select id, title from books where published = true and (year > 1950 or year < 1900) order by title asc limit 20",
    )
    .unwrap();
    match statement {
        Statement::Select(select) => {
            assert_eq!(select.from, "books");
            assert_eq!(select.targets.len(), 2);
            assert!(select.filter.is_some());
            assert_eq!(select.sorts.len(), 1);
            assert_eq!(select.limit.unwrap().count, Some(20));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn insert_round_trips_through_the_ir() {
    let statement = translate(
        "insert into books (title, year) values ('Dune', 1965), ('Foundation', 1951) returning id",
    )
    .unwrap();
    match statement {
        Statement::Insert(insert) => {
            assert_eq!(insert.into, "books");
            assert_eq!(insert.values.len(), 2);
            assert_eq!(insert.values[0][1], Atom::Number(1965.0));
            assert_eq!(insert.returning, Some(vec!["id".to_string()]));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn update_rejects_a_non_basic_predicate() {
    let err = translate("update books set price = 9 where title like 'D%'").unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedError { .. }));
}

#[test]
fn delete_rejects_a_non_basic_in_filter() {
    let err = translate("delete from books where id in (1, 2, 3)").unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedError { .. }));
}

#[test]
fn json_serializes_the_resulting_ir() {
    let statement = translate("select * from books").unwrap();
    let json = serde_json::to_value(&statement).unwrap();
    assert!(json.is_object());
}
