//! End-to-end statement tests.

use arrangement_query::prelude::*;
use arrangement_query::transpiler::{format_instant, normalize_whitespace};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const TABLE_NAME: &str = "test_table";
const SELECTED_FIELDS: &str = "*";

fn random_guids() -> Vec<String> {
    vec![Uuid::new_v4().to_string(), Uuid::new_v4().to_string()]
}

fn quoted(guids: &[String]) -> String {
    guids
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn test_select_without_additional_params() {
    let result = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .build()
        .unwrap();

    assert_eq!(result, format!("SELECT {} FROM {}", SELECTED_FIELDS, TABLE_NAME));
}

#[test]
fn test_select_with_filters() {
    let from_time = Utc::now();
    let to_time = from_time + Duration::days(1);
    let teacher_guids = random_guids();
    let filters = vec![
        Filter::group_name("group"),
        Filter::start_date(from_time, DateExpression::From),
        Filter::start_date(to_time, DateExpression::To),
        Filter::member(teacher_guids.clone(), MemberRole::Teacher).unwrap(),
    ];

    let expected = normalize_whitespace(&format!(
        "SELECT {} FROM {}
         WHERE name ILIKE '%group%'
         AND scheduled_for >= '{}'
         AND scheduled_for <= '{}'
         AND EXISTS (SELECT * FROM jsonb_array_elements(group_data->'members') AS member
                     WHERE member->>'guid' = ANY(ARRAY[{}])
                     AND member->>'role' = 'TEACHER')",
        SELECTED_FIELDS,
        TABLE_NAME,
        format_instant(&from_time),
        format_instant(&to_time),
        quoted(&teacher_guids),
    ));

    let result = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .filters(filters)
        .build()
        .unwrap();

    assert_eq!(result, expected);
}

#[test]
fn test_select_with_sorting() {
    let result = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .order_by(Sorting::mentor(SortDirection::Desc))
        .build()
        .unwrap();

    assert_eq!(
        result,
        "SELECT * FROM test_table ORDER BY (SELECT jsonb_path_query_first(group_data,'$.members[*] ? (@.role == \"TEACHER\").lastName')::text) DESC"
    );
}

#[test]
fn test_select_with_pagination() {
    let result = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .paginate(Pagination::new(2, 25).unwrap())
        .build()
        .unwrap();

    assert_eq!(result, "SELECT * FROM test_table LIMIT 25 OFFSET 25");
}

#[test]
fn test_select_with_all_additional_params() {
    let search_time = Utc::now();
    let intern_guids = random_guids();
    let filters = vec![
        Filter::group_name("group"),
        Filter::start_date(search_time, DateExpression::Equal),
        Filter::member(intern_guids.clone(), MemberRole::Intern).unwrap(),
    ];

    let expected = normalize_whitespace(&format!(
        "SELECT * FROM test_table
         WHERE name ILIKE '%group%'
         AND scheduled_for = '{}'
         AND EXISTS (SELECT * FROM jsonb_array_elements(group_data->'members') AS member
                     WHERE member->>'guid' = ANY(ARRAY[{}])
                     AND member->>'role' = 'INTERN')
         ORDER BY scheduled_for DESC
         LIMIT 15 OFFSET 30",
        format_instant(&search_time),
        quoted(&intern_guids),
    ));

    let result = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .filters(filters)
        .order_by(Sorting::start_day(SortDirection::Desc))
        .paginate(Pagination::new(3, 15).unwrap())
        .build()
        .unwrap();

    assert_eq!(result, expected);
}

#[test]
fn test_zero_page_never_reaches_rendering() {
    let err = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .page(0, 10)
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidPagination(_)));

    assert!(matches!(
        Pagination::new(1, 0),
        Err(QueryError::InvalidPagination(_))
    ));
}

#[test]
fn test_parsed_expressions_match_constructed_filters() {
    let parsed = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .filter(parse_filter("name~group").unwrap())
        .filter(parse_filter("member[mentor]=g1,g2").unwrap())
        .order_by(parse_sorting("start_day:asc").unwrap())
        .build()
        .unwrap();

    let constructed = QueryBuilder::create()
        .select(SELECTED_FIELDS)
        .from(TABLE_NAME)
        .filter(Filter::group_name("group"))
        .filter(Filter::member(["g1", "g2"], MemberRole::Mentor).unwrap())
        .order_by(Sorting::start_day(SortDirection::Asc))
        .build()
        .unwrap();

    assert_eq!(parsed, constructed);
}

#[test]
fn test_builder_from_json_request() {
    let filters: Vec<Filter> = serde_json::from_str(
        r#"[{"kind": "member", "guids": ["g1"], "role": "TEACHER"}]"#,
    )
    .unwrap();
    let sorting: Sorting = serde_json::from_str(r#"{"kind": "start_day", "direction": "ASC"}"#).unwrap();
    let pagination: Pagination = serde_json::from_str(r#"{"page": 1, "size": 10}"#).unwrap();

    let sql = QueryConfig::default()
        .query_builder()
        .filters(filters)
        .order_by(sorting)
        .paginate(pagination)
        .build()
        .unwrap();

    assert_eq!(
        sql,
        "SELECT * FROM groups WHERE EXISTS (SELECT * FROM jsonb_array_elements(group_data->'members') AS member \
         WHERE member->>'guid' = ANY(ARRAY['g1']) AND member->>'role' = 'TEACHER') \
         ORDER BY scheduled_for ASC LIMIT 10 OFFSET 0"
    );
}
