//! End-to-end statement assembly tests

use chrono::NaiveDate;
use sqlwright::{Delete, Error, Insert, Select, SelectJoin, Statement, Update, Value};

#[test]
fn select_with_every_clause_kind() {
    let query = Select::new("posts")
        .unwrap()
        .table_alias("p")
        .unwrap()
        .select_as("title", "t")
        .unwrap()
        .where_("author", "=", "Alice", Some("author"))
        .unwrap()
        .group("category")
        .unwrap()
        .having("score", "SUM", ">", 100)
        .unwrap()
        .order("published_at", Select::SORT_DESC)
        .unwrap()
        .limit(25, Some(50))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT title AS t FROM posts AS p WHERE author = :author GROUP BY category \
         HAVING SUM(score) > 100 ORDER BY published_at DESC LIMIT 25 OFFSET 50"
    );
}

#[test]
fn where_or_merges_with_previous_clause_only() {
    let query = Select::new("posts")
        .unwrap()
        .where_("author", "=", "x", Some("a"))
        .unwrap()
        .where_or("author", "=", "y", Some("b"))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM posts WHERE (author = :a OR author = :b)"
    );
    assert_eq!(
        query.bindings(),
        &[
            ("a".to_string(), Value::String("x".to_string())),
            ("b".to_string(), Value::String("y".to_string())),
        ]
    );
}

#[test]
fn where_or_without_prior_clause_fails() {
    let err = Select::new("posts")
        .unwrap()
        .where_or("author", "=", "x", Some("a"))
        .unwrap_err();
    assert_eq!(err, Error::missing_prior_clause("WHERE"));
}

#[test]
fn where_or_is_null_wraps_previous_clause() {
    let query = Select::new("demo")
        .unwrap()
        .where_("random", "=", 1, Some("random"))
        .unwrap()
        .where_or_is_null("random")
        .unwrap();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM demo WHERE (random = :random OR random IS NULL)"
    );
}

#[test]
fn where_not_like_with_escape_char() {
    let query = Select::new("posts")
        .unwrap()
        .where_not_like("tags", "%sql#%%", Some("#"), Some("pattern"))
        .unwrap();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM posts WHERE tags NOT LIKE :pattern ESCAPE '#'"
    );
}

#[test]
fn where_between_integers_inlines_bounds() {
    let query = Select::new("posts")
        .unwrap()
        .where_between("field", 5, 10)
        .unwrap();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM posts WHERE field BETWEEN 5 AND 10"
    );
    // inlined bounds never touch the binding map
    assert!(query.bindings().is_empty());
}

#[test]
fn where_between_dates_quotes_bounds() {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2019, 6, 30)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    let query = Select::new("posts")
        .unwrap()
        .where_not_between("published_at", start, end)
        .unwrap();
    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT * FROM posts WHERE published_at NOT BETWEEN \
         '2019-01-01 00:00:00' AND '2019-06-30 23:59:59'"
    );
}

#[test]
fn where_between_mixed_types_fails() {
    let date = NaiveDate::from_ymd_opt(2019, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = Select::new("posts")
        .unwrap()
        .where_between("field", Value::Int(1), date)
        .unwrap_err();
    assert_eq!(
        err,
        Error::TypeMismatch {
            clause: "WHERE BETWEEN".to_string()
        }
    );
}

#[test]
fn where_in_binds_anonymous_parameters() {
    let query = Select::new("posts")
        .unwrap()
        .where_in(
            "status",
            vec![Value::from("draft"), Value::from("published")],
        )
        .unwrap();

    let sql = query.to_sql().unwrap();
    assert!(sql.starts_with("SELECT * FROM posts WHERE status IN (:"));
    assert_eq!(query.bindings().len(), 2);

    // every placeholder in the text has a backing binding
    for (name, _) in query.bindings() {
        assert!(sql.contains(&format!(":{name}")));
    }
}

#[test]
fn select_join_full_statement() {
    let query = SelectJoin::new("posts", "users")
        .unwrap()
        .select(["title"])
        .unwrap()
        .inner_join("author_id", "id")
        .unwrap()
        .where_("category", "=", "news", Some("cat"))
        .unwrap()
        .order("title", Select::SORT_ASC)
        .unwrap()
        .limit(10, None)
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        "SELECT title FROM posts INNER JOIN users ON posts.author_id = users.id \
         WHERE category = :cat ORDER BY title ASC LIMIT 10"
    );
}

#[test]
fn insert_preserves_binding_order() {
    let query = Insert::new("posts")
        .unwrap()
        .bind_field("username", "Alice", Some("u"))
        .unwrap()
        .bind_field("age", 20, Some("a"))
        .unwrap();

    assert_eq!(
        query.to_sql().unwrap(),
        "INSERT INTO posts (username, age) VALUES (:u, :a)"
    );
    assert_eq!(
        query.bindings(),
        &[
            ("u".to_string(), Value::String("Alice".to_string())),
            ("a".to_string(), Value::Int(20)),
        ]
    );
}

#[test]
fn update_requires_fields_and_where() {
    let query = Update::new("posts")
        .unwrap()
        .where_("id", "=", 1, Some("id"))
        .unwrap();
    assert_eq!(query.to_sql().unwrap_err(), Error::NoFields);

    let query = Update::new("posts")
        .unwrap()
        .bind_field("title", "x", Some("t"))
        .unwrap();
    assert!(matches!(
        query.to_sql().unwrap_err(),
        Error::DangerousQuery { .. }
    ));
}

#[test]
fn delete_requires_where() {
    let err = Delete::new("test").unwrap().to_sql().unwrap_err();
    assert!(matches!(err, Error::DangerousQuery { .. }));

    let query = Delete::new("posts")
        .unwrap()
        .where_("id", "=", 1, Some("id"))
        .unwrap();
    assert_eq!(query.to_sql().unwrap(), "DELETE FROM posts WHERE id = :id");
    assert_eq!(query.bindings(), &[("id".to_string(), Value::Int(1))]);
}

#[test]
fn duplicate_parameter_across_fields_and_where() {
    let err = Update::new("posts")
        .unwrap()
        .bind_field("title", "x", Some("p"))
        .unwrap()
        .where_("id", "=", 1, Some("p"))
        .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateParameter {
            parameter: "p".to_string()
        }
    );
}

#[test]
fn datetime_values_bind_as_formatted_literals() {
    let at = NaiveDate::from_ymd_opt(2019, 3, 1)
        .unwrap()
        .and_hms_opt(14, 30, 5)
        .unwrap();
    let query = Update::new("posts")
        .unwrap()
        .bind_field("published_at", at, Some("at"))
        .unwrap()
        .where_("id", "=", 1, Some("id"))
        .unwrap();
    assert_eq!(
        query.bindings()[0],
        (
            "at".to_string(),
            Value::String("2019-03-01 14:30:05".to_string())
        )
    );
}

#[test]
fn bindings_serialize_for_the_execution_layer() {
    let query = Insert::new("posts")
        .unwrap()
        .bind_field("username", "Alice", Some("u"))
        .unwrap()
        .bind_field("age", 20, Some("a"))
        .unwrap()
        .bind_field("active", true, Some("b"))
        .unwrap();

    let json = serde_json::to_value(query.bindings()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([["u", "Alice"], ["a", 20], ["b", true]])
    );
}

#[test]
fn render_twice_yields_identical_output() {
    let query = Select::new("posts")
        .unwrap()
        .where_("author", "=", "x", Some("a"))
        .unwrap()
        .order("title", Select::SORT_ASC)
        .unwrap()
        .limit(3, None)
        .unwrap();
    assert_eq!(query.to_sql().unwrap(), query.to_sql().unwrap());
}

#[test]
fn reserved_words_rejected_everywhere() {
    assert!(Select::new("select").is_err());
    assert!(Select::new("posts").unwrap().select(["table"]).is_err());
    assert!(Delete::new("posts")
        .unwrap()
        .where_("where", "=", 1, None)
        .is_err());
    assert!(Insert::new("posts")
        .unwrap()
        .bind_field("values", 1, None)
        .is_err());
}
