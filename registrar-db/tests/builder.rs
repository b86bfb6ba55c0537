use registrar_db::*;

const ID: Column<i64> = Column::new("id");
const NAME: Column<String> = Column::new("name");
const SCORE: Column<i64> = Column::new("score");
const ACTIVE: Column<bool> = Column::new("active");
const TAGS: Column<Vec<String>, ListCodec> = Column::with_codec("tags", ListCodec);

fn players() -> Table {
    Table::new(Database::new("unused.db"), "PLAYERS")
}

#[test]
fn omitted_parts_vanish_everywhere() {
    let parts = [NAME.set("Alpha".to_string()), ACTIVE.set(Param::Omitted)];

    let insert = players().insert_statement(&parts).unwrap();
    assert_eq!(insert.sql, "INSERT INTO PLAYERS (name) VALUES (?)");
    assert_eq!(insert.params, vec![Value::Text("Alpha".into())]);

    let select = players().select_statement(&parts, Match::All);
    assert_eq!(select.sql, "SELECT * FROM PLAYERS WHERE name IS ?");

    let set = build_set(&parts).unwrap();
    assert_eq!(set.fragments, vec!["name=?"]);
}

#[test]
fn all_omitted_where_targets_whole_table() {
    let parts = [ID.omitted(), NAME.omitted()];
    assert!(build_where(&parts).is_empty());
    assert_eq!(
        players().select_statement(&parts, Match::Any).sql,
        "SELECT * FROM PLAYERS"
    );
    assert_eq!(
        players().delete_statement(&parts, Match::All).sql,
        "DELETE FROM PLAYERS"
    );
}

#[test]
fn all_omitted_insert_uses_defaults() {
    let statement = players().insert_statement(&[ACTIVE.omitted()]).unwrap();
    assert_eq!(statement.sql, "INSERT INTO PLAYERS DEFAULT VALUES");
    assert!(statement.params.is_empty());
}

#[test]
fn all_omitted_set_is_no_changes() {
    let err = build_set(&[NAME.omitted(), SCORE.omitted()]).unwrap_err();
    assert!(matches!(err, DbError::NoChanges));
    assert!(err.is_usage());
    assert!(players().edit(&[]).is_err());
}

#[test]
fn match_any_joins_with_or() {
    let parts = [
        SCORE.part(between(10, 20)),
        NAME.part(is_not("Bot".to_string())),
    ];
    let statement = players().select_statement(&parts, Match::Any);
    assert_eq!(
        statement.sql,
        "SELECT * FROM PLAYERS WHERE score BETWEEN ? AND ? OR name IS NOT ?"
    );
    assert_eq!(
        statement.params,
        vec![
            Value::Integer(10),
            Value::Integer(20),
            Value::Text("Bot".into())
        ]
    );
}

#[test]
fn combined_filter_is_parenthesized_among_others() {
    let parts = [
        SCORE.part(or_([is_(1).into(), is_(2).into()])),
        NAME.part("Alpha"),
    ];
    let (sql, params) = where_clause(&parts, Match::All);
    assert_eq!(sql, " WHERE (score IS ? OR score IS ?) AND name IS ?");
    assert_eq!(params.len(), 3);
}

#[test]
fn expression_cannot_be_written() {
    let err = players()
        .insert_statement(&[SCORE.part(greater_than(3))])
        .unwrap_err();
    match err {
        DbError::NotAValue { column } => assert_eq!(column, "score"),
        other => panic!("expected NotAValue, got {other:?}"),
    }
}

#[test]
fn update_statement_orders_set_params_first() {
    let table = players();
    let update = table.edit(&[SCORE.set(9), NAME.set(Param::Omitted)]).unwrap();
    assert_eq!(update.set_clause(), "score=?");

    let statement = update.statement(&[ID.part(4)], Match::All);
    assert_eq!(statement.sql, "UPDATE PLAYERS SET score=? WHERE id IS ?");
    assert_eq!(statement.params, vec![Value::Integer(9), Value::Integer(4)]);
}

#[test]
fn set_values_go_through_the_codec() {
    let tags = vec!["x".to_string(), "y".to_string()];
    let set = build_set(&[TAGS.set(tags)]).unwrap();
    assert_eq!(
        set.params,
        vec![Value::Text("\u{86}x\u{87}\u{82}\u{86}y\u{87}".into())]
    );
}

#[test]
fn decompile_row_checks_arity_both_ways() {
    let four = [ID.omitted(), NAME.omitted(), SCORE.omitted(), ACTIVE.omitted()];
    let three_values = vec![Value::Integer(1), Value::Text("a".into()), Value::Integer(2)];
    match decompile_row(three_values.clone(), &four) {
        Err(DbError::ShapeMismatch { expected, actual }) => {
            assert_eq!((expected, actual), (4, 3));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }

    let mut four_values = three_values;
    four_values.push(Value::Integer(1));
    match decompile_row(four_values, &four[..3]) {
        Err(DbError::ShapeMismatch { expected, actual }) => {
            assert_eq!((expected, actual), (3, 4));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn decompile_row_runs_each_codec() {
    let parts = [ID.omitted(), TAGS.omitted(), ACTIVE.omitted()];
    let values = vec![
        Value::Integer(7),
        Value::Text("\u{86}x\u{87}".into()),
        Value::Integer(0),
    ];
    let mut row = decompile_row(values, &parts).unwrap();
    assert_eq!(row.remaining(), 3);
    assert_eq!(row.take::<i64>().unwrap(), 7);
    assert_eq!(row.take::<Vec<String>>().unwrap(), vec!["x".to_string()]);
    assert!(!row.take::<bool>().unwrap());
    assert!(row.take::<i64>().is_err());
}

#[test]
fn decoded_cell_of_wrong_type_is_a_decode_error() {
    let mut row = decompile_row(vec![Value::Integer(7)], &[ID.omitted()]).unwrap();
    match row.take::<String>() {
        Err(DbError::Decode { column, .. }) => assert_eq!(column, "id"),
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[test]
fn bad_stored_value_is_a_decode_error() {
    let result = decompile_row(vec![Value::Text("\u{86}x\u{87}".into())], &[ID.omitted()]);
    assert!(matches!(result, Err(DbError::Decode { .. })));
}

#[test]
fn nested_empty_combinators_are_omitted() {
    let negated = [SCORE.part(Param::Given(!Expr::Or(vec![])))];
    assert!(negated[0].is_omitted());
    let (sql, params) = where_clause(&negated, Match::All);
    assert!(sql.is_empty());
    assert!(params.is_empty());

    let parts = [SCORE.part(Param::Given(Expr::And(vec![Expr::Or(vec![]), is_(1)])))];
    let (sql, params) = where_clause(&parts, Match::All);
    assert_eq!(sql, " WHERE score IS ?");
    assert_eq!(params, vec![Value::Integer(1)]);
}
