use registrar_db::*;

fn render<T>(expr: &Expr<T>, compiler: &dyn Compiler<T>) -> (String, Vec<Value>) {
    let mut params = Vec::new();
    let sql = expr.to_sql("col", compiler, &mut params);
    (sql, params)
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn equality_and_inequality() {
    assert_eq!(
        render(&is_(5_i64), &Plain),
        ("col IS ?".to_string(), vec![Value::Integer(5)])
    );
    assert_eq!(
        render(&is_not(5_i64), &Plain),
        ("col IS NOT ?".to_string(), vec![Value::Integer(5)])
    );
}

#[test]
fn negation_wraps_the_inner_predicate() {
    assert_eq!(
        render(&!is_(5_i64), &Plain),
        ("NOT (col IS ?)".to_string(), vec![Value::Integer(5)])
    );
    assert_eq!(
        render(&!between(1_i64, 2), &Plain).0,
        "NOT (col BETWEEN ? AND ?)"
    );
}

#[test]
fn collations() {
    let (sql, params) = render(&collate_nocase("alpha".to_string()), &Plain);
    assert_eq!(sql, "col IS ? COLLATE NOCASE");
    assert_eq!(params, vec![text("alpha")]);
    assert_eq!(
        render(&collate_binary("a".to_string()), &Plain).0,
        "col IS ? COLLATE BINARY"
    );
    assert_eq!(
        render(&collate_rtrim("a".to_string()), &Plain).0,
        "col IS ? COLLATE RTRIM"
    );
}

#[test]
fn substring_forms() {
    assert_eq!(
        render(&substr("lph".to_string()), &Plain),
        ("instr(col, ?)".to_string(), vec![text("lph")])
    );
    assert_eq!(
        render(&nocase_substr("LPH".to_string()), &Plain),
        (
            "col LIKE '%'||?||'%' ESCAPE '\\'".to_string(),
            vec![text("LPH")]
        )
    );
}

#[test]
fn range_and_comparisons() {
    assert_eq!(
        render(&between(10_i64, 20), &Plain),
        (
            "col BETWEEN ? AND ?".to_string(),
            vec![Value::Integer(10), Value::Integer(20)]
        )
    );
    assert_eq!(render(&greater_than(1_i64), &Plain).0, "col > ?");
    assert_eq!(render(&greater_than_or_equal(1_i64), &Plain).0, "col >= ?");
    assert_eq!(render(&less_than(1_i64), &Plain).0, "col < ?");
    assert_eq!(render(&less_than_or_equal(1_i64), &Plain).0, "col <= ?");
}

#[test]
fn combinators_parenthesize_and_keep_param_order() {
    let either: Filter<i64> = or_([is_(1).into(), greater_than(5).into()]);
    let Param::Given(expr) = either else {
        panic!("combinator with live branches was omitted");
    };
    assert_eq!(
        render(&expr, &Plain),
        (
            "(col IS ? OR col > ?)".to_string(),
            vec![Value::Integer(1), Value::Integer(5)]
        )
    );

    let both: Filter<i64> = and_([greater_than(1).into(), !Param::Given(is_(3))]);
    let Param::Given(expr) = both else {
        panic!("combinator with live branches was omitted");
    };
    assert_eq!(render(&expr, &Plain).0, "(col > ? AND NOT (col IS ?))");
}

#[test]
fn omitted_branches_are_dropped() {
    let combined: Filter<i64> = or_([is_(1).into(), Param::Omitted]);
    assert_eq!(combined, Param::Given(is_(1)));

    let nested: Filter<i64> = and_([or_([Param::Omitted, Param::Omitted]), is_(2).into()]);
    assert_eq!(nested, Param::Given(is_(2)));
}

#[test]
fn all_omitted_combinator_is_omitted() {
    let none: Filter<i64> = and_([Param::Omitted, Param::Omitted]);
    assert!(none.is_omitted());
    let empty: Filter<i64> = or_(Vec::new());
    assert!(empty.is_omitted());
    assert!((!empty).is_omitted());
}

#[test]
fn custom_sql_is_verbatim() {
    let expr: Expr<i64> = custom("length(name) > ?", [Value::Integer(3)]);
    assert_eq!(
        render(&expr, &Plain),
        ("length(name) > ?".to_string(), vec![Value::Integer(3)])
    );
}

#[test]
fn values_are_compiled_by_the_column_codec() {
    let expr = is_(vec!["a".to_string()]);
    assert_eq!(
        render(&expr, &ListCodec),
        ("col IS ?".to_string(), vec![text("\u{86}a\u{87}")])
    );
}

#[test]
fn raw_values_mean_equality() {
    let by_id: Filter<i64> = 7.into();
    assert_eq!(by_id, Param::Given(is_(7)));
    let by_name: Filter<String> = "Bot".into();
    assert_eq!(by_name, Param::Given(is_("Bot".to_string())));
}

#[test]
fn empty_combinators_vanish_when_nested() {
    let empty: Expr<i64> = Expr::Or(vec![]);
    assert!(empty.is_vacuous());
    assert!((!Expr::<i64>::Or(vec![])).is_vacuous());
    assert!(Expr::<i64>::And(vec![Expr::Or(vec![]), !Expr::And(vec![])]).is_vacuous());
    assert!(!Expr::And(vec![Expr::Or(vec![]), is_(1_i64)]).is_vacuous());

    let expr = Expr::And(vec![Expr::Or(vec![]), is_(1_i64)]);
    assert_eq!(render(&expr, &Plain), ("col IS ?".to_string(), vec![Value::Integer(1)]));

    let expr = Expr::Or(vec![is_(1_i64), !Expr::And(vec![]), is_(2)]);
    assert_eq!(render(&expr, &Plain).0, "(col IS ? OR col IS ?)");

    let combined: Filter<i64> = or_([Param::Given(Expr::And(vec![])), is_(3).into()]);
    assert_eq!(combined, Param::Given(is_(3)));
}
