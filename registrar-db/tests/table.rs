use registrar_db::*;
use tempfile::TempDir;

const ID: Column<i64> = Column::new("id");
const ACTIVE: Column<bool> = Column::new("active");
const NAME: Column<String> = Column::new("name");
const SCORE: Column<i64> = Column::new("score");
const TAGS: Column<Vec<String>, ListCodec> = Column::with_codec("tags", ListCodec);

#[derive(Debug, PartialEq)]
struct Player {
    id: i64,
    active: bool,
    name: String,
    score: i64,
    tags: Vec<String>,
}

impl FromRow for Player {
    fn from_row(mut row: DecodedRow) -> Result<Self, DbError> {
        Ok(Self {
            id: row.take()?,
            active: row.take()?,
            name: row.take()?,
            score: row.take()?,
            tags: row.take()?,
        })
    }
}

#[derive(Default)]
struct Query {
    id: Filter<i64>,
    active: Filter<bool>,
    name: Filter<String>,
    score: Filter<i64>,
}

impl Query {
    fn parts(self) -> Vec<Part> {
        vec![
            ID.part(self.id),
            ACTIVE.part(self.active),
            NAME.part(self.name),
            SCORE.part(self.score),
            TAGS.omitted(),
        ]
    }
}

fn setup() -> (TempDir, Table) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("players.db"));
    db.connect()
        .unwrap()
        .execute_batch(
            "CREATE TABLE PLAYERS (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                active INTEGER NOT NULL DEFAULT 1,
                name TEXT NOT NULL,
                score INTEGER NOT NULL DEFAULT 0,
                tags TEXT
            );",
        )
        .unwrap();
    (dir, Table::new(db, "PLAYERS"))
}

fn add_player(table: &Table, name: &str, score: i64) -> i64 {
    table
        .add_with(
            &[NAME.set(name.to_string()), SCORE.set(score)],
            None,
            |conn| conn.last_insert_rowid(),
        )
        .unwrap()
}

fn all(table: &Table) -> Vec<Player> {
    table
        .get(&Query::default().parts(), None, Match::All)
        .unwrap()
}

#[test]
fn add_returns_row_id_and_uses_defaults() {
    let (_dir, table) = setup();
    let first = add_player(&table, "Alpha", 3);
    let second = add_player(&table, "Bravo", 5);
    assert_eq!((first, second), (1, 2));

    let players = all(&table);
    assert_eq!(
        players[0],
        Player {
            id: 1,
            active: true,
            name: "Alpha".to_string(),
            score: 3,
            tags: Vec::new(),
        }
    );
}

#[test]
fn list_column_round_trips_through_sqlite() {
    let (_dir, table) = setup();
    let tags = vec!["captain".to_string(), "left, wing".to_string()];
    table
        .add(
            &[
                NAME.set("Alpha".to_string()),
                ACTIVE.set(Param::Omitted),
                TAGS.set(tags.clone()),
            ],
            None,
        )
        .unwrap();

    let player: Player = table
        .get_one(&Query::default().parts(), Match::All)
        .unwrap()
        .unwrap();
    assert_eq!(player.tags, tags);
    assert!(player.active);
}

#[test]
fn get_filters_and_limits() {
    let (_dir, table) = setup();
    for (name, score) in [("Alpha", 3), ("Bravo", 12), ("Charlie", 18), ("Delta", 30)] {
        add_player(&table, name, score);
    }

    let mid: Vec<Player> = table
        .get(
            &Query {
                score: between(10, 20).into(),
                ..Default::default()
            }
            .parts(),
            None,
            Match::All,
        )
        .unwrap();
    let names: Vec<_> = mid.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Bravo", "Charlie"]);

    let capped: Vec<Player> = table.get(&Query::default().parts(), Some(2), Match::All).unwrap();
    assert_eq!(capped.len(), 2);

    let none: Vec<Player> = table
        .get(
            &Query {
                name: "Nobody".into(),
                ..Default::default()
            }
            .parts(),
            None,
            Match::All,
        )
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn match_any_widens_the_result() {
    let (_dir, table) = setup();
    for (name, score) in [("Alpha", 3), ("Bot", 15), ("Charlie", 40)] {
        add_player(&table, name, score);
    }

    let query = || Query {
        score: between(10, 20).into(),
        name: is_not("Bot".to_string()).into(),
        ..Default::default()
    };
    let any: Vec<Player> = table.get(&query().parts(), None, Match::Any).unwrap();
    assert_eq!(any.len(), 3);
    let every: Vec<Player> = table.get(&query().parts(), None, Match::All).unwrap();
    assert!(every.is_empty());
}

#[test]
fn text_matching_forms() {
    let (_dir, table) = setup();
    add_player(&table, "Alpha", 1);
    add_player(&table, "alphabet", 2);

    let find = |name: Filter<String>| -> Vec<String> {
        table
            .get::<Player>(
                &Query {
                    name,
                    ..Default::default()
                }
                .parts(),
                None,
                Match::All,
            )
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect()
    };

    assert_eq!(find(collate_nocase("ALPHA".to_string()).into()), ["Alpha"]);
    assert_eq!(find(substr("lph".to_string()).into()), ["Alpha", "alphabet"]);
    assert_eq!(find(substr("Alph".to_string()).into()), ["Alpha"]);
    assert_eq!(find(nocase_substr("BET".to_string()).into()), ["alphabet"]);
    assert_eq!(find(!Param::Given(is_("Alpha".to_string()))), ["alphabet"]);
}

#[test]
fn get_with_too_few_parts_is_a_shape_mismatch() {
    let (_dir, table) = setup();
    add_player(&table, "Alpha", 1);
    let result = table.get::<DecodedRow>(&[ID.omitted(), NAME.omitted()], None, Match::All);
    assert!(matches!(
        result,
        Err(DbError::ShapeMismatch {
            expected: 2,
            actual: 5
        })
    ));
}

#[test]
fn remove_deletes_matching_rows() {
    let (_dir, table) = setup();
    for (name, score) in [("Alpha", 3), ("Bravo", 12), ("Charlie", 18)] {
        add_player(&table, name, score);
    }

    let removed = table
        .remove(
            &Query {
                score: greater_than(10).into(),
                ..Default::default()
            }
            .parts(),
            Match::All,
            None,
        )
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(all(&table).len(), 1);

    let removed = table.remove(&Query::default().parts(), Match::All, None).unwrap();
    assert_eq!(removed, 1);
    assert!(all(&table).is_empty());
}

#[test]
fn one_prepared_update_serves_many_filters() {
    let (_dir, table) = setup();
    for (name, score) in [("Alpha", 3), ("Bravo", 12), ("Charlie", 18)] {
        add_player(&table, name, score);
    }

    let update = table
        .edit(&[ACTIVE.set(false), SCORE.set(Param::Omitted)])
        .unwrap();
    let by_name = update.statement(&[NAME.part("Alpha")], Match::All);
    let by_score = update.statement(&[SCORE.part(greater_than(15))], Match::All);
    assert!(by_name.sql.starts_with("UPDATE PLAYERS SET active=? WHERE"));
    assert!(by_score.sql.starts_with("UPDATE PLAYERS SET active=? WHERE"));

    assert_eq!(update.apply(&[NAME.part("Alpha")], Match::All, None).unwrap(), 1);
    assert_eq!(
        update
            .apply(&[SCORE.part(greater_than(15))], Match::All, None)
            .unwrap(),
        1
    );

    let inactive: Vec<Player> = table
        .get(
            &Query {
                active: false.into(),
                ..Default::default()
            }
            .parts(),
            None,
            Match::All,
        )
        .unwrap();
    let names: Vec<_> = inactive.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Charlie"]);
}

#[test]
fn edit_without_changes_fails_before_touching_sqlite() {
    let (_dir, table) = setup();
    let err = table
        .edit(&[NAME.set(Param::Omitted), SCORE.set(Param::Omitted)])
        .unwrap_err();
    assert!(matches!(err, DbError::NoChanges));
}

#[test]
fn external_connection_is_not_committed() {
    let (_dir, table) = setup();
    let mut conn = table.database().connect().unwrap();

    let tx = conn.transaction().unwrap();
    table
        .add(&[NAME.set("Ghost".to_string())], Some(&*tx))
        .unwrap();
    let seen: Vec<Player> = table
        .fetch(&tx, &Query::default().parts(), None, Match::All)
        .unwrap();
    assert_eq!(seen.len(), 1);
    drop(tx);

    assert!(all(&table).is_empty());
}

#[test]
fn failed_unit_of_work_rolls_back() {
    let (_dir, table) = setup();
    let result: Result<(), DbError> = table.database().with_transaction(|conn| {
        table.add(&[NAME.set("Alpha".to_string())], Some(conn))?;
        table.add(&[NAME.set("Bravo".to_string())], Some(conn))?;
        Err(DbError::NoChanges)
    });
    assert!(result.is_err());
    assert!(all(&table).is_empty());

    table
        .database()
        .with_transaction(|conn| table.add(&[NAME.set("Alpha".to_string())], Some(conn)))
        .unwrap();
    assert_eq!(all(&table).len(), 1);
}

#[test]
fn sqlite_errors_pass_through() {
    let (_dir, table) = setup();
    let err = table.add(&[SCORE.set(1)], None).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(!err.is_usage());
}

#[test]
fn vacuous_filters_reach_every_row() {
    let (_dir, table) = setup();
    for (name, score) in [("Alpha", 3), ("Bravo", 12), ("Charlie", 18)] {
        add_player(&table, name, score);
    }

    let nothing = [SCORE.part(Param::Given(!Expr::Or(vec![])))];
    let update = table.edit(&[SCORE.set(0)]).unwrap();
    assert_eq!(
        update.statement(&nothing, Match::All).sql,
        "UPDATE PLAYERS SET score=?"
    );
    assert_eq!(update.apply(&nothing, Match::All, None).unwrap(), 3);

    let top = [ID.part(Param::Given(custom(
        "id = (SELECT max(id) FROM PLAYERS WHERE active = ?)",
        [Value::Integer(1)],
    )))];
    assert_eq!(table.remove(&top, Match::All, None).unwrap(), 1);
    assert_eq!(table.remove(&nothing, Match::All, None).unwrap(), 2);
    assert!(all(&table).is_empty());
}
