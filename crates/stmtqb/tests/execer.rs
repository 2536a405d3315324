//! Builders handing finalized statements to an `Execer`.

use std::sync::Mutex;

use stmtqb::prelude::*;

/// Records every statement instead of talking to a database.
#[derive(Default)]
struct RecordingExecer {
    seen: Mutex<Vec<(String, String, bool)>>,
}

impl Execer for RecordingExecer {
    async fn execute(&self, query: &BuiltQuery) -> QbResult<u64> {
        let mut seen = self.seen.lock().unwrap();
        seen.push((
            query.sql.clone(),
            format!("{:?}", query.params),
            query.interpolate,
        ));
        Ok(1)
    }
}

fn people() -> InsertQueryBuilder {
    InsertQueryBuilder::with_config("people", BuilderConfig::new())
        .unwrap()
        .columns(&["name", "email"])
}

#[tokio::test]
async fn exec_passes_sql_and_args() {
    let conn = RecordingExecer::default();
    let affected = people()
        .query(expr!("VALUES (?, ?)", "Bob", "bob@x.com"))
        .returning(&["id"])
        .exec(&conn)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let seen = conn.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].0,
        "INSERT INTO people (name,email) VALUES ($1, $2) RETURNING id"
    );
    assert_eq!(seen[0].1, r#"["Bob", "bob@x.com"]"#);
    assert!(!seen[0].2);
}

#[tokio::test]
async fn exec_reports_configuration_errors_without_executing() {
    let conn = RecordingExecer::default();
    let err = InsertQueryBuilder::with_config("people", BuilderConfig::new())
        .unwrap()
        .query(expr!("VALUES (?)", "Bob"))
        .exec(&conn)
        .await
        .unwrap_err();
    assert!(matches!(err, QbError::NoColumns));
    assert!(conn.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn exec_forwards_interpolation_flag() {
    let conn = RecordingExecer::default();
    InsertQueryBuilder::with_config("people", BuilderConfig::new().interpolate(true))
        .unwrap()
        .columns(&["name"])
        .query(expr!("VALUES (?)", "Bob"))
        .exec(&conn)
        .await
        .unwrap();
    assert!(conn.seen.lock().unwrap()[0].2);
}

#[tokio::test]
async fn exec_is_repeatable() {
    let conn = RecordingExecer::default();
    let qb = people().query(expr!("VALUES (?, lower(?))", "Bob", "BOB@X.COM"));
    qb.exec(&conn).await.unwrap();
    qb.exec(&conn).await.unwrap();

    let seen = conn.seen.lock().unwrap();
    assert_eq!(seen[0], seen[1]);
}
