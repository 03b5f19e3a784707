use rqlite_middleware::prelude::*;
use rqlite_middleware::test_utils::ScriptedTransport;
use serde_json::json;

fn adapter(transport: ScriptedTransport) -> RqliteAdapter<ScriptedTransport> {
    RqliteAdapter::with_transport(ConnectionOptions::default(), transport)
}

fn users_reply() -> serde_json::Value {
    json!({"results": [{
        "columns": ["id", "name"],
        "values": [[1, "alice"], [2, "bob"], [3, "carol"]]
    }]})
}

fn name_of(row: &CustomDbRow) -> &str {
    row.get("name").and_then(RowValues::as_text).unwrap()
}

#[tokio::test]
async fn query_with_params_posts_parameterized_body() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({
        "results": [{"columns": ["id", "name"], "values": ["1", "alice"]}]
    }));
    let mut db = adapter(transport);

    let result = db
        .query((
            "SELECT id, name FROM users WHERE id = ?",
            vec![RowValues::Int(1)],
        ))
        .await?
        .fetch_all()?
        .clone();

    let requests = db.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, Endpoint::Query);
    assert_eq!(
        requests[0].body,
        r#"[["SELECT id, name FROM users WHERE id = ?", [1]]]"#
    );

    let NormalizedResult::Single(row) = result else {
        panic!("expected a single mapping, got {result:?}");
    };
    assert_eq!(row.get("id"), Some(&RowValues::Text("1".into())));
    assert_eq!(row.get("name"), Some(&RowValues::Text("alice".into())));
    Ok(())
}

#[tokio::test]
async fn plain_query_posts_single_element_body() -> Result<(), RqliteDbError> {
    let mut db = adapter(ScriptedTransport::new().reply(users_reply()));
    db.query("SELECT id, name FROM users").await?;

    let requests = db.transport().requests();
    assert_eq!(requests[0].json(), json!(["SELECT id, name FROM users"]));
    assert_eq!(db.get_number_of_rows(), 3);
    Ok(())
}

#[tokio::test]
async fn fetch_pops_rows_in_reverse_order() -> Result<(), RqliteDbError> {
    let mut db = adapter(ScriptedTransport::new().reply(users_reply()));
    db.query("SELECT id, name FROM users").await?;

    let all = db.fetch_all()?.clone();
    assert_eq!(all.len(), 3);
    assert_eq!(name_of(&all.rows()[0]), "alice");

    let mut popped = Vec::new();
    while let Some(row) = db.fetch()? {
        popped.push(name_of(&row).to_string());
    }
    assert_eq!(popped, vec!["carol", "bob", "alice"]);
    assert!(db.fetch_all()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn fetch_before_any_result_is_unset() {
    let mut db = adapter(ScriptedTransport::new());
    assert!(matches!(db.fetch(), Err(RqliteDbError::ResultUnset)));
    assert!(matches!(db.fetch_all(), Err(RqliteDbError::ResultUnset)));
    assert!(!db.is_success());
}

#[tokio::test]
async fn prepared_statement_substitutes_literals_and_executes() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({
        "results": [{"last_insert_id": 4, "rows_affected": 1}]
    }));
    let mut db = adapter(transport);

    db.prepare("INSERT INTO users (name) VALUES (dave)")
        .bind_params([("name", "dave")])?
        .execute()
        .await?;

    let requests = db.transport().requests();
    assert_eq!(requests[0].endpoint, Endpoint::Execute);
    assert_eq!(
        requests[0].json(),
        json!(["INSERT INTO users (name) VALUES ('dave')"])
    );
    assert!(db.fetch_all()?.is_empty());
    let meta = db.last_response().unwrap();
    assert_eq!(meta.last_insert_id, Some(4));
    assert_eq!(meta.rows_affected, Some(1));

    // The statement was consumed by execute.
    assert!(db.prepared().is_none());
    assert!(matches!(
        db.execute().await,
        Err(RqliteDbError::ParameterError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn binding_without_prepare_fails() {
    let mut db = adapter(ScriptedTransport::new());
    assert!(matches!(
        db.bind_param("id", 1, ParamType::Integer),
        Err(RqliteDbError::ParameterError(_))
    ));
}

#[tokio::test]
async fn bind_value_and_bind_param_share_one_mapping() -> Result<(), RqliteDbError> {
    let mut db = adapter(ScriptedTransport::new());
    db.prepare("SELECT 1")
        .bind_param("a", 1, ParamType::Integer)?
        .bind_value("b", "x", ParamType::Text)?
        .bind_params([("a", 2)])?;

    let params = db.prepared().unwrap().params();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get(&ParamKey::from("a")), Some(&RowValues::Int(2)));
    Ok(())
}

#[tokio::test]
async fn placeholder_mode_sends_values_separately() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({
        "results": [{"columns": ["id", "name"], "values": [[9, "O'Brien"]]}]
    }));
    let mut db = adapter(transport).with_substitution(SubstitutionMode::Placeholders);

    db.prepare("SELECT id, name FROM users WHERE name = ?")
        .bind_param(1usize, "O'Brien", ParamType::Text)?
        .execute_query()
        .await?;

    let requests = db.transport().requests();
    assert_eq!(requests[0].endpoint, Endpoint::Query);
    assert_eq!(
        requests[0].json(),
        json!([["SELECT id, name FROM users WHERE name = ?", ["O'Brien"]]])
    );
    assert_eq!(db.get_number_of_rows(), 1);
    Ok(())
}

#[tokio::test]
async fn owned_statement_runs_without_touching_prepared_slot() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({"results": [{"rows_affected": 2}]}));
    let mut db = adapter(transport);
    db.prepare("SELECT 1");

    let mut stmt = Statement::new("DELETE FROM users WHERE name = bob");
    stmt.bind("who", "bob");
    db.execute_statement(stmt).await?;

    assert_eq!(
        db.transport().requests()[0].json(),
        json!(["DELETE FROM users WHERE name = 'bob'"])
    );
    assert_eq!(db.prepared().map(Statement::text), Some("SELECT 1"));
    Ok(())
}

#[tokio::test]
async fn transaction_flag_is_advisory() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new()
        .reply(json!({"results": [{"rows_affected": 1}]}))
        .reply(json!({"results": [{"rows_affected": 1}]}));
    let mut db = adapter(transport);

    db.begin_transaction();
    assert!(db.in_transaction());
    db.execute_sql("UPDATE t SET a = 1").await?;
    db.commit();
    assert!(!db.in_transaction());

    db.begin_transaction();
    db.execute_sql("UPDATE t SET a = 2").await?;
    db.rollback();
    assert!(!db.in_transaction());

    // Each statement went out on its own; nothing was grouped or wrapped.
    let bodies: Vec<_> = db.transport().requests().iter().map(|r| r.json()).collect();
    assert_eq!(
        bodies,
        vec![json!(["UPDATE t SET a = 1"]), json!(["UPDATE t SET a = 2"])]
    );
    Ok(())
}

#[tokio::test]
async fn get_version_issues_one_query() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({
        "results": [{"columns": ["version"], "values": [["3.45.1"]]}]
    }));
    let db = adapter(transport);

    assert_eq!(db.get_version().await?, "3.45.1");
    let requests = db.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, Endpoint::Query);
    assert_eq!(
        requests[0].json(),
        json!(["SELECT sqlite_version() as version;"])
    );
    Ok(())
}

#[tokio::test]
async fn introspection_leaves_last_result_alone() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new()
        .reply(users_reply())
        .reply(json!({"results": [{"columns": ["last_id"], "values": [[3]]}]}))
        .reply(json!({"results": [{"columns": ["count_changes"], "values": [["0"]]}]}))
        .reply(json!({"results": [{"columns": ["name"], "values": ["orders", "users"]}]}));
    let mut db = adapter(transport);

    db.query("SELECT id, name FROM users").await?;
    assert_eq!(db.get_last_id().await?, 3);
    assert_eq!(db.get_number_of_affected_rows().await?, 0);
    assert_eq!(db.get_tables().await?, vec!["orders", "users"]);
    assert_eq!(db.get_number_of_rows(), 3);

    let sent: Vec<_> = db.transport().requests().iter().map(|r| r.json()).collect();
    assert_eq!(sent[1], json!(["SELECT last_insert_rowid() as last_id"]));
    assert_eq!(sent[2], json!(["PRAGMA count_changes;"]));
    assert!(sent[3][0].as_str().unwrap().contains("sqlite_temp_master"));
    Ok(())
}

#[tokio::test]
async fn affected_rows_defaults_to_zero_without_a_row() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new().reply(json!({"results": [{}]}));
    let db = adapter(transport);
    assert_eq!(db.get_number_of_affected_rows().await?, 0);
    Ok(())
}

#[tokio::test]
async fn remote_sql_error_is_propagated_and_clears_result() -> Result<(), RqliteDbError> {
    let transport = ScriptedTransport::new()
        .reply(users_reply())
        .reply(json!({"results": [{"error": "no such table: nope"}]}));
    let mut db = adapter(transport);

    db.query("SELECT id, name FROM users").await?;
    let err = db.query("SELECT * FROM nope").await.err().unwrap();
    assert!(matches!(err, RqliteDbError::RemoteSqlError(ref msg) if msg.contains("nope")));
    assert!(!db.is_success());
    assert!(matches!(db.fetch(), Err(RqliteDbError::ResultUnset)));
    Ok(())
}

#[tokio::test]
async fn http_status_and_malformed_bodies_surface() {
    let transport = ScriptedTransport::new()
        .reply_status(503, "leader not found")
        .reply(json!({"unexpected": true}));
    let mut db = adapter(transport);

    assert!(matches!(
        db.query("SELECT 1").await.err(),
        Some(RqliteDbError::HttpStatus { status: 503, .. })
    ));
    assert!(matches!(
        db.query("SELECT 1").await.err(),
        Some(RqliteDbError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn disconnected_adapter_refuses_requests() -> Result<(), RqliteDbError> {
    let mut db = adapter(ScriptedTransport::new().reply(users_reply()));
    db.disconnect();
    assert!(!db.is_connected());
    assert!(matches!(
        db.query("SELECT 1").await.err(),
        Some(RqliteDbError::ConnectionError(_))
    ));
    assert!(db.transport().requests().is_empty());

    db.connect()?.query("SELECT id, name FROM users").await?;
    assert_eq!(db.get_number_of_rows(), 3);
    Ok(())
}

#[tokio::test]
async fn explicit_cardinality_fixes_flat_single_column_rows() -> Result<(), RqliteDbError> {
    let reply = json!({"results": [{"columns": ["name"], "values": ["a", "b", "c"]}]});
    let mut db = adapter(ScriptedTransport::new().reply(reply)).with_cardinality(Cardinality::Many);

    db.query("SELECT name FROM t").await?;
    assert_eq!(db.get_number_of_rows(), 3);
    Ok(())
}

#[tokio::test]
async fn options_always_carry_a_normalized_url() -> Result<(), RqliteDbError> {
    let mut db = adapter(ScriptedTransport::new());
    assert!(db.has_options());
    assert_eq!(db.options().url(), DEFAULT_URL);

    db.set_options(ConnectionOptions::new("http://10.0.0.7:4001/")?);
    assert!(db.has_options());
    assert_eq!(db.options().url(), "http://10.0.0.7:4001");
    assert!(db.options().database().is_none());
    Ok(())
}
