use clap::Parser;
use rqlite_middleware::prelude::*;
use tracing_subscriber::EnvFilter;

/// Run one statement against an rqlite node and print the rows.
#[derive(Debug, Parser)]
#[command(name = "rqlite-cli", version)]
struct Args {
    /// Base URL of the node
    #[arg(long, env = "RQLITE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Endpoint the statement is posted to
    #[arg(long, value_enum, default_value_t = Endpoint::Query)]
    endpoint: Endpoint,

    /// Parameter value; JSON scalars are typed, anything else is sent as text
    #[arg(long = "param", short = 'p')]
    params: Vec<String>,

    /// Print the engine's SQLite version and exit
    #[arg(long, conflicts_with_all = ["tables", "sql"])]
    version: bool,

    /// List tables and views and exit
    #[arg(long, conflicts_with = "sql")]
    tables: bool,

    /// Statement to run
    #[arg(required_unless_present_any = ["version", "tables"])]
    sql: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), RqliteDbError> {
    let options = ConnectionOptions::new(args.url)?;
    let mut db = RqliteAdapter::new(options)?;

    if args.version {
        println!("{}", db.get_version().await?);
        return Ok(());
    }
    if args.tables {
        for table in db.get_tables().await? {
            println!("{table}");
        }
        return Ok(());
    }

    let Some(sql) = args.sql else {
        return Ok(());
    };
    let params = args.params.iter().map(|raw| parse_param(raw)).collect();
    let statement = QueryAndParams::new(sql, params);

    match args.endpoint {
        Endpoint::Query => db.query(statement).await?,
        Endpoint::Execute => db.execute_sql(statement).await?,
    };

    print_result(db.fetch_all()?);
    if let Some(meta) = db.last_response() {
        if let Some(rows) = meta.rows_affected {
            eprintln!("rows affected: {rows}");
        }
        if let Some(id) = meta.last_insert_id {
            eprintln!("last insert id: {id}");
        }
    }
    Ok(())
}

fn parse_param(raw: &str) -> RowValues {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => RowValues::from_json(&value),
        Err(_) => RowValues::Text(raw.to_string()),
    }
}

fn print_result(result: &NormalizedResult) {
    let Some(first) = result.first() else {
        return;
    };
    println!("{}", first.column_names.join("\t"));
    for row in result.rows() {
        let cells: Vec<String> = row.values.iter().map(RowValues::literal_text).collect();
        println!("{}", cells.join("\t"));
    }
}
