//! End-to-end tests driving the full pipeline (parser -> planner -> SQL
//! emitter -> DuckDB) against the fixture schema/data in `tests/fixtures/`.
//! Scenario shapes are ported from `original_source/duckcypher/test_cypher.py`'s
//! `TestSimple` class (spec.md §8 "Concrete scenarios"); the fixture data
//! itself is authored fresh for this repo (see `tests/fixtures/*.csv`), so
//! expected row counts reflect that data rather than the original's numbers.

use duckcypher::config::CompilerConfig;
use duckcypher::executor::{CellValue, DuckDbAdapter};
use duckcypher::schema::{SchemaFile, SchemaRegistry};

fn load_fixture_registry() -> SchemaRegistry {
    let file = SchemaFile::from_yaml_file("tests/fixtures/schema.yml")
        .expect("fixture schema should parse");
    file.load().expect("fixture schema should load")
}

fn fixture_adapter(registry: &SchemaRegistry) -> DuckDbAdapter {
    let mut adapter = DuckDbAdapter::open_in_memory().expect("in-memory duckdb connection");
    adapter
        .register_tables(registry)
        .expect("fixture csv tables should register");
    adapter
}

fn run(registry: &SchemaRegistry, adapter: &mut DuckDbAdapter, cypher: &str) -> duckcypher::executor::QueryHandle {
    let config = CompilerConfig::default();
    duckcypher::run_cypher(registry, adapter, cypher, &config).expect("query should compile and run")
}

#[test]
fn single_node_returns_one_column_per_row() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(&registry, &mut adapter, "MATCH (c:Customer) WITH c.first_name");
    assert_eq!(res.row_count(), 8);
    assert_eq!(res.columns().len(), 1);
}

#[test]
fn two_types_same_table_requires_no_join() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        "MATCH (cu:Customer) -- (co:Company) RETURN co.company, cu.first_name",
    );
    assert_eq!(res.row_count(), 8);
}

#[test]
fn cross_table_join_on_primary_id() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        "MATCH (cu:Customer) -- (ci:CustomerInfo) RETURN cu.first_name, ci.age, ci.state",
    );
    assert_eq!(res.row_count(), 8);
}

#[test]
fn node_pattern_filter_scopes_to_one_state() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        r#"MATCH (ci:CustomerInfo {state: "FL"}) RETURN ci"#,
    );
    assert_eq!(res.row_count(), 3);
}

#[test]
fn self_join_through_third_type_finds_coworkers() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        r#"MATCH (m:Customer {first_name: "Michael"}) -- (co:Company) -- (p:Customer) RETURN p"#,
    );
    // 4 customers work at google, including Michael himself.
    assert_eq!(res.row_count(), 4);
}

#[test]
fn aggregate_over_join_counts_coworkers() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        r#"MATCH (co:Company {company: "google"}) -- (cu:Customer) RETURN count(cu)"#,
    );
    assert_eq!(res.row_count(), 1);
    assert_eq!(res.columns().len(), 1);
    assert_eq!(res.rows()[0][0], CellValue::Int(4));
}

#[test]
fn pipeline_with_carry_alias_resolves_as_subselect() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let cypher = r#"
        MATCH (c:Customer {first_name: "Lisa"}) -- (lisa:CustomerInfo {state: "TX"})
        WITH lisa.age AS lisa_age
        MATCH (cu:Customer) -- (i:CustomerInfo {state: "FL"})
        WHERE i.age > lisa_age AND cu.first_name <> "Lisa"
        RETURN cu.first_name, i.age, i.state
    "#;
    let res = run(&registry, &mut adapter, cypher);
    // Lisa is 30; FL customers older than 30 are David (45) and Frank (50).
    assert_eq!(res.row_count(), 2);
    let names: Vec<&str> = res
        .rows()
        .iter()
        .map(|row| match &row[0] {
            CellValue::Text(s) => s.as_str(),
            other => panic!("expected text, got {other:?}"),
        })
        .collect();
    assert!(names.contains(&"David"));
    assert!(names.contains(&"Frank"));
}

#[test]
fn order_by_and_limit_pick_the_oldest_customer() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        "MATCH (cu:Customer) -- (ci:CustomerInfo) RETURN cu.first_name, ci.age ORDER BY ci.age DESC LIMIT 1",
    );
    assert_eq!(res.row_count(), 1);
    assert_eq!(res.rows()[0][0], CellValue::Text("Frank".to_string()));
    assert_eq!(res.rows()[0][1], CellValue::Int(50));
}

#[test]
fn where_with_two_conditions_narrows_to_one_row() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let res = run(
        &registry,
        &mut adapter,
        r#"MATCH (cu:Customer) -- (ci:CustomerInfo) WHERE ci.age = 30 AND ci.state = "TX" RETURN cu.first_name"#,
    );
    assert_eq!(res.row_count(), 1);
    assert_eq!(res.rows()[0][0], CellValue::Text("Lisa".to_string()));
}

#[test]
fn unknown_type_in_match_is_a_compile_error() {
    let registry = load_fixture_registry();
    let mut adapter = fixture_adapter(&registry);
    let config = CompilerConfig::default();
    let err = duckcypher::run_cypher(&registry, &mut adapter, "MATCH (g:Ghost) RETURN g", &config)
        .expect_err("unknown type should fail compilation");
    assert!(matches!(
        err,
        duckcypher::DuckCypherError::SqlGen(duckcypher::sql_gen::SqlGenError::Schema(
            duckcypher::schema::SchemaError::UnknownType { .. }
        ))
    ));
}
