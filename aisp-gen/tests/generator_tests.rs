//! Generator tests against the shipped template and component schema.

use std::path::PathBuf;

use aisp_agents::{load_routes, AispSource, MemoryStore, StoreConfig};
use aisp_gen::template::CRUD_TEMPLATE;
use aisp_gen::{GeneratorError, Generator, IdeaSheet, SpecValidator, Template};
use pretty_assertions::assert_eq;
use serde_json::json;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .to_path_buf()
}

fn shipped_template() -> Template {
    Template::load(&repo_root().join("templates"), CRUD_TEMPLATE).unwrap()
}

fn shipped_validator() -> SpecValidator {
    SpecValidator::load(&repo_root().join("schema/aisp_component.schema.json")).unwrap()
}

#[tokio::test]
async fn test_sample_idea_sheet_generates_servable_components() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new();
    let generator =
        Generator::new(&store, shipped_template(), shipped_validator(), dir.path()).unwrap();

    let idea = IdeaSheet::load(&repo_root().join("ideas/inventory.yml")).unwrap();
    let generated = generator.run(&idea, |_| {}).await.unwrap();

    let entities: Vec<&str> = generated.iter().map(|c| c.entity.as_str()).collect();
    assert_eq!(entities, vec!["widget", "supplier"]);
    assert_eq!(store.component_count(), 2);
    assert_eq!(store.aisp_raw_count(), 2);

    // Generated specs carry a lowercase `aisp`, so routes bind the raw instruction.
    let routes = load_routes(&store).await;
    assert_eq!(routes.len(), 2);
    for route in &routes {
        assert_eq!(route.aisp_source, AispSource::Raw);
        assert_eq!(
            Some(route.aisp.clone()),
            store.aisp_raw(&route.component_id)
        );
    }
}

#[tokio::test]
async fn test_rendered_spec_matches_schema_fields() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new();
    let generator =
        Generator::new(&store, shipped_template(), shipped_validator(), dir.path()).unwrap();

    let component = generator
        .generate_feature("CRUD widget")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(component.spec["entity"], json!("widget"));
    assert_eq!(component.spec["component_id"], json!(component.component_id));
    assert_eq!(
        component.spec["endpoint"]["operation"],
        json!(format!("{}_create", component.component_id))
    );
    assert_eq!(
        component.spec_path,
        dir.path().join(format!("{}.json", component.component_id))
    );
}

#[tokio::test]
async fn test_entity_rejected_by_shipped_schema() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new();
    let generator =
        Generator::new(&store, shipped_template(), shipped_validator(), dir.path()).unwrap();

    let err = generator.generate_feature("CRUD 9lives").await.unwrap_err();

    assert!(matches!(err, GeneratorError::Schema { .. }));
    assert_eq!(store.write_count(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_env_file_supplies_store_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "SUPABASE_URL=https://demo.supabase.co\nSUPABASE_SERVICE_KEY=\"service-key\"\n",
    )
    .unwrap();

    let vars: std::collections::HashMap<String, String> = dotenvy::from_path_iter(&path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let config = StoreConfig::new(&vars["SUPABASE_URL"], vars["SUPABASE_SERVICE_KEY"].clone()).unwrap();
    assert_eq!(config.base_url.as_str(), "https://demo.supabase.co/");
    assert_eq!(config.service_key, "service-key");
}

#[test]
fn test_store_ddl_backs_upsert_conflict_targets() {
    let ddl = std::fs::read_to_string(repo_root().join("schema/store.sql")).unwrap();

    assert!(ddl.contains("id        text  primary key"));
    assert!(ddl.contains("component_id text primary key references components (id)"));
}
