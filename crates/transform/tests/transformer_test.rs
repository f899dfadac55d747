//! Integration tests: building and running transformers from configuration files.

use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use transform::{TemplateTransformer, TemplateTransformerConfig, TemplateType};

fn data_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(file_name)
}

fn load_config(file_name: &str) -> TemplateTransformerConfig {
    let path = data_path(file_name);
    let raw = fs::read(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", path.display(), err));

    let decoded = if file_name.ends_with(".json") {
        TemplateTransformerConfig::from_json_slice(&raw)
    } else {
        TemplateTransformerConfig::from_yaml_slice(&raw)
    };
    decoded.unwrap_or_else(|err| panic!("failed to decode {}: {}", path.display(), err))
}

fn no_env(_: &str) -> transform::types::Result<String> {
    Ok(String::new())
}

fn build(file_name: &str) -> TemplateTransformer {
    TemplateTransformer::build_with_env("test", &load_config(file_name), &no_env).unwrap()
}

#[test]
fn test_jmes_json_config() {
    let transformer = build("jmes.json");
    assert_eq!(transformer.template_type(), TemplateType::JmesPath);

    let input = json!({"authors": [{"name": "Anna"}, {"name": "Tom"}]});
    let result = transformer.transform(&input).unwrap();
    assert_eq!(
        result,
        json!({
            "foo": "bar",
            "author": {"names": ["Anna", "Tom"]}
        })
    );
}

#[test]
fn test_jmes_json_config_defaults_when_missing() {
    let transformer = build("jmes.json");
    let result = transformer.transform(&json!({})).unwrap();
    assert_eq!(result["author"]["names"], Value::Null);
    assert_eq!(result["foo"], json!("bar"));
}

#[test]
fn test_gotmpl_json_config() {
    let transformer = build("gotmpl.json");
    assert_eq!(transformer.template_type(), TemplateType::Text);

    let result = transformer
        .transform(&json!({"hello": "Hello world"}))
        .unwrap();
    assert_eq!(result, json!("<h1>Hello world</h1>"));
}

#[test]
fn test_jmes_yaml_config() {
    let transformer = build("jmes.yaml");
    let input = json!({"data": {"authors": ["Jon", "Tony"]}});
    assert_eq!(
        transformer.transform(&input).unwrap(),
        json!(["Jon", "Tony"])
    );
}

#[test]
fn test_gotmpl_yaml_config() {
    let transformer = build("gotmpl.yaml");
    let input = json!({"data": {"authors": ["Jon", "Tony"]}});
    assert_eq!(
        transformer.transform(&input).unwrap(),
        json!({"hello": "Jon"})
    );
}

#[test]
fn test_orders_mapping_with_env_default() {
    let config = load_config("orders.yaml");
    let env = |name: &str| -> transform::types::Result<String> {
        Ok(if name == "ORDER_DEFAULT_TIER" {
            "gold".to_string()
        } else {
            String::new()
        })
    };
    let transformer = TemplateTransformer::build_with_env("orders", &config, &env).unwrap();

    let input = json!({
        "order": {
            "id": "ORD-1",
            "customer": {"name": "Acme"},
            "lines": [{"sku": "A-1"}, {"sku": "B-2"}]
        }
    });
    assert_eq!(
        transformer.transform(&input).unwrap(),
        json!({
            "orderId": "ORD-1",
            "customer": {"name": "Acme", "tier": "gold"},
            "skus": ["A-1", "B-2"],
            "currency": "EUR",
            "channel": "api"
        })
    );
}

#[test]
fn test_transform_is_repeatable() {
    for file_name in ["jmes.json", "gotmpl.json", "jmes.yaml", "gotmpl.yaml"] {
        let transformer = build(file_name);
        let input = json!({
            "hello": "hi",
            "authors": [{"name": "Anna"}],
            "data": {"authors": ["Jon"]}
        });
        let first = transformer.transform(&input).unwrap();
        for _ in 0..3 {
            assert_eq!(transformer.transform(&input).unwrap(), first, "{file_name}");
        }
    }
}

#[test]
fn test_transformers_from_same_file_are_equal() {
    for file_name in ["jmes.json", "gotmpl.json", "jmes.yaml", "gotmpl.yaml"] {
        assert_eq!(build(file_name), build(file_name), "{file_name}");
    }
    assert_ne!(build("jmes.json"), build("jmes.yaml"));
    assert_ne!(build("jmes.json"), build("gotmpl.json"));
}

#[test]
fn test_json_template_rendering_invalid_json_fails() {
    let config = TemplateTransformerConfig::from_json(
        r#"{"type": "gotmpl", "contentType": "application/json", "template": "{\"name\": {{ name }}}"}"#,
    )
    .unwrap();
    let transformer = TemplateTransformer::build("broken-json", &config).unwrap();

    let err = transformer
        .transform(&json!({"name": "not quoted"}))
        .unwrap_err();
    assert!(
        err.to_string()
            .starts_with("failed to unmarshal JSON result")
    );
}

#[test]
fn test_string_entry_type_mismatch_surfaces_at_transform() {
    use transform::{FieldMappingEntryString, JmesTemplateTransformer};

    let transformer: TemplateTransformer =
        JmesTemplateTransformer::new(FieldMappingEntryString::new("age").into()).into();
    let err = transformer.transform(&json!({"age": 30})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field mapping entry is malformed, expected a string, got number"
    );
}

#[test]
fn test_transformer_shared_across_threads() {
    let transformer = std::sync::Arc::new(build("jmes.json"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transformer = std::sync::Arc::clone(&transformer);
            std::thread::spawn(move || {
                let input = json!({"authors": [{"name": format!("author-{i}")}]});
                transformer.transform(&input).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result["author"]["names"], json!([format!("author-{i}")]));
    }
}
