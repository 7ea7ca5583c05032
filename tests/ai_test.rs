use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use listing_schema::ai::{extract_value, prompt, search_query};
use listing_schema::{AiConfig, AiLookup, SchemaError, SearchMethod, VehicleContext};

fn civic() -> VehicleContext {
    VehicleContext {
        year: "2021".to_string(),
        make: "Honda".to_string(),
        model: "Civic".to_string(),
        trim: "Touring".to_string(),
    }
}

#[test]
fn test_search_query_per_field_with_fallback() {
    let ctx = civic();
    assert_eq!(
        search_query(&ctx, "horsepower"),
        "2021 Honda Civic Touring horsepower hp"
    );
    assert_eq!(
        search_query(&ctx, "drive_type"),
        "2021 Honda Civic Touring drivetrain FWD RWD AWD 4WD"
    );
    // unknown fields get the generic query
    assert_eq!(
        search_query(&ctx, "wheel_size"),
        "2021 Honda Civic Touring wheel_size"
    );
}

#[test]
fn test_prompt_mentions_vehicle_and_shape() {
    let ctx = civic();
    let p = prompt(&ctx, "seating_capacity");
    assert!(p.contains("2021 Honda Civic Touring"));
    assert!(p.contains("just the number"));
}

#[test]
fn test_extract_value_patterns() {
    assert_eq!(
        extract_value("The Civic makes 158 hp from its inline-four", "horsepower"),
        Some("158".to_string())
    );
    assert_eq!(
        extract_value("0-60 mph in 7.5 seconds flat", "zero_to_sixty"),
        Some("7.5".to_string())
    );
    assert_eq!(
        extract_value("138 lb-ft of torque", "torque"),
        Some("138".to_string())
    );
    assert_eq!(extract_value("seats up to 5 passengers", "seating_capacity"), Some("5".to_string()));
    // fields without a pattern never extract
    assert_eq!(extract_value("gasoline engine", "fuel_type"), None);
}

#[tokio::test]
async fn test_serp_lookup_extracts_from_snippets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [
                {"title": "Honda Civic Touring specs", "snippet": "rated at 158 hp"},
                {"title": "Review", "snippet": "a quick compact"}
            ]
        })))
        .mount(&server)
        .await;

    let lookup = AiLookup::new(AiConfig {
        method: SearchMethod::Serp,
        serp_api_key: "test-key".to_string(),
        ..AiConfig::default()
    })
    .with_base_url(&server.uri());

    let value = lookup.lookup(&civic(), "horsepower").await.unwrap();
    assert_eq!(value, Some("158".to_string()));
}

#[tokio::test]
async fn test_openai_lookup_returns_trimmed_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": " 158 \n"}}]
        })))
        .mount(&server)
        .await;

    let lookup = AiLookup::new(AiConfig {
        method: SearchMethod::OpenAi,
        openai_api_key: "test-key".to_string(),
        ..AiConfig::default()
    })
    .with_base_url(&server.uri());

    let value = lookup.lookup(&civic(), "horsepower").await.unwrap();
    assert_eq!(value, Some("158".to_string()));
}

#[tokio::test]
async fn test_lookup_requires_credentials_and_context() {
    let unconfigured = AiLookup::new(AiConfig::default());
    let err = unconfigured.lookup(&civic(), "horsepower").await.unwrap_err();
    assert!(matches!(err, SchemaError::Validation(_)));

    let configured = AiLookup::new(AiConfig {
        method: SearchMethod::Serp,
        serp_api_key: "test-key".to_string(),
        ..AiConfig::default()
    });
    let incomplete = VehicleContext {
        make: "Honda".to_string(),
        ..VehicleContext::default()
    };
    let err = configured.lookup(&incomplete, "horsepower").await.unwrap_err();
    assert!(matches!(err, SchemaError::Validation(_)));
}
