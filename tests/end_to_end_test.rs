use anyhow::Result;
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_lambda_events::encodings::Body;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use docgen_lambda::core::ConfigLoader;
use docgen_lambda::{DefaultHandler, DocgenError, FileConfigLoader, HandlerConfig};
use tempfile::TempDir;

const CONFIG_JSON: &str = r#"{
    "document": {
        "currency": "JPY ",
        "decimal_places": 0,
        "tax_rate": 10,
        "notes": ["Please pay by the end of next month."]
    },
    "organization": {
        "name": "Acme Studio",
        "address": ["1-2-3 Jingumae", "Shibuya, Tokyo"],
        "phone": "03-0000-0000",
        "email": "billing@acme.example",
        "bank_account": "Example Bank, Shibuya Branch 1234567"
    }
}"#;

async fn write_config(dir: &TempDir, file_name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(file_name);
    tokio::fs::write(&path, content).await?;
    Ok(path)
}

fn payload_with_items(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Consulting session {}", i + 1),
                "unit_price": 15000,
                "quantity": 2,
                "unit": "hour"
            })
        })
        .collect();

    serde_json::json!({
        "title": "Architecture review",
        "date": "2024-06-30",
        "name": "Example Corp.",
        "type": "invoice",
        "items": items
    })
    .to_string()
}

fn decode_pdf(body: Option<Body>) -> Result<Vec<u8>> {
    match body {
        Some(Body::Text(text)) => Ok(STANDARD.decode(text)?),
        other => anyhow::bail!("unexpected body: {:?}", other),
    }
}

#[tokio::test]
async fn test_renders_pdf_from_json_config() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_config(&dir, "config.json", CONFIG_JSON).await?;
    let handler = DefaultHandler::with_defaults(HandlerConfig::new(
        Some("https://example.com".to_string()),
        config_path,
    ));

    let response = handler
        .handle(ApiGatewayProxyRequest {
            body: Some(payload_with_items(3)),
            ..Default::default()
        })
        .await;

    assert_eq!(response.status_code, 200);
    assert!(response.is_base64_encoded);

    let pdf = decode_pdf(response.body)?;
    assert!(pdf.starts_with(b"%PDF-"));

    let document = lopdf::Document::load_mem(&pdf)?;
    assert_eq!(document.get_pages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_long_documents_span_pages() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_config(&dir, "config.json", CONFIG_JSON).await?;
    let handler = DefaultHandler::with_defaults(HandlerConfig::new(None, config_path));

    let response = handler
        .handle(ApiGatewayProxyRequest {
            body: Some(payload_with_items(80)),
            ..Default::default()
        })
        .await;

    assert_eq!(response.status_code, 200);
    let document = lopdf::Document::load_mem(&decode_pdf(response.body)?)?;
    assert!(document.get_pages().len() >= 2);
    Ok(())
}

#[tokio::test]
async fn test_toml_config_is_supported() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_config(
        &dir,
        "config.toml",
        r#"
[document]
currency = "$"
decimal_places = 2
tax_rate = 8

[organization]
name = "Acme Studio"
address = ["100 Main Street"]
"#,
    )
    .await?;

    let (document, organization) = FileConfigLoader.load(&config_path).await?;
    assert_eq!(document.currency, "$");
    assert_eq!(document.decimal_places, 2);
    assert_eq!(organization.address, vec!["100 Main Street".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_missing_config_file_is_generic_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("absent.json");

    let err = FileConfigLoader.load(&missing).await.unwrap_err();
    assert!(matches!(err, DocgenError::ConfigError { .. }));

    let handler = DefaultHandler::with_defaults(HandlerConfig::new(None, missing));
    let response = handler
        .handle(ApiGatewayProxyRequest {
            body: Some(payload_with_items(1)),
            ..Default::default()
        })
        .await;

    assert_eq!(response.status_code, 500);
    assert!(matches!(
        response.body,
        Some(Body::Text(ref text)) if text == "Internal Server Error"
    ));
    Ok(())
}

#[tokio::test]
async fn test_overflowing_totals_are_generic_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = write_config(&dir, "config.json", CONFIG_JSON).await?;
    let handler = DefaultHandler::with_defaults(HandlerConfig::new(None, config_path));

    let body = serde_json::json!({
        "items": [{"title": "Huge", "unit_price": i64::MAX, "quantity": 2, "unit": "piece"}]
    })
    .to_string();
    let response = handler
        .handle(ApiGatewayProxyRequest {
            body: Some(body),
            ..Default::default()
        })
        .await;

    assert_eq!(response.status_code, 500);
    assert!(matches!(
        response.body,
        Some(Body::Text(ref text)) if text == "Internal Server Error"
    ));
    Ok(())
}
