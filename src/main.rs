use anyhow::{bail, Context};
use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_lambda_events::encodings::Body;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use docgen_lambda::utils::{logger, validation::Validate};
use docgen_lambda::{CliConfig, DefaultHandler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let body = tokio::fs::read_to_string(&config.payload)
        .await
        .with_context(|| format!("Failed to read payload {}", config.payload.display()))?;

    let handler = DefaultHandler::with_defaults(config.handler_config());
    let request = ApiGatewayProxyRequest {
        body: Some(body),
        ..Default::default()
    };
    let response = handler.handle(request).await;

    println!("Status: {}", response.status_code);
    for (name, value) in &response.headers {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }

    let text = match response.body {
        Some(Body::Text(text)) => text,
        Some(Body::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        _ => String::new(),
    };

    if response.status_code != 200 {
        eprintln!("❌ {}", text);
        std::process::exit(1);
    }
    if !response.is_base64_encoded {
        bail!("handler returned a success response without a base64 body");
    }

    let pdf = STANDARD
        .decode(text.as_bytes())
        .context("Failed to decode response body")?;
    tokio::fs::write(&config.output, &pdf)
        .await
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    println!("✅ Wrote {} ({} bytes)", config.output.display(), pdf.len());
    Ok(())
}
