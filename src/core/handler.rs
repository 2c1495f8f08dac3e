use crate::config::HandlerConfig;
use crate::core::generator::DocumentGenerator;
use crate::core::{ConfigLoader, Renderer};
use crate::domain::model::Payload;
use crate::utils::error::{DocgenError, ErrorKind};
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const STATUS_OK: i64 = 200;
// Malformed input is answered with 500, not 400, with the decode error as body.
const STATUS_BAD_INPUT: i64 = 500;
const STATUS_INTERNAL_ERROR: i64 = 500;

/// Translates one API Gateway proxy event into one proxy response.
///
/// Failures are encoded in the response; `handle` never returns an error.
pub struct RequestHandler<L: ConfigLoader, R: Renderer> {
    generator: DocumentGenerator<L, R>,
    cors_origin: Option<HeaderValue>,
}

impl<L: ConfigLoader, R: Renderer> RequestHandler<L, R> {
    pub fn new(config: HandlerConfig, loader: L, renderer: R) -> Self {
        let cors_origin = config
            .cors_origin
            .as_deref()
            .filter(|origin| !origin.is_empty())
            .and_then(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin, error = %e, "Ignoring CORS origin that is not a valid header value");
                    None
                }
            });

        Self {
            generator: DocumentGenerator::new(loader, renderer, config.config_path),
            cors_origin,
        }
    }

    pub async fn handle(&self, request: ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
        let mut headers = HeaderMap::new();
        if let Some(origin) = &self.cors_origin {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        }

        let body = request.body.as_deref().unwrap_or_default();
        let payload = match Payload::from_json(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting request with malformed payload");
                return Self::failure(headers, &e);
            }
        };

        let item_count = payload.items.len();
        match self.generator.generate(payload).await {
            Ok(pdf) => {
                tracing::info!(items = item_count, bytes = pdf.len(), "Rendered document");
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE));
                ApiGatewayProxyResponse {
                    status_code: STATUS_OK,
                    headers,
                    body: Some(Body::Text(STANDARD.encode(pdf))),
                    is_base64_encoded: true,
                    ..Default::default()
                }
            }
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind(), "Document generation failed");
                Self::failure(headers, &e)
            }
        }
    }

    fn failure(headers: HeaderMap, error: &DocgenError) -> ApiGatewayProxyResponse {
        let (status_code, body) = match error.kind() {
            ErrorKind::BadInput => (STATUS_BAD_INPUT, error.to_string()),
            ErrorKind::Configuration | ErrorKind::Rendering => {
                (STATUS_INTERNAL_ERROR, INTERNAL_SERVER_ERROR.to_string())
            }
        };

        ApiGatewayProxyResponse {
            status_code,
            headers,
            body: Some(Body::Text(body)),
            is_base64_encoded: false,
            ..Default::default()
        }
    }
}
