use crate::error::{AnalysisError, TransportFailure};
use crate::locale::Locale;
use crate::model::{AnalysisEnvelope, AnalysisResult, HealthStatus, ServerErrorBody};
use uuid::Uuid;

pub const ANALYZE_PATH: &str = "/analyze";
pub const HEALTH_PATH: &str = "/health";

/// One submission: language plus the image to upload. Never mutated after
/// it is handed to a transport.
#[derive(Debug, Clone)]
pub struct AnalysisRequest<I> {
    pub id: Uuid,
    pub language: Locale,
    pub image: I,
}

impl<I> AnalysisRequest<I> {
    pub fn new(language: Locale, image: I) -> Self {
        Self {
            id: Uuid::new_v4(),
            language,
            image,
        }
    }
}

/// Status and body of a settled HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an analysis request as a multipart `POST /analyze`.
#[allow(async_fn_in_trait)]
pub trait AnalysisTransport {
    type Image;

    async fn post_analysis(
        &self,
        request: &AnalysisRequest<Self::Image>,
    ) -> Result<RawResponse, TransportFailure>;
}

/// Runs one submission to completion and maps every outcome onto the
/// result or a user-facing error.
pub async fn submit<T: AnalysisTransport>(
    transport: &T,
    request: &AnalysisRequest<T::Image>,
) -> Result<AnalysisResult, AnalysisError> {
    log::info!(
        "Submitting analysis request {} (language: {})",
        request.id,
        request.language
    );
    let response = transport.post_analysis(request).await?;
    interpret_response(&response)
}

pub fn interpret_response(response: &RawResponse) -> Result<AnalysisResult, AnalysisError> {
    if response.is_success() {
        return serde_json::from_str::<AnalysisEnvelope>(&response.body)
            .map(|envelope| envelope.analysis)
            .map_err(|e| {
                log::error!("Failed to parse analysis response: {}", e);
                AnalysisError::MalformedResponse
            });
    }

    let body = serde_json::from_str::<ServerErrorBody>(&response.body).unwrap_or_default();
    if let Some(details) = &body.details {
        log::warn!("Server error details ({}): {}", response.status, details);
    }

    match body.error {
        Some(message) if !message.trim().is_empty() => Err(AnalysisError::Server {
            status: response.status,
            message,
        }),
        _ => Err(AnalysisError::server_fallback(response.status)),
    }
}

pub fn interpret_health(response: &RawResponse) -> Result<HealthStatus, AnalysisError> {
    if !response.is_success() {
        return Err(AnalysisError::server_fallback(response.status));
    }
    serde_json::from_str(&response.body).map_err(|_| AnalysisError::MalformedResponse)
}
