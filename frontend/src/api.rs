use futures::future::{Either, select};
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::transport::{ANALYZE_PATH, HEALTH_PATH};
use shared::{
    AnalysisError, AnalysisRequest, AnalysisTransport, AppConfig, HealthStatus, ImageSource,
    RawResponse, TransportFailure, interpret_health,
};
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// A floor plan picked from the file input or dropped on the upload area.
#[derive(Clone)]
pub struct FloorPlan(GlooFile);

impl FloorPlan {
    pub fn new(file: GlooFile) -> Self {
        Self(file)
    }

    pub fn file(&self) -> &GlooFile {
        &self.0
    }
}

impl ImageSource for FloorPlan {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.raw_mime_type()
    }

    fn byte_len(&self) -> u64 {
        self.0.size()
    }
}

/// Talks to the analysis backend with `fetch`.
pub struct HttpTransport {
    config: Rc<AppConfig>,
}

impl HttpTransport {
    pub fn new(config: Rc<AppConfig>) -> Self {
        Self { config }
    }

    pub async fn probe_health(&self) -> Result<HealthStatus, AnalysisError> {
        let response = Request::get(&self.config.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| TransportFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        interpret_health(&RawResponse::new(status, body))
    }

    async fn send_analysis(
        &self,
        request: &AnalysisRequest<FloorPlan>,
    ) -> Result<RawResponse, TransportFailure> {
        let form_data = web_sys::FormData::new().map_err(encoding_failure)?;
        form_data
            .append_with_blob_and_filename(
                "image",
                request.image.file().as_ref(),
                &request.image.file_name(),
            )
            .map_err(encoding_failure)?;
        form_data
            .append_with_str("language", request.language.code())
            .map_err(encoding_failure)?;

        let response = Request::post(&self.config.endpoint(ANALYZE_PATH))
            .body(form_data)
            .map_err(|e| TransportFailure::Encoding(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportFailure::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::debug!("Request {} answered with HTTP {}", request.id, status);
        Ok(RawResponse::new(status, body))
    }
}

impl AnalysisTransport for HttpTransport {
    type Image = FloorPlan;

    async fn post_analysis(
        &self,
        request: &AnalysisRequest<FloorPlan>,
    ) -> Result<RawResponse, TransportFailure> {
        let exchange = Box::pin(self.send_analysis(request));
        let deadline = Box::pin(TimeoutFuture::new(self.config.request_timeout_millis()));

        match select(exchange, deadline).await {
            Either::Left((response, _)) => response,
            Either::Right(_) => Err(TransportFailure::TimedOut {
                secs: self.config.request_timeout_secs,
            }),
        }
    }
}

fn encoding_failure(err: JsValue) -> TransportFailure {
    TransportFailure::Encoding(format!("{:?}", err))
}
