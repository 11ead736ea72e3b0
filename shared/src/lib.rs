//! Platform-independent core of the VastuAI analyzer: wire model, session
//! controller, gauge model, locale table and configuration.

pub mod chart;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod report;
pub mod session;
pub mod transport;

pub use chart::{ChartRenderer, ChartSlot, ChartSpec, ScoreBand};
pub use config::{AppConfig, ConfigOverrides};
pub use error::{AnalysisError, ConfigError, TransportFailure};
pub use locale::{Locale, LocaleTable, UiStrings};
pub use model::{AnalysisResult, HealthStatus, Readiness, Score, SuggestionItem, SuggestionKind};
pub use report::ReportExport;
pub use session::{ImageSource, Session, SessionState, Settlement};
pub use transport::{AnalysisRequest, AnalysisTransport, RawResponse, interpret_health, interpret_response, submit};
pub use uuid::Uuid;
