use crate::chart::{ChartRenderer, ChartSlot, ChartSpec};
use crate::error::AnalysisError;
use crate::locale::Locale;
use crate::model::AnalysisResult;
use crate::report::ReportExport;
use crate::transport::AnalysisRequest;
use chrono::NaiveDate;
use uuid::Uuid;

/// A user-selected image as the session sees it.
pub trait ImageSource: Clone {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
    fn byte_len(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Previewing,
    Analyzing,
    Succeeded,
    Failed,
}

// The phase carries its payload so a result and an error can never coexist.
enum Phase {
    Idle,
    Previewing,
    Analyzing { request_id: Uuid },
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

/// The image plus the preview derived from it. Dropping it releases the
/// preview.
pub struct Selection<I, P> {
    pub image: I,
    pub preview: P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed,
    Stale,
}

/// Analysis Session Controller: one upload-to-result cycle.
pub struct Session<I, P, R: ChartRenderer> {
    selection: Option<Selection<I, P>>,
    phase: Phase,
    chart: ChartSlot<R>,
    chart_pending: bool,
    // Outstanding request, kept until its response arrives even when the
    // phase has moved on.
    in_flight: Option<Uuid>,
    max_upload_bytes: u64,
}

impl<I: ImageSource, P, R: ChartRenderer> Session<I, P, R> {
    pub fn new(renderer: R, max_upload_bytes: u64) -> Self {
        Self {
            selection: None,
            phase: Phase::Idle,
            chart: ChartSlot::new(renderer),
            chart_pending: false,
            in_flight: None,
            max_upload_bytes,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Previewing => SessionState::Previewing,
            Phase::Analyzing { .. } => SessionState::Analyzing,
            Phase::Succeeded(_) => SessionState::Succeeded,
            Phase::Failed(_) => SessionState::Failed,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.phase {
            Phase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Selection<I, P>> {
        self.selection.as_ref()
    }

    pub fn preview(&self) -> Option<&P> {
        self.selection.as_ref().map(|s| &s.preview)
    }

    pub fn chart(&self) -> &ChartSlot<R> {
        &self.chart
    }

    /// Whether a sent request has not been answered yet. This can outlive
    /// the Analyzing phase when the user selects a new image or resets.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.is_analyzing() && self.in_flight.is_none()
    }

    /// Replaces the image and its preview and forgets any result or error.
    /// Allowed in every state; a response still in flight becomes stale.
    pub fn select_image(&mut self, image: I, preview: P) {
        log::info!(
            "Selected floor plan '{}' ({}, {} bytes)",
            image.file_name(),
            image.mime_type(),
            image.byte_len()
        );
        if let Phase::Analyzing { request_id } = self.phase {
            log::warn!("Request {} superseded by a new selection", request_id);
        }
        self.selection = Some(Selection { image, preview });
        self.chart.clear();
        self.chart_pending = false;
        self.phase = Phase::Previewing;
    }

    /// Starts a submission. Returns `None` without side effects when no
    /// image is selected or a request is still unanswered. An image over
    /// the upload limit fails the session without producing a request.
    pub fn begin_submit(&mut self, language: Locale) -> Option<AnalysisRequest<I>> {
        if let Some(pending) = self.in_flight {
            log::debug!("Ignoring submit while request {} is in flight", pending);
            return None;
        }
        let image = self.selection.as_ref()?.image.clone();

        self.chart.clear();
        self.chart_pending = false;

        if image.byte_len() > self.max_upload_bytes {
            log::warn!(
                "Floor plan '{}' is {} bytes, over the {} byte limit",
                image.file_name(),
                image.byte_len(),
                self.max_upload_bytes
            );
            self.phase = Phase::Failed(AnalysisError::UploadTooLarge {
                limit_bytes: self.max_upload_bytes,
            });
            return None;
        }

        let request = AnalysisRequest::new(language, image);
        self.phase = Phase::Analyzing {
            request_id: request.id,
        };
        self.in_flight = Some(request.id);
        Some(request)
    }

    /// Applies the outcome of the request identified by `request_id`.
    pub fn settle(
        &mut self,
        request_id: Uuid,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Settlement {
        if self.in_flight == Some(request_id) {
            self.in_flight = None;
        }

        match self.phase {
            Phase::Analyzing { request_id: current } if current == request_id => {}
            _ => {
                log::info!("Discarding stale response for request {}", request_id);
                return Settlement::Stale;
            }
        }

        match outcome {
            Ok(result) => {
                log::info!(
                    "Analysis {} succeeded: score {}, {} suggestions",
                    request_id,
                    result.score,
                    result.suggestions.len()
                );
                self.phase = Phase::Succeeded(result);
                self.chart_pending = true;
                Settlement::Succeeded
            }
            Err(error) => {
                log::error!("Analysis {} failed: {}", request_id, error);
                self.phase = Phase::Failed(error);
                Settlement::Failed
            }
        }
    }

    pub fn needs_chart(&self) -> bool {
        self.chart_pending && self.result().is_some()
    }

    /// Draws the gauge for the current result if it has not been drawn yet,
    /// replacing any previous chart. Returns whether a chart was drawn.
    pub fn render_chart(&mut self) -> Result<bool, R::Error> {
        let Some(result) = self.result() else {
            return Ok(false);
        };
        if !self.chart_pending {
            return Ok(false);
        }
        let spec = ChartSpec::for_score(result.score);
        self.chart.replace(&spec)?;
        self.chart_pending = false;
        Ok(true)
    }

    /// Export naming for the current result, if there is one.
    pub fn export(&self, today: NaiveDate) -> Option<ReportExport> {
        self.result().map(|_| ReportExport::dated(today))
    }

    /// Ends the session, releasing the image, its preview and the chart.
    /// A request already sent stays outstanding until it settles, so no new
    /// submission starts before then.
    pub fn reset(&mut self) {
        self.selection = None;
        self.chart.clear();
        self.chart_pending = false;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Score, SuggestionItem, SuggestionKind};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeImage {
        bytes: u64,
    }

    impl ImageSource for FakeImage {
        fn file_name(&self) -> String {
            "plan.png".into()
        }
        fn mime_type(&self) -> String {
            "image/png".into()
        }
        fn byte_len(&self) -> u64 {
            self.bytes
        }
    }

    /// Counts how many previews are still alive.
    struct Preview(Rc<Cell<usize>>);

    impl Preview {
        fn new(alive: &Rc<Cell<usize>>) -> Self {
            alive.set(alive.get() + 1);
            Preview(alive.clone())
        }
    }

    impl Drop for Preview {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        live: Rc<Cell<usize>>,
        drawn: Vec<u8>,
    }

    impl ChartRenderer for CountingRenderer {
        type Handle = u8;
        type Error = ();

        fn draw(&mut self, spec: &ChartSpec) -> Result<u8, ()> {
            self.live.set(self.live.get() + 1);
            self.drawn.push(spec.score.value());
            Ok(spec.score.value())
        }

        fn destroy(&mut self, _handle: u8) {
            self.live.set(self.live.get() - 1);
        }
    }

    type TestSession = Session<FakeImage, Preview, CountingRenderer>;

    fn session() -> (TestSession, Rc<Cell<usize>>) {
        let renderer = CountingRenderer::default();
        let live = renderer.live.clone();
        (Session::new(renderer, 1_000), live)
    }

    fn result(score: u8) -> AnalysisResult {
        AnalysisResult {
            score: Score::new(score).unwrap(),
            explanation: "Good flow".into(),
            suggestions: vec![SuggestionItem {
                kind: SuggestionKind::Good,
                title: "Entrance".into(),
                impact: None,
                remedy: None,
                detail: None,
            }],
        }
    }

    fn select(session: &mut TestSession, previews: &Rc<Cell<usize>>) {
        session.select_image(FakeImage { bytes: 10 }, Preview::new(previews));
    }

    #[test]
    fn starts_idle() {
        let (session, _) = session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.can_submit());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn submit_without_image_is_a_no_op() {
        let (mut session, _) = session();
        assert!(session.begin_submit(Locale::En).is_none());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn repeated_submit_is_ignored_while_analyzing() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);

        let first = session.begin_submit(Locale::Ta).unwrap();
        assert_eq!(first.language, Locale::Ta);
        assert_eq!(session.state(), SessionState::Analyzing);
        assert!(!session.can_submit());

        assert!(session.begin_submit(Locale::Ta).is_none());
        assert_eq!(session.state(), SessionState::Analyzing);
    }

    #[test]
    fn selecting_clears_result_and_error_from_every_state() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));

        // Idle
        select(&mut session, &previews);
        assert_eq!(session.state(), SessionState::Previewing);

        // Previewing
        select(&mut session, &previews);
        assert_eq!(session.state(), SessionState::Previewing);

        // Succeeded
        let request = session.begin_submit(Locale::En).unwrap();
        session.settle(request.id, Ok(result(70)));
        assert!(session.result().is_some());
        select(&mut session, &previews);
        assert_eq!(session.state(), SessionState::Previewing);
        assert!(session.result().is_none());

        // Failed
        let request = session.begin_submit(Locale::En).unwrap();
        session.settle(request.id, Err(AnalysisError::TransportUnreachable));
        assert!(session.error().is_some());
        select(&mut session, &previews);
        assert_eq!(session.state(), SessionState::Previewing);
        assert!(session.error().is_none());

        // Analyzing
        session.begin_submit(Locale::En).unwrap();
        select(&mut session, &previews);
        assert_eq!(session.state(), SessionState::Previewing);
    }

    #[test]
    fn superseded_previews_are_released() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));

        for _ in 0..5 {
            select(&mut session, &previews);
        }
        assert_eq!(previews.get(), 1);

        session.reset();
        assert_eq!(previews.get(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn success_and_failure_leave_analyzing() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);

        let request = session.begin_submit(Locale::En).unwrap();
        assert_eq!(
            session.settle(
                request.id,
                Err(AnalysisError::Server { status: 500, message: "bad image".into() })
            ),
            Settlement::Failed
        );
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.error().map(|e| e.to_string()), Some("bad image".into()));
        assert!(session.result().is_none());

        let request = session.begin_submit(Locale::En).unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.settle(request.id, Ok(result(92))), Settlement::Succeeded);
        assert_eq!(session.state(), SessionState::Succeeded);
        assert_eq!(session.result().map(|r| r.score.value()), Some(92));
        assert!(session.error().is_none());
    }

    #[test]
    fn stale_settlements_are_discarded() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);

        let old = session.begin_submit(Locale::En).unwrap();
        select(&mut session, &previews);
        assert_eq!(session.settle(old.id, Ok(result(90))), Settlement::Stale);
        assert_eq!(session.state(), SessionState::Previewing);

        let current = session.begin_submit(Locale::En).unwrap();
        assert_eq!(
            session.settle(old.id, Err(AnalysisError::MalformedResponse)),
            Settlement::Stale
        );
        assert_eq!(session.state(), SessionState::Analyzing);
        assert_eq!(session.settle(current.id, Ok(result(90))), Settlement::Succeeded);

        // Settling twice does nothing.
        assert_eq!(session.settle(current.id, Ok(result(10))), Settlement::Stale);
        assert_eq!(session.result().map(|r| r.score.value()), Some(90));
    }

    #[test]
    fn reset_does_not_allow_a_second_request_in_flight() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);
        let first = session.begin_submit(Locale::En).unwrap();

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.has_request_in_flight());

        select(&mut session, &previews);
        assert!(!session.can_submit());
        assert!(session.begin_submit(Locale::En).is_none());
        assert_eq!(session.state(), SessionState::Previewing);

        assert_eq!(session.settle(first.id, Ok(result(80))), Settlement::Stale);
        assert!(!session.has_request_in_flight());
        assert!(session.result().is_none());

        assert!(session.can_submit());
        let second = session.begin_submit(Locale::En).unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(session.settle(second.id, Ok(result(80))), Settlement::Succeeded);
    }

    #[test]
    fn reselecting_mid_request_waits_for_the_answer() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);
        let first = session.begin_submit(Locale::En).unwrap();

        select(&mut session, &previews);
        assert!(session.begin_submit(Locale::En).is_none());

        session.settle(first.id, Err(AnalysisError::TransportUnreachable));
        assert_eq!(session.state(), SessionState::Previewing);
        assert!(session.error().is_none());
        assert!(session.begin_submit(Locale::En).is_some());
    }

    #[test]
    fn oversize_upload_fails_without_request() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        session.select_image(FakeImage { bytes: 1_001 }, Preview::new(&previews));

        assert!(session.begin_submit(Locale::En).is_none());
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(
            session.error(),
            Some(&AnalysisError::UploadTooLarge { limit_bytes: 1_000 })
        );
    }

    #[test]
    fn chart_is_drawn_once_per_result_and_replaced() {
        let (mut session, live) = session();
        let previews = Rc::new(Cell::new(0));
        select(&mut session, &previews);

        assert_eq!(session.render_chart(), Ok(false));

        let request = session.begin_submit(Locale::En).unwrap();
        session.settle(request.id, Ok(result(92)));
        assert!(session.needs_chart());
        assert_eq!(session.render_chart(), Ok(true));
        assert_eq!(session.render_chart(), Ok(false));
        assert_eq!(live.get(), 1);

        let request = session.begin_submit(Locale::En).unwrap();
        assert_eq!(live.get(), 0);
        session.settle(request.id, Ok(result(40)));
        assert_eq!(session.render_chart(), Ok(true));
        assert_eq!(live.get(), 1);
        assert_eq!(session.chart().renderer().drawn, vec![92, 40]);

        select(&mut session, &previews);
        assert_eq!(live.get(), 0);
        assert!(!session.chart().is_live());
    }

    #[test]
    fn export_requires_a_result() {
        let (mut session, _) = session();
        let previews = Rc::new(Cell::new(0));
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        select(&mut session, &previews);
        assert!(session.export(today).is_none());

        let request = session.begin_submit(Locale::En).unwrap();
        session.settle(request.id, Ok(result(55)));
        assert_eq!(
            session.export(today).map(|e| e.pdf_file_name()),
            Some("Vastu_Report_2026-10-18.pdf".to_string())
        );
    }
}
