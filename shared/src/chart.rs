use crate::model::Score;
use std::f64::consts::PI;

pub const SUCCESS_COLOR: &str = "#10B981";
pub const WARNING_COLOR: &str = "#F59E0B";
pub const DANGER_COLOR: &str = "#EF4444";
pub const TRACK_COLOR: &str = "rgba(255,255,255,0.05)";

/// Gauge arc length and start, in degrees clockwise from 12 o'clock.
const GAUGE_SWEEP_DEG: f64 = 240.0;
const GAUGE_ROTATION_DEG: f64 = 240.0;
const GAUGE_CUTOUT: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Success,
    Warning,
    Danger,
}

impl ScoreBand {
    pub fn for_score(score: Score) -> Self {
        match score.value() {
            s if s > 80 => ScoreBand::Success,
            s if s > 50 => ScoreBand::Warning,
            _ => ScoreBand::Danger,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Success => SUCCESS_COLOR,
            ScoreBand::Warning => WARNING_COLOR,
            ScoreBand::Danger => DANGER_COLOR,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::Success => "score--success",
            ScoreBand::Warning => "score--warning",
            ScoreBand::Danger => "score--danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub value: u8,
    pub color: &'static str,
}

/// Everything a renderer needs to draw the score gauge: the filled and
/// remaining slices plus the arc geometry in canvas radians (0 at 3
/// o'clock, clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub score: Score,
    pub band: ScoreBand,
    pub slices: [Slice; 2],
    pub start_angle: f64,
    pub sweep: f64,
    pub cutout: f64,
}

impl ChartSpec {
    pub fn for_score(score: Score) -> Self {
        let band = ScoreBand::for_score(score);
        Self {
            score,
            band,
            slices: [
                Slice {
                    value: score.value(),
                    color: band.color(),
                },
                Slice {
                    value: score.remainder(),
                    color: TRACK_COLOR,
                },
            ],
            start_angle: (GAUGE_ROTATION_DEG - 90.0).to_radians(),
            sweep: GAUGE_SWEEP_DEG.to_radians(),
            cutout: GAUGE_CUTOUT,
        }
    }

    /// Angle at which the filled slice ends.
    pub fn value_end_angle(&self) -> f64 {
        let total = f64::from(self.slices[0].value) + f64::from(self.slices[1].value);
        let fraction = if total > 0.0 {
            f64::from(self.slices[0].value) / total
        } else {
            0.0
        };
        self.start_angle + self.sweep * fraction
    }

    pub fn end_angle(&self) -> f64 {
        (self.start_angle + self.sweep) % (2.0 * PI)
    }
}

/// Something that can put a gauge on screen and take it down again.
pub trait ChartRenderer {
    type Handle;
    type Error;

    fn draw(&mut self, spec: &ChartSpec) -> Result<Self::Handle, Self::Error>;
    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns at most one live chart. A new draw always destroys the previous
/// handle first; dropping the slot destroys whatever is live.
pub struct ChartSlot<R: ChartRenderer> {
    renderer: R,
    live: Option<R::Handle>,
}

impl<R: ChartRenderer> ChartSlot<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            live: None,
        }
    }

    pub fn replace(&mut self, spec: &ChartSpec) -> Result<(), R::Error> {
        self.clear();
        let handle = self.renderer.draw(spec)?;
        self.live = Some(handle);
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.live.take() {
            self.renderer.destroy(handle);
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: ChartRenderer> Drop for ChartSlot<R> {
    fn drop(&mut self) {
        self.clear();
    }
}
