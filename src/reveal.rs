//! Entrance sequencing for panel elements
//!
//! A [`RevealSchedule`] is an ordered list of steps, each naming an element,
//! the delay before it starts moving and the easing that drives it. The
//! renderer asks the schedule for an element's progress at the current clock
//! value and turns it into a [`Reveal`] (opacity + vertical offset).

/// Elements that take part in an entrance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelElement {
    SearchButton,
    Icon,
    Temperature,
    City,
    Humidity,
    Wind,
}

/// Progress curve of a single step: a damped spring pulling a unit mass from 0 to 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Easing {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

/// Spring settles once its envelope falls below this.
const SPRING_REST: f32 = 0.001;

impl Easing {
    pub const fn spring(stiffness: f32, damping: f32) -> Self {
        Easing {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    fn omega(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    fn zeta(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Progress after `t_ms`. Starts at 0.0, ends at 1.0 and may overshoot.
    pub fn progress(&self, t_ms: u64) -> f32 {
        if t_ms >= self.duration_ms() {
            return 1.0;
        }
        let t = t_ms as f32 / 1000.0;
        let omega = self.omega();
        let zeta = self.zeta();
        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            // Critically or over-damped: treat as critical
            let envelope = (-omega * t).exp();
            1.0 - envelope * (1.0 + omega * t)
        }
    }

    /// Time after which progress is pinned at 1.0
    pub fn duration_ms(&self) -> u64 {
        let omega = self.omega();
        let zeta = self.zeta();
        let decay = if zeta < 1.0 { zeta * omega } else { omega };
        if decay <= 0.0 {
            return 0;
        }
        ((-SPRING_REST.ln()) / decay * 1000.0).ceil() as u64
    }
}

/// One entry of a schedule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStep {
    pub element: PanelElement,
    pub delay_ms: u64,
    pub easing: Easing,
}

/// Ordered reveal policy
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSchedule {
    steps: Vec<RevealStep>,
}

/// Gap between consecutive panel elements.
pub const PANEL_STAGGER_MS: u64 = 300;

impl RevealSchedule {
    pub fn new(steps: Vec<RevealStep>) -> Self {
        Self { steps }
    }

    /// Elements revealed one after another, `stagger_ms` apart, same easing.
    pub fn staggered(elements: &[PanelElement], stagger_ms: u64, easing: Easing) -> Self {
        let steps = elements
            .iter()
            .enumerate()
            .map(|(i, &element)| RevealStep {
                element,
                delay_ms: i as u64 * stagger_ms,
                easing,
            })
            .collect();
        Self { steps }
    }

    /// Reading reveal: icon, temperature, city, then the two stats.
    pub fn panel() -> Self {
        Self::staggered(
            &[
                PanelElement::Icon,
                PanelElement::Temperature,
                PanelElement::City,
                PanelElement::Humidity,
                PanelElement::Wind,
            ],
            PANEL_STAGGER_MS,
            Easing::spring(120.0, 10.0),
        )
    }

    /// Search button pop-in on startup.
    pub fn intro() -> Self {
        Self::new(vec![RevealStep {
            element: PanelElement::SearchButton,
            delay_ms: 0,
            easing: Easing::spring(200.0, 10.0),
        }])
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    /// Progress of `element` at `elapsed_ms`, or `None` if it isn't scheduled.
    pub fn progress(&self, element: PanelElement, elapsed_ms: u64) -> Option<f32> {
        let step = self.steps.iter().find(|s| s.element == element)?;
        if elapsed_ms < step.delay_ms {
            return Some(0.0);
        }
        Some(step.easing.progress(elapsed_ms - step.delay_ms))
    }

    /// Clock value after which every element is at rest
    pub fn settle_ms(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| s.delay_ms + s.easing.duration_ms())
            .max()
            .unwrap_or(0)
    }

    /// Visual state of `element` for a running clock (`None` = settled).
    pub fn reveal(&self, element: PanelElement, clock: Option<u64>) -> Reveal {
        match clock {
            None => Reveal::SHOWN,
            Some(elapsed) => self
                .progress(element, elapsed)
                .map(Reveal::from_progress)
                .unwrap_or(Reveal::SHOWN),
        }
    }
}

/// Rows an element travels while entering.
pub const ENTRY_OFFSET_ROWS: u16 = 2;

/// What the renderer does with an element at a point in its entrance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    /// 0.0 (invisible) ..= 1.0 (full color)
    pub opacity: f32,
    /// Extra rows pushed down from the resting position
    pub offset_rows: u16,
}

impl Reveal {
    pub const SHOWN: Reveal = Reveal {
        opacity: 1.0,
        offset_rows: 0,
    };

    pub fn from_progress(progress: f32) -> Self {
        let opacity = progress.clamp(0.0, 1.0);
        let remaining = (1.0 - progress).clamp(0.0, 1.0);
        Self {
            opacity,
            offset_rows: (remaining * ENTRY_OFFSET_ROWS as f32).round() as u16,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0
    }
}
