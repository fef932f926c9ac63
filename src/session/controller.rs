use crate::{
    choreography::config::ShowConfig,
    choreography::metrics::ViewportMetrics,
    choreography::show::build_show,
    choreography::text::TextPlan,
    foundation::error::{ChoreoError, ChoreoResult},
    scene::stage::{PropertySink, RegistrySink, Stage, TargetRegistry},
    timeline::timeline::{Timeline, TimelineId},
};

/// Lifecycle of a [`ShowSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SessionState {
    /// Waiting for activation.
    Idle,
    /// A live timeline is playing (or the last rebuild failed and is waiting for the next one).
    Running,
    /// Stopped for good.
    Stopped,
}

struct LiveShow {
    timeline: Timeline,
    registry: TargetRegistry,
    metrics: ViewportMetrics,
    text_plans: Vec<TextPlan>,
}

/// Owns the single live show timeline and rebuilds it when the viewport changes.
///
/// A rebuild kills the previous timeline before the next one is built, so at most one timeline
/// ever writes to the stage.
pub struct ShowSession<S: Stage> {
    config: ShowConfig,
    stage: S,
    state: SessionState,
    activated: bool,
    generation: u64,
    live: Option<LiveShow>,
}

impl<S: Stage> ShowSession<S> {
    /// Create an idle session.
    pub fn new(config: ShowConfig, stage: S) -> ChoreoResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stage,
            state: SessionState::Idle,
            activated: false,
            generation: 0,
            live: None,
        })
    }

    /// Hook the session up to its stage.
    ///
    /// Without an activation surface nobody could start the show, so it starts right away.
    /// Returns `true` if the show started.
    pub fn attach(&mut self, now: f64) -> ChoreoResult<bool> {
        if self.stage.has_activation_surface() {
            return Ok(false);
        }
        tracing::warn!("no activation surface on stage, starting immediately");
        self.start(now)
    }

    /// User activation. Same as [`ShowSession::start`].
    pub fn activate(&mut self, now: f64) -> ChoreoResult<bool> {
        self.start(now)
    }

    /// Build and start the show. Idempotent: only the first call does anything.
    ///
    /// Returns `true` if this call started the show.
    pub fn start(&mut self, now: f64) -> ChoreoResult<bool> {
        if self.state == SessionState::Stopped {
            return Err(ChoreoError::evaluation("session was stopped"));
        }
        if self.activated {
            return Ok(false);
        }
        self.activated = true;
        self.state = SessionState::Running;
        self.rebuild(now)?;
        Ok(true)
    }

    /// Viewport change notification. Ignored unless running; otherwise restarts from time 0.
    pub fn resize(&mut self, now: f64) -> ChoreoResult<bool> {
        if self.state != SessionState::Running {
            tracing::debug!(state = ?self.state, "resize ignored");
            return Ok(false);
        }
        self.rebuild(now)?;
        Ok(true)
    }

    /// Kill the live timeline, then build and start a new one from the current viewport.
    ///
    /// On failure no timeline is live and the error is returned.
    pub fn rebuild(&mut self, now: f64) -> ChoreoResult<TimelineId> {
        if self.state != SessionState::Running {
            return Err(ChoreoError::evaluation(format!(
                "cannot rebuild a session in state {:?}",
                self.state
            )));
        }
        if let Some(mut old) = self.live.take() {
            old.timeline.kill();
        }

        let viewport = self.stage.viewport();
        let metrics = ViewportMetrics::compute(viewport, self.config.panel_count)?;
        let registry = TargetRegistry::resolve(&self.stage, self.config.panel_count);
        self.generation += 1;
        let id = TimelineId(self.generation);

        let built = build_show(id, &self.config, &metrics, &registry)?;
        let mut timeline = built.timeline;
        timeline.start(now)?;

        tracing::debug!(
            generation = self.generation,
            width = viewport.width,
            height = viewport.height,
            duration = timeline.duration(),
            "show rebuilt"
        );
        self.live = Some(LiveShow {
            timeline,
            registry,
            metrics,
            text_plans: built.text_plans,
        });
        Ok(id)
    }

    /// Kill the live timeline and refuse every later start.
    pub fn stop(&mut self) {
        if let Some(mut old) = self.live.take() {
            old.timeline.kill();
        }
        self.state = SessionState::Stopped;
    }

    /// Advance the live timeline to host time `now`. Returns the number of writes delivered.
    pub fn tick(&self, now: f64, sink: &mut dyn PropertySink) -> usize {
        let Some(live) = &self.live else {
            return 0;
        };
        let mut filtered = RegistrySink::new(&live.registry, sink);
        live.timeline.tick(now, &mut filtered)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The stage.
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutable stage access (e.g. to change the viewport before [`ShowSession::resize`]).
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Configuration.
    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    /// Metrics of the live timeline.
    pub fn metrics(&self) -> Option<&ViewportMetrics> {
        self.live.as_ref().map(|l| &l.metrics)
    }

    /// The live timeline.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.live.as_ref().map(|l| &l.timeline)
    }

    /// Id of the live timeline.
    pub fn live_id(&self) -> Option<TimelineId> {
        self.live.as_ref().map(|l| l.timeline.id())
    }

    /// Rest text plans of the live timeline.
    pub fn text_plans(&self) -> &[TextPlan] {
        self.live
            .as_ref()
            .map(|l| l.text_plans.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
