mod engine_config;
mod layout;
mod path_cache;

pub use engine_config::ChartLayoutConfig;
pub use layout::{ChartLayout, LineInfo};
pub use path_cache::PathCacheStats;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::primitives::ensure_finite;
use crate::core::{MarkerRole, SeriesSet, Tooltip, Viewport};
use crate::error::ChartResult;
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::{Renderer, SharedTextMeasurer};

/// Chart engine driving layout generations and pointer-driven tooltips.
///
/// Layout is recomputed whenever the series or the viewport change; pointer
/// updates only query the current generation.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartLayoutConfig,
    measurer: SharedTextMeasurer,
    series: SeriesSet,
    viewport: Option<Viewport>,
    layout: Option<Arc<ChartLayout>>,
    next_generation: u64,
    interaction: InteractionState,
    tooltip: Option<Tooltip>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(
        renderer: R,
        config: ChartLayoutConfig,
        measurer: SharedTextMeasurer,
    ) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            interaction: InteractionState::new(config.tooltip_mode),
            config,
            measurer,
            series: SeriesSet::default(),
            viewport: None,
            layout: None,
            next_generation: 0,
            tooltip: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartLayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Current layout generation, if the viewport is known.
    #[must_use]
    pub fn layout(&self) -> Option<Arc<ChartLayout>> {
        self.layout.clone()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Replaces all lines; relayouts when the viewport is known.
    pub fn set_series(&mut self, series: SeriesSet) -> ChartResult<()> {
        debug!(
            lines = series.lines().len(),
            domain_from = ?series.domain().from,
            domain_to = ?series.domain().to,
            "set series"
        );
        let layout = self.build_layout(&series, self.viewport, &self.config)?;
        self.series = series;
        self.commit(layout);
        Ok(())
    }

    /// Records a viewport size; returns `true` when a new generation was built.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<bool> {
        if self.viewport == Some(viewport) && self.layout.is_some() {
            return Ok(false);
        }
        let layout = self.build_layout(&self.series, Some(viewport), &self.config)?;
        self.viewport = Some(viewport);
        self.commit(layout);
        Ok(true)
    }

    pub fn set_config(&mut self, config: ChartLayoutConfig) -> ChartResult<()> {
        config.validate()?;
        let layout = self.build_layout(&self.series, self.viewport, &config)?;
        self.interaction.set_tooltip_mode(config.tooltip_mode);
        self.config = config;
        self.commit(layout);
        Ok(())
    }

    pub fn set_marker_roles(&mut self, roles: Vec<MarkerRole>) -> ChartResult<()> {
        let config = self.config.clone().with_marker_roles(roles);
        self.set_config(config)
    }

    pub fn pointer_down(&mut self, x: f64) -> ChartResult<Option<&Tooltip>> {
        let x = ensure_finite(x, "pointer x")?;
        self.interaction.on_pointer_down(x);
        self.refresh_tooltip();
        Ok(self.tooltip.as_ref())
    }

    pub fn pointer_move(&mut self, x: f64) -> ChartResult<Option<&Tooltip>> {
        let x = ensure_finite(x, "pointer x")?;
        self.interaction.on_pointer_move(x);
        self.refresh_tooltip();
        Ok(self.tooltip.as_ref())
    }

    pub fn pointer_up(&mut self) {
        self.interaction.on_pointer_up();
        self.refresh_tooltip();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        self.refresh_tooltip();
    }

    /// Hands the current generation to the renderer at the given reveal progress.
    ///
    /// Does nothing until the viewport is known.
    pub fn render(&mut self, progress: f64) -> ChartResult<()> {
        let progress = ensure_finite(progress, "animation progress")?;
        let Some(layout) = self.layout.as_ref() else {
            trace!("render skipped before first layout");
            return Ok(());
        };
        let frame = layout.frame(progress, self.tooltip.clone())?;
        self.renderer.render(&frame)
    }

    /// Builds the next generation without touching engine state, so a failed
    /// layout leaves the previous series, config and layout in place.
    fn build_layout(
        &self,
        series: &SeriesSet,
        viewport: Option<Viewport>,
        config: &ChartLayoutConfig,
    ) -> ChartResult<Option<ChartLayout>> {
        let Some(viewport) = viewport else {
            return Ok(None);
        };
        ChartLayout::compute(
            self.next_generation,
            series,
            viewport,
            config,
            self.measurer.as_ref(),
        )
        .map(Some)
    }

    fn commit(&mut self, layout: Option<ChartLayout>) {
        if let Some(layout) = layout {
            self.next_generation += 1;
            self.layout = Some(Arc::new(layout));
        }
        self.refresh_tooltip();
    }

    fn refresh_tooltip(&mut self) {
        self.tooltip = match (self.interaction.tooltip_pointer_x(), self.layout.as_ref()) {
            (Some(pointer_x), Some(layout)) => layout.tooltip(pointer_x),
            _ => None,
        };
        trace!(
            visible = self.tooltip.is_some(),
            entries = self.tooltip.as_ref().map_or(0, |tooltip| tooltip.entries.len()),
            "tooltip refreshed"
        );
    }
}
