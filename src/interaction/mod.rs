use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TooltipMode {
    /// Tooltip follows the pointer only while it is pressed (touch-style scrub).
    #[default]
    Drag,
    /// Tooltip follows every pointer move.
    Hover,
    /// Tooltip stays hidden regardless of pointer input.
    Hidden,
}

/// Pointer state driving the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    tooltip_mode: TooltipMode,
    pointer_x: Option<f64>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            tooltip_mode: TooltipMode::default(),
            pointer_x: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn new(tooltip_mode: TooltipMode) -> Self {
        Self {
            tooltip_mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn tooltip_mode(self) -> TooltipMode {
        self.tooltip_mode
    }

    pub fn set_tooltip_mode(&mut self, mode: TooltipMode) {
        self.tooltip_mode = mode;
    }

    /// Last pointer x that should drive the tooltip, if any.
    #[must_use]
    pub fn tooltip_pointer_x(self) -> Option<f64> {
        match self.tooltip_mode {
            TooltipMode::Hidden => None,
            TooltipMode::Drag if self.mode != InteractionMode::Dragging => None,
            TooltipMode::Drag | TooltipMode::Hover => self.pointer_x,
        }
    }

    pub fn on_pointer_down(&mut self, x: f64) {
        self.mode = InteractionMode::Dragging;
        self.pointer_x = Some(x);
    }

    pub fn on_pointer_move(&mut self, x: f64) {
        self.pointer_x = Some(x);
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
        if self.tooltip_mode != TooltipMode::Hover {
            self.pointer_x = None;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.mode = InteractionMode::Idle;
        self.pointer_x = None;
    }
}
