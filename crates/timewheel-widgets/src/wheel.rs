//! Interactive wheel widget.

use egui::{CursorIcon, Pos2, Rect, Response, Sense, Ui, vec2};
use kurbo::Point;
use timewheel_core::{DragOutcome, TimeRangeInfo, TimeRangeWheel};
use timewheel_render::{RenderContext, Renderer};

use crate::painter::EguiRenderer;

/// Map an egui screen position into wheel canvas coordinates.
pub fn canvas_point(rect: Rect, pos: Pos2) -> Point {
    Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
}

/// What happened to the wheel this frame.
pub struct TimeWheelResponse {
    pub response: Response,
    /// Set when a handle moved to a new segment this frame.
    pub changed: Option<TimeRangeInfo>,
}

/// Shows a [`TimeRangeWheel`] and feeds pointer input back into it.
pub struct TimeWheel<'a> {
    wheel: &'a mut TimeRangeWheel,
}

impl<'a> TimeWheel<'a> {
    pub fn new(wheel: &'a mut TimeRangeWheel) -> Self {
        Self { wheel }
    }

    /// Show the wheel.
    pub fn show(self, ui: &mut Ui) -> TimeWheelResponse {
        let canvas = self.wheel.geometry().canvas;
        let (rect, mut response) = ui.allocate_exact_size(
            vec2(canvas.width as f32, canvas.height as f32),
            Sense::click_and_drag(),
        );

        let mut changed = None;

        if response.drag_started() {
            // egui reports the drag once the pointer has travelled a bit;
            // hit test where the press actually happened
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                self.wheel.pointer_down(canvas_point(rect, pos));
            }
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                match self.wheel.pointer_move(canvas_point(rect, pos)) {
                    Ok(DragOutcome::Committed(info)) => changed = Some(info),
                    Ok(_) => {}
                    Err(err) => log::error!("wheel drag failed: {err}"),
                }
            }
        } else if let Some(pos) = response.hover_pos() {
            self.wheel.pointer_hover(canvas_point(rect, pos));
        } else {
            self.wheel.pointer_leave();
        }

        if response.drag_stopped() {
            self.wheel.pointer_up();
        }

        if changed.is_some() {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            match RenderContext::new(self.wheel) {
                Ok(ctx) => EguiRenderer::new(ui.painter(), rect.min).build_scene(&ctx),
                Err(err) => log::error!("wheel render failed: {err}"),
            }
        }

        if self.wheel.hovered_handle().is_some() || self.wheel.active_handle().is_some() {
            response = response.on_hover_cursor(CursorIcon::AllScroll);
        }

        TimeWheelResponse { response, changed }
    }
}
