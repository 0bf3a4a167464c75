//! Timeline editor UI pass.
//!
//! One egui pass per frame: allocate the rect, feed its size to the
//! viewport, process input, then paint the layers bottom to top. All
//! viewport and marker mutations happen in the input phase; painting is
//! read-only, so a render can never re-enter a mutation.

use eframe::egui::{PointerButton, Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::core::view_events::CursorMovedEvent;
use crate::core::viewport::Axis;
use crate::theme::Theme;
use crate::widgets::editor::editor::{
    EditorAction, TimelineEditor, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};

/// Render the timeline editor into the available space.
/// Returns the interaction result for the host.
pub fn timeline_editor(ui: &mut Ui, editor: &mut TimelineEditor, theme: &Theme) -> EditorAction {
    let mut action = EditorAction::None;

    let desired = ui.available_size().max(Vec2::new(64.0, 64.0));
    let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

    // Edit region inset by the configured padding; the hosting container
    // decides the outer size, the viewport only mirrors it
    let edit_rect = rect.shrink(editor.config.padding.clamp(0.0, rect.size().min_elem() / 2.0));
    editor.viewport.set_visible_size(edit_rect.width(), edit_rect.height());

    // Input phase - the only place the viewport and markers mutate
    handle_pointer(editor, edit_rect, &response, &mut action);
    handle_scroll(ui, editor, edit_rect, &response);

    // Paint phase, bottom to top; background also covers the padding
    if ui.is_rect_visible(rect) {
        for layer in editor.layers() {
            let target = if layer.full_bleed() { rect } else { edit_rect };
            let painter = ui.painter_at(target);
            layer.paint(&painter, target, &editor.viewport, theme);
        }
    }

    action
}

/// Hover drives the cursor crosshair; middle-drag pans; primary click seeks
fn handle_pointer(
    editor: &mut TimelineEditor,
    edit_rect: Rect,
    response: &Response,
    action: &mut EditorAction,
) {
    match response.hover_pos().filter(|p| edit_rect.contains(*p)) {
        Some(pos) => {
            let time = to_content(editor, edit_rect, Axis::Time, pos);
            let track = to_content(editor, edit_rect, Axis::Track, pos);
            for (axis, value) in [(Axis::Time, time), (Axis::Track, track)] {
                if editor.markers.markers.cursor(axis).visible {
                    editor.markers.markers.update(axis, value);
                } else {
                    editor.markers.markers.show(axis, value);
                }
            }
            editor.hovered = true;
            editor.emitter.emit(CursorMovedEvent { time, track });
        }
        None => {
            // Pointer left the edit region: crosshair goes Hidden
            if editor.hovered {
                editor.markers.markers.hide(Axis::Time);
                editor.markers.markers.hide(Axis::Track);
                editor.hovered = false;
            }
        }
    }

    if response.dragged_by(PointerButton::Middle) {
        let delta = response.drag_delta();
        editor.viewport.pan(Axis::Time, -delta.x);
        editor.viewport.pan(Axis::Track, -delta.y);
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos().filter(|p| edit_rect.contains(*p)) {
            let time = to_content(editor, edit_rect, Axis::Time, pos);
            *action = EditorAction::Seek(editor.snap(Axis::Time, time));
        }
    }
}

/// Scroll pans; ctrl+scroll zooms anchored at the cursor; shift switches
/// to the track axis
fn handle_scroll(ui: &Ui, editor: &mut TimelineEditor, edit_rect: Rect, response: &Response) {
    if !response.hovered() {
        return;
    }
    let (scroll, modifiers) = ui.input(|i| (i.raw_scroll_delta, i.modifiers));
    if scroll == Vec2::ZERO {
        return;
    }

    let hover = response.hover_pos().unwrap_or_else(|| edit_rect.center());

    if modifiers.ctrl || modifiers.command {
        let Some(factor) = zoom_factor(scroll.y) else {
            return;
        };
        let axis = if modifiers.shift { Axis::Track } else { Axis::Time };
        let anchor = match axis {
            Axis::Time => hover.x - edit_rect.min.x,
            Axis::Track => hover.y - edit_rect.min.y,
        };
        editor.viewport.zoom_by(axis, factor, anchor);
    } else if modifiers.shift {
        editor.viewport.pan(Axis::Track, -scroll.y * editor.config.scroll_pan_speed);
    } else {
        editor.viewport.pan(Axis::Time, -(scroll.x + scroll.y) * editor.config.scroll_pan_speed);
    }
}

/// Zoom direction for a vertical scroll amount. None when the scroll has
/// no vertical component (a horizontal trackpad swipe must not zoom).
fn zoom_factor(scroll_y: f32) -> Option<f32> {
    if scroll_y > 0.0 {
        Some(ZOOM_IN_FACTOR)
    } else if scroll_y < 0.0 {
        Some(ZOOM_OUT_FACTOR)
    } else {
        None
    }
}

#[inline]
fn to_content(editor: &TimelineEditor, edit_rect: Rect, axis: Axis, pos: Pos2) -> f32 {
    let screen = match axis {
        Axis::Time => pos.x - edit_rect.min.x,
        Axis::Track => pos.y - edit_rect.min.y,
    };
    editor.viewport.to_content(axis, screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_only_scroll_does_not_zoom() {
        assert_eq!(zoom_factor(0.0), None);
        assert_eq!(zoom_factor(3.0), Some(ZOOM_IN_FACTOR));
        assert_eq!(zoom_factor(-3.0), Some(ZOOM_OUT_FACTOR));
    }
}
