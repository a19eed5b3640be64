use crate::model;
use eframe::egui;

use super::geometry::{pointer_angle, rotate_vec2, to_global_delta};
use super::hit_test::{Handle, HandleMetrics, point_in_object, resolve_handle, topmost_hit};
use super::settings::{EditorSettings, TextDefaults};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) enum Gesture {
    #[default]
    Idle,
    Dragging,
    Resizing {
        handle: Handle,
    },
    Rotating {
        initial_rotation: f32,
        initial_pointer_angle: f32,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct InteractionState {
    pub gesture: Gesture,
    pub last_pointer: egui::Pos2,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.gesture {
            Gesture::Resizing { handle } => Some(handle),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TextEditCommand {
    Begin { object_id: u64 },
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub(super) struct Effects {
    pub repaint: bool,
    pub text_edit: Option<TextEditCommand>,
}

impl Effects {
    fn repaint_only() -> Self {
        Self {
            repaint: true,
            text_edit: None,
        }
    }

    pub fn and(self, later: Effects) -> Effects {
        Effects {
            repaint: self.repaint || later.repaint,
            text_edit: later.text_edit.or(self.text_edit),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CursorHint {
    Default,
    Move,
    Crosshair,
    ResizeHorizontal,
    ResizeVertical,
    ResizeNwSe,
    ResizeNeSw,
}

impl CursorHint {
    fn for_handle(handle: Handle) -> Self {
        match handle {
            Handle::Rotate => CursorHint::Crosshair,
            Handle::Left | Handle::Right => CursorHint::ResizeHorizontal,
            Handle::Top | Handle::Bottom => CursorHint::ResizeVertical,
            Handle::TopLeft | Handle::BottomRight => CursorHint::ResizeNwSe,
            Handle::TopRight | Handle::BottomLeft => CursorHint::ResizeNeSw,
        }
    }

    pub fn to_cursor_icon(self) -> egui::CursorIcon {
        match self {
            CursorHint::Default => egui::CursorIcon::Default,
            CursorHint::Move => egui::CursorIcon::Move,
            CursorHint::Crosshair => egui::CursorIcon::Crosshair,
            CursorHint::ResizeHorizontal => egui::CursorIcon::ResizeHorizontal,
            CursorHint::ResizeVertical => egui::CursorIcon::ResizeVertical,
            CursorHint::ResizeNwSe => egui::CursorIcon::ResizeNwSe,
            CursorHint::ResizeNeSw => egui::CursorIcon::ResizeNeSw,
        }
    }
}

pub(super) fn cursor_hint(
    scene: &model::Scene,
    interaction: &InteractionState,
    p: egui::Pos2,
    metrics: &HandleMetrics,
) -> CursorHint {
    match interaction.gesture {
        Gesture::Dragging => return CursorHint::Move,
        Gesture::Rotating { .. } => return CursorHint::Crosshair,
        Gesture::Idle | Gesture::Resizing { .. } => {}
    }
    let Some(object) = scene.selected() else {
        return CursorHint::Default;
    };
    if let Some(handle) = resolve_handle(p, object, metrics) {
        return CursorHint::for_handle(handle);
    }
    if point_in_object(p, object) {
        return CursorHint::Move;
    }
    CursorHint::Default
}

// `local` is the pointer delta in the object's unrotated frame. `top` and
// `top-right` don't pin the opposite edge under rotation.
pub(super) fn apply_resize(object: &mut model::SceneObject, handle: Handle, local: egui::Vec2) {
    let (dx, dy) = (local.x, local.y);
    let (sin, cos) = object.rotation.sin_cos();
    match handle {
        Handle::Right | Handle::BottomRight => {
            object.size.x += dx;
            object.size.y = object.size.x;
        }
        Handle::Left | Handle::BottomLeft => {
            object.position += to_global_delta(egui::vec2(dx, 0.0), object.rotation);
            object.size.x -= dx;
            object.size.y = object.size.x;
        }
        Handle::Bottom => {
            object.size.y += dy;
            object.size.x = object.size.y;
        }
        Handle::Top => {
            object.position.x += dy * sin;
            object.position.y -= dy * cos;
            object.size.y -= dy;
            object.size.x = object.size.y;
        }
        Handle::TopRight => {
            object.position.y += dy * cos - dx * sin;
            object.size.x += dx;
            object.size.y = object.size.x;
        }
        Handle::TopLeft => {
            object.position.x += dx * cos + dy * sin;
            object.position.y += dy * cos - dx * sin;
            object.size.x -= dx;
            object.size.y = object.size.x;
        }
        Handle::Rotate => unreachable!("the rotate handle starts a rotation, not a resize"),
    }
}

pub(super) struct Editor {
    scene: model::Scene,
    interaction: InteractionState,
    metrics: HandleMetrics,
    canvas_size: egui::Vec2,
    image_fit_ratio: f32,
    text_defaults: TextDefaults,
    editing_text_id: Option<u64>,
}

impl Editor {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            scene: model::Scene::default(),
            interaction: InteractionState::default(),
            metrics: settings.handle_metrics(),
            canvas_size: egui::vec2(settings.canvas_width, settings.canvas_height),
            image_fit_ratio: settings.image_fit_ratio,
            text_defaults: settings.text.clone(),
            editing_text_id: None,
        }
    }

    pub fn scene(&self) -> &model::Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn scene_mut(&mut self) -> &mut model::Scene {
        &mut self.scene
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        self.canvas_size
    }

    pub fn editing_text_id(&self) -> Option<u64> {
        self.editing_text_id
    }

    pub fn cursor_hint(&self, p: egui::Pos2) -> CursorHint {
        cursor_hint(&self.scene, &self.interaction, p, &self.metrics)
    }

    pub fn add_image_object(&mut self, image: model::ImageSource) -> Effects {
        let max = self.canvas_size * self.image_fit_ratio;
        let mut size = image.intrinsic_size();
        if size.x > max.x {
            size.y *= max.x / size.x;
            size.x = max.x;
        }
        if size.y > max.y {
            size.x *= max.y / size.y;
            size.y = max.y;
        }
        let position = ((self.canvas_size - size) * 0.5).to_pos2();
        let text_edit = self.stop_text_edit();
        let index = self
            .scene
            .push_selected(model::ObjectKind::Image(image), position, size);
        tracing::info!(index, width = size.x, height = size.y, "image added");
        Effects {
            repaint: true,
            text_edit,
        }
    }

    pub fn add_text_object(&mut self) -> Effects {
        let d = &self.text_defaults;
        let kind = model::ObjectKind::Text(model::TextContent {
            text: d.text.clone(),
            font_size: d.font_size,
            font_family: d.font_family.clone(),
            color: d.color,
            is_editing: false,
        });
        let size = egui::vec2(d.width, d.height);
        let position = (self.canvas_size * 0.5).to_pos2();
        let text_edit = self.stop_text_edit();
        let index = self.scene.push_selected(kind, position, size);
        tracing::info!(index, "text added");
        Effects {
            repaint: true,
            text_edit,
        }
    }

    pub fn clear(&mut self) -> Effects {
        let text_edit = self.stop_text_edit();
        self.scene.clear();
        self.interaction.gesture = Gesture::Idle;
        tracing::info!("canvas cleared");
        Effects {
            repaint: true,
            text_edit,
        }
    }

    pub fn pointer_down(&mut self, p: egui::Pos2) -> Effects {
        self.interaction.last_pointer = p;

        if let Some(index) = self.scene.selected_index() {
            let object = self.object_at(index);
            if let Some(handle) = resolve_handle(p, object, &self.metrics) {
                let gesture = if handle.is_resize() {
                    Gesture::Resizing { handle }
                } else {
                    Gesture::Rotating {
                        initial_rotation: object.rotation,
                        initial_pointer_angle: pointer_angle(object.center(), p),
                    }
                };
                self.interaction.gesture = gesture;
                tracing::debug!(index, ?handle, "transform gesture started");
                return Effects {
                    repaint: false,
                    text_edit: self.stop_text_edit(),
                };
            }
        }

        let Some(index) = topmost_hit(&self.scene, p) else {
            self.scene.clear_selection();
            self.interaction.gesture = Gesture::Idle;
            return Effects {
                repaint: true,
                text_edit: self.stop_text_edit(),
            };
        };

        self.scene.select(index);
        self.interaction.gesture = Gesture::Dragging;
        tracing::debug!(index, "drag started");
        let object = self.object_at(index);
        let (id, is_text) = (object.id, object.text().is_some());
        let text_edit = if is_text {
            self.start_text_edit(id)
        } else {
            self.stop_text_edit()
        };
        Effects {
            repaint: true,
            text_edit,
        }
    }

    pub fn pointer_move(&mut self, p: egui::Pos2) -> Effects {
        let gesture = self.interaction.gesture;
        if gesture == Gesture::Idle {
            return Effects::default();
        }
        let delta = p - self.interaction.last_pointer;
        let object = self.gesture_target();
        match gesture {
            Gesture::Idle => {}
            Gesture::Dragging => {
                object.position += delta;
            }
            Gesture::Resizing { handle } => {
                let local = rotate_vec2(delta, -object.rotation);
                apply_resize(object, handle, local);
            }
            Gesture::Rotating {
                initial_rotation,
                initial_pointer_angle,
            } => {
                let current = pointer_angle(object.center(), p);
                object.rotation = initial_rotation + (current - initial_pointer_angle);
            }
        }
        self.interaction.last_pointer = p;
        Effects::repaint_only()
    }

    pub fn pointer_up(&mut self) -> Effects {
        if !self.interaction.is_idle() {
            tracing::debug!(
                gesture = ?self.interaction.gesture,
                handle = ?self.interaction.active_handle(),
                "gesture finished"
            );
        }
        self.interaction.gesture = Gesture::Idle;
        Effects::default()
    }

    pub fn delete_selected(&mut self) -> Effects {
        let Some(removed) = self.scene.remove_selected() else {
            return Effects::default();
        };
        self.interaction.gesture = Gesture::Idle;
        tracing::info!(id = removed.id, "object deleted");
        let text_edit = if self.editing_text_id == Some(removed.id) {
            self.editing_text_id = None;
            Some(TextEditCommand::End)
        } else {
            None
        };
        Effects {
            repaint: true,
            text_edit,
        }
    }

    pub fn apply_text_change(&mut self, object_id: u64, text: &str) -> Effects {
        let Some(content) = self
            .scene
            .index_of(object_id)
            .and_then(|i| self.scene.get_mut(i))
            .and_then(|o| o.text_mut())
        else {
            return Effects::default();
        };
        if content.text == text {
            return Effects::default();
        }
        content.text = text.to_string();
        Effects::repaint_only()
    }

    pub fn finish_text_edit(&mut self) -> Effects {
        match self.stop_text_edit() {
            Some(_) => Effects::repaint_only(),
            None => Effects::default(),
        }
    }

    fn object_at(&self, index: usize) -> &model::SceneObject {
        match self.scene.get(index) {
            Some(object) => object,
            None => panic!(
                "selected index {index} out of range for {} objects",
                self.scene.len()
            ),
        }
    }

    fn gesture_target(&mut self) -> &mut model::SceneObject {
        let gesture = self.interaction.gesture;
        let len = self.scene.len();
        let index = self.scene.selected_index();
        match index.and_then(|i| self.scene.get_mut(i)) {
            Some(object) => object,
            None => panic!("{gesture:?} active with selection {index:?} among {len} objects"),
        }
    }

    fn start_text_edit(&mut self, object_id: u64) -> Option<TextEditCommand> {
        if self.editing_text_id == Some(object_id) {
            return None;
        }
        self.stop_text_edit();
        let index = self.scene.index_of(object_id)?;
        let content = self.scene.get_mut(index)?.text_mut()?;
        content.is_editing = true;
        self.editing_text_id = Some(object_id);
        Some(TextEditCommand::Begin { object_id })
    }

    fn stop_text_edit(&mut self) -> Option<TextEditCommand> {
        let id = self.editing_text_id.take()?;
        if let Some(content) = self
            .scene
            .index_of(id)
            .and_then(|i| self.scene.get_mut(i))
            .and_then(|o| o.text_mut())
        {
            content.is_editing = false;
        }
        Some(TextEditCommand::End)
    }
}
