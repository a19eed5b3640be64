use crate::model;
use eframe::egui;

use super::interaction::{Editor, Effects, TextEditCommand};
use super::render::font_id;

struct Session {
    object_id: u64,
    buffer: String,
    focus_pending: bool,
    // The click that opened the session is still in progress; its release
    // lands outside the field and must not count as a blur.
    opening_click: bool,
}

#[derive(Default)]
pub(super) struct TextOverlay {
    session: Option<Session>,
}

impl TextOverlay {
    pub fn apply(&mut self, command: TextEditCommand, scene: &model::Scene) {
        match command {
            TextEditCommand::Begin { object_id } => self.begin(object_id, scene),
            TextEditCommand::End => self.end(),
        }
    }

    fn begin(&mut self, object_id: u64, scene: &model::Scene) {
        let Some(text) = scene
            .index_of(object_id)
            .and_then(|i| scene.get(i))
            .and_then(|o| o.text())
        else {
            self.session = None;
            return;
        };
        tracing::debug!(object_id, "text overlay opened");
        self.session = Some(Session {
            object_id,
            buffer: text.text.clone(),
            focus_pending: true,
            opening_click: true,
        });
    }

    fn end(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(object_id = session.object_id, "text overlay closed");
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        canvas_origin: egui::Pos2,
        editor: &mut Editor,
    ) -> Effects {
        let Some(session) = &mut self.session else {
            return Effects::default();
        };
        let Some(object) = editor
            .scene()
            .index_of(session.object_id)
            .and_then(|i| editor.scene().get(i))
        else {
            self.session = None;
            return Effects::default();
        };
        let Some(text) = object.text() else {
            self.session = None;
            return Effects::default();
        };

        let pos = canvas_origin + object.position.to_vec2();
        let width = object.size.x.max(1.0);
        let font = font_id(text);
        let color = text.color.to_color32();
        let object_id = session.object_id;

        let response = egui::Area::new(egui::Id::new(("text-overlay", object_id)))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut session.buffer)
                        .font(font)
                        .text_color(color)
                        .frame(false)
                        .desired_width(width)
                        .desired_rows(1),
                )
            })
            .inner;

        if session.focus_pending {
            response.request_focus();
            session.focus_pending = false;
        }

        let mut effects = Effects::default();
        if response.changed() {
            effects = effects.and(editor.apply_text_change(object_id, &session.buffer));
        }

        if response.lost_focus() && session.opening_click {
            response.request_focus();
        } else if response.lost_focus() {
            effects = effects.and(editor.finish_text_edit());
            self.end();
            return effects;
        }
        let (released, down) = ctx.input(|i| (i.pointer.any_released(), i.pointer.any_down()));
        if released || !down {
            session.opening_click = false;
        }
        effects
    }
}
