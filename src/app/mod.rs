use eframe::egui;

#[cfg(test)]
mod fixtures;
mod geometry;
mod hit_test;
mod interaction;
mod render;
mod settings;
mod text_overlay;
mod upload;

use interaction::{Editor, Effects};

struct PointerInput {
    pressed: bool,
    released: bool,
    moving: bool,
    pos: Option<egui::Pos2>,
}

pub struct SceneEditorApp {
    editor: Editor,
    selection_style: render::SelectionStyle,
    textures: render::TextureCache,
    overlay: text_overlay::TextOverlay,
    status: Option<String>,
}

impl SceneEditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = match settings::config_path() {
            Some(path) => settings::load_settings(&path).unwrap_or_else(|e| {
                tracing::warn!("falling back to default settings: {e}");
                settings::EditorSettings::default()
            }),
            None => settings::EditorSettings::default(),
        };
        tracing::info!(
            width = settings.canvas_width,
            height = settings.canvas_height,
            "editor ready"
        );
        Self {
            editor: Editor::new(&settings),
            selection_style: render::SelectionStyle::from_settings(&settings),
            textures: render::TextureCache::default(),
            overlay: text_overlay::TextOverlay::default(),
            status: None,
        }
    }

    fn apply_effects(&mut self, effects: Effects, ctx: &egui::Context) {
        if let Some(command) = effects.text_edit {
            self.overlay.apply(command, self.editor.scene());
        }
        if effects.repaint {
            ctx.request_repaint();
        }
    }

    fn upload_image(&mut self, ctx: &egui::Context) {
        let Some(path) = upload::pick_image_file() else {
            return;
        };
        match upload::load_image(&path) {
            Ok(image) => {
                let effects = self.editor.add_image_object(image);
                self.apply_effects(effects, ctx);
                self.status = Some(format!("Added {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "image upload failed: {e}");
                self.status = Some(format!("Upload failed: {e}"));
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            if ui.button("Upload image").clicked() {
                self.upload_image(ctx);
            }
            if ui.button("Add text").clicked() {
                let effects = self.editor.add_text_object();
                self.apply_effects(effects, ctx);
            }
            if ui.button("Clear canvas").clicked() {
                let effects = self.editor.clear();
                self.apply_effects(effects, ctx);
                self.status = None;
            }
        });
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        let input = ctx.input(|i| PointerInput {
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            moving: i.pointer.is_moving(),
            pos: i.pointer.latest_pos(),
        });
        let origin = canvas.rect.min;
        let local = input.pos.map(|p| (p - origin).to_pos2());

        if input.pressed && canvas.hovered() {
            if let Some(p) = local {
                let effects = self.editor.pointer_down(p);
                self.apply_effects(effects, ctx);
            }
        }
        if input.moving {
            if let Some(p) = local {
                let effects = self.editor.pointer_move(p);
                self.apply_effects(effects, ctx);
            }
        }
        if input.released {
            let effects = self.editor.pointer_up();
            self.apply_effects(effects, ctx);
        }

        if let Some(p) = local {
            if canvas.hovered() || !self.editor.interaction().is_idle() {
                ctx.set_cursor_icon(self.editor.cursor_hint(p).to_cursor_icon());
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.editor.editing_text_id().is_some() {
            return;
        }
        let delete = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
        });
        if delete {
            let effects = self.editor.delete_selected();
            self.apply_effects(effects, ctx);
        }
    }
}

impl eframe::App for SceneEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui, ctx);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let scene = self.editor.scene();
            let summary = if scene.is_empty() {
                "Empty canvas".to_string()
            } else {
                format!("{} object(s)", scene.len())
            };
            match &self.status {
                Some(status) => ui.label(format!("{summary} · {status}")),
                None => ui.label(summary),
            };
        });

        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(self.editor.canvas_size(), egui::Sense::click_and_drag());
            self.handle_pointer(ctx, &response);

            let mut surface = render::EguiSurface::new(&painter, response.rect, &mut self.textures);
            render::paint_scene(self.editor.scene(), &self.selection_style, &mut surface);
            self.textures.retain_scene(self.editor.scene());

            let effects = self.overlay.show(ctx, response.rect.min, &mut self.editor);
            self.apply_effects(effects, ctx);
        });
    }
}
