use crate::model;
use eframe::egui;
use std::collections::HashMap;

use super::geometry::rotate_vec2;
use super::hit_test::{Handle, HandleMetrics};
use super::settings::EditorSettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ObjectTransform {
    pub center: egui::Pos2,
    pub rotation: f32,
    pub half_size: egui::Vec2,
}

impl ObjectTransform {
    pub fn of(object: &model::SceneObject) -> Self {
        Self {
            center: object.center(),
            rotation: object.rotation,
            half_size: object.size * 0.5,
        }
    }

    pub fn apply(&self, local: egui::Pos2) -> egui::Pos2 {
        self.center + rotate_vec2(local.to_vec2() - self.half_size, self.rotation)
    }
}

pub(super) trait RenderSurface {
    fn clear(&mut self);

    fn with_transform(&mut self, transform: ObjectTransform, body: impl FnOnce(&mut Self))
    where
        Self: Sized;

    fn draw_image(&mut self, object_id: u64, image: &model::ImageSource, size: egui::Vec2);

    fn draw_text(&mut self, text: &model::TextContent);

    fn stroke_rect(&mut self, rect: egui::Rect, stroke: egui::Stroke);

    fn fill_circle(
        &mut self,
        center: egui::Pos2,
        radius: f32,
        fill: egui::Color32,
        stroke: egui::Stroke,
    );
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct SelectionStyle {
    pub outset: f32,
    pub stroke: egui::Stroke,
    pub handle_fill: egui::Color32,
    pub metrics: HandleMetrics,
}

impl SelectionStyle {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            outset: settings.selection_outset,
            stroke: egui::Stroke::new(
                settings.selection_stroke_width,
                settings.selection_color.to_color32(),
            ),
            handle_fill: egui::Color32::WHITE,
            metrics: settings.handle_metrics(),
        }
    }
}

pub(super) fn paint_scene<S: RenderSurface>(
    scene: &model::Scene,
    style: &SelectionStyle,
    surface: &mut S,
) {
    surface.clear();
    for object in scene.objects() {
        surface.with_transform(ObjectTransform::of(object), |s| {
            match &object.kind {
                model::ObjectKind::Image(image) => s.draw_image(object.id, image, object.size),
                model::ObjectKind::Text(text) => {
                    if !text.is_editing {
                        s.draw_text(text);
                    }
                }
            }
            if object.selected {
                paint_selection(object.size, style, s);
            }
        });
    }
}

fn paint_selection<S: RenderSurface>(size: egui::Vec2, style: &SelectionStyle, surface: &mut S) {
    let o = style.outset;
    let frame = egui::Rect::from_min_size(egui::pos2(-o, -o), size + egui::vec2(2.0 * o, 2.0 * o));
    surface.stroke_rect(frame, style.stroke);
    for handle in Handle::ALL {
        let center = handle.offset(size, style.metrics.rotate_offset).to_pos2();
        surface.fill_circle(center, style.metrics.radius, style.handle_fill, style.stroke);
    }
}

#[derive(Default)]
pub(super) struct TextureCache {
    textures: HashMap<u64, egui::TextureHandle>,
}

impl TextureCache {
    fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        object_id: u64,
        image: &model::ImageSource,
    ) -> egui::TextureId {
        self.textures
            .entry(object_id)
            .or_insert_with(|| {
                ctx.load_texture(
                    format!("scene-object-{object_id}"),
                    egui::ColorImage::clone(image.pixels()),
                    egui::TextureOptions::LINEAR,
                )
            })
            .id()
    }

    pub fn retain_scene(&mut self, scene: &model::Scene) {
        self.textures.retain(|id, _| scene.index_of(*id).is_some());
    }
}

pub(super) fn font_id(text: &model::TextContent) -> egui::FontId {
    let family = match text.font_family.to_ascii_lowercase().as_str() {
        "monospace" | "courier" | "courier new" => egui::FontFamily::Monospace,
        _ => egui::FontFamily::Proportional,
    };
    egui::FontId::new(text.font_size, family)
}

pub(super) struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    canvas: egui::Rect,
    textures: &'a mut TextureCache,
    transform: Option<ObjectTransform>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        canvas: egui::Rect,
        textures: &'a mut TextureCache,
    ) -> Self {
        Self {
            painter,
            canvas,
            textures,
            transform: None,
        }
    }

    fn to_screen(&self, local: egui::Pos2) -> egui::Pos2 {
        let world = match &self.transform {
            Some(t) => t.apply(local),
            None => local,
        };
        self.canvas.min + world.to_vec2()
    }

    fn rotation(&self) -> f32 {
        self.transform.map_or(0.0, |t| t.rotation)
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, egui::Color32::WHITE);
    }

    fn with_transform(&mut self, transform: ObjectTransform, body: impl FnOnce(&mut Self)) {
        let previous = self.transform.replace(transform);
        body(self);
        self.transform = previous;
    }

    fn draw_image(&mut self, object_id: u64, image: &model::ImageSource, size: egui::Vec2) {
        let texture = self
            .textures
            .get_or_load(self.painter.ctx(), object_id, image);
        let top_left = self.to_screen(egui::Pos2::ZERO);
        let rotation = self.rotation();
        let mut mesh = egui::Mesh::with_texture(texture);
        mesh.add_rect_with_uv(
            egui::Rect::from_min_size(top_left, size),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        // The rect was laid out unrotated from the rotated top-left corner;
        // swing it about that corner.
        for vertex in &mut mesh.vertices {
            vertex.pos = top_left + rotate_vec2(vertex.pos - top_left, rotation);
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn draw_text(&mut self, text: &model::TextContent) {
        let color = text.color.to_color32();
        let galley = self
            .painter
            .layout_no_wrap(text.text.clone(), font_id(text), color);
        let pos = self.to_screen(egui::Pos2::ZERO);
        let mut shape = egui::Shape::galley(pos, galley, color);
        if let egui::Shape::Text(ref mut text_shape) = shape {
            text_shape.angle = self.rotation();
        }
        self.painter.add(shape);
    }

    fn stroke_rect(&mut self, rect: egui::Rect, stroke: egui::Stroke) {
        let points = vec![
            self.to_screen(rect.left_top()),
            self.to_screen(rect.right_top()),
            self.to_screen(rect.right_bottom()),
            self.to_screen(rect.left_bottom()),
        ];
        self.painter.add(egui::Shape::closed_line(points, stroke));
    }

    fn fill_circle(
        &mut self,
        center: egui::Pos2,
        radius: f32,
        fill: egui::Color32,
        stroke: egui::Stroke,
    ) {
        self.painter.circle(self.to_screen(center), radius, fill, stroke);
    }
}
