use crate::model;
use eframe::egui;

pub(crate) fn text_content(text: &str) -> model::TextContent {
    model::TextContent {
        text: text.to_string(),
        font_size: 24.0,
        font_family: "Arial".to_string(),
        color: model::Rgba::BLACK,
        is_editing: false,
    }
}

pub(crate) fn blank_image(width: usize, height: usize) -> model::ImageSource {
    let rgba = vec![255u8; width * height * 4];
    model::ImageSource::new(egui::ColorImage::from_rgba_unmultiplied(
        [width, height],
        &rgba,
    ))
}

fn object(
    kind: model::ObjectKind,
    position: egui::Pos2,
    size: egui::Vec2,
    rotation: f32,
) -> model::SceneObject {
    model::SceneObject {
        id: 1,
        kind,
        position,
        size,
        rotation,
        selected: false,
    }
}

pub(crate) fn text_object(
    position: egui::Pos2,
    size: egui::Vec2,
    rotation: f32,
) -> model::SceneObject {
    object(
        model::ObjectKind::Text(text_content("text")),
        position,
        size,
        rotation,
    )
}

pub(crate) fn image_object(
    position: egui::Pos2,
    size: egui::Vec2,
    rotation: f32,
) -> model::SceneObject {
    object(
        model::ObjectKind::Image(blank_image(2, 2)),
        position,
        size,
        rotation,
    )
}
