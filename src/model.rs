use eframe::egui;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

/// Decoded pixels handed over by the image loader. The scene never looks
/// inside; only the intrinsic size matters for placement.
#[derive(Clone)]
pub struct ImageSource {
    pixels: Arc<egui::ColorImage>,
}

impl ImageSource {
    pub fn new(pixels: egui::ColorImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn intrinsic_size(&self) -> egui::Vec2 {
        let [w, h] = self.pixels.size;
        egui::vec2(w as f32, h as f32)
    }

    pub fn pixels(&self) -> &Arc<egui::ColorImage> {
        &self.pixels
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, h] = self.pixels.size;
        f.debug_struct("ImageSource")
            .field("width", &w)
            .field("height", &h)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: Rgba,
    /// Set while the text overlay owns this object; the canvas skips drawing
    /// the string so it isn't painted twice.
    pub is_editing: bool,
}

#[derive(Clone, Debug)]
pub enum ObjectKind {
    Image(ImageSource),
    Text(TextContent),
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: u64,
    pub kind: ObjectKind,
    /// Top-left corner before rotation.
    pub position: egui::Pos2,
    pub size: egui::Vec2,
    /// Radians about the object's center. Accumulates freely.
    pub rotation: f32,
    pub selected: bool,
}

impl SceneObject {
    pub fn center(&self) -> egui::Pos2 {
        self.position + self.size * 0.5
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.kind {
            ObjectKind::Text(text) => Some(text),
            ObjectKind::Image(_) => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.kind {
            ObjectKind::Text(text) => Some(text),
            ObjectKind::Image(_) => None,
        }
    }
}

/// Placed objects in paint order (last is on top) plus the single selection.
#[derive(Clone, Debug)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selected_index: Option<usize>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: vec![],
            selected_index: None,
            next_id: 1,
        }
    }
}

impl Scene {
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.selected_index.and_then(|i| self.objects.get(i))
    }

    /// Appends a new object on top of the stack and makes it the only
    /// selected one. Returns its index.
    pub fn push_selected(
        &mut self,
        kind: ObjectKind,
        position: egui::Pos2,
        size: egui::Vec2,
    ) -> usize {
        for o in &mut self.objects {
            o.selected = false;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            kind,
            position,
            size,
            rotation: 0.0,
            selected: true,
        });
        let index = self.objects.len() - 1;
        self.selected_index = Some(index);
        index
    }

    pub fn select(&mut self, index: usize) {
        assert!(
            index < self.objects.len(),
            "select: index {index} out of range for {} objects",
            self.objects.len()
        );
        for (i, o) in self.objects.iter_mut().enumerate() {
            o.selected = i == index;
        }
        self.selected_index = Some(index);
    }

    pub fn clear_selection(&mut self) {
        for o in &mut self.objects {
            o.selected = false;
        }
        self.selected_index = None;
    }

    /// Removes the selected object, leaving nothing selected.
    pub fn remove_selected(&mut self) -> Option<SceneObject> {
        let index = self.selected_index.take()?;
        Some(self.objects.remove(index))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected_index = None;
    }
}
