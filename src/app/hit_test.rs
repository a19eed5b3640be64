use crate::model;
use eframe::egui;

use super::geometry::to_local;

/// Hot zones on the selected object. Declaration order is the order in which
/// [`resolve_handle`] tries them, so earlier handles win where zones overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Handle {
    Rotate,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub(crate) const ALL: [Handle; 9] = [
        Handle::Rotate,
        Handle::Left,
        Handle::Right,
        Handle::Top,
        Handle::Bottom,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub(crate) fn is_resize(self) -> bool {
        self != Handle::Rotate
    }

    pub(crate) fn offset(self, size: egui::Vec2, rotate_offset: f32) -> egui::Vec2 {
        let (w, h) = (size.x, size.y);
        match self {
            Handle::Rotate => egui::vec2(w * 0.5, -rotate_offset),
            Handle::Left => egui::vec2(0.0, h * 0.5),
            Handle::Right => egui::vec2(w, h * 0.5),
            Handle::Top => egui::vec2(w * 0.5, 0.0),
            Handle::Bottom => egui::vec2(w * 0.5, h),
            Handle::TopLeft => egui::vec2(0.0, 0.0),
            Handle::TopRight => egui::vec2(w, 0.0),
            Handle::BottomLeft => egui::vec2(0.0, h),
            Handle::BottomRight => egui::vec2(w, h),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HandleMetrics {
    pub radius: f32,
    /// Distance of the rotate handle above the top edge.
    pub rotate_offset: f32,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            radius: 8.0,
            rotate_offset: 30.0,
        }
    }
}

pub(crate) fn point_in_object(world_pos: egui::Pos2, object: &model::SceneObject) -> bool {
    let half = object.size * 0.5;
    if half.x <= 0.0 || half.y <= 0.0 {
        return false;
    }
    let local = to_local(world_pos, object);
    local.x.abs() <= half.x && local.y.abs() <= half.y
}

pub(crate) fn resolve_handle(
    world_pos: egui::Pos2,
    object: &model::SceneObject,
    metrics: &HandleMetrics,
) -> Option<Handle> {
    // Undo the rotation about the center, then compare against the handles'
    // unrotated canvas positions.
    let unrotated = object.center() + to_local(world_pos, object);
    Handle::ALL.into_iter().find(|handle| {
        let anchor = object.position + handle.offset(object.size, metrics.rotate_offset);
        (unrotated - anchor).length() <= metrics.radius
    })
}

pub(crate) fn topmost_hit(scene: &model::Scene, world_pos: egui::Pos2) -> Option<usize> {
    scene
        .objects()
        .iter()
        .rposition(|o| point_in_object(world_pos, o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::{image_object, text_object};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn unrotated_hit_matches_axis_aligned_box() {
        let o = text_object(egui::pos2(10.0, 20.0), egui::vec2(50.0, 30.0), 0.0);
        let rect = egui::Rect::from_min_size(o.position, o.size);
        for x in (0..=80).step_by(5) {
            for y in (0..=70).step_by(5) {
                let p = egui::pos2(x as f32, y as f32);
                assert_eq!(point_in_object(p, &o), rect.contains(p), "at {p:?}");
            }
        }
    }

    #[test]
    fn rotated_hit_follows_the_rotated_box() {
        // 100x20 bar centered at (100, 100), turned upright.
        let o = text_object(egui::pos2(50.0, 90.0), egui::vec2(100.0, 20.0), FRAC_PI_2);
        assert!(point_in_object(egui::pos2(100.0, 140.0), &o));
        assert!(point_in_object(egui::pos2(100.0, 60.0), &o));
        assert!(!point_in_object(egui::pos2(140.0, 100.0), &o));
    }

    #[test]
    fn zero_sized_object_is_never_hit() {
        let o = text_object(egui::pos2(10.0, 10.0), egui::Vec2::ZERO, 0.0);
        assert!(!point_in_object(egui::pos2(10.0, 10.0), &o));
    }

    #[test]
    fn handles_sit_on_edges_and_corners() {
        let o = text_object(egui::pos2(100.0, 100.0), egui::vec2(200.0, 100.0), 0.0);
        let m = HandleMetrics::default();
        let cases = [
            (egui::pos2(200.0, 70.0), Handle::Rotate),
            (egui::pos2(100.0, 150.0), Handle::Left),
            (egui::pos2(300.0, 150.0), Handle::Right),
            (egui::pos2(200.0, 100.0), Handle::Top),
            (egui::pos2(200.0, 200.0), Handle::Bottom),
            (egui::pos2(100.0, 100.0), Handle::TopLeft),
            (egui::pos2(300.0, 100.0), Handle::TopRight),
            (egui::pos2(100.0, 200.0), Handle::BottomLeft),
            (egui::pos2(300.0, 200.0), Handle::BottomRight),
        ];
        for (p, expected) in cases {
            assert_eq!(resolve_handle(p, &o, &m), Some(expected), "at {p:?}");
        }
        assert_eq!(resolve_handle(egui::pos2(200.0, 150.0), &o, &m), None);
    }

    #[test]
    fn handle_radius_is_inclusive() {
        let o = text_object(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0), 0.0);
        let m = HandleMetrics::default();
        assert_eq!(
            resolve_handle(egui::pos2(108.0, 50.0), &o, &m),
            Some(Handle::Right)
        );
        assert_eq!(resolve_handle(egui::pos2(108.5, 50.0), &o, &m), None);
    }

    #[test]
    fn earlier_handle_wins_when_zones_overlap() {
        // On a 10x10 object every zone overlaps its neighbours.
        let o = image_object(egui::pos2(0.0, 0.0), egui::vec2(10.0, 10.0), 0.0);
        let m = HandleMetrics::default();
        // Left anchor (0,5) and top-left anchor (0,0) are both within reach.
        assert_eq!(resolve_handle(egui::pos2(0.0, 2.0), &o, &m), Some(Handle::Left));
        // Right (10,5) and bottom (5,10) and bottom-right (10,10) all reach.
        assert_eq!(resolve_handle(egui::pos2(9.0, 9.0), &o, &m), Some(Handle::Right));
        // Top (5,0) and top-left (0,0) both reach; top comes first.
        assert_eq!(resolve_handle(egui::pos2(3.0, -4.0), &o, &m), Some(Handle::Top));
    }

    #[test]
    fn handles_rotate_with_the_object() {
        // 100x100 at origin, center (50, 50), quarter turn clockwise on screen.
        let o = text_object(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0), FRAC_PI_2);
        let m = HandleMetrics::default();
        // The right-edge midpoint (100, 50) ends up at (50, 100).
        assert_eq!(
            resolve_handle(egui::pos2(50.0, 100.0), &o, &m),
            Some(Handle::Right)
        );
        // The rotate handle (50, -30) swings round to (130, 50).
        assert_eq!(
            resolve_handle(egui::pos2(130.0, 50.0), &o, &m),
            Some(Handle::Rotate)
        );
    }

    #[test]
    fn topmost_object_is_picked_first() {
        let mut scene = model::Scene::default();
        for (pos, size) in [
            (egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0)),
            (egui::pos2(50.0, 50.0), egui::vec2(100.0, 100.0)),
        ] {
            let o = text_object(pos, size, 0.0);
            scene.push_selected(o.kind, o.position, o.size);
        }
        assert_eq!(topmost_hit(&scene, egui::pos2(75.0, 75.0)), Some(1));
        assert_eq!(topmost_hit(&scene, egui::pos2(25.0, 25.0)), Some(0));
        assert_eq!(topmost_hit(&scene, egui::pos2(300.0, 300.0)), None);
    }
}
