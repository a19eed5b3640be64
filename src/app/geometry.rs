use crate::model;
use eframe::egui;

pub(super) fn rotate_vec2(v: egui::Vec2, angle: f32) -> egui::Vec2 {
    let sin = angle.sin();
    let cos = angle.cos();
    egui::vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

pub(super) fn to_local(world_pos: egui::Pos2, object: &model::SceneObject) -> egui::Vec2 {
    rotate_vec2(world_pos - object.center(), -object.rotation)
}

pub(super) fn to_global_delta(delta_local: egui::Vec2, rotation: f32) -> egui::Vec2 {
    rotate_vec2(delta_local, rotation)
}

pub(super) fn pointer_angle(center: egui::Pos2, p: egui::Pos2) -> f32 {
    (p.y - center.y).atan2(p.x - center.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::text_object;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn approx(a: egui::Vec2, b: egui::Vec2) -> bool {
        (a - b).length() <= EPS
    }

    #[test]
    fn quarter_turn_maps_x_axis_to_y_axis() {
        let r = rotate_vec2(egui::vec2(1.0, 0.0), FRAC_PI_2);
        assert!(approx(r, egui::vec2(0.0, 1.0)));
    }

    #[test]
    fn rotation_round_trips() {
        let samples = [
            (egui::vec2(3.0, -4.0), 0.3),
            (egui::vec2(-10.5, 2.25), -2.0),
            (egui::vec2(0.0, 7.0), 5.0 * PI),
            (egui::vec2(120.0, 80.0), 123.456),
        ];
        for (v, angle) in samples {
            let back = rotate_vec2(rotate_vec2(v, angle), -angle);
            assert!((back - v).length() <= 1e-3, "{v:?} at {angle} came back as {back:?}");
        }
    }

    #[test]
    fn local_frame_is_centered_and_unrotated() {
        let o = text_object(egui::pos2(100.0, 100.0), egui::vec2(40.0, 20.0), FRAC_PI_2);
        // Center is (120, 110). A point 10 below the center lies on the
        // object's local +x axis after a quarter turn.
        let local = to_local(egui::pos2(120.0, 120.0), &o);
        assert!(approx(local, egui::vec2(10.0, 0.0)));
        let back = o.center() + rotate_vec2(local, o.rotation);
        assert!((back - egui::pos2(120.0, 120.0)).length() <= EPS);
    }

    #[test]
    fn global_delta_undoes_local_projection() {
        let rotation = 0.7;
        let delta = egui::vec2(5.0, -3.0);
        let local = rotate_vec2(delta, -rotation);
        assert!(approx(to_global_delta(local, rotation), delta));
    }

    #[test]
    fn pointer_angle_uses_screen_axes() {
        let c = egui::pos2(10.0, 10.0);
        assert!((pointer_angle(c, egui::pos2(20.0, 10.0))).abs() <= EPS);
        assert!((pointer_angle(c, egui::pos2(10.0, 20.0)) - FRAC_PI_2).abs() <= EPS);
    }
}
