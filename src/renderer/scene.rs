//! Scene building
//!
//! Turns a [`GameState`] into one triangle list in screen pixels. Geometry is laid
//! out in world coordinates first and shifted by the camera in a final pass.

use glam::Vec2;

use super::shapes;
use super::vertex::{colors, with_alpha, Vertex};
use crate::settings::{CubeIcon, Settings, ShipIcon, WaveIcon};
use crate::sim::{GameMode, GameState, Obstacle, ObstacleKind, Player, ParticleTint};

const GRID_SIZE: f32 = 100.0;
const GRID_LINE: f32 = 2.0;
const GROUND_LINE: f32 = 4.0;
const FINISH_WIDTH: f32 = 20.0;
const CIRCLE_SEGMENTS: u32 = 24;
/// Coin spin per frame
const COIN_SPIN: f32 = 0.083;
/// Orb halo pulse phase per frame
const ORB_PULSE: f32 = 0.16;

/// Local drawing frame: a center point and a rotation
#[derive(Debug, Clone, Copy)]
struct Pose {
    center: Vec2,
    angle: f32,
}

impl Pose {
    fn new(center: Vec2, angle: f32) -> Self {
        Self { center, angle }
    }

    /// Local point to world space
    fn at(&self, local: Vec2) -> Vec2 {
        self.center + Vec2::from_angle(self.angle).rotate(local)
    }

    /// Local offset applied before rotation
    fn shifted(&self, local: Vec2) -> Self {
        Self::new(self.at(local), self.angle)
    }

    fn rect(&self, out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let center = self.at(Vec2::new(x + w / 2.0, y + h / 2.0));
        shapes::rotated_rect(out, center, w, h, self.angle, color);
    }

    fn outline(&self, out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, t: f32, color: [f32; 4]) {
        self.rect(out, x, y, w, t, color);
        self.rect(out, x, y + h - t, w, t, color);
        self.rect(out, x, y + t, t, h - 2.0 * t, color);
        self.rect(out, x + w - t, y + t, t, h - 2.0 * t, color);
    }

    fn polygon(&self, out: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
        shapes::polygon(out, self.center, self.angle, points, color);
    }

    fn fan(&self, out: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
        shapes::fan(out, self.center, self.angle, points, color);
    }

    fn line(&self, out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        shapes::line(out, self.at(a), self.at(b), width, color);
    }
}

/// Points on an elliptical arc from `start` to `end` radians
fn ellipse_arc(center: Vec2, rx: f32, ry: f32, start: f32, end: f32, steps: u32) -> Vec<Vec2> {
    (0..=steps)
        .map(|i| {
            let t = start + (end - start) * i as f32 / steps as f32;
            center + Vec2::new(rx * t.cos(), ry * t.sin())
        })
        .collect()
}

/// Build the full frame for `state`
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);
    let player_color = settings.player_rgba();
    let view = state.viewport;
    let cam = state.camera;
    let ground_y = view.ground_y();

    draw_grid(&mut out, state);

    let left = cam.x - GRID_SIZE;
    let right = cam.x + view.width + GRID_SIZE;
    for obs in &state.obstacles {
        if obs.x + obs.width < left || obs.x > right {
            continue;
        }
        draw_obstacle(&mut out, obs, ground_y, view.height, state.time_ticks);
    }

    // Ground band extends past the bottom edge to cover upward camera shifts
    shapes::rect(
        &mut out,
        cam.x,
        ground_y,
        view.width,
        view.height - ground_y + 1000.0,
        colors::GROUND,
    );
    shapes::rect(
        &mut out,
        cam.x,
        ground_y - GROUND_LINE / 2.0,
        view.width,
        GROUND_LINE,
        colors::GROUND_LINE,
    );

    if !state.player.is_dead {
        draw_player(&mut out, &state.player, settings, player_color);
    }

    if settings.particles {
        for p in state.particles.particles() {
            let base = match p.tint {
                ParticleTint::Player => player_color,
                ParticleTint::Coin => colors::COIN,
                ParticleTint::Orb => colors::ORB,
                ParticleTint::OrbDash => colors::ORB_DASH,
                ParticleTint::Flame => colors::FLAME,
            };
            let half = p.size / 2.0;
            shapes::rect(
                &mut out,
                p.pos.x - half,
                p.pos.y - half,
                p.size,
                p.size,
                with_alpha(base, p.life.clamp(0.0, 1.0) * base[3]),
            );
        }
    }

    // World to screen
    for v in &mut out {
        v.position[0] -= cam.x;
        v.position[1] += cam.y;
    }
    out
}

fn draw_grid(out: &mut Vec<Vertex>, state: &GameState) {
    let cam = state.camera;
    let view = state.viewport;
    let start_x = (cam.x / GRID_SIZE).floor() * GRID_SIZE;
    let end_x = cam.x + view.width;
    let start_y = (-cam.y / GRID_SIZE).floor() * GRID_SIZE;
    let end_y = view.height - cam.y;

    let mut x = start_x;
    while x < end_x + GRID_SIZE {
        shapes::rect(
            out,
            x - GRID_LINE / 2.0,
            start_y,
            GRID_LINE,
            end_y - start_y,
            colors::GRID,
        );
        x += GRID_SIZE;
    }
    let mut y = start_y;
    while y < end_y + GRID_SIZE {
        shapes::rect(out, cam.x, y - GRID_LINE / 2.0, view.width, GRID_LINE, colors::GRID);
        y += GRID_SIZE;
    }
}

fn draw_obstacle(out: &mut Vec<Vertex>, obs: &Obstacle, ground_y: f32, view_h: f32, ticks: u64) {
    let base = ground_y - obs.y;
    let top = base - obs.height;
    let center = Vec2::new(obs.x + obs.width / 2.0, base - obs.height / 2.0);

    match obs.kind {
        ObstacleKind::Spike => {
            shapes::spike(out, obs.x, top, obs.width, obs.height, colors::SPIKE);
            shapes::spike(
                out,
                obs.x + 10.0,
                top + 10.0,
                obs.width - 20.0,
                obs.height - 10.0,
                colors::SPIKE_SHADE,
            );
        }
        ObstacleKind::Block => {
            shapes::rect(out, obs.x, top, obs.width, obs.height, colors::BLOCK);
            shapes::rect_outline(out, obs.x, top, obs.width, obs.height, 2.0, colors::OUTLINE);
        }
        ObstacleKind::Finish => {
            shapes::rect(out, obs.x, 0.0, FINISH_WIDTH, view_h, colors::FINISH);
        }
        ObstacleKind::Coin => {
            if !obs.collected {
                let spin = ticks as f32 * COIN_SPIN;
                shapes::star(out, center, 22.0, 12.0, spin, colors::OUTLINE);
                shapes::star(out, center, 20.0, 10.0, spin, colors::COIN);
            }
        }
        ObstacleKind::Orb | ObstacleKind::OrbDash => {
            let color = if obs.kind == ObstacleKind::OrbDash {
                colors::ORB_DASH
            } else {
                colors::ORB
            };
            let pulse = ((ticks as f32 * ORB_PULSE).sin() + 1.0) / 2.0;
            let halo = 22.0 + pulse * 4.0;
            shapes::ring(out, center, halo - 1.0, halo + 1.0, color, CIRCLE_SEGMENTS);
            shapes::circle(out, center, 15.0, color, CIRCLE_SEGMENTS);
            shapes::ring(out, center, 14.0, 16.0, colors::OUTLINE, CIRCLE_SEGMENTS);
            if obs.kind == ObstacleKind::OrbDash {
                shapes::circle(out, center, 8.0, colors::OUTLINE, CIRCLE_SEGMENTS);
            }
        }
        ObstacleKind::PortalShip | ObstacleKind::PortalCube | ObstacleKind::PortalWave => {
            let color = match obs.kind {
                ObstacleKind::PortalShip => colors::PORTAL_SHIP,
                ObstacleKind::PortalWave => colors::PORTAL_WAVE,
                _ => colors::PORTAL_CUBE,
            };
            shapes::rect(out, obs.x, top, obs.width, obs.height, color);
            shapes::rect_outline(out, obs.x, top, obs.width, obs.height, 3.0, colors::OUTLINE);

            // Mode glyph near the bottom of the portal
            let (x, y) = (obs.x, base);
            match obs.kind {
                ObstacleKind::PortalShip => shapes::polygon(
                    out,
                    Vec2::ZERO,
                    0.0,
                    &[
                        Vec2::new(x + 10.0, y - 10.0),
                        Vec2::new(x + 30.0, y - 20.0),
                        Vec2::new(x + 10.0, y - 30.0),
                    ],
                    colors::OUTLINE,
                ),
                ObstacleKind::PortalWave => {
                    let zig = [
                        Vec2::new(x + 10.0, y - 20.0),
                        Vec2::new(x + 18.0, y - 10.0),
                        Vec2::new(x + 22.0, y - 30.0),
                        Vec2::new(x + 30.0, y - 20.0),
                    ];
                    for pair in zig.windows(2) {
                        shapes::line(out, pair[0], pair[1], 2.0, colors::OUTLINE);
                    }
                }
                _ => shapes::rect(out, x + 10.0, y - 30.0, 20.0, 20.0, colors::OUTLINE),
            }
        }
    }
}

fn draw_player(out: &mut Vec<Vertex>, p: &Player, settings: &Settings, color: [f32; 4]) {
    let pose = Pose::new(Vec2::new(p.center_x(), p.center_y()), p.rotation);
    let (w, h) = (p.width, p.height);

    if p.is_dashing {
        pose.shifted(Vec2::new(-40.0, 0.0))
            .rect(out, -w / 2.0, -h / 2.0, w, h, with_alpha(colors::ORB_DASH, 0.5));
        pose.shifted(Vec2::new(-20.0, 0.0))
            .rect(out, -w / 2.0, -h / 2.0, w, h, with_alpha(colors::ORB_DASH, 0.8));
    }

    match p.mode {
        GameMode::Wave => draw_wave_icon(out, &pose, settings.cosmetics.wave, w, h, color),
        GameMode::Ship => {
            draw_ship_chassis(out, &pose, settings.cosmetics.ship, w, h);
            // Pilot cube rides smaller and higher in the cockpit
            let scale = 0.7;
            let pilot = pose.shifted(Vec2::new(0.0, -10.0 * scale));
            draw_cube(out, &pilot, w * scale, h * scale, settings.cosmetics.cube, color);
        }
        GameMode::Cube => draw_cube(out, &pose, w, h, settings.cosmetics.cube, color),
    }
}

fn draw_cube(out: &mut Vec<Vertex>, pose: &Pose, w: f32, h: f32, icon: CubeIcon, color: [f32; 4]) {
    pose.rect(out, -w / 2.0, -h / 2.0, w, h, color);
    pose.outline(out, -w / 2.0, -h / 2.0, w, h, 3.0, colors::OUTLINE);

    // Icon layouts are fractions of the edge, measured from the top-left corner
    let s = w;
    let o = -s / 2.0;
    let shade = colors::ICON_SHADE;
    let cell = |out: &mut Vec<Vertex>, x: f32, y: f32, cw: f32, ch: f32| {
        pose.rect(out, o + s * x, o + s * y, s * cw, s * ch, shade);
    };
    match icon {
        CubeIcon::Default => cell(out, 0.25, 0.25, 0.5, 0.5),
        CubeIcon::Face => {
            cell(out, 0.2, 0.2, 0.2, 0.2);
            cell(out, 0.6, 0.2, 0.2, 0.2);
            cell(out, 0.2, 0.6, 0.6, 0.15);
        }
        CubeIcon::Creeper => {
            cell(out, 0.15, 0.2, 0.2, 0.2);
            cell(out, 0.65, 0.2, 0.2, 0.2);
            cell(out, 0.4, 0.4, 0.2, 0.3);
            cell(out, 0.3, 0.55, 0.1, 0.25);
            cell(out, 0.6, 0.55, 0.1, 0.25);
        }
        CubeIcon::Lines => {
            cell(out, 0.0, 0.2, 1.0, 0.15);
            cell(out, 0.0, 0.6, 1.0, 0.15);
        }
        CubeIcon::Dot => {
            shapes::circle(out, pose.center, s * 0.25, shade, CIRCLE_SEGMENTS);
        }
        CubeIcon::Cross => {
            let a = Vec2::splat(o + s * 0.2);
            let b = Vec2::splat(o + s * 0.8);
            pose.line(out, a, b, s * 0.15, shade);
            pose.line(out, Vec2::new(b.x, a.y), Vec2::new(a.x, b.y), s * 0.15, shade);
        }
    }
}

fn draw_ship_chassis(out: &mut Vec<Vertex>, pose: &Pose, icon: ShipIcon, w: f32, h: f32) {
    let hull = colors::SHIP_HULL;
    match icon {
        ShipIcon::Default => pose.polygon(
            out,
            &[
                Vec2::new(-w / 2.0 - 10.0, h / 2.0),
                Vec2::new(w / 2.0 + 15.0, h / 2.0),
                Vec2::new(w / 2.0 + 5.0, 0.0),
                Vec2::new(-w / 2.0 - 5.0, 0.0),
            ],
            hull,
        ),
        ShipIcon::Fighter => {
            pose.polygon(
                out,
                &[
                    Vec2::new(-w / 2.0 - 15.0, h / 2.0),
                    Vec2::new(w / 2.0 + 20.0, h / 2.0),
                    Vec2::new(w / 2.0 + 10.0, -h / 4.0),
                    Vec2::new(-w / 2.0, -h / 4.0),
                ],
                hull,
            );
            // Wing
            pose.polygon(
                out,
                &[
                    Vec2::new(-w / 2.0, h / 2.0),
                    Vec2::new(-w / 2.0 - 10.0, h / 2.0 + 10.0),
                    Vec2::new(0.0, h / 2.0),
                ],
                hull,
            );
        }
        ShipIcon::Shark => {
            let body = ellipse_arc(
                Vec2::new(0.0, h / 4.0),
                w / 2.0 + 10.0,
                h / 3.0,
                0.0,
                std::f32::consts::TAU,
                CIRCLE_SEGMENTS,
            );
            pose.polygon(out, &body, hull);
            // Fin
            pose.polygon(
                out,
                &[
                    Vec2::new(-10.0, -h / 4.0),
                    Vec2::new(0.0, -h),
                    Vec2::new(10.0, -h / 4.0),
                ],
                hull,
            );
        }
        ShipIcon::Saucer => {
            let rx = w / 2.0 + 10.0;
            let mut outline = ellipse_arc(
                Vec2::new(0.0, h / 3.0),
                rx,
                h / 3.0,
                0.0,
                std::f32::consts::PI,
                CIRCLE_SEGMENTS / 2,
            );
            // Dome
            outline.extend(ellipse_arc(
                Vec2::ZERO,
                rx,
                15.0,
                std::f32::consts::PI,
                std::f32::consts::TAU,
                CIRCLE_SEGMENTS / 2,
            ));
            pose.polygon(out, &outline, hull);
        }
    }
}

fn draw_wave_icon(out: &mut Vec<Vertex>, pose: &Pose, icon: WaveIcon, w: f32, h: f32, color: [f32; 4]) {
    let (hw, hh) = (w / 2.0, h / 2.0);
    match icon {
        WaveIcon::Default => pose.polygon(
            out,
            &[Vec2::new(-hw, -hh), Vec2::new(hw, 0.0), Vec2::new(-hw, hh)],
            color,
        ),
        // Notched arrow, fanned from the notch
        WaveIcon::Dart => pose.polygon(
            out,
            &[
                Vec2::new(-w / 4.0, 0.0),
                Vec2::new(-hw, -hh),
                Vec2::new(hw + 10.0, 0.0),
                Vec2::new(-hw, hh),
            ],
            color,
        ),
        WaveIcon::Saw => pose.fan(
            out,
            &[
                Vec2::new(-hw, -hh),
                Vec2::new(-w / 4.0, -h / 4.0),
                Vec2::new(0.0, -hh),
                Vec2::new(w / 4.0, -h / 4.0),
                Vec2::new(hw, 0.0),
                Vec2::new(w / 4.0, h / 4.0),
                Vec2::new(0.0, hh),
                Vec2::new(-w / 4.0, h / 4.0),
                Vec2::new(-hw, hh),
            ],
            color,
        ),
        WaveIcon::Shuriken => pose.polygon(
            out,
            &[
                Vec2::new(0.0, -hh - 5.0),
                Vec2::new(hw + 5.0, 0.0),
                Vec2::new(0.0, hh + 5.0),
                Vec2::new(-hw - 5.0, 0.0),
            ],
            color,
        ),
    }
}
