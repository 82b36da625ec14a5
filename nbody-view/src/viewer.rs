//! Interactive N-body sandbox built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation [`World`] and
//! implements [`eframe::App`] to drive it from pointer input and draw it.

use crate::settings::Settings;
use eframe::App;
use glam::Vec2;
use log::{info, warn};
use nbody_core::{BodyId, Config, Gesture, Rgba, Scenario, SimResult, World};
use rand::{SeedableRng, rngs::StdRng};

/// Main application state for the interactive viewer.
///
/// Each frame:
/// 1. Pointer state on the canvas is turned into [`Gesture`]s.
/// 2. [`World::tick`] runs once with the frame time (or `0` while paused,
///    so bodies can still be launched).
/// 3. Bodies, the pending body with its aim line, and the body counter
///    are drawn.
///
/// ### Fields
/// - `world` - The simulation.
/// - `scenario` - Initial-condition provider used by Reset.
/// - `file_scenario` - Scenario loaded from the settings file, kept so it
///   stays selectable after switching to a preset.
/// - `rng` - Random source for scenario generation.
/// - `running` - Whether the clock advances.
/// - `zoom` / `pan` - World-to-screen mapping.
/// - `last_spawned` - Most recently launched body, highlighted until the
///   next reset (ids shift when bodies are culled).
/// - `total_culled` - Bodies lost through the bounds since the last reset.
/// - `last_dt` - Frame time fed to the last tick (display only).
pub struct Viewer {
    world: World,
    scenario: Scenario,
    file_scenario: Option<Scenario>,
    rng: StdRng,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    last_spawned: Option<BodyId>,
    total_culled: usize,
    last_dt: f32,
}

/// Maps sampled pointer state to the gestures for this frame.
///
/// - Primary held and a body pending: re-aim at the pointer.
/// - Primary held, nothing pending, press began on the canvas: start.
/// - Primary not held while a body is pending: commit. This also covers
///   a release that happened outside the window.
fn gestures_for(
    pending: bool,
    primary_down: bool,
    pressed_on_canvas: bool,
    pointer: Option<Vec2>,
) -> Vec<Gesture> {
    match (pending, primary_down, pointer) {
        (true, true, Some(p)) => vec![Gesture::Drag(p)],
        (false, true, Some(p)) if pressed_on_canvas => vec![Gesture::Start(p)],
        (true, false, _) => vec![Gesture::Commit],
        _ => Vec::new(),
    }
}

/// `"1 body"`, `"7 bodies"`.
fn body_count_label(n: usize) -> String {
    format!("{} bod{}", n, if n == 1 { "y" } else { "ies" })
}

fn color32(tag: Rgba) -> egui::Color32 {
    let [r, g, b, a] = tag.to_array();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Viewer {
    /// Creates a viewer from the startup settings.
    ///
    /// If the scenario cannot be generated (e.g. a listed body with zero
    /// mass) the error is logged and the world starts empty. Invalid
    /// physics constants are an error.
    pub fn new(settings: Settings) -> SimResult<Self> {
        let Settings { physics, scenario } = settings;
        let mut rng = physics
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let bodies = scenario.generate(&physics, &mut rng).unwrap_or_else(|e| {
            warn!("scenario {} rejected: {e}", scenario.name());
            Vec::new()
        });
        info!(
            "starting {} scenario with {}",
            scenario.name(),
            body_count_label(bodies.len())
        );

        let file_scenario = matches!(scenario, Scenario::Listed { .. }).then(|| scenario.clone());

        Ok(Self {
            world: World::new(physics, bodies)?,
            scenario,
            file_scenario,
            rng,
            running: true,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            last_spawned: None,
            total_culled: 0,
            last_dt: 0.0,
        })
    }

    /// Regenerates the selected scenario with the current constants.
    fn reset(&mut self) {
        let cfg = *self.world.config();
        match self.scenario.generate(&cfg, &mut self.rng) {
            Ok(bodies) => self.world.reset(bodies),
            Err(e) => {
                warn!("scenario {} rejected: {e}", self.scenario.name());
                self.world.clear();
            }
        }
        self.last_spawned = None;
        self.total_culled = 0;
    }

    /// Removes every body, leaving a blank canvas for launching.
    fn clear(&mut self) {
        self.world.clear();
        self.last_spawned = None;
        self.total_culled = 0;
    }

    /// Runs one simulation tick and records what happened.
    fn step(&mut self, dt: f32, gestures: &[Gesture]) {
        let report = self.world.tick(dt, gestures);
        if report.spawned.is_some() {
            self.last_spawned = report.spawned;
        }
        if report.culled > 0 {
            // Indices shifted; the highlight would point at the wrong body.
            self.last_spawned = None;
        }
        self.total_culled += report.culled;
        self.last_dt = dt;
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The centre of the simulation bounds maps to the centre of `rect`,
    /// scaled by `zoom` and offset by `pan`. Both spaces are y-down.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        let rel = p - self.world.config().bounds.center();
        egui::pos2(
            center.x + rel.x * self.zoom + self.pan.x,
            center.y + rel.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (p.y - center.y - self.pan.y) / self.zoom;
        Vec2::new(x, y) + self.world.config().bounds.center()
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`]; returns `true`
    /// if the value changed.
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel (run controls and scenario choice).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step(1.0 / 60.0, &[]);
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }

                ui.separator();
                let mut choices = vec![Scenario::ThreeBody, Scenario::scatter(), Scenario::solar()];
                if let Some(s) = &self.file_scenario {
                    choices.push(s.clone());
                }
                egui::ComboBox::from_label("Scenario")
                    .selected_text(self.scenario.name())
                    .show_ui(ui, |ui| {
                        for choice in choices {
                            let name = choice.name();
                            ui.selectable_value(&mut self.scenario, choice, name);
                        }
                    });

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.4} s", self.last_dt));
                ui.separator();
                ui.label(format!("culled = {}", self.total_culled));
                ui.label(body_count_label(self.world.len()));
                if self.world.pending().is_some() {
                    ui.label("aiming…");
                }
            });
        });
    }

    /// Builds the right-hand panel for the simulation constants.
    ///
    /// Edits are validated before they reach the world.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                let mut cfg = *self.world.config();
                let mut changed = false;

                ui.separator();
                ui.label("Physics");
                changed |= Self::labeled_drag_f32(ui, "G:", &mut cfg.gravity, 0.1..=1.0e5, 1.0);
                changed |=
                    Self::labeled_drag_f32(ui, "dist_eps:", &mut cfg.dist_eps, 0.0..=1.0, 1.0e-4);
                changed |= Self::labeled_drag_f32(
                    ui,
                    "collision_eps:",
                    &mut cfg.collision_eps,
                    0.0..=20.0,
                    0.1,
                );

                ui.separator();
                ui.label("Bounds");
                changed |= Self::labeled_drag_f32(
                    ui,
                    "width:",
                    &mut cfg.bounds.width,
                    10.0..=10_000.0,
                    1.0,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "height:",
                    &mut cfg.bounds.height,
                    10.0..=10_000.0,
                    1.0,
                );

                ui.separator();
                ui.label("Launch");
                changed |= Self::labeled_drag_f32(
                    ui,
                    "spawn_mass:",
                    &mut cfg.spawn_mass,
                    1.0..=10_000.0,
                    1.0,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "spawn_radius:",
                    &mut cfg.spawn_radius,
                    1.0..=200.0,
                    0.5,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    cfg = Config {
                        seed: cfg.seed,
                        ..Config::default()
                    };
                    changed = true;
                }

                if changed {
                    if let Err(e) = self.world.set_config(cfg) {
                        warn!("config edit rejected: {e}");
                    }
                }
            });
    }

    fn draw(&self, painter: &egui::Painter, rect: egui::Rect) {
        let bounds = self.world.config().bounds;
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(bounds.width, 0.0),
            Vec2::new(bounds.width, bounds.height),
            Vec2::new(0.0, bounds.height),
        ];
        let outline: Vec<egui::Pos2> = corners
            .iter()
            .map(|&c| self.world_to_screen(c, rect))
            .collect();
        painter.add(egui::Shape::closed_line(
            outline,
            egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
        ));

        for (i, body) in self.world.bodies().iter().enumerate() {
            let p = self.world_to_screen(body.pos, rect);
            let r = (body.radius * self.zoom).max(1.0);
            painter.circle_filled(p, r, color32(body.tag));
            if self.last_spawned == Some(i) {
                painter.circle_stroke(p, r + 2.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
            }
        }

        if let Some(pending) = self.world.pending() {
            let color = color32(pending.tag);
            let p = self.world_to_screen(pending.pos, rect);
            let tip = self.world_to_screen(pending.pos + pending.vel, rect);
            painter.circle_filled(p, (pending.radius * self.zoom).max(1.0), color);
            painter.line_segment([p, tip], egui::Stroke::new(2.0, color));
        }

        painter.text(
            rect.right_top() + egui::vec2(-8.0, 6.0),
            egui::Align2::RIGHT_TOP,
            body_count_label(self.world.len()),
            egui::FontId::proportional(20.0),
            egui::Color32::GRAY,
        );
    }

    /// Builds the central canvas: input, one tick, drawing.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with the secondary button; the primary one launches bodies.
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            let (primary_down, pointer) =
                ctx.input(|i| (i.pointer.primary_down(), i.pointer.interact_pos()));
            let gestures = gestures_for(
                self.world.pending().is_some(),
                primary_down,
                response.is_pointer_button_down_on(),
                pointer.map(|p| self.screen_to_world(p, rect)),
            );

            let dt = if self.running {
                ctx.input(|i| i.stable_dt)
            } else {
                0.0
            };
            self.step(dt, &gestures);

            self.draw(&painter, rect);
            ctx.request_repaint();
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// Side panels are laid out before the canvas so that they act as the
    /// reserved region where a press never starts a launch.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
