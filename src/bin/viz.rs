use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use ballistic_traj::body::presets;
use ballistic_traj::{Body, Medium, TrajectoryPoint};

const RESOLUTION: usize = 200;

fn main() -> eframe::Result {
    let mut ball = presets::football();
    ball.set_velocity_from_speed_angle(20.0, 45.0);

    let app = TrajectoryViz::new(ball);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native("Ballistic Trajectory", options, Box::new(|_| Ok(Box::new(app))))
}

/// Trajectory curve of one medium, from launch to landing.
struct Curve {
    medium: Medium,
    points: Vec<[f64; 2]>,
    landing: Option<TrajectoryPoint>,
}

struct TrajectoryViz {
    body: Body,
    curves: Vec<Curve>,
    error: Option<String>,
}

impl TrajectoryViz {
    fn new(body: Body) -> Self {
        let mut app = Self { body, curves: Vec::new(), error: None };
        app.recompute();
        app
    }

    fn recompute(&mut self) {
        self.curves.clear();
        self.error = None;
        let tr = self.body.trajectory();
        for medium in [Medium::Vacuum, Medium::Air] {
            let curve = tr.landing_point(medium).and_then(|landing| {
                let t_end = landing.map_or(10.0, |p| p.t);
                let points = tr
                    .sample(0.0, t_end, RESOLUTION, medium)?
                    .into_iter()
                    .map(|p| [p.x, p.y])
                    .collect();
                Ok(Curve { medium, points, landing })
            });
            match curve {
                Ok(c) => self.curves.push(c),
                Err(e) => self.error = Some(e.to_string()),
            }
        }
    }
}

impl eframe::App for TrajectoryViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Trajectory from t = 0 to landing");
            for c in &self.curves {
                match c.landing {
                    Some(p) => ui.label(format!(
                        "{:?}: lands at x = {:.2} m after {:.2} s",
                        c.medium, p.x, p.t
                    )),
                    None => ui.label(format!("{:?}: no landing found", c.medium)),
                };
            }
            if let Some(e) = &self.error {
                ui.colored_label(egui::Color32::RED, e);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("trajectory")
                .legend(Legend::default())
                .x_axis_label("x (m)")
                .y_axis_label("y (m)")
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    for c in &self.curves {
                        let name = match c.medium {
                            Medium::Vacuum => "No air resistance",
                            Medium::Air => "Air resistance",
                        };
                        let color = match c.medium {
                            Medium::Vacuum => egui::Color32::RED,
                            Medium::Air => egui::Color32::BLUE,
                        };
                        let points: PlotPoints = c.points.clone().into();
                        plot_ui.line(Line::new(name, points).color(color).width(1.0));
                    }
                });
        });
    }
}
