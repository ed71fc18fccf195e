use std::path::{Path, PathBuf};

use colored::Colorize;
use eframe::egui;
use tracing::{debug, error};

use crate::controller::PresentationController;
use crate::deck::{Stage, TOTAL_SLIDES, content};
use crate::render;
use crate::render::chart::PaintedChartBackend;
use crate::theme::Theme;

struct ExportApp {
    controller: PresentationController<PaintedChartBackend>,
    theme: Theme,
    output_dir: PathBuf,
    screenshot_requested: bool,
    done: bool,
}

impl ExportApp {
    fn new(theme: Theme, output_dir: PathBuf) -> Self {
        Self {
            controller: PresentationController::new(Stage::standard(), PaintedChartBackend, 1),
            theme,
            output_dir,
            screenshot_requested: false,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Screenshot of the previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let path = self.output_dir.join(slide_filename(self.controller.current()));
                    match save_color_image(image, &path) {
                        Ok(()) => eprintln!("  Saved {}", path.display()),
                        Err(err) => {
                            error!(path = %path.display(), error = %err, "failed to save slide")
                        }
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            let current = self.controller.current();
            if current >= self.controller.total() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            self.controller.go_to(current + 1);
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = render::compute_scale(rect);

                let chart_size = render::chart_rect(rect, &self.theme, scale).size();
                self.controller.stage_mut().measure_surfaces(chart_size);
                self.controller.layout_settled();

                let index = self.controller.current();
                if let Some(slide) = content::slide(index) {
                    let chart = slide_chart(&self.controller, index);
                    render::render_slide(ui, slide, &self.theme, rect, 1.0, scale, chart, None);
                }
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            debug!(slide = self.controller.current(), "requesting screenshot");
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn slide_chart(
    controller: &PresentationController<PaintedChartBackend>,
    index: usize,
) -> Option<&render::chart::PaintedChart> {
    crate::charts::ChartKey::for_slide(index).and_then(|key| controller.chart(key))
}

pub fn slide_filename(index: usize) -> String {
    format!("slide-{index:02}.png")
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> image::ImageResult<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
}

pub fn run(output_dir: PathBuf, width: u32, height: u32, theme: &str) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        anyhow::bail!("Export size must be non-zero, got {width}x{height}");
    }
    std::fs::create_dir_all(&output_dir)?;

    eprintln!(
        "Exporting {} slides to {} ({}x{})",
        TOTAL_SLIDES,
        output_dir.display(),
        width,
        height,
    );

    let title = "chartdeck export";
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let theme = Theme::from_name(theme);
    let output_dir_clone = output_dir.clone();
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(theme, output_dir_clone)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let missing: Vec<String> = (1..=TOTAL_SLIDES)
        .map(slide_filename)
        .filter(|name| !output_dir.join(name).exists())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("Export incomplete, missing: {}", missing.join(", "));
    }

    eprintln!("{}", "Export complete.".green());
    Ok(())
}
