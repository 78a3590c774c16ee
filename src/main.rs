mod config;
mod constants;
mod controller;
mod geometry;
mod image_loader;
mod paths;
mod surface;
mod tag;
mod throttle;
mod validation;

use config::TaggerConfig;
use constants::{
    COLOR_MARKER_BG, COLOR_MARKER_BG_NEAREST, COLOR_MARKER_DOT, COLOR_MARKER_TEXT,
    COLOR_TOOLBAR_BG, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, INPUT_WIDTH,
    MARKER_CORNER_RADIUS, MARKER_DOT_RADIUS, MARKER_FONT_SIZE, MARKER_LABEL_OFFSET,
    MARKER_PADDING, TOOLBAR_BUTTON_SIZE, TOOLBAR_ICON_SIZE, TOOLBAR_START_SPACING,
};
use controller::{CommitOutcome, TagController};
use eframe::egui::{self, Color32, FontId, Id, Key, Pos2, Rect, RichText, Sense, Vec2};
use egui::pos2;
use image_loader::{load_image, SUPPORTED_EXTENSIONS};
use paths::AppPaths;
use std::path::{Path, PathBuf};
use std::time::Instant;
use surface::TagSurface;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = TaggerConfig::load(AppPaths::from_project_dirs().as_ref());
    let initial_image = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Image Tagger",
        options,
        Box::new(move |cc| Ok(Box::new(TaggerApp::new(cc, &config, initial_image)))),
    )
}

/// The image currently being tagged.
struct Canvas {
    path: PathBuf,
    texture: egui::TextureHandle,
    size: Vec2,
}

struct TaggerApp {
    controller: TagController,
    canvas: Option<Canvas>,
    /// Last pointer position over the image, in image coordinates.
    hover: Option<Pos2>,
    /// Bumped for every new input so its text field gets a fresh widget id.
    input_serial: u64,
    focus_input: bool,
    status: Option<String>,
}

impl TaggerApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: &TaggerConfig,
        initial_image: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            controller: TagController::from_config(config),
            canvas: None,
            hover: None,
            input_serial: 0,
            focus_input: false,
            status: None,
        };
        if let Some(path) = initial_image {
            app.open_image(&cc.egui_ctx, &path);
        }
        app
    }

    fn pick_image(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.open_image(ctx, &path);
        }
    }

    fn open_image(&mut self, ctx: &egui::Context, path: &Path) {
        let loaded = match load_image(path) {
            Ok(loaded) => loaded,
            Err(err) => {
                log::error!("{}", err);
                self.status = Some(err.to_string());
                return;
            }
        };

        let texture = ctx.load_texture("tagged-image", loaded.image, egui::TextureOptions::LINEAR);
        self.controller.reset();
        self.hover = None;
        self.canvas = Some(Canvas {
            path: path.to_path_buf(),
            texture,
            size: loaded.size,
        });
        log::info!(
            "Opened {} ({}x{})",
            path.display(),
            loaded.size.x,
            loaded.size.y
        );
        self.status = Some(format!("Opened {}", path.display()));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open_image(ctx, &path);
        }
    }

    fn begin_input(&mut self, position: Pos2) {
        let previous = self.controller.begin_input(position);
        self.report_commit(previous);
        self.input_serial += 1;
        self.focus_input = true;
    }

    fn commit_input(&mut self) {
        let outcome = self.controller.commit_input();
        self.report_commit(outcome);
    }

    fn report_commit(&mut self, outcome: Option<CommitOutcome>) {
        match outcome {
            Some(Ok(tag)) => {
                log::info!(
                    "Tag {} \"{}\" at ({}, {})",
                    tag.tag_id,
                    tag.value,
                    tag.offset_x,
                    tag.offset_y
                );
                self.status = Some(format!("Tagged \"{}\"", tag.value));
            }
            Some(Err(err)) => {
                log::debug!("Discarded label: {err}");
                self.status = Some(format!("Discarded label: {err}"));
            }
            None => {}
        }
    }

    fn toolbar_button(ui: &mut egui::Ui, icon: &str, tooltip: &str, selected: bool) -> bool {
        ui.add(
            egui::Button::new(RichText::new(icon).size(TOOLBAR_ICON_SIZE))
                .min_size(Vec2::splat(TOOLBAR_BUTTON_SIZE))
                .frame(selected)
                .selected(selected),
        )
        .on_hover_text(tooltip)
        .clicked()
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(canvas) = &self.canvas else {
            ui.centered_and_justified(|ui| {
                ui.label("Open or drop an image to start tagging");
            });
            return;
        };
        let texture_id = canvas.texture.id();
        let image_size = canvas.size;

        egui::ScrollArea::both()
            .id_salt("image_canvas")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (image_rect, response) = ui.allocate_exact_size(image_size, Sense::click());
                let origin = image_rect.min;
                let painter = ui.painter_at(image_rect);
                painter.image(
                    texture_id,
                    image_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );

                if response.clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        self.begin_input((pointer - origin).to_pos2());
                    }
                }

                self.hover = response.hover_pos().map(|p| (p - origin).to_pos2());
                if let Some(hover) = self.hover {
                    if ui.input(|i| i.pointer.is_moving()) {
                        self.controller.pointer_moved(Instant::now(), hover);
                    }
                }

                self.paint_markers(&painter, origin);
                self.show_input(ui.ctx(), origin);
            });
    }

    fn paint_markers(&self, painter: &egui::Painter, origin: Pos2) {
        let nearest = self
            .hover
            .and_then(|hover| self.controller.nearest_tag(hover))
            .map(|tag| tag.tag_id);

        for marker in self.controller.surface().visible_markers() {
            let anchor = origin + marker.position.to_vec2();
            painter.circle_filled(anchor, MARKER_DOT_RADIUS, COLOR_MARKER_DOT);

            let galley = painter.layout_no_wrap(
                marker.label.clone(),
                FontId::proportional(MARKER_FONT_SIZE),
                COLOR_MARKER_TEXT,
            );
            let text_pos = anchor + Vec2::splat(MARKER_LABEL_OFFSET);
            let bg_rect = Rect::from_min_size(text_pos, galley.size()).expand(MARKER_PADDING);
            let fill = if nearest == Some(marker.tag_id) {
                COLOR_MARKER_BG_NEAREST
            } else {
                COLOR_MARKER_BG
            };
            painter.rect_filled(bg_rect, MARKER_CORNER_RADIUS, fill);
            painter.galley(text_pos, galley, COLOR_MARKER_TEXT);
        }
    }

    fn show_input(&mut self, ctx: &egui::Context, origin: Pos2) {
        let focus = std::mem::take(&mut self.focus_input);
        let serial = self.input_serial;
        let Some(input) = self.controller.surface_mut().input_mut() else {
            return;
        };
        let screen_pos = origin + input.position.to_vec2();

        let mut commit = false;
        let mut cancel = false;
        egui::Area::new(Id::new("tag_input").with(serial))
            .order(egui::Order::Foreground)
            .fixed_pos(screen_pos)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut input.text)
                        .desired_width(INPUT_WIDTH)
                        .hint_text("Tag label"),
                );
                if focus {
                    response.request_focus();
                }

                // Enter, Escape and clicking away all surrender focus.
                if ui.input(|i| i.key_pressed(Key::Escape)) {
                    cancel = true;
                } else if response.lost_focus() {
                    commit = true;
                }
            });

        if cancel {
            self.controller.cancel_input();
        } else if commit {
            self.commit_input();
        }
    }
}

impl eframe::App for TaggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let now = Instant::now();
        self.controller.tick(now);
        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::default()
                    .fill(COLOR_TOOLBAR_BG)
                    .inner_margin(0.0)
                    .outer_margin(0.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(TOOLBAR_START_SPACING);
                    if Self::toolbar_button(ui, "🖼", "Open Image", false) {
                        self.pick_image(ctx);
                    }

                    let show_all = self.controller.show_all();
                    if Self::toolbar_button(ui, "👁", "Show All Tags", show_all) {
                        self.controller.set_show_all(!show_all);
                    }
                });
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(canvas) = &self.canvas {
                    let name = canvas
                        .path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unnamed");
                    ui.label(name);
                    ui.separator();
                }
                let count = self.controller.tags().len();
                ui.label(if count == 1 {
                    "1 tag".to_owned()
                } else {
                    format!("{count} tags")
                });
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_canvas(ui);
        });
    }
}
