use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{ColorImage, TextureHandle};
use tokio::runtime::Runtime;
use worldgen_core::{
    BandTable, Cartography, ColorTable, ConfigError, GenerationConfig, GeneratorKind, Greyscale,
    Grid, Histogram, apply_shift_percent, bands::two_color, generate, olson,
    render::{render_sphere, to_rgb_bytes},
};
use worldgen_storage::{JsonStore, MapStore, TerrainDoc, unique_name};

const MONGO_URI: &str = "mongodb://localhost:27017";
const DB_NAME: &str = "worldgen";
const COLLECTION: &str = "maps";
const GLOBE_DIAMETER: u32 = 512;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
enum ColourMode {
    // histogram-fitted water / terrain / ice gradients
    #[default]
    Histogram,
    // band classification plus polar ice caps
    Bands,
    // flat water / land split
    TwoColour,
    Greyscale,
}

impl ColourMode {
    fn kind(self) -> &'static str {
        match self {
            ColourMode::Histogram => "histogram",
            ColourMode::Bands => "olson",
            ColourMode::TwoColour => "two-colour",
            ColourMode::Greyscale => "grey",
        }
    }
}

// Last rendering shown in the central panel
struct Picture {
    rgb: Vec<u8>,
    width: usize,
    height: usize,
}

struct WorldApp {
    rt: Runtime,
    config: GenerationConfig,
    colour: ColourMode,
    shift_x: i32,
    shift_y: i32,
    globe: bool,
    globe_scroll: i32,
    map_dir: PathBuf,
    doc_name: String,

    // normalized height map, before any colouring
    grid: Option<Grid>,
    picture: Option<Picture>,
    texture: Option<TextureHandle>,
    status_message: String,
}

impl WorldApp {
    fn new(rt: Runtime, config: GenerationConfig) -> Self {
        Self {
            rt,
            config,
            colour: ColourMode::default(),
            shift_x: 0,
            shift_y: 0,
            globe: false,
            globe_scroll: 0,
            map_dir: PathBuf::from("maps"),
            doc_name: "world".into(),
            grid: None,
            picture: None,
            texture: None,
            status_message: String::new(),
        }
    }

    fn generate(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        match generate(&self.config) {
            Ok(grid) => {
                self.grid = Some(grid);
                let note = self.redraw(ctx);
                self.status_message = format!(
                    "Generated in {:.2} ms (seed {:x}){note}",
                    start.elapsed().as_secs_f32() * 1000.0,
                    self.config.seed
                );
            }
            Err(e) => self.status_message = format!("Generate error: {e}"),
        }
    }

    // Colour the current map into a texture; returns a note for the status line
    fn redraw(&mut self, ctx: &egui::Context) -> String {
        let Some(grid) = &self.grid else {
            return String::new();
        };
        let (pct_water, pct_ice) = (self.config.percent_water, self.config.percent_ice);

        let (picture, note) = match self.colour {
            ColourMode::Histogram => {
                let survey = Cartography::survey(grid, pct_water, pct_ice);
                let note = format!(", sea {} ice {}", survey.sea_level, survey.ice_level);
                (self.paint(grid, &survey.table()), note)
            }
            ColourMode::Bands => {
                let mut bands = grid.clone();
                let report = olson(&mut bands, pct_water, pct_ice);
                let note = format!(", ice {}+{} cells", report.north, report.south);
                (self.paint(&bands, &BandTable::direct()), note)
            }
            ColourMode::TwoColour => {
                let sea_level = Histogram::of(grid).sea_level(pct_water);
                let mut split = grid.clone();
                two_color(&mut split, sea_level);
                (self.paint(&split, &BandTable::direct()), format!(", sea {sea_level}"))
            }
            ColourMode::Greyscale => (self.paint(grid, &Greyscale), String::new()),
        };

        let color_image = ColorImage::from_rgb([picture.width, picture.height], &picture.rgb);
        self.texture = Some(ctx.load_texture("world", color_image, egui::TextureOptions::NEAREST));
        self.picture = Some(picture);
        ctx.request_repaint();
        note
    }

    fn paint(&self, grid: &Grid, table: &dyn ColorTable) -> Picture {
        if self.globe {
            let img = render_sphere(grid, table, GLOBE_DIAMETER, self.globe_scroll);
            Picture {
                width: img.width() as usize,
                height: img.height() as usize,
                rgb: img.into_raw(),
            }
        } else {
            Picture {
                rgb: to_rgb_bytes(grid, table),
                width: grid.width(),
                height: grid.height(),
            }
        }
    }

    fn shift(&mut self, ctx: &egui::Context) {
        let Some(grid) = &mut self.grid else {
            self.status_message = "Nothing to shift".into();
            return;
        };
        match apply_shift_percent(grid, self.shift_x, self.shift_y) {
            Ok(()) => {
                let note = self.redraw(ctx);
                self.status_message =
                    format!("Shifted {}% / {}%{note}", self.shift_x, self.shift_y);
            }
            Err(e) => self.status_message = format!("Shift error: {e}"),
        }
    }

    fn save_png(&mut self) {
        let Some(picture) = &self.picture else {
            self.status_message = "Nothing to save".into();
            return;
        };
        let suggested = match unique_name(&self.map_dir, self.colour.kind(), self.config.seed) {
            Ok(path) => path,
            Err(e) => {
                self.status_message = format!("Save error: {e}");
                return;
            }
        };
        let mut dialog = rfd::FileDialog::new().add_filter("PNG image", &["png"]);
        if let Some(name) = suggested.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        if self.map_dir.is_dir() {
            dialog = dialog.set_directory(&self.map_dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        self.status_message = match image::save_buffer(
            &path,
            &picture.rgb,
            picture.width as u32,
            picture.height as u32,
            image::ColorType::Rgb8,
        ) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Save error: {e}"),
        };
    }

    fn save_json(&mut self) {
        let Some(grid) = &self.grid else {
            self.status_message = "Nothing to save".into();
            return;
        };
        let store = JsonStore::new(&self.map_dir);
        self.status_message = match self.rt.block_on(store.save(self.config.seed, grid)) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => format!("Save error: {e}"),
        };
    }

    fn load_json(&mut self, ctx: &egui::Context) {
        let store = JsonStore::new(&self.map_dir);
        match self.rt.block_on(store.load(self.config.seed)) {
            Ok(Some(grid)) => {
                self.config.height = grid.height();
                self.config.width = grid.width();
                self.grid = Some(grid);
                let note = self.redraw(ctx);
                self.status_message =
                    format!("Loaded {}{note}", store.path_for(self.config.seed).display());
            }
            Ok(None) => self.status_message = "No saved map for this seed".into(),
            Err(e) => self.status_message = format!("Load error: {e}"),
        }
    }

    fn save_db(&mut self) {
        let Some(grid) = &self.grid else {
            self.status_message = "Nothing to save".into();
            return;
        };
        let doc = TerrainDoc::new(self.doc_name.clone(), &self.config, grid);
        let res = self.rt.block_on(async {
            let store = MapStore::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            store.create(doc).await
        });
        self.status_message = match res {
            Ok(()) => "Saved to MongoDB".into(),
            Err(e) => format!("DB error: {e}"),
        };
    }

    fn load_db(&mut self, ctx: &egui::Context) {
        let seed = self.config.seed;
        let found = self.rt.block_on(async {
            let store = MapStore::init(MONGO_URI, DB_NAME, COLLECTION).await?;
            store.read_by_seed(seed).await
        });
        match found {
            Ok(Some(doc)) => {
                let config = doc.config();
                let name = doc.name.clone();
                match Grid::try_from(doc.map) {
                    Ok(grid) => {
                        self.config = config;
                        self.doc_name = name;
                        self.grid = Some(grid);
                        let note = self.redraw(ctx);
                        self.status_message = format!("Loaded from MongoDB{note}");
                    }
                    Err(e) => self.status_message = format!("DB error: {e}"),
                }
            }
            Ok(None) => self.status_message = "No entry for this seed".into(),
            Err(e) => self.status_message = format!("DB error: {e}"),
        }
    }
}

impl App for WorldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("World Generator");
            ui.separator();

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.config.seed).speed(1.0).hexadecimal(16, false, false));

            ui.horizontal(|ui| {
                ui.label("Height");
                ui.add(egui::DragValue::new(&mut self.config.height).range(1..=4096));
                ui.label("Width");
                ui.add(egui::DragValue::new(&mut self.config.width).range(1..=8192));
            });

            ui.label("Iterations");
            ui.add(egui::Slider::new(&mut self.config.iterations, 0..=100_000).logarithmic(true));

            egui::ComboBox::from_label("Generator")
                .selected_text(format!("{:?}", self.config.generator))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.config.generator, GeneratorKind::Fracture, "Fracture");
                    ui.selectable_value(
                        &mut self.config.generator,
                        GeneratorKind::GreatCircle,
                        "GreatCircle",
                    );
                });

            if self.config.generator == GeneratorKind::Fracture {
                ui.label("Fracture mix");
                let mix = &mut self.config.mix;
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut mix.circle).range(0..=10).prefix("circle "));
                    ui.add(egui::DragValue::new(&mut mix.slice).range(0..=10).prefix("slice "));
                });
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut mix.tile_outside).range(0..=10).prefix("tile out "));
                    ui.add(egui::DragValue::new(&mut mix.tile_inside).range(0..=10).prefix("tile in "));
                });
            }

            ui.separator();
            let mut recolour = false;
            ui.label("Percent water");
            recolour |= ui.add(egui::Slider::new(&mut self.config.percent_water, 1..=99)).changed();
            ui.label("Percent ice");
            recolour |= ui.add(egui::Slider::new(&mut self.config.percent_ice, 0..=99)).changed();

            egui::ComboBox::from_label("Colours")
                .selected_text(format!("{:?}", self.colour))
                .show_ui(ui, |ui| {
                    for mode in [
                        ColourMode::Histogram,
                        ColourMode::Bands,
                        ColourMode::TwoColour,
                        ColourMode::Greyscale,
                    ] {
                        recolour |= ui
                            .selectable_value(&mut self.colour, mode, format!("{mode:?}"))
                            .changed();
                    }
                });

            recolour |= ui.checkbox(&mut self.globe, "Globe view").changed();
            if self.globe {
                recolour |= ui
                    .add(egui::Slider::new(&mut self.globe_scroll, 0..=359).text("Rotation"))
                    .changed();
            }
            if recolour {
                let note = self.redraw(ctx);
                if !note.is_empty() {
                    self.status_message = format!("Recoloured{note}");
                }
            }

            ui.separator();
            if ui.button("Generate").clicked() {
                self.generate(ctx);
            }

            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut self.shift_x).range(-100..=100).suffix("% x"));
                ui.add(egui::DragValue::new(&mut self.shift_y).range(-100..=100).suffix("% y"));
                if ui.button("Shift").clicked() {
                    self.shift(ctx);
                }
            });

            ui.separator();
            if ui.button("Save PNG…").clicked() {
                self.save_png();
            }
            ui.horizontal(|ui| {
                if ui.button("Save JSON").clicked() {
                    self.save_json();
                }
                if ui.button("Load JSON").clicked() {
                    self.load_json(ctx);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.doc_name);
            });
            ui.horizontal(|ui| {
                if ui.button("Save to DB…").clicked() {
                    self.save_db();
                }
                if ui.button("Load from DB…").clicked() {
                    self.load_db(ctx);
                }
            });

            ui.separator();
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let (Some(tex), Some(picture)) = (&self.texture, &self.picture) {
                // fit the picture, keeping its aspect ratio
                let available = ui.available_size();
                let scale = (available.x / picture.width as f32)
                    .min(available.y / picture.height as f32);
                let size = egui::vec2(picture.width as f32 * scale, picture.height as f32 * scale);
                ui.image((tex.id(), size));
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Click “Generate” to start");
                });
            }
        });
    }
}

fn load_config(path: Option<&Path>) -> Result<GenerationConfig, ConfigError> {
    match path {
        Some(path) => GenerationConfig::from_file(path),
        None => Ok(GenerationConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // optional JSON generation config as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    tracing::info!(target: "worldgen::app", ?config_path, seed = config.seed, "app.start");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "World Generator",
        opts,
        Box::new(move |_cc| Ok(Box::new(WorldApp::new(rt, config)))),
    )?;
    Ok(())
}
