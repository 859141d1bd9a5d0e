// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan3D command-line front end.
//!
//! Reads floor records (JSON), migrates legacy ones, and turns their
//! annotations into OpenSCAD or Blender scripts and OBJ meshes.
//!
//! Usage:
//!   plan3d emit floor.json --language openscad
//!   plan3d export-obj floor.json --apartment
//!   plan3d sections --language blender
//!   plan3d migrate floor.json

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use plan3d_core::{ApartmentDetails, ApartmentModel, ConvertedApartment, Floor, Section};
use plan3d_emit::{
    ApartmentPython, ApartmentScad, BottlePython, BottleScad, CodeEmitter, ScriptLanguage,
};
use plan3d_viewer::{synthesize, SceneInput, ViewerConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod obj;
mod store;

use config::Config;
use store::JsonFileStore;

#[derive(Parser)]
#[command(name = "plan3d")]
#[command(about = "Turn annotated floor plans into 3D scripts and meshes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an apartment script from a floor record
    Emit {
        /// Floor record (JSON)
        floor: PathBuf,
        #[arg(long, value_enum, default_value_t = Language::Openscad)]
        language: Language,
        /// Output file; defaults to `<floor id>.<ext>` in the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the 3D scene of a floor record as Wavefront OBJ
    ExportObj {
        /// Floor record (JSON)
        floor: PathBuf,
        /// Build per-room walls from the apartment model instead of one wall slab
        #[arg(long)]
        apartment: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the stacked-section script
    Sections {
        /// JSON list of sections; the three default sections when omitted
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Language::Openscad)]
        language: Language,
    },
    /// Rewrite a legacy floor record with typed annotations
    Migrate {
        /// Floor record (JSON), rewritten in place
        floor: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Language {
    Openscad,
    Blender,
}

impl From<Language> for ScriptLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Openscad => ScriptLanguage::OpenScad,
            Language::Blender => ScriptLanguage::BlenderPython,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    debug!(
        output_dir = %config.output_dir.display(),
        unit = %config.unit,
        wall_height = config.wall_height,
        wall_thickness = config.wall_thickness,
        "configuration loaded"
    );

    match cli.command {
        Commands::Emit {
            floor,
            language,
            output,
        } => emit(&config, &floor, language, output),
        Commands::ExportObj {
            floor,
            apartment,
            output,
        } => export_obj(&config, &floor, apartment, output),
        Commands::Sections { file, language } => sections(file.as_deref(), language),
        Commands::Migrate { floor } => migrate(&floor),
    }
}

fn load_floor(path: &Path) -> Result<Floor> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read floor record {}", path.display()))?;
    let floor = Floor::from_json(&json)
        .with_context(|| format!("Invalid floor record {}", path.display()))?;
    if floor.is_legacy() {
        info!(floor = %floor.id, "legacy floor record, reading outlines as walls");
    }
    Ok(floor)
}

fn apartment(config: &Config, floor: &Floor) -> Result<ConvertedApartment> {
    let details = ApartmentDetails {
        unit: config.unit,
        height: config.wall_height,
        wall_thickness: config.wall_thickness,
        ..ApartmentDetails::default()
    };
    let model = ApartmentModel::from_annotations(details, &floor.annotation_set());
    if model.rooms.is_empty() {
        bail!("Floor '{}' has no wall outlines", floor.id);
    }
    model
        .converted()
        .context("Failed to convert apartment parameters to centimetres")
}

fn output_path(config: &Config, floor: &Floor, output: Option<PathBuf>, ext: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        let stem = if floor.id.is_empty() { "floor" } else { floor.id.as_str() };
        config.output_dir.join(format!("{}.{}", stem, ext))
    })
}

fn emit(config: &Config, path: &Path, language: Language, output: Option<PathBuf>) -> Result<()> {
    let floor = load_floor(path)?;
    let model = apartment(config, &floor)?;

    let language = ScriptLanguage::from(language);
    let code = match language {
        ScriptLanguage::OpenScad => ApartmentScad.emit(&model),
        ScriptLanguage::BlenderPython => ApartmentPython.emit(&model),
    };

    let out = output_path(config, &floor, output, language.extension());
    std::fs::write(&out, code).with_context(|| format!("Failed to write {}", out.display()))?;
    info!(
        rooms = model.rooms.len(),
        windows = model.windows.len(),
        doors = model.doors.len(),
        path = %out.display(),
        "{} script written",
        language
    );
    Ok(())
}

fn export_obj(
    config: &Config,
    path: &Path,
    apartment_view: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let floor = load_floor(path)?;
    let input = if apartment_view {
        SceneInput::Apartment(apartment(config, &floor)?)
    } else {
        SceneInput::Annotations {
            annotations: floor.annotation_set(),
            wall_height: config.wall_height,
            wall_thickness: config.wall_thickness,
        }
    };

    let viewer_config = ViewerConfig {
        field_of_view_deg: config.fov_deg,
        ..ViewerConfig::default()
    };
    let scene = synthesize(&input, &viewer_config);
    if scene.nodes.is_empty() {
        bail!("Floor '{}' produced no geometry", floor.id);
    }

    let out = output_path(config, &floor, output, "obj");
    let file = std::fs::File::create(&out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    let stats = obj::write_obj(&mut writer, &scene)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    info!(
        objects = stats.objects,
        vertices = stats.vertices,
        triangles = stats.triangles,
        path = %out.display(),
        "OBJ written"
    );
    if let Some(camera) = scene.camera {
        debug!(
            target_x = camera.target.x,
            target_y = camera.target.y,
            target_z = camera.target.z,
            distance = camera.distance,
            "suggested camera"
        );
    }
    Ok(())
}

fn sections(file: Option<&Path>, language: Language) -> Result<()> {
    let sections: Vec<Section> = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid section list {}", path.display()))?
        }
        None => plan3d_core::default_sections(),
    };

    let code = match ScriptLanguage::from(language) {
        ScriptLanguage::OpenScad => BottleScad.emit(sections.as_slice()),
        ScriptLanguage::BlenderPython => BottlePython.emit(sections.as_slice()),
    };
    print!("{}", code);
    Ok(())
}

fn migrate(path: &Path) -> Result<()> {
    let mut store = JsonFileStore::new(path);
    let floor = load_floor(store.path())?;
    if !floor.is_legacy() {
        info!(floor = %floor.id, "floor record already migrated");
        return Ok(());
    }

    let mut session = plan3d_editor::EditSession::open(floor);
    let saved = session
        .save(&mut store)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!(
        floor = %saved.id,
        walls = saved.annotation_set().walls.len(),
        "floor record migrated"
    );
    Ok(())
}
