use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use glam::DVec2;
use stagecraft_assets::AssetCatalog;
use stagecraft_author::{EditorConfig, EditorSession};
use stagecraft_common::{HISTORY_CAPACITY, SCENE_FORMAT_VERSION, SpriteShape};
use stagecraft_runtime::RuntimeHandle;
use stagecraft_scene::Scene;
use stagecraft_tools::SceneInspector;
use stagecraft_view::{DebugTextRenderer, ImageSizes, NoImageSizes, Renderer, Viewport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagecraft-cli", about = "CLI tool for stagecraft scene files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Asset manifest with native image sizes
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and format info
    Info,
    /// Create an empty scene file
    New {
        path: PathBuf,
        /// Scene name (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Summarize a scene, or show one object
    Inspect {
        path: PathBuf,
        /// Object id to show in detail
        #[arg(short, long)]
        object: Option<String>,
    },
    /// Load a scene and report anything that had to be repaired
    Validate { path: PathBuf },
    /// Print a text rendering of the editing view
    Render {
        path: PathBuf,
        #[arg(long, default_value = "800")]
        width: f64,
        #[arg(long, default_value = "600")]
        height: f64,
    },
    /// Add an object and save the scene
    Add {
        path: PathBuf,
        /// image, rectangle, circle or ellipse
        shape: SpriteShape,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        x: f64,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        y: f64,
        /// Image path, required for the image shape
        #[arg(long)]
        image: Option<String>,
    },
    /// Copy the editing camera to the game camera and save
    SyncCamera { path: PathBuf },
    /// Spawn the scene in the runtime and export it back
    Export {
        path: PathBuf,
        /// Name of the exported scene
        #[arg(short, long, default_value = "exported")]
        name: String,
        /// Write the exported scene here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::debug!(assets = ?cli.assets, "stagecraft-cli starting");

    let catalog = match &cli.assets {
        Some(path) => Some(
            AssetCatalog::load_manifest(path)
                .with_context(|| format!("loading asset manifest {}", path.display()))?,
        ),
        None => None,
    };
    let images = || -> Box<dyn ImageSizes> {
        match &catalog {
            Some(c) => Box::new(c.clone()),
            None => Box::new(NoImageSizes),
        }
    };

    match cli.command {
        Commands::Info => {
            println!("stagecraft-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene format: v{SCENE_FORMAT_VERSION}");
            println!("history capacity: {HISTORY_CAPACITY}");
            let config = EditorConfig::default();
            println!(
                "zoom range: {}..{}",
                config.zoom_limits.min, config.zoom_limits.max
            );
            if let Some(c) = &catalog {
                println!("assets: {} image(s)", c.len());
            }
        }
        Commands::New { path, name, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let name = name.unwrap_or_else(|| file_stem(&path));
            let scene = Scene::new(name);
            stagecraft_persist::save_scene(&path, &scene)?;
            println!("Created scene '{}' at {}", scene.name, path.display());
        }
        Commands::Inspect { path, object } => {
            let scene = load(&path)?;
            match object {
                Some(id) => {
                    let info = SceneInspector::inspect_object(&scene, &id.as_str().into())
                        .with_context(|| format!("no object with id {id}"))?;
                    println!("{info}");
                }
                None => {
                    println!("{}", SceneInspector::summary(&scene));
                    for id in SceneInspector::list_objects(&scene) {
                        if let Some(info) = SceneInspector::inspect_object(&scene, &id) {
                            println!("  {info}");
                        }
                    }
                }
            }
        }
        Commands::Validate { path } => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let (scene, report) = stagecraft_persist::decode_with_report(&bytes)?;
            if report.is_clean() {
                println!("OK: '{}' with {} object(s)", scene.name, scene.len());
            } else {
                println!("Repaired on load: '{}'", scene.name);
                if report.reordered {
                    println!("  objects were not in z-order");
                }
                if report.reassigned_ids > 0 {
                    println!("  {} duplicate id(s) reassigned", report.reassigned_ids);
                }
                if report.grid_clamped {
                    println!("  grid size raised to 1");
                }
                if report.zoom_clamped {
                    println!("  camera zoom clamped");
                }
            }
            if scene.version > SCENE_FORMAT_VERSION {
                println!("  written by newer format v{}", scene.version);
            }
        }
        Commands::Render { path, width, height } => {
            let scene = load(&path)?;
            let renderer = DebugTextRenderer::with_images(images());
            print!("{}", renderer.render(&scene, &Viewport::new(width, height)));
        }
        Commands::Add {
            path,
            shape,
            x,
            y,
            image,
        } => {
            let mut session = open_session(&path, images())?;
            let position = DVec2::new(x, y);
            let id = match (shape, image) {
                (SpriteShape::Image, Some(image)) => session.add_image(&image, position)?,
                (SpriteShape::Image, None) => bail!("--image is required for image objects"),
                (shape, _) => session.add_primitive(shape, position)?,
            };
            session.save_current()?;
            let info = SceneInspector::inspect_object(session.scene(), &id)
                .context("added object missing from scene")?;
            println!("{info}");
        }
        Commands::SyncCamera { path } => {
            let mut session = open_session(&path, images())?;
            session.copy_camera_to_game();
            session.save_current()?;
            let cam = session.scene().camera;
            println!(
                "Game camera set to ({:.2}, {:.2}) zoom={:.3}",
                cam.game_x, cam.game_y, cam.game_zoom
            );
        }
        Commands::Export { path, name, out } => {
            let runtime = RuntimeHandle::spawn(&path, images().as_ref())?;
            println!("Spawned {} drawable(s)", runtime.len());
            let scene = stagecraft_runtime::export(&runtime, &name);
            println!("{}", SceneInspector::summary(&scene));
            if let Some(out) = out {
                stagecraft_persist::save_scene(&out, &scene)?;
                println!("Wrote {}", out.display());
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Scene> {
    stagecraft_persist::load_scene(path).with_context(|| format!("loading {}", path.display()))
}

fn open_session(path: &Path, images: Box<dyn ImageSizes>) -> anyhow::Result<EditorSession> {
    let mut session = EditorSession::new().with_images(images);
    session.load(path)?;
    Ok(session)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_owned()
}
