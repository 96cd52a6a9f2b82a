// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::{default_shelves, AisleConfig, ShelfConfig};
use crate::error::SceneError;
use crate::picking::PointerEvent;

#[derive(Parser, Debug, Clone)]
#[command(name = "aisle-explorer")]
#[command(about = "Headless retail aisle explorer", long_about = None)]
pub struct Cli {
    /// Aisle layout (JSON). Defaults to the built-in layout
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Load a single shelf from this model instead of the layout's shelves
    #[arg(long)]
    pub model: Option<String>,

    /// Directory relative model paths are resolved against
    #[arg(long)]
    pub assets: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Click at pixel X,Y (repeatable, replayed in order)
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_click)]
    pub clicks: Vec<PointerEvent>,

    /// Return to the aisle view after the clicks
    #[arg(long)]
    pub back: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn aisle_config(&self) -> Result<AisleConfig, SceneError> {
        let mut config = match &self.config {
            Some(path) => AisleConfig::from_path(path)?,
            None => AisleConfig::default(),
        };
        if let Some(model) = &self.model {
            let id = default_shelves()
                .first()
                .map_or_else(|| "shelf-a".to_string(), |shelf| shelf.id.clone());
            config.shelves = vec![ShelfConfig::new(id, [0.0; 3], [0.0; 3], model.clone())];
        }
        Ok(config)
    }

    /// Explicit `--assets`, else the config file's directory.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        self.assets.clone().or_else(|| {
            self.config
                .as_ref()
                .and_then(|path| path.parent())
                .map(PathBuf::from)
        })
    }
}

fn parse_click(value: &str) -> Result<PointerEvent, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {value:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X in {value:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y in {value:?}: {e}"))?;
    Ok(PointerEvent::new(x, y))
}
