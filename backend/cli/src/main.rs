mod image_input;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use relight_config::{check, config_dir, config_file_path, load_unchecked};
use relight_core::{ImageSource, NodeInputs};
use relight_plugins::NodeRegistry;

const LIGHTING_NODE: &str = "QwenMultiangleLightningNode";

#[derive(Parser)]
#[command(name = "relight")]
#[command(about = "Relighting prompt node — evaluate lighting controls from the command line")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.relight/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a lighting prompt
    Prompt {
        /// Horizontal light angle in degrees
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        azimuth: i32,
        /// Vertical light angle in degrees
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        elevation: i32,
        /// Light intensity, 0.0 to 10.0
        #[arg(long, default_value_t = 5.0)]
        intensity: f64,
        /// Light color as CSS hex
        #[arg(long, default_value = "#FFFFFF")]
        color: String,
        /// Drop the cinematic prefix and suffix
        #[arg(long)]
        no_cinematic: bool,
        /// Input image to fingerprint and preview
        #[arg(long)]
        image: Option<PathBuf>,
        /// Host node id used as the cache key
        #[arg(long)]
        node_id: Option<String>,
        /// Print the full node output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the registered node definitions
    Nodes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load_unchecked(&config_path).await?;

    relight_logging::init_logger(
        config.log_level(),
        config.log_dir().map(std::path::Path::new),
    );
    // Validate after the subscriber is up so config warnings reach the logs.
    let config = check(config)?;

    let registry = NodeRegistry::with_builtin_nodes(&config);

    match cli.command {
        Commands::Prompt {
            azimuth,
            elevation,
            intensity,
            color,
            no_cinematic,
            image,
            node_id,
            json,
        } => {
            let widgets = json!({
                "light_azimuth": azimuth,
                "light_elevation": elevation,
                "light_intensity": intensity,
                "light_color_hex": color,
                "cinematic_mode": !no_cinematic,
            });
            let mut inputs = NodeInputs::new(widgets);
            if let Some(path) = image {
                let tensor: Arc<dyn ImageSource> =
                    Arc::new(image_input::load_image_tensor(&path)?);
                inputs = inputs.with_image(tensor);
            }
            if let Some(id) = node_id {
                inputs = inputs.with_unique_id(id);
            }

            info!(node = LIGHTING_NODE, "Evaluating node");
            let output = registry.execute(LIGHTING_NODE, inputs).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", output.prompt().unwrap_or_default());
            }
        }
        Commands::Nodes => {
            println!("{}", serde_json::to_string_pretty(&registry.object_info())?);
        }
    }

    Ok(())
}
