use crate::api::SET_MAP_DETAILS_URL;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "wzbuddy")]
#[command(version, about = "Warzone Map Buddy - helps you build your Warzone maps", long_about = None)]
pub struct Cli {
    /// The map SVG to read
    pub file: PathBuf,

    /// Update territory names by matching the id with the title (or label, if the title is empty)
    #[arg(long)]
    pub update_territory_names: bool,

    /// Create bonuses from groups labelled "bonus" (new ones are added on every run)
    #[arg(long)]
    pub create_bonuses: bool,

    /// Create a penalty for each territory in the layer labelled "Penalties"
    #[arg(long)]
    pub create_penalties: bool,

    /// Write a lighter copy of the SVG for uploading [default: <FILE>.light.svg]
    #[arg(long, value_name = "OUT_FILE", num_args = 0..=1, require_equals = true)]
    pub clean: Option<Option<PathBuf>>,

    /// Print skipped territory ids
    #[arg(long)]
    pub find_skipped_ids: bool,

    /// Write a copy with unnamed territories outlined in white [default: <FILE>.highlighted.svg]
    #[arg(long, value_name = "OUT_FILE", num_args = 0..=1, require_equals = true)]
    pub highlight_unnamed: Option<Option<PathBuf>>,

    /// API access token (find yours at https://www.warzone.com/API/GetAPIToken)
    #[arg(long, env = "WARZONE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Your account email address
    #[arg(long, env = "WARZONE_EMAIL")]
    pub email: Option<String>,

    /// The map id (find it in "Link for Sharing")
    #[arg(long, env = "WARZONE_MAP_ID")]
    pub mapid: Option<u64>,

    /// SetMapDetails endpoint to submit commands to
    #[arg(long, default_value = SET_MAP_DETAILS_URL)]
    pub endpoint: String,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the file size in bytes
    #[arg(long)]
    pub size: bool,

    /// Show the parsed arguments and the generated commands
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Where `--clean` writes, if it was given.
    pub fn clean_output(&self) -> Option<PathBuf> {
        self.clean
            .as_ref()
            .map(|out| output_path(&self.file, out.as_deref(), "light"))
    }

    /// Where `--highlight-unnamed` writes, if it was given.
    pub fn highlight_output(&self) -> Option<PathBuf> {
        self.highlight_unnamed
            .as_ref()
            .map(|out| output_path(&self.file, out.as_deref(), "highlighted"))
    }

    /// Copy safe to print: the API token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            api_token: self.api_token.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }

    pub fn wants_commands(&self) -> bool {
        self.update_territory_names || self.create_bonuses || self.create_penalties
    }
}

/// `explicit` if given, otherwise `<input stem>.<suffix>.svg` next to the input.
pub fn output_path(input: &Path, explicit: Option<&Path>, suffix: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(format!("{}.svg", suffix)),
    }
}
