use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "radioactive", version, about = "Proximity mesh chat TUI")]
pub struct CliArgs {
    /// Print mesh status and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless status as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Run against the canned offline backend
    #[arg(long)]
    pub offline: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Override sector latitude
    #[arg(long, value_name = "DEG")]
    pub lat: Option<f64>,

    /// Override sector longitude
    #[arg(long, value_name = "DEG")]
    pub lon: Option<f64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(lat) = self.lat {
            std::env::set_var("MESH_LAT", lat.to_string());
        }
        if let Some(lon) = self.lon {
            std::env::set_var("MESH_LON", lon.to_string());
        }
        if self.debug {
            std::env::set_var("RUST_LOG", "debug");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
