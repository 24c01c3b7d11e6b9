use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Everything the app reads from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLx connection URL for the profile store.
    pub database_url: String,
    /// Key for the generative-language service. Absent means the offline
    /// backend answers instead.
    pub api_key: Option<String>,
    pub model: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "radioactive.db".to_string());
    let database_path = base_dir.join(&db_name);

    if let Some(parent) = database_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let database_url = database_url_for(&database_path)
        .ok_or_else(|| eyre!("Invalid database path: {}", database_path.display()))?;

    // API_KEY matches what the service docs use; GEMINI_API_KEY is the
    // common spelling in shell profiles. Either works.
    let api_key = env::var("API_KEY")
        .or_else(|_| env::var("GEMINI_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty());

    let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let latitude = parse_coordinate(env::var("MESH_LAT").ok());
    let longitude = parse_coordinate(env::var("MESH_LON").ok());

    Ok(AppConfig {
        database_url,
        api_key,
        model,
        latitude,
        longitude,
    })
}

/// Formats a filesystem path as a SQLx SQLite URL.
///
/// SQLx wants `sqlite:///abs/path.db` (three slashes) for absolute paths and
/// `sqlite://rel/path.db` (two) for relative ones.
fn database_url_for(path: &Path) -> Option<String> {
    let raw = path.to_str()?;
    let clean = raw.trim_start_matches('/');

    Some(if path.is_absolute() {
        format!("sqlite:///{clean}")
    } else {
        format!("sqlite://{clean}")
    })
}

fn parse_coordinate(value: Option<String>) -> Option<f64> {
    let raw = value?;
    match raw.trim().parse::<f64>() {
        Ok(coordinate) => Some(coordinate),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring unparsable coordinate");
            None
        }
    }
}
