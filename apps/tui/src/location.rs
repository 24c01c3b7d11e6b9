use crate::config::AppConfig;

/// Placeholder shown when no coordinates are configured. Matches the copy in
/// the chat header; purely cosmetic.
pub const LOCATION_UNAVAILABLE: &str = "Mesh Disconnected";

/// Resolve the display location once at startup.
///
/// A terminal has no geolocation API, so coordinates arrive via
/// `MESH_LAT`/`MESH_LON` (or the matching CLI flags). Both present formats to
/// four decimal places; anything else is the fixed placeholder. The string is
/// cosmetic context for the content service, never an input to computation.
pub fn resolve_location(config: &AppConfig) -> String {
    match (config.latitude, config.longitude) {
        (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
        _ => LOCATION_UNAVAILABLE.to_string(),
    }
}
