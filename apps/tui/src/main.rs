use clap::Parser;
use color_eyre::Result;
use radioactive_tui::app::{App, AppActions};
use radioactive_tui::cli::CliArgs;
use radioactive_tui::config::init_app_config;
use radioactive_tui::location::resolve_location;
use radioactive_tui::mesh::{GeminiMesh, MeshBackend, OfflineMesh};
use radioactive_tui::{event, terminal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = init_app_config()?;
    let location = resolve_location(&config);

    let mesh: Box<dyn MeshBackend> = match (&config.api_key, args.offline) {
        (Some(key), false) => Box::new(GeminiMesh::new(key.clone(), config.model.clone())?),
        _ => Box::new(OfflineMesh::new()),
    };

    let mut app = App::new(AppActions::new(mesh), location);

    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, &config.database_url, args.json).await;
    }

    if let Err(e) = app.initialize(&config.database_url).await {
        eprintln!("Error initializing profile store: {e}");
        eprintln!("Will continue without a persisted profile");
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
