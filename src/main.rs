// Table simulator entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, env-filtered)
// 2. Load config
// 3. Load league data through the adapter
// 4. Build the simulation session
// 5. Print the current table, export CSV if configured

use anyhow::Context;
use tracing::info;

use table_simulator::adapter;
use table_simulator::config;
use table_simulator::export;
use table_simulator::standings::session::SimulationSession;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("table simulator starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "config loaded: league={} season={}",
        config.league.name,
        config.league.season.as_deref().unwrap_or("-")
    );

    let data =
        adapter::load_league(&config.data_paths).context("failed to load league data")?;

    let session = SimulationSession::new(data).context("failed to build simulation session")?;
    let remaining = session.remaining_matches().count();
    info!(
        "{} teams, {} matches remaining in the schedule",
        session.teams().len(),
        remaining
    );

    print!("{}", export::format_table(session.table()));

    if let Some(path) = &config.export.csv_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {path}"))?;
        export::write_csv(session.table(), file)
            .with_context(|| format!("failed to write {path}"))?;
        info!("standings exported to {path}");
    }

    Ok(())
}

/// Initialize tracing to stderr so the table itself stays clean on stdout.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("table_simulator=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
