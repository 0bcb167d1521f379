use clap::Parser;
use color_eyre::Result;
use parchify::{
    cli::{self, Cli, Commands},
    logging, utils, Config, Database, Profile,
};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config, database and logs apart from the real ones
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path, profile)?,
        None => Config::load_with_profile(profile)?,
    };

    let data_dir = utils::get_data_dir(profile)
        .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine data directory"))?;
    logging::init_logging(&config.log_level, &data_dir.join("logs"))?;

    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    let seeded = db.seed_moods_if_empty(&config.default_moods)?;
    if seeded > 0 {
        log::info!("event=moods_seeded count={}", seeded);
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = parchify::tui::App::new(config, profile, db)?;
            parchify::tui::run_event_loop(app)?;
        }
        Commands::Add(fields) => cli::handle_add(fields, &db)?,
        Commands::Edit { id, fields } => cli::handle_edit(id, fields, &db)?,
        Commands::Publish { id } => cli::handle_publish(id, &db)?,
        Commands::Delete { id } => cli::handle_delete(id, &db)?,
        Commands::Favorite { id } => cli::handle_favorite(id, &db)?,
        Commands::List(args) => cli::handle_list(args, &db)?,
        Commands::Calendar { year, month } => cli::handle_calendar(year, month, &db)?,
        Commands::Moods { action } => cli::handle_moods(action, &db)?,
        Commands::Export { file } => cli::handle_export(file, &db)?,
        Commands::Import { file } => cli::handle_import(file, &db)?,
    }

    Ok(())
}
