//! Demo content seeder.
//!
//! Usage: `quillboard-seed` (no flags). Exits 0 on success, 1 on error.

use tracing::info;

use quillboard::file::FileStore;
use quillboard::seed::Seeder;
use quillboard::{Config, Database};

#[tokio::main]
async fn main() {
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    quillboard::logging::init_console_only(&config.logging.level);

    if let Err(e) = run(&config).await {
        eprintln!("Seeding failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &quillboard::Config) -> quillboard::Result<()> {
    let db = Database::open(&config.database.path).await?;
    let store = FileStore::new(&config.files.storage_path)?;

    let report = Seeder::new(&db, &store).run().await?;

    info!(
        users = report.users,
        posts = report.posts,
        comments = report.comments,
        contacts = report.contacts,
        files = report.files,
        "Seeder finished"
    );

    Ok(())
}
