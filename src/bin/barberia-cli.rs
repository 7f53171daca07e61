//! Barberia console menu over the flat-file store

use anyhow::{anyhow, Context};
use clap::Parser;

use barberia::{
    cli::{read_lines_in_background, Args, Menu},
    config::AppConfig,
    logging::{self, LogTarget},
    store::CsvVisitStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging, LogTarget::Stderr);

    if args.data_file.is_some() {
        config.storage.data_file = args.data_file;
    }
    if args.export_file.is_some() {
        config.storage.export_file = args.export_file;
    }
    let data_file = config
        .storage
        .resolved_data_file()
        .ok_or_else(|| anyhow!("Cannot locate the documents folder; pass --data-file"))?;
    let export_file = config
        .storage
        .resolved_export_file()
        .ok_or_else(|| anyhow!("Cannot locate the documents folder; pass --export-file"))?;

    let store = CsvVisitStore::new(&data_file);
    if store
        .initialize()
        .with_context(|| format!("Error al inicializar archivo {}", data_file.display()))?
    {
        println!("Archivo creado en: {}", data_file.display());
    }

    let stdin = read_lines_in_background(std::io::BufReader::new(std::io::stdin()));
    let mut menu = Menu::new(stdin, std::io::stdout(), store, export_file).with_interrupt(async {
        // a failed handler install leaves only EOF and option 5 as exits
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    });

    let exit = menu.run().await?;
    tracing::debug!(?exit, "Exiting");
    Ok(())
}
