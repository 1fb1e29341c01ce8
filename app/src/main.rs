//! `senior-spark` entry-point: loads settings, opens storage and runs one
//! command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::debug;

use senior_spark::config::AppSettings;
use senior_spark::domain::SessionService;
use senior_spark::inbound::cli::{Cli, Context, Outcome, execute};
use senior_spark::outbound::seed::CatalogSource;
use senior_spark::outbound::storage::FileLocalStorage;
use senior_spark::telemetry;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut settings = AppSettings::load_from_iter([OsString::from("senior-spark")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    cli.apply_to(&mut settings);
    telemetry::init(settings.log_json);

    let storage_dir = Utf8PathBuf::from_path_buf(settings.storage_dir().to_path_buf())
        .map_err(|path| eyre!("storage directory {} is not valid UTF-8", path.display()))?;
    let storage = FileLocalStorage::open(&storage_dir).wrap_err("failed to open storage")?;
    debug!(storage = %storage.root(), "storage ready");

    let ctx = Context {
        session: SessionService::new(storage),
        catalog: CatalogSource {
            registry_path: settings.seed_registry(),
            demo_seed: settings.demo_seed(),
        },
        clock: Arc::new(DefaultClock),
    };

    let mut out = io::stdout().lock();
    let outcome = execute(cli.command, &ctx, io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Refused => ExitCode::FAILURE,
    })
}
