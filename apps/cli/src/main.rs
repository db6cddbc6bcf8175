mod config;
mod main_lib;

use config::Config;
use main_lib::{init_tracing, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env()?;
    run(&config)
}
