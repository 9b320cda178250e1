mod api;
mod app;
mod bootstrap;
mod config;
mod error;
mod events;
mod geo;
mod logger;
mod session;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{App as ClapApp, Arg};
use config::Config;
use session::TokenStore;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Overrides the API base URL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("logout")
                .long("logout")
                .help("Clears the stored session and exits"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if !config.file_exists() {
        config.save()?;
    }
    if let Some(api_url) = matches.value_of("api-url") {
        config.api_base_url = api_url.to_owned();
    }

    if matches.is_present("logout") {
        if let Some(dir_path) = config.dir_path() {
            TokenStore::open(dir_path).clear()?;
        }
        println!("Logged out.");
        return Ok(());
    }

    App::start(config).await?;
    Ok(())
}
