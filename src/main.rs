use dotenv::dotenv;
use hookchat::{app, config::Config, errors::HookchatResult, logging::init_logging};

#[tokio::main]
async fn main() -> HookchatResult<()> {
    dotenv().ok();

    let config = Config::load()?;
    init_logging(&config)?;
    if config.webhook_url.is_none() {
        log::warn!("no webhook URL configured, every message will get a server error");
    }

    app::run(config).await
}
