use std::net::TcpListener;

use env_logger::Env;
use magnet::{
    configuration::get_configuration,
    services::{LinkedinScraper, OpenaiClient},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    configuration
        .linkedin
        .ensure_present()
        .expect("Linkedin credentials must be configured before starting the server.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let openai_client = OpenaiClient::new(configuration.api_keys.openai.clone());
    let scraper = LinkedinScraper::new(
        configuration.webdriver.clone(),
        configuration.linkedin.clone(),
    );

    run(listener, scraper, openai_client)?.await
}
