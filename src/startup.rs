use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{campaign_route, default_route},
    services::{LinkedinScraper, OpenaiClient},
};

pub fn run(
    listener: TcpListener,
    scraper: LinkedinScraper,
    openai_client: OpenaiClient,
) -> Result<Server, std::io::Error> {
    let scraper = web::Data::new(scraper);
    let openai_client = web::Data::new(openai_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::status)
            .service(web::scope("/api").service(campaign_route::start_campaign))
            .app_data(scraper.clone())
            .app_data(openai_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
