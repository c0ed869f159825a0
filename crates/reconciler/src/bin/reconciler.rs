use actix_web::{App, HttpServer};
use reconciler::{
    configs::Settings,
    logger,
    routes::{AppState, Frontend, Health},
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let conf = match Settings::new() {
        Ok(conf) => conf,
        Err(error) => {
            eprintln!("failed to load configuration: {error}");
            std::process::exit(1);
        }
    };

    reconciler_env::setup(&conf.log);

    let state = AppState::new(conf.clone());
    let listen = (conf.server.host.clone(), conf.server.port);
    logger::info!(host = %listen.0, port = listen.1, "starting reconciler");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(Health::server(state.clone()))
            .service(Frontend::server(state.clone()))
    })
    .bind(listen)?
    .run()
    .await
}
