use actix_web::{web, App, HttpServer};

use fantasy_namegen::middleware::{error_handler, Logging};
use fantasy_namegen::routes;
use fantasy_namegen::utils::{init, init_generator};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化应用配置和日志系统
    let config = init().await?;

    // 启动前加载模型；失败时退化为规则生成
    let generator = init_generator(&config).await;
    log::info!("Language model available: {}", generator.has_model());

    let server_config = config.clone();
    let host = server_config.server.host.clone();
    let port = server_config.server.port;
    let shutdown_timeout = server_config.server.shutdown_timeout;
    let generator = web::Data::new(generator);

    log::info!("Listening on {}:{}", host, port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_config.clone()))
            .app_data(generator.clone())
            .wrap(error_handler())
            .wrap(Logging)
            .configure(routes::route::configure)
    })
    .client_request_timeout(std::time::Duration::from_secs(30))
    .bind((host, port))?
    .shutdown_timeout(shutdown_timeout)
    .run()
    .await
}
