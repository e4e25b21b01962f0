use food_rush::config::ServerConfig;
use food_rush::proto::food_rush_server::FoodRushServer;
use food_rush::service::FoodRushService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::load()?;
    let addr = config.socket_addr()?;
    let timing = config.timing.clone();
    let service = FoodRushService::new(config);

    log::info!("FoodRush gRPC server listening on {}", addr);
    log::info!(
        "Round timing: tick {}ms, match settle {}ms, mismatch settle {}ms, completion {}ms",
        timing.tick_ms,
        timing.match_settle_ms,
        timing.mismatch_settle_ms,
        timing.completion_delay_ms
    );

    tonic::transport::Server::builder()
        .add_service(FoodRushServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
