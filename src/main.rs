use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};

use traffic_mirror::adapters::inbound::MemoryScene;
use traffic_mirror::adapters::outbound::{init_combined_logger, HttpTrafficFeed};
use traffic_mirror::application::SyncService;
use traffic_mirror::domains::scene::Position3D;
use traffic_mirror::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Traffic Mirror");

    // Load configuration; defaults target the local feed server
    let config = match Config::from_file("config.toml").await {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(err) => {
            error!("Failed to load config.toml, using defaults: {}", err);
            Config::default()
        }
    };

    info!("Feed server: {}", config.server.base_url);
    info!("Cycle period: {} ms", config.sync.period_ms);

    // Headless stand-in for the host scene: author every object the
    // configured discovery ranges may resolve, at design-time positions.
    let scene = Arc::new(MemoryScene::new());
    for class in &config.scene.vehicle_classes {
        for index in class.first_index..=class.last_index {
            let name = format!("{}{}", class.id_prefix, index);
            scene.add_object(&name, Position3D { x: 0.0, y: class.height, z: 0.0 });
        }
    }
    let lights = &config.scene.traffic_lights;
    for index in lights.first_index..=lights.last_index {
        let name = format!("{}{}", lights.id_prefix, index);
        scene.add_fixture(&name, Position3D { x: 0.0, y: lights.height, z: 0.0 });
    }

    let feed = Arc::new(HttpTrafficFeed::new(
        config.server.base_url.clone(),
        config.request_timeout(),
    )?);
    let logger = init_combined_logger("logs/traffic-mirror.log");

    let mut service = SyncService::new(config, scene, feed.clone(), feed, logger);
    service.start();

    info!("Traffic Mirror started successfully");

    // Keep mirroring until interrupted
    tokio::signal::ctrl_c().await?;
    info!("Shutting down Traffic Mirror");
    service.shutdown().await;

    Ok(())
}
