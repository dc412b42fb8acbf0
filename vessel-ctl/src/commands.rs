use log::info;

use vessel_rs::DockerEngine;

/// Report whether the container engine answers; returns false when it does not
pub async fn check_engine() -> bool {
    info!("Checking container engine");
    println!("Checking container engine...\n");

    let engine = match DockerEngine::connect() {
        Ok(engine) => engine,
        Err(e) => {
            println!("[✗] Cannot connect: {}", e);
            return false;
        }
    };

    match engine.version().await {
        Ok(version) => {
            println!("[✓] Docker engine {} reachable", version);
            true
        }
        Err(e) => {
            println!("[✗] Docker engine NOT reachable: {}", e);
            false
        }
    }
}
