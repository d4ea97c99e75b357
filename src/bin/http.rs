#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use log::info;
    use shift_timeline::{ResourceGrid, TimelineConfig, http_api, load_resources_from_json, logging};

    logging::init_from_env()?;

    let addr: SocketAddr = std::env::var("SHIFT_TIMELINE_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("SHIFT_TIMELINE_CONFIG") {
        Ok(path) => TimelineConfig::from_json_file(path)?,
        Err(_) => TimelineConfig::default(),
    };
    let today = chrono::Local::now().date_naive();
    let mut grid = ResourceGrid::new(today, config);
    if let Ok(path) = std::env::var("SHIFT_TIMELINE_RESOURCES") {
        let resources = load_resources_from_json(path, grid.config())?;
        grid.replace_resources(resources);
    }

    info!("shift-timeline HTTP API listening on http://{addr}");
    http_api::serve(addr, grid).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
