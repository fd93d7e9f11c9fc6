use medicare_lib::config::ServerConfig;

#[tokio::main]
async fn main() {
    medicare_lib::init_tracing();

    if let Err(e) = medicare_lib::run(ServerConfig::from_env()).await {
        tracing::error!("Medicare Nepal stopped: {e}");
        std::process::exit(1);
    }
}
