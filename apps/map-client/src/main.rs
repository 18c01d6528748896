#[tokio::main]
async fn main() {
    if let Err(err) = map_client::server::run().await {
        tracing::error!(?err, "server exited with error");
        std::process::exit(1);
    }
}
