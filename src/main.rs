#[tokio::main]
async fn main() {
    if let Err(e) = conference_backend::run().await {
        eprintln!("conference-backend failed to start: {}", e);
        std::process::exit(1);
    }
}
