#[tokio::main]
async fn main() {
    if let Err(e) = paperprecision::run().await {
        eprintln!("{}: {}", paperprecision::APP_NAME, e);
        std::process::exit(1);
    }
}
