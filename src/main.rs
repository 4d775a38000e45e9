#[tokio::main]
async fn main() -> anyhow::Result<()> {
    issues2markdown::logging::init_logging();
    let args: Vec<String> = std::env::args().collect();
    issues2markdown::run::run(args, None).await
}
