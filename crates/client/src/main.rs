//! Citegen - composition root binary.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citegen=info,citegen_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = citegen_client::cli::Cli::parse();
    let platform = citegen_client::create_platform();

    let mut stdout = std::io::stdout().lock();
    match citegen_client::cli::run(cli, platform, &mut stdout) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting citation generator");

    let platform = citegen_client::create_platform();

    dioxus::LaunchBuilder::new()
        .with_context(platform)
        .launch(citegen_client::ui::app);
}
