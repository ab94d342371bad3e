use dioxus::LaunchBuilder;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use inmo_portal::backend::auth::Session;
use inmo_portal::backend::routing::RouteTable;
use inmo_portal::backend::utils::AppConfig;
use inmo_portal::frontend::app::App;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn main() -> anyhow::Result<()> {
    // Logging setup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let rt = match RUNTIME.get() {
        Some(rt) => rt,
        None => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            RUNTIME.get_or_init(|| rt)
        }
    };

    let config = rt.block_on(AppConfig::load())?;
    if let Err(e) = config.backend.validate() {
        log::warn!("Backend is not configured, running offline: {e}");
    } else {
        log::info!("Using backend project {}", config.backend.project_id);
    }

    let table = RouteTable::standard()?;
    let session = Session::new(Some(config.session_path()?))
        .with_providers(config.auth_providers.iter().copied());

    // Restore the previous session in the background; protected pages wait for it
    {
        let session = session.clone();
        rt.spawn(async move {
            let status = session.restore().await;
            log::info!("Session restored as {status}");
        });
    }

    let size = LogicalSize::new(1280.0, 832.0);
    let window = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title("Inmo Portal")
                .with_inner_size(size)
                .with_min_inner_size(size),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(window)
        .with_context(session)
        .with_context(table)
        .launch(App);

    Ok(())
}
