/// SS3D Terminal Demo - Shooting Star
///
/// Renders a rotating five-pointed star bipyramid over a streaking star
/// field in the terminal.
/// Controls:
///   - Q/ESC: Quit

use env_logger::Env;
use log::info;
use ss3d_core::{scene, RenderConfig, RenderResult};
use ss3d_terminal::TerminalApp;

const DEFAULT_LOGGING_LEVEL: &str = "info";

fn main() -> RenderResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();

    let config = RenderConfig::default();
    let star = scene::star_mesh(config.world_scale);
    info!(
        "starting renderer: {}x{} grid, {} triangles, {} stars",
        config.width,
        config.height,
        star.len(),
        config.stars.count
    );

    let mut app = TerminalApp::new(config, star)?;
    app.run()?;

    info!("shutdown complete");
    Ok(())
}
