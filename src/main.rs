use clap::Parser;
use env_logger::Env;

mod config;
mod env;
mod focus;
mod ui;
mod util;

use config::InputConfig;

#[derive(Parser, Debug)]
#[command(
    name = "Ore Launcher",
    author,
    version,
    about = "Game launcher shell driven by pointer, keyboard or controller"
)]
struct Cli {
    /// Print launcher version and exit without starting the UI.
    #[arg(long)]
    version_only: bool,
    /// Log focus and input decisions at debug level.
    #[arg(long)]
    debug_focus: bool,
    /// Stick dead zone, overriding input.json (0.05 - 0.95).
    #[arg(long)]
    dead_zone: Option<f32>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.debug_focus {
        "info,ore_launcher=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if cli.version_only {
        println!("Ore Launcher {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = InputConfig::load(&env::input_config_path()).with_dead_zone(cli.dead_zone);
    log::info!(
        "config: dead zone {:.2}, notice {}s",
        config.dead_zone,
        config.notice_seconds
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_icon(default_icon())
            .with_inner_size(eframe::egui::vec2(1180.0, 720.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Ore Launcher",
        options,
        Box::new(move |cc| Ok(Box::new(ui::LauncherApp::new(cc, config)))),
    )
}

fn default_icon() -> eframe::egui::IconData {
    // 2x2 icon: dark stone with a green ore fleck.
    let rgba: Vec<u8> = vec![
        30, 30, 31, 255, 56, 133, 39, 255, //
        30, 30, 31, 255, 42, 42, 44, 255,
    ];
    eframe::egui::IconData {
        rgba,
        width: 2,
        height: 2,
    }
}
