use csv_uploader::app::CsvUploader;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
    {
        eprintln!("failed to initialize logger: {}", e);
    }
}

fn main() -> eframe::Result<()> {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([400.0, 440.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "CSV File Uploader",
        options,
        Box::new(|cc| Box::new(CsvUploader::new(cc))),
    )
}
