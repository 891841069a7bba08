use crate::model::errors::{unexpected, MirrorResult};
use crate::Config;
use chrono::Local;
use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::{env, panic};
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format, FmtSpan};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter, fmt, Layer, Registry};

pub static LOG_FILE: &str = "drive-mirror.log";

pub fn init(config: &Config) -> MirrorResult<()> {
    if config.logs {
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|s| s.as_str().parse().ok())
            .unwrap_or(LevelFilter::DEBUG);

        fs::create_dir_all(&config.writeable_path)?;

        let file = tracing_appender::rolling::never(&config.writeable_path, LOG_FILE);
        let mut layers =
            vec![mirror_layer(fmt::Layer::new().with_writer(file).with_ansi(false), log_level)];

        if config.stdout_logs {
            let stdout = fmt::Layer::new().with_ansi(config.colored_logs);
            layers.push(mirror_layer(stdout, log_level));
        }

        tracing::subscriber::set_global_default(
            tracing_subscriber::Registry::default().with(layers),
        )
        .map_err(unexpected)?;
        panic_capture(config);
    }
    Ok(())
}

/// Spans open and close, filtered to this crate's own events at `level`.
fn mirror_layer<W>(
    layer: fmt::Layer<Registry, DefaultFields, Format, W>, level: LevelFilter,
) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    layer
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_target(true)
        .with_filter(level)
        .with_filter(filter::filter_fn(|metadata| metadata.target().starts_with("drive_mirror")))
        .boxed()
}

fn panic_capture(config: &Config) {
    let path = config.writeable_path.clone();
    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        tracing::error!("panic detected: {panic_info} {}", bt);
        eprintln!("panic detected and logged: {panic_info} {bt}");
        let timestamp = Local::now().format("%Y-%m-%d---%H-%M-%S");
        let file_name = format!("{path}/panic---{timestamp}.log");
        let content = format!("INFO: {panic_info}\nBT: {bt}");

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&file_name) {
            let _ = file.write_all(content.as_bytes());
        }
    }));
}
