use std::sync::Once;

static INIT: Once = Once::new();

/// Installs `env_logger` as the global backend, once per process.
///
/// `filter` uses the `env_logger` syntax ("info", "kestrel_engine=debug,winit=warn").
/// Without one, `RUST_LOG` applies, then `info`. Returns `true` only for the
/// call that installed the logger; a backend set up elsewhere is kept.
pub fn init_logging(filter: Option<&str>) -> bool {
    let mut installed = false;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match filter.map(str::to_owned).or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(spec) => builder.parse_filters(&spec),
            None => builder.filter_level(log::LevelFilter::Info),
        };

        installed = builder.try_init().is_ok();
        log::debug!("logging initialized (installed: {installed})");
    });

    installed
}
