pub fn setup_logger(config: &super::config::Config) {
    env_logger::Builder::from_default_env()
        .filter_level(level_filter(&config.log_level))
        .init();
}

fn level_filter(level: &str) -> log::LevelFilter {
    match level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_disable_logging() {
        assert_eq!(level_filter("info"), log::LevelFilter::Info);
        assert_eq!(level_filter("trace"), log::LevelFilter::Off);
    }
}
