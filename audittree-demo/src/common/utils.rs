use log::Level;

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

/// Level at which tree events are logged: `info` when proofs should be
/// traced, `trace` otherwise so they stay hidden at the default filter.
pub fn observer_level(verbose_proofs: bool) -> Level {
    if verbose_proofs {
        Level::Info
    } else {
        Level::Trace
    }
}
