mod platform;

fn main() -> anyhow::Result<()> {
    let config = platform::config::AppConfig::from_env()?;
    platform::logging::initialize(config.log_destination);
    platform::run_app(config)
}
