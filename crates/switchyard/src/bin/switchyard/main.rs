use std::sync::Arc;

use switchyard::{Config, Runner, Sink};

fn init_logger() -> anyhow::Result<()> {
    alto_logger::init_alt_term_logger()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from(&[".env", ".env.dev"]);

    init_logger()?;

    let config = Config::load();
    let sink = Arc::new(Sink::new());
    config.apply(&sink)?;

    let runner = Runner::new(Arc::clone(&sink))?;
    let verdict = runner.run(std::env::args().skip(1));

    log::debug!("run finished: {}", verdict);
    std::process::exit(verdict.exit_code())
}
