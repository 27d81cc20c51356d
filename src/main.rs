mod app;

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match app::run() {
        Ok(code) => code,
        Err(err) => {
            println!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
