use std::process::ExitCode;

fn main() -> ExitCode {
    match recovery_companion::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("recovery-companion: {e}");
            ExitCode::FAILURE
        }
    }
}
