use std::process::ExitCode;

fn main() -> ExitCode {
    returnly_cli::run()
}
