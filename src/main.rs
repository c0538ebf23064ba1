use std::process::ExitCode;

fn main() -> ExitCode {
    cv_mods_lib::run()
}
