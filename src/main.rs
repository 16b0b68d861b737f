use std::process::ExitCode;

use strapi_codemods::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = cli::report::report(&err, &mut std::io::stderr());
            ExitCode::from(code as u8)
        }
    }
}
