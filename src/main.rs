mod cli;
mod formatters;

fn main() {
    match cli::run() {
        Ok(status) => std::process::exit(status),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
