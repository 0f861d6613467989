#![forbid(unsafe_code)]

fn main() {
    match hero_demo::run_from_env() {
        Ok(summary) => println!("{summary}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(error.exit_code());
        }
    }
}
