fn main() {
    if let Err(error) = caseflow_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
