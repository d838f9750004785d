fn main() {
    if let Err(e) = lookloader_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
