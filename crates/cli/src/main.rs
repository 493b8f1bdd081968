fn main() {
    if let Err(e) = scriptscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
