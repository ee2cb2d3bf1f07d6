fn main() {
    if let Err(err) = tracklist_split::run() {
        eprintln!("error: {}", err);
        if err.wants_usage_hint() {
            eprintln!("run with --help for usage");
        }
        std::process::exit(1);
    }
}
