fn main() {
    if let Err(err) = jobtrack_lib::run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
