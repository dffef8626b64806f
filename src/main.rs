fn main() {
    if let Err(e) = chemcalc::adapters::run() {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
