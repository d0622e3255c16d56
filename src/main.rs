fn main() {
    if let Err(e) = game_reviews_lib::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
