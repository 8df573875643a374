fn main() {
    if let Err(e) = video_grabber_lib::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
