mod config;
mod playback;
mod playlist;
mod runtime;
mod ui;

fn main() {
    if let Err(err) = runtime::run() {
        eprintln!("rondo: {err}");
        std::process::exit(1);
    }
}
