mod app;
mod scene;

use app::{App, AppError};

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), AppError> {
    let app = App::new()?;
    app.run()
}
