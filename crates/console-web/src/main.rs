//! Browser entry point for the admin console

fn main() {
    console_web::start();
}
