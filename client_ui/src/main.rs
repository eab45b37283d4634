mod api;
mod app;
mod apps;
mod formatting;
mod reviews;
mod storage;

use app::App;

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Debug).expect("can't initialize logger");
    sycamore::render(App);
}
