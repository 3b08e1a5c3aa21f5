//! bridgetroll main entrypoint.

use bridgetroll::run;
use bridgetroll::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
