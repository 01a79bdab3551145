//! rSeizureLog main entrypoint.

use rseizurelog::run;
use rseizurelog::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
