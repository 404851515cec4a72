//! Binary entry point for the catmove hook.

fn main() {
    std::process::exit(catmove_hook::run());
}
