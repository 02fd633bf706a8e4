//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tidylist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("tidylist_core ping={}", tidylist_core::ping());
    println!("tidylist_core version={}", tidylist_core::core_version());
}
