//! Detail link validation

use anyhow::Result;
use service_status_core::link::{strip_dangerous_protocols, validate_internal_path};

/// Check a link target and report what the block would render.
pub fn run_check_link(target: &str) -> Result<()> {
    match validate_internal_path(target) {
        Ok(()) => {
            println!("✅ {} is a valid internal link", target);
            println!("  Rendered as: {}", strip_dangerous_protocols(target));
            Ok(())
        }
        Err(err) => {
            println!("❌ {}", err);
            println!("  Rendered as: #");
            anyhow::bail!("Invalid link target")
        }
    }
}
