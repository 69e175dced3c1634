//! CLI progress display utilities
//!
//! Step indicators for single-file conversion and a progress bar for
//! batch runs.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::convert::ConvertPhase;

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Link - for reference resolution
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
/// Package - for container packaging
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Truck - for batch operations
pub static TRUCK: Emoji<'_, '_> = Emoji("🚚 ", "");

/// Emoji shown next to a conversion phase.
#[must_use]
pub fn phase_emoji(phase: ConvertPhase) -> Emoji<'static, 'static> {
    match phase {
        ConvertPhase::ReadingFile => LOOKING_GLASS,
        ConvertPhase::Normalizing => LINK,
        ConvertPhase::Packaging => PACKAGE,
        ConvertPhase::WritingOutput => DISK,
        ConvertPhase::Complete => SPARKLE,
    }
}

/// Print a step indicator: `[1/4] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar for batch conversion
///
/// Format: `scene.json [████████░░░░░░░░] 5/10 (50%)`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn batch_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .expect("valid template")
            .progress_chars("##-"),
    );
    pb
}
