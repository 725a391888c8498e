//! First-run welcome banner.

use std::fs;
use std::path::Path;

use tracing::debug;

const BANNER: &str = r#"
  autopush - add, commit and push in one step

  Run `autopush` inside a repository to stage, commit and push.
  Run `autopush setup` to enable AI commit messages (OpenAI, Anthropic or Gemini).
  Run `autopush --help` for all options.
"#;

/// Print the banner unless `marker` exists, then create the marker.
///
/// Returns whether the banner was printed. Failing to write the marker only
/// means the banner shows again next time.
pub fn show_once(marker: &Path) -> bool {
    if marker.exists() {
        return false;
    }

    println!("{}", BANNER);

    if let Some(dir) = marker.parent()
        && let Err(e) = fs::create_dir_all(dir)
    {
        debug!("Could not create {}: {}", dir.display(), e);
        return true;
    }

    if let Err(e) = fs::write(marker, b"") {
        debug!("Could not write welcome marker {}: {}", marker.display(), e);
    }

    true
}
