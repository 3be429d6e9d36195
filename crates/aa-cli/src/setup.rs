use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_TEMPLATE: &str = r#"# article-assistant configuration
#
# Every setting is optional; the values below are the defaults.

# ── Article fetching ─────────────────────────────────────────────
[articles]
timeout_secs = 30                  # 0 disables the request timeout
# user_agent = "article-assistant/0.1.0"

# API hosts, e.g. to go through a mirror
[articles.endpoints]
qiita = "https://qiita.com"
zenn = "https://zenn.dev"
note = "https://note.com"

# ── Agent ────────────────────────────────────────────────────────
[agent]
model = "gemini-2.5-flash-preview-04-17"

[agent.memory]
storage = "~/.config/article-assistant/memory.db"
last_messages = 10
semantic_recall = false
generate_title = false
"#;

/// Write the configuration template to `config_path`.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// backed up first.
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    }

    if config_path.exists() {
        if !force {
            println!("Config already exists: {}", config_path.display());
            println!("Run `aa setup --force` to replace it (the old file is backed up).");
            return Ok(());
        }
        backup_file(config_path)?;
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {}", config_path.display());

    println!("\nNext steps:");
    println!("  1. List platforms:    aa platforms");
    println!("  2. Fetch articles:    aa fetch --platform zenn --username <name>");

    Ok(())
}

/// Back up a file to <name>.toml.bak, or the first free <name>.toml.bak.N.
fn backup_file(path: &Path) -> Result<PathBuf> {
    let mut backup = path.with_extension("toml.bak");
    let mut n = 1;
    while backup.exists() {
        backup = path.with_extension(format!("toml.bak.{}", n));
        n += 1;
    }

    std::fs::rename(path, &backup)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
    println!("  Backed up to {}", backup.display());

    Ok(backup)
}
