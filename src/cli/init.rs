use colored::Colorize;

use crate::error::Result;
use crate::settings::{save_settings, settings_file_exists, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings { data_dir: shellexpand_path(&dir) },
        None => Settings::default(),
    };

    let already_configured = settings_file_exists();
    std::fs::create_dir_all(&settings.data_dir)?;
    save_settings(&settings)?;

    if already_configured {
        println!("Updated data directory: {}", settings.data_dir);
    } else {
        println!("{} Perdiem initialized.", "✓".green());
        println!("Data directory: {}", settings.data_dir);
        println!("\nNext: `perdiem login <email>` then `perdiem trips add <title>`.");
    }
    Ok(())
}
