//
//  artifactory-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration file I/O.
//!
//! Thin wrappers over `std::fs` that attach the offending path to errors.
//! Writes create missing parent directories and restrict the file to the
//! owner on Unix, since the file may hold credentials.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file into a string.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let context = || format!("Failed to write config file {}", path.display());

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        // Created owner-only; an existing file is narrowed before any byte lands.
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(context)?;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
        file.write_all(content.as_bytes()).with_context(context)?;
    }

    #[cfg(not(unix))]
    std::fs::write(path, content).with_context(context)?;

    Ok(())
}

/// Returns whether a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
