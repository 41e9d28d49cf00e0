use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// `.graphql` files under `dir`, sorted by name.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read schema directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "graphql"))
        .collect();
    files.sort();
    Ok(files)
}

/// Schema text from a single file, or all files of a directory joined.
pub fn read_schema_sources(path: &Path) -> Result<String> {
    let files = if path.is_dir() {
        schema_files(path)?
    } else {
        vec![path.to_path_buf()]
    };
    if files.is_empty() {
        bail!("No .graphql files in {}", path.display());
    }

    let mut content = String::new();
    for file in files {
        let text = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read schema: {}", file.display()))?;
        content.push_str(&text);
        content.push('\n');
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_sources_are_joined_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.graphql"), "type B { x: Int }").unwrap();
        fs::write(dir.path().join("a.graphql"), "type A { x: Int }").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let content = read_schema_sources(dir.path()).unwrap();
        assert_eq!(content, "type A { x: Int }\ntype B { x: Int }\n");
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_schema_sources(dir.path()).is_err());
    }
}
