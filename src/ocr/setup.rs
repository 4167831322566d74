use anyhow::{anyhow, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::AppConfig;
use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Standard install locations of the UB-Mannheim Windows build.
const WINDOWS_INSTALL_DIRS: [&str; 2] = [
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];

#[derive(Clone, Debug)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    /// `None` means the engine's built-in tessdata already has `eng`.
    pub tessdata: Option<PathBuf>,
}

/// Returns the directory for downloaded language data.
pub fn get_local_tessdata_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tft-augments-helper")
        .join("tessdata")
}

/// Locates Tesseract and English language data, downloading the latter
/// when nothing usable is installed.
pub fn ensure_tesseract(config: &AppConfig) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable(config.tesseract_path.as_deref())?;
    log(&format!("Tesseract executable: {}", executable.display()));

    if let Some(tessdata) = find_tessdata_dir(config.tessdata_dir.as_deref()) {
        log(&format!("Tesseract data: {}", tessdata.display()));
        return Ok(TesseractPaths {
            executable,
            tessdata: Some(tessdata),
        });
    }

    if builtin_has_english(&executable) {
        log("Using Tesseract's built-in English data");
        return Ok(TesseractPaths {
            executable,
            tessdata: None,
        });
    }

    log("English language data not found, downloading...");
    let local = get_local_tessdata_dir();
    fs::create_dir_all(&local)?;
    download_tessdata(&local)?;

    Ok(TesseractPaths {
        executable,
        tessdata: Some(local),
    })
}

/// Finds the Tesseract executable: configured path, then PATH, then the
/// standard Windows install directories.
pub fn find_tesseract_executable(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        log(&format!(
            "Configured tesseract_path {} does not exist, searching",
            path.display()
        ));
    }

    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    for dir in &WINDOWS_INSTALL_DIRS {
        let p = PathBuf::from(dir).join("tesseract.exe");
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR or set tesseract_path in config.json"
    ))
}

/// Finds a directory holding `eng.traineddata`.
pub fn find_tessdata_dir(configured: Option<&Path>) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = configured {
        candidates.push(path.to_path_buf());
    }
    candidates.push(get_local_tessdata_dir());
    for dir in &WINDOWS_INSTALL_DIRS {
        candidates.push(PathBuf::from(dir).join("tessdata"));
    }
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        candidates.push(PathBuf::from(&prefix));
        candidates.push(PathBuf::from(&prefix).join("tessdata"));
    }

    candidates
        .into_iter()
        .find(|dir| has_english(dir))
}

fn has_english(dir: &Path) -> bool {
    dir.join("eng.traineddata").exists()
}

/// Asks the engine which languages it ships with.
fn builtin_has_english(executable: &Path) -> bool {
    match Command::new(executable).arg("--list-langs").output() {
        Ok(output) if output.status.success() => {
            // Some builds print the list on stderr
            let listing = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            listing.lines().any(|line| line.trim() == "eng")
        }
        _ => false,
    }
}

/// Downloads English trained data into `tessdata_dir`.
fn download_tessdata(tessdata_dir: &Path) -> Result<()> {
    let eng_url = format!("{}/eng.traineddata", TESSDATA_REPO);
    let eng_path = tessdata_dir.join("eng.traineddata");

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&eng_url)
        .header("User-Agent", "tft-augments-helper")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download eng.traineddata: HTTP {}",
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(&eng_path)?;
    file.write_all(&bytes)?;

    log(&format!(
        "Downloaded eng.traineddata ({} bytes)",
        bytes.len()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_executable_wins() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("tesseract.exe");
        fs::write(&exe, b"").unwrap();

        assert_eq!(find_tesseract_executable(Some(&exe)).unwrap(), exe);
    }

    #[test]
    fn test_configured_tessdata_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_ne!(find_tessdata_dir(Some(dir.path())), Some(dir.path().to_path_buf()));

        fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        assert_eq!(find_tessdata_dir(Some(dir.path())), Some(dir.path().to_path_buf()));
    }
}
