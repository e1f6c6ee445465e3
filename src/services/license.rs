//! License file verification
//!
//! Deployments are gated by a `license.json` next to the working directory or
//! the executable, carrying an expiry date and a CRC32 signature over
//! `expiry|message|secret`. The license stays valid through its expiry day.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SECRET: &str = "AttTui-2026-License-Key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Valid,
    Missing,
    Invalid,
    Expired,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub footer: String,
}

/// Signature for the given payload fields
pub fn sign(expiry: &str, message: &str) -> String {
    let payload = format!("{}|{}|{}", expiry, message, SECRET);
    format!("{:08x}", crc32fast::hash(payload.as_bytes()))
}

impl License {
    /// A correctly signed license, used by the issuing tool and tests
    pub fn issued(expiry: &str, message: &str) -> Self {
        Self {
            expiry: expiry.to_string(),
            message: message.to_string(),
            signature: sign(expiry, message),
            ..Default::default()
        }
    }

    fn verify(&self) -> bool {
        self.signature == sign(&self.expiry, &self.message)
    }
}

/// `license.json` in the working directory, else next to the executable
pub fn resolve_path() -> PathBuf {
    let local = PathBuf::from("license.json");
    if local.is_file() {
        return local;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|d| d.join("license.json")))
        .unwrap_or(local)
}

/// Validate the license file at `path` against `today`
pub fn check_file(path: &Path, today: NaiveDate) -> (LicenseStatus, String) {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(_) => {
            return (
                LicenseStatus::Missing,
                "No license found. Run the issuing tool to generate license.json.".to_string(),
            )
        }
    };
    // Tolerate a UTF-8 BOM; the issuing tool on Windows writes one
    let data: &[u8] = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);

    let license: License = match serde_json::from_slice(data) {
        Ok(l) => l,
        Err(_) => return (LicenseStatus::Invalid, "License file is malformed.".to_string()),
    };
    if !license.verify() {
        return (LicenseStatus::Invalid, "License signature check failed.".to_string());
    }
    if license.expiry.is_empty() {
        return (LicenseStatus::Invalid, "License is missing an expiry date.".to_string());
    }
    let expiry = match NaiveDate::parse_from_str(&license.expiry, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            return (
                LicenseStatus::Invalid,
                "License expiry must be YYYY-MM-DD.".to_string(),
            )
        }
    };
    if today > expiry {
        let msg = if license.message.is_empty() {
            "License has expired; contact your administrator.".to_string()
        } else {
            license.message
        };
        return (LicenseStatus::Expired, msg);
    }
    (LicenseStatus::Valid, String::new())
}

/// Validate the deployment license against the local date
pub fn check() -> (LicenseStatus, String) {
    check_file(&resolve_path(), Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn write_license(dir: &Path, license: &License) -> PathBuf {
        let path = dir.join("license.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(license).unwrap().as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn test_valid_license_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_license(dir.path(), &License::issued("2026-12-31", ""));
        let (status, msg) = check_file(&path, today());
        assert_eq!(status, LicenseStatus::Valid);
        assert!(msg.is_empty());
    }

    #[test]
    fn test_valid_through_expiry_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_license(dir.path(), &License::issued("2026-08-06", ""));
        assert_eq!(check_file(&path, today()).0, LicenseStatus::Valid);
        let tomorrow = today().succ_opt().unwrap();
        assert_eq!(check_file(&path, tomorrow).0, LicenseStatus::Expired);
    }

    #[test]
    fn test_expired_uses_embedded_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_license(dir.path(), &License::issued("2025-01-01", "Renew with HQ"));
        let (status, msg) = check_file(&path, today());
        assert_eq!(status, LicenseStatus::Expired);
        assert_eq!(msg, "Renew with HQ");
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut license = License::issued("2026-12-31", "");
        license.expiry = "2030-12-31".to_string();
        let path = write_license(dir.path(), &license);
        assert_eq!(check_file(&path, today()).0, LicenseStatus::Invalid);
    }

    #[test]
    fn test_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("license.json");
        assert_eq!(check_file(&missing, today()).0, LicenseStatus::Missing);

        std::fs::write(&missing, "not json").unwrap();
        assert_eq!(check_file(&missing, today()).0, LicenseStatus::Invalid);
    }

    #[test]
    fn test_bom_prefix_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("license.json");
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend(serde_json::to_string(&License::issued("2026-12-31", "")).unwrap().bytes());
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(check_file(&path, today()).0, LicenseStatus::Valid);
    }
}
