//! INF line scanner and classifier
//!
//! [`LineScanner`] exposes a lazy sequence of raw lines from the INF file.
//! [`LineClassifier`] turns a single line into a tagged [`InfLine`] with all
//! capture groups bound to payload fields, so no match state leaks between
//! lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::InfError;

/// A single classified INF line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfLine {
    /// Start of the Windows 10 driver section
    BlockStart,
    /// Start of the next OS-version section, ends the driver block
    BlockEnd,
    /// Device declaration: `%<stringKey>%=<prefix><deviceKey>, USB\VID_xxxx&PID_xxxx ; comment`
    Declaration {
        string_key: String,
        device_key: String,
        vendor_id: u16,
        product_id: u16,
        comment: String,
    },
    /// Copy-list section header carrying a device key
    CopyListHeader { device_key: String },
    /// Firmware filename line inside a copy-list section
    FirmwareFile { filename: String },
    /// Description-string assignment: `<stringKey>.DeviceDesc="text"`
    Description { string_key: String, text: String },
    /// Anything else
    Unrecognized,
}

/// Compiled line patterns for the vendor INF
///
/// Two historical declaration prefixes exist (`Blue<key>` and a bare
/// `RAMUSB` token) and the block markers vary in architecture token across
/// INF revisions; both forms are accepted.
pub struct LineClassifier {
    block_start: Regex,
    block_end: Regex,
    declaration: Regex,
    copy_list: Regex,
    firmware: Regex,
    description: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            block_start: Regex::new(r"^\[Broadcom\.NT\w+\.10\.0\]").expect("invalid pattern"),
            block_end: Regex::new(r"^\[Broadcom\.NT\w+\.6\.3\]").expect("invalid pattern"),
            declaration: Regex::new(
                r#"^%([\w.]+)%=(?:Blue(\w+)|(RAMUSB\w+)),\s*USB\\VID_([0-9A-Fa-f]{4})&PID_([0-9A-Fa-f]{4})\s*;\s*(.*?)\s*$"#,
            )
            .expect("invalid pattern"),
            copy_list: Regex::new(r"(?i)^\[(RAMUSB[0-9A-F]{4})\.CopyList\]")
                .expect("invalid pattern"),
            firmware: Regex::new(r"^(BCM.*\.hex)").expect("invalid pattern"),
            description: Regex::new(r#"(?i)^([\w.]*\.DeviceDesc)\s*=\s*"(.*)""#)
                .expect("invalid pattern"),
        }
    }

    /// Classify one line of INF text (line terminators already stripped)
    pub fn classify(&self, line: &str) -> InfLine {
        if self.block_start.is_match(line) {
            return InfLine::BlockStart;
        }
        if self.block_end.is_match(line) {
            return InfLine::BlockEnd;
        }
        if let Some(caps) = self.declaration.captures(line) {
            // VID/PID are guaranteed 4 hex digits by the pattern
            let vendor_id = u16::from_str_radix(&caps[4], 16).expect("4 hex digits");
            let product_id = u16::from_str_radix(&caps[5], 16).expect("4 hex digits");
            let device_key = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .expect("one prefix alternative matched");
            return InfLine::Declaration {
                string_key: caps[1].to_string(),
                device_key,
                vendor_id,
                product_id,
                comment: caps[6].to_string(),
            };
        }
        if let Some(caps) = self.copy_list.captures(line) {
            return InfLine::CopyListHeader {
                device_key: caps[1].to_string(),
            };
        }
        if let Some(caps) = self.firmware.captures(line) {
            return InfLine::FirmwareFile {
                filename: caps[1].to_string(),
            };
        }
        if let Some(caps) = self.description.captures(line) {
            return InfLine::Description {
                string_key: caps[1].to_string(),
                text: caps[2].to_string(),
            };
        }
        InfLine::Unrecognized
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy line iterator over the INF file
///
/// Yields lines in file order with terminators stripped. Vendor INFs are
/// CRLF-terminated and occasionally not valid UTF-8 in comment text, so
/// lines are decoded lossily.
#[derive(Debug)]
pub struct LineScanner {
    reader: BufReader<File>,
    path: PathBuf,
}

impl LineScanner {
    /// Open the INF file for scanning
    ///
    /// Fails with [`InfError::NotFound`] if the file does not exist; this is
    /// a fatal, user-visible error with no retry.
    pub fn open(path: &Path) -> Result<Self, InfError> {
        if !path.exists() {
            return Err(InfError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| InfError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(Self {
            reader: BufReader::new(file),
            path: path.to_path_buf(),
        })
    }
}

impl Iterator for LineScanner {
    type Item = Result<String, InfError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut line = String::from_utf8_lossy(&buf).into_owned();
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(InfError::Read {
                path: self.path.clone(),
                error: e.to_string(),
            })),
        }
    }
}
