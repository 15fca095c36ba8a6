//! Upload identity helpers
//!
//! Email validation, file-name sanitising, content hashing and project
//! numbering for submitted mixes.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hex characters kept from the content digest
pub const FILE_HASH_LEN: usize = 10;

/// Longest sanitised file-name component
pub const SAFE_FILENAME_MAX: usize = 64;

const PROJECT_MARKER: &str = "__project_";

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_address_char(c: char) -> bool {
    is_word_char(c) || c == '.' || c == '-'
}

/// Check an address has the shape `local@domain.tld`
///
/// Local part and domain may use word characters, `.` and `-`; the final
/// label after the last dot must be word characters only.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_address_char) {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && host.chars().all(is_address_char)
                && !tld.is_empty()
                && tld.chars().all(is_word_char)
        }
        None => false,
    }
}

/// Replace everything outside `[A-Za-z0-9_.-]` with `_` and cap the length
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(SAFE_FILENAME_MAX)
        .collect()
}

/// Short content hash used to recognise re-uploads of the same file
pub fn file_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = format!("{:x}", digest);
    hex.truncate(FILE_HASH_LEN);
    hex
}

/// Project number embedded in a stored file name (`..__project_<n>...`)
pub fn project_number(filename: &str) -> Option<u32> {
    filename.match_indices(PROJECT_MARKER).find_map(|(start, _)| {
        let rest = &filename[start + PROJECT_MARKER.len()..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    })
}

/// Name a stored upload: `<local-part>__project_<n>_<8 hex><.ext>`
///
/// Anonymous uploads use `anon` as the local part.
pub fn project_filename(email: Option<&str>, number: u32, extension: &str) -> String {
    let owner = match email {
        Some(email) if !email.is_empty() => {
            safe_filename(email.split('@').next().unwrap_or_default())
        }
        _ => "anon".to_string(),
    };

    let unique = Uuid::new_v4().simple().to_string();
    let extension = extension.trim_start_matches('.').to_lowercase();
    let suffix = if extension.is_empty() {
        String::new()
    } else {
        format!(".{}", extension)
    };

    format!(
        "{}{}{}_{}{}",
        owner,
        PROJECT_MARKER,
        number,
        &unique[..8],
        suffix
    )
}
