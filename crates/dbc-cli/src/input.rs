//! Account file loading
//!
//! Accepts raw account bytes, base64 text, or the JSON written by
//! `solana account <ADDRESS> --output json`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dbc_core::AccountKind;
use serde::Deserialize;
use solana_program::pubkey::Pubkey;

/// Account bytes plus whatever metadata the file carried
#[derive(Debug, Clone, PartialEq)]
pub struct AccountFile {
    pub data: Vec<u8>,
    pub address: Option<Pubkey>,
    pub owner: Option<Pubkey>,
}

#[derive(Deserialize)]
struct AccountDump {
    pubkey: Option<String>,
    account: DumpedAccount,
}

#[derive(Deserialize)]
struct DumpedAccount {
    data: (String, String),
    owner: String,
}

/// Read and decode an account file
pub fn load_account_file(path: &Path) -> Result<AccountFile> {
    let contents = fs::read(path).with_context(|| format!("Failed to read account file {}", path.display()))?;
    parse_account_bytes(&contents).with_context(|| format!("Unrecognised account file {}", path.display()))
}

/// Detect the file format and extract the account bytes
pub fn parse_account_bytes(contents: &[u8]) -> Result<AccountFile> {
    if AccountKind::from_discriminator(contents).is_some() {
        log::debug!("Reading {} raw account bytes", contents.len());
        return Ok(raw(contents));
    }

    let text = match std::str::from_utf8(contents) {
        Ok(text) => text.trim(),
        Err(_) => {
            log::debug!("Binary file without a known discriminator, reading as raw bytes");
            return Ok(raw(contents));
        }
    };

    if text.starts_with('{') {
        log::debug!("Reading JSON account dump");
        return parse_account_dump(text);
    }

    if !is_base64_text(text) {
        log::debug!("Text without a known discriminator is not base64, reading as raw bytes");
        return Ok(raw(contents));
    }

    log::debug!("Reading base64 account data");
    let data = STANDARD.decode(text).context("Invalid base64 account data")?;
    Ok(AccountFile {
        data,
        address: None,
        owner: None,
    })
}

/// Warn when the file says the account belongs to another program
pub fn check_owner(file: &AccountFile, program_id: &Pubkey) {
    if let Some(owner) = file.owner {
        if owner != *program_id {
            log::warn!("Account owner {} differs from configured program {}", owner, program_id);
        }
    }
}

fn is_base64_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'/' | b'='))
}

fn raw(contents: &[u8]) -> AccountFile {
    AccountFile {
        data: contents.to_vec(),
        address: None,
        owner: None,
    }
}

fn parse_account_dump(text: &str) -> Result<AccountFile> {
    let dump: AccountDump = serde_json::from_str(text).context("Invalid account JSON")?;
    let (encoded, encoding) = dump.account.data;
    if encoding != "base64" {
        bail!("Unsupported account data encoding '{}', expected base64", encoding);
    }

    let data = STANDARD.decode(encoded.trim()).context("Invalid base64 in account JSON")?;
    let owner = Pubkey::from_str(&dump.account.owner).context("Invalid owner in account JSON")?;
    let address = dump
        .pubkey
        .as_deref()
        .map(Pubkey::from_str)
        .transpose()
        .context("Invalid pubkey in account JSON")?;

    Ok(AccountFile {
        data,
        address,
        owner: Some(owner),
    })
}
