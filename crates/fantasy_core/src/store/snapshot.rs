//! On-disk league snapshots: MessagePack, LZ4, then a SHA-256 trailer.

use super::data::LeagueData;
use super::SNAPSHOT_VERSION;
use crate::error::StoreError;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use std::fs::{self, rename, File};
use std::io::Write;
use std::path::Path;

const CHECKSUM_LEN: usize = 32;

pub fn serialize_and_compress(data: &LeagueData) -> Result<Vec<u8>, StoreError> {
    data.validate()?;

    // 1. MessagePack with field names
    let msgpack = to_vec_named(data)?;

    // 2. LZ4, size prepended
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA-256 trailer
    let checksum = Sha256::digest(&compressed);

    let mut bytes = compressed;
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<LeagueData, StoreError> {
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(StoreError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;
    let data: LeagueData = from_slice(&msgpack)?;

    if data.version > SNAPSHOT_VERSION {
        return Err(StoreError::VersionMismatch { found: data.version, expected: SNAPSHOT_VERSION });
    }

    data.validate()?;
    Ok(data)
}

/// Bring an older snapshot up to the current version.
pub fn migrate(mut data: LeagueData) -> Result<LeagueData, StoreError> {
    let original = data.version;

    data = match data.version {
        0 => migrate_v0_to_v1(data),
        SNAPSHOT_VERSION => data,
        found => {
            return Err(StoreError::VersionMismatch { found, expected: SNAPSHOT_VERSION });
        }
    };
    data.version = SNAPSHOT_VERSION;

    if original != SNAPSHOT_VERSION {
        log::info!("Migrated league snapshot from version {} to {}", original, SNAPSHOT_VERSION);
    }
    Ok(data)
}

/// v0 snapshots predate per-roster chips; copy the chip from each manager's
/// activation history onto the roster of that gameweek.
fn migrate_v0_to_v1(mut data: LeagueData) -> LeagueData {
    for (manager_id, by_gameweek) in data.rosters.iter_mut() {
        let Some(chips) = data.chips.get(manager_id) else {
            continue;
        };
        for (gameweek, roster) in by_gameweek.iter_mut() {
            if roster.chip.is_none() {
                roster.chip = chips.chip_for(*gameweek);
            }
        }
    }
    data
}

/// Write-temp, fsync, rename. Readers never observe a partial file.
pub fn write_snapshot(path: &Path, data: &LeagueData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let bytes = serialize_and_compress(data)?;
    let temp_path = path.with_extension("tmp");

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        file.sync_all()?;
    }

    rename(&temp_path, path)?;

    log::debug!("Saved {} bytes to {:?}", bytes.len(), path);
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<LeagueData, StoreError> {
    let bytes = fs::read(path)?;
    let data = migrate(decompress_and_deserialize(&bytes)?)?;
    log::debug!("Loaded {} bytes from {:?}", bytes.len(), path);
    Ok(data)
}
