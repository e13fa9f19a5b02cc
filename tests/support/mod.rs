//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A small marketplace: two game developers, an artist, a web3 engineer
/// and a copywriter who matches nothing technical.
pub const PROFILES: &str = r#"{
    "f1": {
        "name": "Alice Chen",
        "profession": "Game Developer",
        "skills": {"unity": 5, "c#": 4},
        "reviews": {},
        "hourly_rate": 80,
        "email": "alice@example.com"
    },
    "f2": {
        "name": "Bruno Silva",
        "profession": "3D Artist",
        "skills": {"blender": 5, "3d modeling": 4},
        "reviews": {
            "Acme Studios": {"blender": ["Beautiful assets"]}
        }
    },
    "f3": {
        "name": "Chidi Okafor",
        "profession": "Copywriter",
        "skills": {"copywriting": 5},
        "reviews": {}
    },
    "f4": {
        "name": "Dana Kim",
        "profession": "Full-stack Developer",
        "skills": {"unity": 2, "solidity": 4, "react": 4},
        "reviews": {}
    }
}"#;

pub const TRANSACTIONS: &str = r#"{
    "tx-100": {"freelancers": ["f1", "f2"], "skills": ["unity", "blender"]},
    "tx-200": {"freelancers": ["f3"], "skills": ["unity"]},
    "tx-300": {"freelancers": ["f1", "ghost"], "skills": ["unity"]}
}"#;

/// Write the fixture documents into a fresh temp directory.
pub fn marketplace() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let profiles = write(temp_dir.path(), "freelancers.json", PROFILES);
    let transactions = write(temp_dir.path(), "transactions.json", TRANSACTIONS);
    (temp_dir, profiles, transactions)
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}
