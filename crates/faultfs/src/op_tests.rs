// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    stat      = { Op::Stat, "Stat" },
    open      = { Op::Open, "Open" },
    read      = { Op::Read, "Read" },
    write     = { Op::Write, "Write" },
    close     = { Op::Close, "Close" },
    seek      = { Op::Seek, "Seek" },
    read_dir  = { Op::ReadDir, "ReadDir" },
    mkdir     = { Op::Mkdir, "Mkdir" },
    mkdir_all = { Op::MkdirAll, "MkdirAll" },
    remove    = { Op::Remove, "Remove" },
    remove_all = { Op::RemoveAll, "RemoveAll" },
    rename    = { Op::Rename, "Rename" },
)]
fn display_uses_canonical_name(op: Op, name: &str) {
    assert_eq!(op.to_string(), name);
}

#[test]
fn parse_roundtrips_every_operation() {
    for op in Op::ALL {
        let parsed: Op = op.as_str().parse().unwrap();
        assert_eq!(parsed, op);
    }
}

#[yare::parameterized(
    lower = { "readdir" },
    upper = { "READDIR" },
    mixed = { "ReadDir" },
    odd   = { "rEaDdIr" },
)]
fn parse_is_case_insensitive(s: &str) {
    assert_eq!(s.parse::<Op>().unwrap(), Op::ReadDir);
}

#[test]
fn parse_rejects_unknown_names() {
    let err = "fsync".parse::<Op>().unwrap_err();
    assert_eq!(err, InvalidOp("fsync".to_string()));
    assert!("".parse::<Op>().is_err());
}

#[test]
fn all_excludes_unknown() {
    assert!(!Op::ALL.contains(&Op::Unknown));
    assert_eq!(Op::ALL.len(), Op::COUNT - 1);
}

#[test]
fn indices_roundtrip() {
    for i in 0..Op::COUNT {
        assert_eq!(Op::from_index(i).as_index(), i);
    }
    assert_eq!(Op::from_index(999), Op::Unknown);
}

#[test]
fn serde_roundtrip() {
    let json = serde_json::to_string(&Op::MkdirAll).unwrap();
    assert_eq!(json, "\"MkdirAll\"");
    let parsed: Op = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Op::MkdirAll);
}
