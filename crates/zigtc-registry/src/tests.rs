use zigtc_core::{HostArch, HostOs, HostTarget};

use super::*;

const SAMPLE_INDEX: &str = r#"{
  "master": {
    "version": "0.12.0-dev.100+abcdef12",
    "date": "2023-05-01",
    "docs": "https://ziglang.org/documentation/master/",
    "src": {
      "tarball": "https://ziglang.org/builds/zig-0.12.0-dev.100+abcdef12.tar.xz",
      "shasum": "00",
      "size": "100"
    },
    "x86_64-linux": {
      "tarball": "https://ziglang.org/builds/zig-linux-x86_64-0.12.0-dev.100+abcdef12.tar.xz",
      "shasum": "11",
      "size": "44012345"
    }
  },
  "0.10.1": {
    "date": "2023-01-19",
    "x86_64-linux": {
      "tarball": "https://ziglang.org/download/0.10.1/zig-linux-x86_64-0.10.1.tar.xz",
      "shasum": "22",
      "size": 43000000
    },
    "aarch64-macos": {
      "tarball": "https://ziglang.org/download/0.10.1/zig-macos-aarch64-0.10.1.tar.xz",
      "shasum": "33",
      "size": "41000000"
    }
  }
}"#;

fn linux_x86_64() -> HostTarget {
    HostTarget::new(HostOs::Linux, HostArch::X86_64)
}

#[test]
fn parses_entries_in_key_order() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    assert_eq!(index.len(), 2);
    let keys: Vec<&str> = index.entries().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["0.10.1", "master"]);
}

#[test]
fn explicit_version_only_for_channel_entries() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    assert_eq!(
        index.get("master").and_then(IndexEntry::explicit_version),
        Some("0.12.0-dev.100+abcdef12")
    );
    assert_eq!(
        index.get("0.10.1").and_then(IndexEntry::explicit_version),
        None
    );

    let blank = IndexEntry {
        version: Some("   ".to_string()),
        ..IndexEntry::default()
    };
    assert_eq!(blank.explicit_version(), None);
}

#[test]
fn download_for_host_decodes_descriptor() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    let entry = index.get("0.10.1").expect("entry must exist");

    let download = entry
        .download_for(linux_x86_64())
        .expect("linux descriptor must exist");
    assert_eq!(
        download.tarball,
        "https://ziglang.org/download/0.10.1/zig-linux-x86_64-0.10.1.tar.xz"
    );
    assert_eq!(download.shasum.as_deref(), Some("22"));
    assert_eq!(download.size, Some(43_000_000));

    let mac = entry
        .download_for(HostTarget::new(HostOs::Macos, HostArch::Aarch64))
        .expect("mac descriptor must exist");
    assert_eq!(mac.size, Some(41_000_000));
}

#[test]
fn download_for_missing_host_is_none() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    let entry = index.get("master").expect("entry must exist");
    assert!(entry
        .download_for(HostTarget::new(HostOs::Windows, HostArch::X86))
        .is_none());
}

#[test]
fn malformed_descriptor_is_treated_as_absent() {
    let index = ReleaseIndex::from_json_str(
        r#"{"0.9.0": {"x86_64-linux": {"shasum": "no tarball here"}}}"#,
    )
    .expect("index must parse");
    let entry = index.get("0.9.0").expect("entry must exist");
    assert!(entry.download_for(linux_x86_64()).is_none());
}

#[test]
fn non_object_index_is_rejected() {
    let err = ReleaseIndex::from_json_str("[1, 2, 3]").expect_err("array is not an index");
    assert!(err.to_string().contains("failed to parse release index"));
}

#[test]
fn release_metadata_sits_beside_target_descriptors() {
    let index = ReleaseIndex::from_json_str(SAMPLE_INDEX).expect("index must parse");
    let entry = index.get("master").expect("entry must exist");
    assert_eq!(
        entry.targets.get("date"),
        Some(&serde_json::Value::from("2023-05-01"))
    );
    assert!(entry.targets.contains_key("x86_64-linux"));
    assert_eq!(entry.explicit_version(), Some("0.12.0-dev.100+abcdef12"));
}
