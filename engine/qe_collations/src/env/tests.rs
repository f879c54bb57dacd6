use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builtins_are_registered() {
    let env = CollationEnv::new();
    assert_eq!(env.len(), 7);
    for id in [
        CollationId::BINARY,
        CollationId::UTF8MB4_GENERAL_CI,
        CollationId::UTF8MB4_BIN,
        CollationId::LATIN1_SWEDISH_CI,
        CollationId::LATIN1_BIN,
        CollationId::ASCII_GENERAL_CI,
        CollationId::ASCII_BIN,
    ] {
        let coll = env.lookup_by_id(id).unwrap();
        assert_eq!(coll.id(), id);
    }
}

#[test]
fn unknown_ids_miss() {
    let env = CollationEnv::new();
    assert!(env.lookup_by_id(CollationId::UNKNOWN).is_none());
    assert!(env.lookup_by_id(CollationId(9999)).is_none());
}

#[test]
fn name_lookup_ignores_case() {
    let env = CollationEnv::local();
    let coll = env.lookup_by_name("UTF8MB4_General_CI").unwrap();
    assert_eq!(coll.id(), CollationId::UTF8MB4_GENERAL_CI);
    assert_eq!(coll.charset(), Charset::Utf8mb4);
    assert!(env.lookup_by_name("klingon_ci").is_none());
}

#[test]
fn register_replaces_by_id() {
    let env = CollationEnv::new();
    let custom = Arc::new(PadSpaceBinCollation::new(
        CollationId::UTF8MB4_GENERAL_CI,
        "utf8mb4_custom",
        Charset::Utf8mb4,
    ));
    let previous = env.register(custom).unwrap();
    assert_eq!(previous.name(), "utf8mb4_general_ci");
    assert_eq!(
        env.lookup_by_name("utf8mb4_custom").unwrap().id(),
        CollationId::UTF8MB4_GENERAL_CI
    );
    assert_eq!(env.len(), 7);
}
