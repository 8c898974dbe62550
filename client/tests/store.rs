use std::path::PathBuf;

use client::config::{ProvisionConfig, Store, LENDING_PROGRAM_KEY, TOKEN_PROGRAM_KEY};
use solana_sdk::pubkey::Pubkey;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("reserve-store-{}-{name}.json", std::process::id()))
}

#[test]
fn missing_file_is_an_empty_store() {
    let store = Store::load_or_default(scratch_path("missing"));
    assert_eq!(store.get(LENDING_PROGRAM_KEY), None);
    assert_eq!(store.get_pubkey(LENDING_PROGRAM_KEY), None);
}

#[test]
fn store_round_trips_through_disk() {
    let path = scratch_path("round-trip");
    let lending_program = Pubkey::new_unique();

    let mut store = Store::load_or_default(&path);
    store.set(LENDING_PROGRAM_KEY, lending_program);
    store.save().expect("Should save the store");

    let reloaded = Store::load_or_default(&path);
    assert_eq!(
        reloaded.get(LENDING_PROGRAM_KEY),
        Some(lending_program.to_string().as_str())
    );
    assert_eq!(
        reloaded.get_pubkey(LENDING_PROGRAM_KEY),
        Some(lending_program)
    );

    std::fs::remove_file(&path).expect("Should remove the scratch store");
}

#[test]
fn malformed_content_is_a_cache_miss() {
    let path = scratch_path("malformed");
    std::fs::write(&path, "not json at all {").expect("Should write the scratch store");

    let store = Store::load_or_default(&path);
    assert_eq!(store.get(LENDING_PROGRAM_KEY), None);

    std::fs::remove_file(&path).expect("Should remove the scratch store");
}

#[test]
fn unparseable_key_entry_is_a_cache_miss() {
    let path = scratch_path("bad-key");

    let mut store = Store::load_or_default(&path);
    store.set(LENDING_PROGRAM_KEY, "definitely-not-base58!");
    assert_eq!(store.get_pubkey(LENDING_PROGRAM_KEY), None);
}

#[test]
fn config_round_trips_through_store() {
    let config = ProvisionConfig {
        rpc_url: client::config::DEFAULT_RPC_URL.to_string(),
        lending_program: Pubkey::new_unique(),
        token_program: Pubkey::new_unique(),
    };

    let mut store = Store::load_or_default(scratch_path("config"));
    config.write_to_store(&mut store);

    let resolved = ProvisionConfig::from_store(&store).expect("Should resolve the config");
    assert_eq!(resolved.lending_program, config.lending_program);
    assert_eq!(resolved.token_program, config.token_program);
}

#[test]
fn token_program_defaults_when_uncached() {
    let mut store = Store::load_or_default(scratch_path("defaults"));

    // Without a cached lending program the config cannot be resolved at all.
    assert!(ProvisionConfig::from_store(&store).is_err());

    store.set(LENDING_PROGRAM_KEY, Pubkey::new_unique());
    let resolved = ProvisionConfig::from_store(&store).expect("Should resolve the config");
    assert_eq!(resolved.token_program, spl_token_interface::id());
    assert_eq!(store.get(TOKEN_PROGRAM_KEY), None);
}
