//! BDD step definitions for the startup credential check

use cucumber::{given, then, when};

use homework_watch::error::ConfigError;
use homework_watch::Credentials;

use crate::world::WatchWorld;

#[given(expr = "the environment variable {word} is set to {string}")]
fn env_var_set(world: &mut WatchWorld, name: String, value: String) {
    world.env.insert(name, value);
}

#[when("credentials are loaded")]
fn credentials_loaded(world: &mut WatchWorld) {
    let env = world.env.clone();
    world.credentials = Some(Credentials::from_lookup(|name| env.get(name).cloned()));
}

#[then("startup should succeed")]
fn startup_succeeds(world: &mut WatchWorld) {
    let result = world.credentials.as_ref().expect("credentials not loaded");
    assert!(result.is_ok(), "{:?}", result);
}

#[then(expr = "startup should fail naming {word}")]
fn startup_fails_naming(world: &mut WatchWorld, name: String) {
    match world.credentials.as_ref().expect("credentials not loaded") {
        Err(ConfigError::MissingCredential(missing)) => assert_eq!(*missing, name),
        other => panic!("expected a missing credential error, got {:?}", other),
    }
}
