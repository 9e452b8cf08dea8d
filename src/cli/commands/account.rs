//! Signup command handler

use super::fail;
use gradebook::config::Config;
use gradebook::core::models::Role;

/// Create an account in the configured data directory
pub fn signup(config: &Config, username: &str, password: &str, role: Role) {
    let result = super::open(config).and_then(|(_, mut auth)| auth.register(username, password, role));
    match result {
        Ok(()) => println!("✓ Account created: {} ({role})", username.trim()),
        Err(e) => fail("Signup", &e),
    }
}
