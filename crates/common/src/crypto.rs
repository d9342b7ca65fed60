//! Random secrets for share sessions

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated VNC passwords. Classic VNC auth only uses 8 bytes.
pub const VNC_PASSWORD_LEN: usize = 8;

/// Generate a random alphanumeric password of `len` characters.
pub fn generate_password(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
