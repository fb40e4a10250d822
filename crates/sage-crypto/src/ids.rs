//! UUID v4 generation, used for session ids and handshake context ids.

use uuid::Uuid;

/// `uuid_v4() -> 36-char`, per §4.1.
pub fn new_session_uuid() -> Uuid {
    Uuid::new_v4()
}
