//! Room keys used by the realtime gateway.
//!
//! The backend joins sockets into rooms named after the thing they listen to.
//! Pairwise rooms must come out the same no matter which participant asks, so
//! both ids are put in canonical (sorted) order before the key is composed.

pub fn user_room(user_id: &str) -> String {
    format!("user_{}", user_id)
}

pub fn channel_room(channel: &str) -> String {
    format!("channel_{}", channel)
}

/// Canonical order of two participant ids.
pub fn private_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn private_room(a: &str, b: &str) -> String {
    let (first, second) = private_pair(a, b);
    format!("private_{}_{}", first, second)
}
