//! User record domain model.
//!
//! A [`UserRecord`] is the immutable shape of one entity fetched from the
//! remote directory. Field names on the wire follow the upstream payload
//! (`catchPhrase` is camel-cased), so the same type serves decoding and the
//! JSON export.

use serde::{Deserialize, Serialize};

/// One user in the remote directory, identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}

/// Postal address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    /// Coordinates, kept only when the upstream payload carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Latitude/longitude pair, stored as the strings the endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Employer of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

impl UserRecord {
    /// Returns the city this user lives in.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.address.city
    }

    /// Returns whether `name` or `email` contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased; callers lowercase the query
    /// once per derivation rather than once per record.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_shape() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.city(), "Gwenborough");
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(user.address.geo.as_ref().map(|g| g.lat.as_str()), Some("-37.3159"));
    }

    #[test]
    fn text_match_covers_name_and_email_only() {
        let user = fixtures::user(1, "John Smith", "js@x.com", "Paris");
        assert!(user.matches_text("john"));
        assert!(user.matches_text("js@"));
        assert!(user.matches_text(""));
        assert!(!user.matches_text("paris"));
    }
}
