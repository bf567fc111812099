// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// Number of random bytes in a freshly generated id.
const ID_BYTES: usize = 16;

/// An opaque player identifier.
///
/// New ids are 16 bytes of OS entropy, hex-encoded. Ids read from disk are
/// taken as-is.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn random() -> Fallible<Self> {
        let mut bytes = [0u8; ID_BYTES];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_hex() -> Fallible<()> {
        let id = PlayerId::random()?;
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        Ok(())
    }

    #[test]
    fn test_random_ids_differ() -> Fallible<()> {
        assert_ne!(PlayerId::random()?, PlayerId::random()?);
        Ok(())
    }

    #[test]
    fn test_serialize_transparent() -> Fallible<()> {
        let id = PlayerId::from("abc123");
        assert_eq!(serde_json::to_string(&id)?, "\"abc123\"");
        Ok(())
    }
}
