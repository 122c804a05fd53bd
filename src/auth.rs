use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::error::ApiError;

/// Hash used to compute the `checksum` query parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Hex digest of `input`
    pub fn hex_digest(&self, input: &str) -> String {
        match self {
            ChecksumAlgorithm::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            ChecksumAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            ChecksumAlgorithm::Sha384 => hex::encode(Sha384::digest(input.as_bytes())),
            ChecksumAlgorithm::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha384 => "sha384",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(ChecksumAlgorithm::Sha1),
            "sha256" => Ok(ChecksumAlgorithm::Sha256),
            "sha384" => Ok(ChecksumAlgorithm::Sha384),
            "sha512" => Ok(ChecksumAlgorithm::Sha512),
            other => Err(ApiError::Config(format!(
                "unsupported checksum algorithm: {}",
                other
            ))),
        }
    }
}

/// Request signing for the BigBlueButton API
pub struct BbbAuth;

impl BbbAuth {
    /// Encode parameters as a query string, keeping the caller's order
    pub fn encode_query<K, V>(params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        serializer.finish()
    }

    /// Checksum over `call ++ query ++ secret`
    pub fn checksum(
        algorithm: ChecksumAlgorithm,
        call: &str,
        query: &str,
        secret: &str,
    ) -> String {
        let content = format!("{}{}{}", call, query, secret);
        algorithm.hex_digest(&content)
    }

    /// Query string with the `checksum` parameter appended
    pub fn signed_query<K, V>(
        algorithm: ChecksumAlgorithm,
        call: &str,
        params: &[(K, V)],
        secret: &str,
    ) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = Self::encode_query(params);
        let checksum = Self::checksum(algorithm, call, &query, secret);

        if query.is_empty() {
            format!("checksum={}", checksum)
        } else {
            format!("{}&checksum={}", query, checksum)
        }
    }
}
