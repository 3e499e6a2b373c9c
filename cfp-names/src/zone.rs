//! Naming zones and canonical domain construction.

use serde::{Deserialize, Serialize};

use cfp_core::constants::{CALLS_ZONE, REVERSE_ZONE, USERS_ZONE};
use cfp_core::error::{CfpError, Result};

/// A naming zone under which labels are registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// User identities (`<label>.usuarios.cfp`)
    Users,
    /// Call identities (`<label>.llamados.cfp`)
    Calls,
    /// Reverse records (`<hex address>.addr.reverse`)
    Reverse,
}

/// Which registry record decides whether a name is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationCheck {
    /// A name is taken once a resolver is assigned to it.
    Resolver,
    /// A name is taken once it has an owner.
    Owner,
}

impl Zone {
    /// Returns the zone suffix without a leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            Zone::Users => USERS_ZONE,
            Zone::Calls => CALLS_ZONE,
            Zone::Reverse => REVERSE_ZONE,
        }
    }

    /// Builds `<label>.<suffix>`. The label is used as given.
    pub fn domain(&self, label: &str) -> String {
        format!("{}.{}", label, self.suffix())
    }

    /// Returns the registry record consulted by registration checks.
    ///
    /// User names are assigned a resolver as the last registration step;
    /// call names are checked through ownership by the call registrar.
    pub fn registration_check(&self) -> RegistrationCheck {
        match self {
            Zone::Users => RegistrationCheck::Resolver,
            Zone::Calls | Zone::Reverse => RegistrationCheck::Owner,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

impl std::str::FromStr for Zone {
    type Err = CfpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "users" | "usuarios" | USERS_ZONE => Ok(Zone::Users),
            "calls" | "llamados" | CALLS_ZONE => Ok(Zone::Calls),
            "reverse" | REVERSE_ZONE => Ok(Zone::Reverse),
            _ => Err(CfpError::UnknownZone(s.to_string())),
        }
    }
}

/// Builds the reverse domain for an address string.
///
/// The `0x` prefix is stripped and the hex digits lowercased, so checksummed
/// and lowercase spellings of one account share a reverse node.
pub fn reverse_domain(address: &str) -> String {
    let trimmed = address.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Zone::Reverse.domain(&digits.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfp_core::Address;
    use test_case::test_case;

    #[test]
    fn test_zone_domains() {
        assert_eq!(Zone::Users.domain("alice"), "alice.usuarios.cfp");
        assert_eq!(Zone::Calls.domain("grant-2024"), "grant-2024.llamados.cfp");
        assert_eq!(Zone::Reverse.domain("ab"), "ab.addr.reverse");
    }

    #[test]
    fn test_reverse_domain_normalizes_case_and_prefix() {
        let expected = "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed.addr.reverse";
        assert_eq!(reverse_domain("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"), expected);
        assert_eq!(reverse_domain("5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"), expected);
        assert_eq!(reverse_domain("0X5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"), expected);
    }

    #[test]
    fn test_reverse_domain_matches_typed_address() {
        let addr = Address::from_hex("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        assert_eq!(
            reverse_domain(&addr.to_hex()),
            Zone::Reverse.domain(&addr.reverse_label())
        );
    }

    #[test]
    fn test_registration_checks() {
        assert_eq!(Zone::Users.registration_check(), RegistrationCheck::Resolver);
        assert_eq!(Zone::Calls.registration_check(), RegistrationCheck::Owner);
    }

    #[test_case("users", Zone::Users)]
    #[test_case("usuarios", Zone::Users)]
    #[test_case(".usuarios.cfp", Zone::Users)]
    #[test_case("CALLS", Zone::Calls)]
    #[test_case("llamados.cfp", Zone::Calls)]
    #[test_case("addr.reverse", Zone::Reverse)]
    fn test_zone_from_str(input: &str, expected: Zone) {
        assert_eq!(input.parse::<Zone>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_zone() {
        assert!(matches!("eth".parse::<Zone>(), Err(CfpError::UnknownZone(_))));
    }
}
