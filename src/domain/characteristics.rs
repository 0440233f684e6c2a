use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;

/// Membership attribute of a club that a member-based item can be scored against.
///
/// The set is closed: an event definition naming anything else fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Characteristic {
    Minors,
    Participants,
    Guests,
    Companions,
    Economs,
    Director,
    Pastor,
}

impl Characteristic {
    pub const ALL: [Characteristic; 7] = [
        Characteristic::Minors,
        Characteristic::Participants,
        Characteristic::Guests,
        Characteristic::Companions,
        Characteristic::Economs,
        Characteristic::Director,
        Characteristic::Pastor,
    ];

    /// Field name used by the backend club records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Characteristic::Minors => "minorsCount",
            Characteristic::Participants => "participantsCount",
            Characteristic::Guests => "guestsCount",
            Characteristic::Companions => "companionsCount",
            Characteristic::Economs => "economsCount",
            Characteristic::Director => "directorCount",
            Characteristic::Pastor => "pastorCount",
        }
    }

    /// Label shown to judges.
    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Minors => "Guias menores",
            Characteristic::Participants => "Guias bautizados",
            Characteristic::Guests => "Guias no bautizados",
            Characteristic::Companions => "Acompañantes",
            Characteristic::Economs => "Economas",
            Characteristic::Director => "Director de club",
            Characteristic::Pastor => "Pastor",
        }
    }
}

impl FromStr for Characteristic {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Characteristic::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ScoringError::UnknownCharacteristic(s.to_string()))
    }
}

impl TryFrom<String> for Characteristic {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Characteristic> for String {
    fn from(value: Characteristic) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership counts of a club, one per [`Characteristic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberCounts {
    pub minors_count: u32,
    pub participants_count: u32,
    pub guests_count: u32,
    pub companions_count: u32,
    pub economs_count: u32,
    pub director_count: u32,
    pub pastor_count: u32,
}

impl MemberCounts {
    pub fn get(&self, characteristic: Characteristic) -> u32 {
        match characteristic {
            Characteristic::Minors => self.minors_count,
            Characteristic::Participants => self.participants_count,
            Characteristic::Guests => self.guests_count,
            Characteristic::Companions => self.companions_count,
            Characteristic::Economs => self.economs_count,
            Characteristic::Director => self.director_count,
            Characteristic::Pastor => self.pastor_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for c in Characteristic::ALL {
            assert_eq!(c.as_str().parse::<Characteristic>().unwrap(), c);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "shoeSize".parse::<Characteristic>().unwrap_err();
        assert!(matches!(err, ScoringError::UnknownCharacteristic(name) if name == "shoeSize"));
    }

    #[test]
    fn test_unknown_name_fails_decoding() {
        let decoded: Result<Vec<Characteristic>, _> =
            serde_json::from_str(r#"["minorsCount", "heightCm"]"#);
        assert!(decoded.is_err());
    }

    #[test]
    fn test_counts_accessor() {
        let counts = MemberCounts {
            minors_count: 4,
            pastor_count: 1,
            ..Default::default()
        };
        assert_eq!(counts.get(Characteristic::Minors), 4);
        assert_eq!(counts.get(Characteristic::Pastor), 1);
        assert_eq!(counts.get(Characteristic::Guests), 0);
    }
}
