use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Iso8601;
use time::Date;

use crate::ValidationError;

/// Calendar date of one daily bar, serialized as `yyyy-mm-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDay(Date);

impl TradingDay {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, &Iso8601::DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTradingDay {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        // Date -> "yyyy-mm-dd"; the ISO formatter cannot fail for a valid Date.
        self.0
            .format(&Iso8601::DATE)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for TradingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let day = TradingDay::parse("2025-08-22").expect("must parse");
        assert_eq!(day.format_iso(), "2025-08-22");
    }

    #[test]
    fn rejects_non_iso_date() {
        let err = TradingDay::parse("22/08/2025").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTradingDay { .. }));
    }

    #[test]
    fn orders_by_calendar() {
        let earlier = TradingDay::parse("2025-08-21").expect("must parse");
        let later = TradingDay::parse("2025-08-22").expect("must parse");
        assert!(earlier < later);
    }
}
