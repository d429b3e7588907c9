use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Visual theme of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Excel,
    Steel,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Excel => "excel",
            Theme::Steel => "steel",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Theme::Default),
            "excel" => Ok(Theme::Excel),
            "steel" => Ok(Theme::Steel),
            other => Err(DomainError::Validation(format!("Unknown theme '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("excel".parse::<Theme>().unwrap(), Theme::Excel);
        assert_eq!("steel".parse::<Theme>().unwrap(), Theme::Steel);
        assert_eq!(Theme::default().as_str(), "default");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Excel".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }
}
