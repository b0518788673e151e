use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

pub const MCFRUIT_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
  pub major: u8,
  pub minor: u8,
  pub patch: u8,
}

impl Version {
  pub fn current() -> Self {
    MCFRUIT_VERSION_STRING.parse().unwrap_or(Version {
      major: 0,
      minor: 0,
      patch: 0,
    })
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseVersionError {
  Part(ParseIntError),
  PartCount(usize),
}

impl FromStr for Version {
  type Err = ParseVersionError;

  fn from_str(v: &str) -> Result<Self, Self::Err> {
    let parts = v
      .split('.')
      .map(|v| v.parse::<u8>())
      .collect::<Result<Vec<u8>, _>>()
      .map_err(ParseVersionError::Part)?;
    if parts.len() != 3 {
      return Err(ParseVersionError::PartCount(parts.len()));
    }
    Ok(Version {
      major: parts[0],
      minor: parts[1],
      patch: parts[2],
    })
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

#[test]
fn test_version_parse() {
  let v: Version = "1.2.3".parse().unwrap();
  assert_eq!(v.to_string(), "1.2.3");
  assert_eq!("1.2".parse::<Version>(), Err(ParseVersionError::PartCount(2)));
  assert!("1.x.3".parse::<Version>().is_err());
  assert_eq!(Version::current().to_string(), MCFRUIT_VERSION_STRING);
}
