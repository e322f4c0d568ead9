//! Simulated browser identities.
//!
//! A [`BrowserIdentity`] is the only external input that decides which
//! classes and members a script sees. Its textual form is
//! `<vendor>-<major>[.<minor>]`, e.g. `ie-11` or `firefox-115`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::BrowserParseError;

/// Vendor of a simulated browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BrowserVendor {
    /// Microsoft Internet Explorer.
    #[strum(to_string = "ie", serialize = "internet-explorer")]
    InternetExplorer,
    /// Microsoft Edge.
    Edge,
    /// Mozilla Firefox.
    #[strum(to_string = "firefox", serialize = "ff")]
    Firefox,
    /// Google Chrome.
    Chrome,
}

/// An ordered `(major, minor)` browser version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrowserVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl BrowserVersion {
    /// Version `major.minor`.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The first release of `major` (`major.0`).
    #[must_use]
    pub const fn first_of(major: u32) -> Self {
        Self::new(major, 0)
    }

    /// The last possible release of `major`, for inclusive upper bounds.
    #[must_use]
    pub const fn last_of(major: u32) -> Self {
        Self::new(major, u32::MAX)
    }
}

impl fmt::Display for BrowserVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            0 => write!(f, "{}", self.major),
            u32::MAX => write!(f, "{}.*", self.major),
            minor => write!(f, "{}.{minor}", self.major),
        }
    }
}

impl FromStr for BrowserVersion {
    type Err = BrowserParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BrowserParseError::Version(s.to_string());
        let (major, minor) = s.split_once('.').unwrap_or((s, "0"));
        let major = major.parse().map_err(|_| invalid())?;
        let minor = if minor == "*" {
            u32::MAX
        } else {
            minor.parse().map_err(|_| invalid())?
        };
        Ok(Self::new(major, minor))
    }
}

/// A simulated browser: vendor plus version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrowserIdentity {
    /// Browser vendor.
    pub vendor: BrowserVendor,
    /// Browser version.
    pub version: BrowserVersion,
}

impl BrowserIdentity {
    /// Internet Explorer 8.
    pub const IE_8: Self = Self::new(BrowserVendor::InternetExplorer, 8);
    /// Internet Explorer 11.
    pub const IE_11: Self = Self::new(BrowserVendor::InternetExplorer, 11);
    /// Edge 120.
    pub const EDGE_120: Self = Self::new(BrowserVendor::Edge, 120);
    /// Firefox 115 ESR.
    pub const FIREFOX_115: Self = Self::new(BrowserVendor::Firefox, 115);
    /// Chrome 120.
    pub const CHROME_120: Self = Self::new(BrowserVendor::Chrome, 120);

    /// The presets, oldest vendor first.
    pub const PRESETS: [Self; 5] = [
        Self::IE_8,
        Self::IE_11,
        Self::EDGE_120,
        Self::FIREFOX_115,
        Self::CHROME_120,
    ];

    /// `vendor` at version `major.0`.
    #[must_use]
    pub const fn new(vendor: BrowserVendor, major: u32) -> Self {
        Self {
            vendor,
            version: BrowserVersion::first_of(major),
        }
    }
}

impl Default for BrowserIdentity {
    fn default() -> Self {
        Self::CHROME_120
    }
}

impl fmt::Display for BrowserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vendor, self.version)
    }
}

impl FromStr for BrowserIdentity {
    type Err = BrowserParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (vendor, version) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| BrowserParseError::Format(s.to_string()))?;
        let vendor = vendor
            .parse()
            .map_err(|_| BrowserParseError::Vendor(vendor.to_string()))?;
        Ok(Self {
            vendor,
            version: version.parse()?,
        })
    }
}

impl Serialize for BrowserIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
