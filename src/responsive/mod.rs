//! Responsive rendering: a fixed, mobile-first breakpoint table, a viewport [`SizeTracker`], and
//! atoms that render depending on the current breakpoint.

mod atoms;
mod tracker;
mod window;

pub use atoms::*;
pub use tracker::*;
pub use window::*;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named screen-width tier, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Breakpoint {
    /// Every breakpoint, in ascending order.
    pub const ALL: [Self; 6] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];

    /// Lower bound of the tier, in device-independent pixels.
    pub const fn min_width(self) -> u32 {
        match self {
            Self::Xs => 0,
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 1024,
            Self::Xl => 1280,
            Self::Xxl => 1536,
        }
    }

    /// Position within [`Breakpoint::ALL`].
    pub const fn rank(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }
}

/// The breakpoint with the greatest lower bound not exceeding `width`.
pub fn breakpoint_of(width: u32) -> Breakpoint {
    Breakpoint::ALL
        .into_iter()
        .rev()
        .find(|breakpoint| breakpoint.min_width() <= width)
        .unwrap_or(Breakpoint::Xs)
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|breakpoint| breakpoint.name() == name)
            .ok_or_else(|| Error::UnknownBreakpoint(name.to_string()))
    }
}

/// Semantic grouping of breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// `xs` and `sm`.
    Phone,
    /// `md`.
    Tablet,
    /// `lg` and above.
    Desktop,
}

impl Device {
    pub fn of(breakpoint: Breakpoint) -> Self {
        match breakpoint {
            Breakpoint::Xs | Breakpoint::Sm => Self::Phone,
            Breakpoint::Md => Self::Tablet,
            Breakpoint::Lg | Breakpoint::Xl | Breakpoint::Xxl => Self::Desktop,
        }
    }

    pub fn contains(self, breakpoint: Breakpoint) -> bool {
        Self::of(breakpoint) == self
    }
}

/// The measured viewport, handed to responsive render callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub size: Breakpoint,
    pub width: u32,
}

/// The breakpoints a responsive atom renders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    /// The breakpoint and every wider one.
    AtLeast(Breakpoint),
    /// Exactly the breakpoint.
    Only(Breakpoint),
    /// Every breakpoint of the device.
    Device(Device),
}

impl Range {
    pub fn matches(self, current: Breakpoint) -> bool {
        match self {
            Self::AtLeast(target) => current.rank() >= target.rank(),
            Self::Only(target) => current == target,
            Self::Device(device) => device.contains(current),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(target) => write!(f, "on-{target}"),
            Self::Only(target) => write!(f, "on-{target}-only"),
            Self::Device(Device::Phone) => f.write_str("on-phone"),
            Self::Device(Device::Tablet) => f.write_str("on-tablet"),
            Self::Device(Device::Desktop) => f.write_str("on-desktop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{breakpoint_of, Breakpoint, Device, Range};

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(breakpoint_of(0), Breakpoint::Xs);
        assert_eq!(breakpoint_of(639), Breakpoint::Xs);
        assert_eq!(breakpoint_of(640), Breakpoint::Sm);
        assert_eq!(breakpoint_of(767), Breakpoint::Sm);
        assert_eq!(breakpoint_of(768), Breakpoint::Md);
        assert_eq!(breakpoint_of(1535), Breakpoint::Xl);
        assert_eq!(breakpoint_of(1536), Breakpoint::Xxl);
        assert_eq!(breakpoint_of(u32::MAX), Breakpoint::Xxl);
    }

    #[test]
    fn names_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&Breakpoint::Xxl).unwrap(), r#""2xl""#);
        assert_eq!(
            serde_json::from_str::<Breakpoint>(r#""md""#).unwrap(),
            Breakpoint::Md
        );
        assert_eq!("2xl".parse::<Breakpoint>().unwrap(), Breakpoint::Xxl);
        assert!("xxl".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn ranges() {
        assert!(Range::AtLeast(Breakpoint::Md).matches(Breakpoint::Xxl));
        assert!(!Range::AtLeast(Breakpoint::Md).matches(Breakpoint::Sm));
        assert!(Range::Only(Breakpoint::Md).matches(Breakpoint::Md));
        assert!(!Range::Only(Breakpoint::Md).matches(Breakpoint::Lg));
        assert!(Range::Device(Device::Tablet).matches(Breakpoint::Md));
        assert!(!Range::Device(Device::Desktop).matches(Breakpoint::Md));

        assert_eq!(Range::Only(Breakpoint::Xxl).to_string(), "on-2xl-only");
        assert_eq!(Range::Device(Device::Phone).to_string(), "on-phone");
    }

    proptest! {
        #[test]
        fn width_falls_within_its_tier(width in 0u32..4096) {
            let breakpoint = breakpoint_of(width);
            prop_assert!(breakpoint.min_width() <= width);

            if let Some(next) = Breakpoint::ALL.get(breakpoint.rank() + 1) {
                prop_assert!(width < next.min_width());
            }
        }

        #[test]
        fn wider_is_never_smaller(a in 0u32..4096, b in 0u32..4096) {
            let (narrow, wide) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(breakpoint_of(narrow) <= breakpoint_of(wide));
        }
    }
}
