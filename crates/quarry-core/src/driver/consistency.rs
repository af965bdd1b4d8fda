use crate::Config;

use std::{fmt::Write, time::Duration};

/// Read consistency requested for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Read the state committed by the current leader.
    Strong,

    /// Read from any node whose data is no older than `freshness`.
    Bounded { freshness: Duration, strict: bool },
}

impl Consistency {
    /// The bounded mode described by the configured freshness settings.
    pub fn bounded(config: &Config) -> Self {
        Self::Bounded {
            freshness: config.freshness,
            strict: config.freshness_strict,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Strong)
    }

    /// Appends the consistency query parameters, each preceded by `&`.
    pub(crate) fn write_query(&self, dst: &mut String) {
        match self {
            Self::Strong => dst.push_str("&level=strong"),
            Self::Bounded { freshness, strict } => {
                // Durations go out in milliseconds, which the store parses as
                // a Go duration.
                let _ = write!(dst, "&level=none&freshness={}ms", freshness.as_millis());
                if *strict {
                    dst.push_str("&freshness_strict");
                }
            }
        }
    }
}
