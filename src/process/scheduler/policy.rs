/*!
 * Scheduling Policy
 * The closed set of selection strategies and their names
 */

use crate::core::errors::SchedulerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Selection strategy used by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// Earliest Ready process in table order
    Fifo,
    /// Least remaining demand, re-evaluated every cycle (SRTF behaviour)
    ShortestJobFirst,
    /// Lowest priority value
    Priority,
    /// Persistent rotation queue, one unit per turn
    RoundRobin,
}

impl SchedulingPolicy {
    /// Every policy, in the order the shell lists them
    pub const ALL: [SchedulingPolicy; 4] = [
        SchedulingPolicy::Fifo,
        SchedulingPolicy::ShortestJobFirst,
        SchedulingPolicy::Priority,
        SchedulingPolicy::RoundRobin,
    ];

    /// Short command name
    ///
    /// # Performance
    /// Hot path - used for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::ShortestJobFirst => "sjf",
            Self::Priority => "prio",
            Self::RoundRobin => "rr",
        }
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fifo" | "fcfs" => Ok(Self::Fifo),
            "sjf" | "srtf" | "shortest_job_first" => Ok(Self::ShortestJobFirst),
            "prio" | "priority" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(SchedulerError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("fifo".parse::<SchedulingPolicy>().unwrap(), SchedulingPolicy::Fifo);
        assert_eq!(
            "SJF".parse::<SchedulingPolicy>().unwrap(),
            SchedulingPolicy::ShortestJobFirst
        );
        assert_eq!(
            "priority".parse::<SchedulingPolicy>().unwrap(),
            SchedulingPolicy::Priority
        );
        assert_eq!(
            "round_robin".parse::<SchedulingPolicy>().unwrap(),
            SchedulingPolicy::RoundRobin
        );
        assert_eq!(
            "lottery".parse::<SchedulingPolicy>(),
            Err(SchedulerError::InvalidPolicy("lottery".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip() {
        for policy in SchedulingPolicy::ALL {
            assert_eq!(policy.as_str().parse::<SchedulingPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_serde_uses_short_names() {
        let json = serde_json::to_string(&SchedulingPolicy::RoundRobin).unwrap();
        assert_eq!(json, "\"rr\"");
        let parsed: SchedulingPolicy = serde_json::from_str("\"prio\"").unwrap();
        assert_eq!(parsed, SchedulingPolicy::Priority);
    }
}
