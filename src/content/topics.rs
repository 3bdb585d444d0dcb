//! Certification topics

use crate::error::PrepResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BUILTIN_TOPICS: &str = include_str!("../../content/topics.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicTag {
    Core,
    Cloud,
    Advanced,
}

impl TopicTag {
    pub const ALL: [TopicTag; 3] = [TopicTag::Core, TopicTag::Cloud, TopicTag::Advanced];

    /// Heading used when topics are grouped by tag
    pub fn heading(&self) -> &'static str {
        match self {
            TopicTag::Core => "Core Fundamentals",
            TopicTag::Cloud => "Cloud Service",
            TopicTag::Advanced => "Advanced Concepts",
        }
    }
}

impl fmt::Display for TopicTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopicTag::Core => "Core",
            TopicTag::Cloud => "Cloud",
            TopicTag::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

impl FromStr for TopicTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "core" => Ok(TopicTag::Core),
            "cloud" => Ok(TopicTag::Cloud),
            "advanced" => Ok(TopicTag::Advanced),
            other => Err(format!("unknown topic tag '{}'", other)),
        }
    }
}

/// One exam domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub tag: TopicTag,
    pub details: Vec<String>,
}

/// Load the topics bundled with the application
pub fn builtin() -> PrepResult<Vec<Topic>> {
    Ok(serde_json::from_str(BUILTIN_TOPICS)?)
}

pub fn by_id<'a>(topics: &'a [Topic], id: &str) -> Option<&'a Topic> {
    topics.iter().find(|t| t.id == id)
}

pub fn by_tag(topics: &[Topic], tag: TopicTag) -> Vec<&Topic> {
    topics.iter().filter(|t| t.tag == tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_topics() {
        let topics = builtin().unwrap();
        assert_eq!(topics.len(), 10);
        assert_eq!(by_tag(&topics, TopicTag::Core).len(), 5);
        assert_eq!(by_tag(&topics, TopicTag::Cloud).len(), 3);
        assert_eq!(by_tag(&topics, TopicTag::Advanced).len(), 2);
        assert!(by_id(&topics, "edge-delivery").is_some());
        assert!(by_id(&topics, "nope").is_none());
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("cloud".parse::<TopicTag>(), Ok(TopicTag::Cloud));
        assert_eq!("ADVANCED".parse::<TopicTag>(), Ok(TopicTag::Advanced));
        assert!("misc".parse::<TopicTag>().is_err());
    }
}
