use super::WayData;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// decides which ways read from a network source enter the road network.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum WayFilter {
    NoFilter,
    /// keeps any way carrying a `highway` tag, regardless of its value
    #[default]
    Highway,
    /// keeps ways whose `highway` tag is one of the listed values
    HighwayTags { tags: HashSet<String> },
}

impl WayFilter {
    pub fn accept(&self, way: &WayData) -> bool {
        use WayFilter as F;
        match self {
            F::NoFilter => true,
            F::Highway => way.get_tag(WayData::HIGHWAY_TAG).is_some(),
            F::HighwayTags { tags } => match way.get_tag(WayData::HIGHWAY_TAG) {
                Some(highway) => tags.contains(highway),
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WayFilter;
    use crate::model::network::{NodeId, WayData, WayId};
    use std::collections::{HashMap, HashSet};

    fn way(highway: Option<&str>) -> WayData {
        let mut tags = HashMap::new();
        if let Some(h) = highway {
            tags.insert(String::from("highway"), String::from(h));
        }
        WayData::new(WayId(0), vec![NodeId(0), NodeId(1)], tags)
    }

    #[test]
    fn test_highway_filter() {
        assert!(WayFilter::Highway.accept(&way(Some("residential"))));
        assert!(!WayFilter::Highway.accept(&way(None)));
        assert!(WayFilter::NoFilter.accept(&way(None)));
    }

    #[test]
    fn test_highway_tags_filter() {
        let filter = WayFilter::HighwayTags {
            tags: HashSet::from([String::from("primary"), String::from("secondary")]),
        };
        assert!(filter.accept(&way(Some("primary"))));
        assert!(!filter.accept(&way(Some("footway"))));
        assert!(!filter.accept(&way(None)));
    }

    #[test]
    fn test_deserialize_tagged() {
        let filter: WayFilter = serde_json::from_str(r#"{"type": "no_filter"}"#)
            .expect("test invariant: valid filter json");
        assert_eq!(filter, WayFilter::NoFilter);
    }
}
