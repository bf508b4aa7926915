use crate::model::PathMappingRule;

/// Applies every rule in order. Each rule replaces the first occurrence of its
/// remote prefix anywhere in the path, the match is not anchored to the start.
pub fn map_path(path: &str, rules: &[PathMappingRule]) -> String {
    let mut result = path.to_string();
    for rule in rules {
        if rule.remote_prefix.is_empty() {
            continue;
        }
        result = result.replacen(rule.remote_prefix.as_str(), rule.local_prefix.as_str(), 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::map_path;
    use crate::model::PathMappingRule;

    fn rule(remote: &str, local: &str) -> PathMappingRule {
        PathMappingRule { remote_prefix: remote.to_string(), local_prefix: local.to_string() }
    }

    #[test]
    fn test_rules_in_order() {
        let rules = vec![rule("/data_media", "/volume1/data/media"), rule("/usb2", "/volumeUSB2/usbshare/data")];
        assert_eq!(map_path("/data_media/movies/Heat (1995)/", &rules), "/volume1/data/media/movies/Heat (1995)/");
        assert_eq!(map_path("/usb2/tv/Show/", &rules), "/volumeUSB2/usbshare/data/tv/Show/");
        assert_eq!(map_path("/other/tv/Show/", &rules), "/other/tv/Show/");
        assert_eq!(map_path("/other/tv/Show/", &[]), "/other/tv/Show/");
    }

    #[test]
    fn test_substring_match_not_anchored() {
        let rules = vec![rule("/media", "/mnt/media")];
        assert_eq!(map_path("/data/media/movies/", &rules), "/data/mnt/media/movies/");
    }

    #[test]
    fn test_chained_rules_and_not_idempotent() {
        let rules = vec![rule("/a", "/b"), rule("/b", "/c")];
        assert_eq!(map_path("/a/x", &rules), "/c/x");
        let rules = vec![rule("/m", "/m/m")];
        let once = map_path("/m/x", &rules);
        assert_eq!(once, "/m/m/x");
        assert_eq!(map_path(&once, &rules), "/m/m/m/x");
    }
}
