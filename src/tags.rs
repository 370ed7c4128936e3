use smallvec::SmallVec;

pub(crate) type TagSet = SmallVec<[String; 8]>;

/// Split a raw instrument name into its base name and tag set.
///
/// Names may carry inline tags in the form `base[key:value,key:value]` where
/// the bracketed section is a comma-separated list of already-formatted tag
/// strings. Inline tags come first, then the process-wide `global` tags, in
/// that order and without deduplication. A name without a well-formed
/// bracket section is passed through whole with only the global tags.
pub(crate) fn split_name_and_tags<'a>(raw: &'a str, global: &[String]) -> (&'a str, TagSet) {
    match parse_inline(raw) {
        Some((base, body)) => {
            let mut tags: TagSet = body.split(',').map(String::from).collect();
            tags.extend(global.iter().cloned());
            (base, tags)
        }
        None => (raw, global.iter().cloned().collect()),
    }
}

/// Pure parse of the `base[tags]` pattern. Malformed input (missing or
/// unbalanced brackets, empty base, empty tag body, nested brackets) returns
/// `None` rather than failing the cycle.
fn parse_inline(raw: &str) -> Option<(&str, &str)> {
    let trimmed = raw.strip_suffix(']')?;
    let open = trimmed.find('[')?;
    let (base, rest) = trimmed.split_at(open);
    let body = &rest[1..];
    if base.is_empty() || body.is_empty() || body.contains('[') || body.contains(']') {
        return None;
    }
    Some((base, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn plain_name_no_globals() {
        let (base, tags) = split_name_and_tags("test.metric_name", &[]);
        assert_eq!(base, "test.metric_name");
        assert!(tags.is_empty());
    }

    #[test]
    fn plain_name_gets_global_tags() {
        let (base, tags) = split_name_and_tags("test.metric_name", &globals(&["region:us"]));
        assert_eq!(base, "test.metric_name");
        assert_eq!(tags.as_slice(), ["region:us"]);
    }

    #[test]
    fn inline_tags() {
        let (base, tags) = split_name_and_tags("test.httpcall[method:GET]", &[]);
        assert_eq!(base, "test.httpcall");
        assert_eq!(tags.as_slice(), ["method:GET"]);
    }

    #[test]
    fn inline_tags_come_before_globals() {
        let (base, tags) =
            split_name_and_tags("test.httpcall[method:GET]", &globals(&["globaltag:true"]));
        assert_eq!(base, "test.httpcall");
        assert_eq!(tags.as_slice(), ["method:GET", "globaltag:true"]);
    }

    #[test]
    fn multiple_inline_tags() {
        let (base, tags) = split_name_and_tags("db.query[table:users,op:select]", &[]);
        assert_eq!(base, "db.query");
        assert_eq!(tags.as_slice(), ["table:users", "op:select"]);
    }

    #[test]
    fn duplicate_keys_pass_through() {
        let (_, tags) = split_name_and_tags("m[env:dev]", &globals(&["env:prod"]));
        assert_eq!(tags.as_slice(), ["env:dev", "env:prod"]);
    }

    #[test]
    fn malformed_brackets_fall_back() {
        let global = globals(&["g:1"]);
        for raw in ["metric[]", "metric[open", "metric]closed[", "[only:tags]", "a[b[c]]"] {
            let (base, tags) = split_name_and_tags(raw, &global);
            assert_eq!(base, raw, "malformed {raw:?} must pass through whole");
            assert_eq!(tags.as_slice(), ["g:1"]);
        }
    }
}
