//! Output file naming: `<BASE>-<preprocessor>[+<heuristic>]-<objective-tag>.<ext>`.

pub fn build_name(base: &str, preprocessor: Option<&str>, heuristic: Option<&str>, objective_tag: &str, ext: &str) -> String {
    let preprocessor = preprocessor.unwrap_or("none");
    let stage = match heuristic {
        Some(h) => format!("{preprocessor}+{h}"),
        None => preprocessor.to_string(),
    };
    format!("{base}-{stage}-{objective_tag}.{ext}")
}

pub fn objective_tag_total() -> &'static str {
    "t"
}

pub fn objective_tag_bottleneck() -> &'static str {
    "b"
}

pub fn objective_tag_stretch() -> &'static str {
    "s"
}

pub fn objective_tag_bottleneck_stretch() -> &'static str {
    "bs"
}

pub fn objective_tag_post() -> &'static str {
    "post"
}

pub fn objective_tag_capture(iteration: i64) -> String {
    iteration.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_include_preprocessor_and_heuristic() {
        let name = build_name("graph", Some("bfs"), Some("mcn"), objective_tag_total(), "sgf");
        assert_eq!(name, "graph-bfs+mcn-t.sgf");
    }

    #[test]
    fn names_without_preprocessor_fall_back_to_none() {
        let name = build_name("graph", None, Some("sifting"), objective_tag_bottleneck(), "ord");
        assert_eq!(name, "graph-none+sifting-b.ord");
    }

    #[test]
    fn capture_tag_is_the_raw_iteration_number() {
        assert_eq!(objective_tag_capture(42), "42");
    }
}
