//! Tracked-file filter and line classification for unified diff text.

/// Classification of a retained diff line for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Line was added (`+` prefix, not a hunk header).
    Added,
    /// Line was removed (`-` prefix).
    Removed,
    /// Everything else: file headers, hunk headers, unchanged context.
    Context,
}

/// A single retained line of the filtered diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line content, tabs already normalized to spaces.
    pub text: String,
    /// Presentation class.
    pub class: LineClass,
}

/// Filter raw unified-diff lines down to the regions that touch one of the
/// `tracked` paths.
///
/// Single forward scan, no lookahead:
/// - a `+++`/`---` file marker naming a tracked path turns the region on;
/// - the next `diff --git` boundary turns it off (the only off switch);
/// - while the region is on, lines are retained in order with every tab
///   replaced by a single space.
///
/// A marker for some other file does NOT turn the region off: the flag is
/// sticky until the next file-diff boundary. Marker lines with no parsable
/// path are a non-match, never an error.
pub fn filter_tracked<I, S>(lines: I, tracked: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut inside_tracked = false;
    let mut kept = Vec::new();

    for line in lines {
        let line = line.as_ref();

        if (line.contains("+++") || line.contains("---"))
            && tracked.iter().any(|path| line.contains(path.as_str()))
        {
            inside_tracked = true;
        }
        if line.contains("diff --git") {
            inside_tracked = false;
        }
        if inside_tracked {
            kept.push(line.replace('\t', " "));
        }
    }

    kept
}

/// Classify a retained line by its first character.
///
/// `+` lines count as added unless they contain a `@@` hunk marker; `-`
/// lines count as removed. Everything else, including the empty line, is
/// context.
pub fn classify(text: &str) -> LineClass {
    match text.as_bytes().first() {
        Some(b'+') if !text.contains("@@") => LineClass::Added,
        Some(b'+') => LineClass::Context,
        Some(b'-') => LineClass::Removed,
        _ => LineClass::Context,
    }
}

/// Run the full filter + classification pipeline over raw diff lines.
pub fn filter_diff<I, S>(lines: I, tracked: &[String]) -> Vec<DiffLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filter_tracked(lines, tracked)
        .into_iter()
        .map(|text| {
            let class = classify(&text);
            DiffLine { text, class }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tracked() -> Vec<String> {
        vec![
            "pkg/cli/cmds/agent.go".to_string(),
            "pkg/cli/cmds/server.go".to_string(),
        ]
    }

    #[test]
    fn keeps_tracked_file_region() {
        let raw = [
            "diff --git a/pkg/cli/cmds/agent.go b/pkg/cli/cmds/agent.go",
            "--- a/pkg/cli/cmds/agent.go",
            "+++ b/pkg/cli/cmds/agent.go",
            "+newline",
            "-oldline",
            "diff --git a/other.go b/other.go",
            "+ignored",
        ];
        let kept = filter_tracked(raw, &tracked());
        assert_eq!(
            kept,
            vec![
                "--- a/pkg/cli/cmds/agent.go",
                "+++ b/pkg/cli/cmds/agent.go",
                "+newline",
                "-oldline",
            ]
        );
    }

    #[test]
    fn no_tracked_marker_means_empty_output() {
        let raw = [
            "diff --git a/README.md b/README.md",
            "--- a/README.md",
            "+++ b/README.md",
            "+docs",
        ];
        assert!(filter_tracked(raw, &tracked()).is_empty());
    }

    #[test]
    fn empty_input_means_empty_output() {
        let lines: [&str; 0] = [];
        assert!(filter_tracked(lines, &tracked()).is_empty());
    }

    #[test]
    fn region_is_sticky_across_non_matching_markers() {
        // A marker pair for an untracked file inside a tracked region does
        // not turn the region off; only the next "diff --git" does.
        let raw = [
            "diff --git a/pkg/cli/cmds/server.go b/pkg/cli/cmds/server.go",
            "+++ b/pkg/cli/cmds/server.go",
            "+kept",
            "--- a/unrelated.go",
            "+still kept",
            "diff --git a/unrelated.go b/unrelated.go",
            "+dropped",
        ];
        let kept = filter_tracked(raw, &tracked());
        assert_eq!(
            kept,
            vec![
                "+++ b/pkg/cli/cmds/server.go",
                "+kept",
                "--- a/unrelated.go",
                "+still kept",
            ]
        );
    }

    #[test]
    fn tabs_become_single_spaces() {
        let raw = [
            "+++ b/pkg/cli/cmds/agent.go",
            "+\tflag\twith\ttabs",
            " context\tline",
        ];
        let kept = filter_tracked(raw, &tracked());
        assert_eq!(kept[1], "+ flag with tabs");
        assert_eq!(kept[2], " context line");
    }

    #[test]
    fn classify_by_first_character() {
        assert_eq!(classify("+foo"), LineClass::Added);
        assert_eq!(classify("-foo"), LineClass::Removed);
        assert_eq!(classify(" context"), LineClass::Context);
        assert_eq!(classify("@@ -1,2 +1,2 @@"), LineClass::Context);
        // A file marker that survives filtering classifies by prefix.
        assert_eq!(classify("+++ b/pkg/cli/cmds/agent.go"), LineClass::Added);
        assert_eq!(classify("--- a/pkg/cli/cmds/agent.go"), LineClass::Removed);
        // A + line containing a hunk marker is excluded from Added.
        assert_eq!(classify("+@@ -1 +1 @@"), LineClass::Context);
    }

    #[test]
    fn classify_empty_line_is_context() {
        assert_eq!(classify(""), LineClass::Context);
    }

    #[test]
    fn filter_diff_classifies_retained_lines() {
        let raw = [
            "diff --git a/pkg/cli/cmds/agent.go b/pkg/cli/cmds/agent.go",
            "--- a/pkg/cli/cmds/agent.go",
            "+++ b/pkg/cli/cmds/agent.go",
            "+newline",
            "-oldline",
            "diff --git a/other.go b/other.go",
            "+ignored",
        ];
        let diff = filter_diff(raw, &tracked());
        let classes: Vec<LineClass> = diff.iter().map(|l| l.class).collect();
        assert_eq!(
            classes,
            vec![
                LineClass::Removed,
                LineClass::Added,
                LineClass::Added,
                LineClass::Removed,
            ]
        );
        assert!(diff.iter().all(|l| l.text != "+ignored"));
    }

    /// Lines resembling what the compare endpoint actually produces,
    /// including tabs and tracked/untracked boundaries.
    fn arb_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z \t]{0,20}",
            Just("diff --git a/pkg/cli/cmds/agent.go b/pkg/cli/cmds/agent.go".to_string()),
            Just("+++ b/pkg/cli/cmds/agent.go".to_string()),
            Just("--- a/pkg/cli/cmds/agent.go".to_string()),
            Just("diff --git a/other.go b/other.go".to_string()),
            Just("+++ b/other.go".to_string()),
            Just("@@ -1,4 +1,6 @@".to_string()),
            "[a-z\t]{0,10}".prop_map(|s| format!("+{s}")),
            "[a-z\t]{0,10}".prop_map(|s| format!("-{s}")),
        ]
    }

    proptest! {
        #[test]
        fn output_never_contains_tabs(lines in proptest::collection::vec(arb_line(), 0..60)) {
            for line in filter_tracked(lines.iter().map(String::as_str), &tracked()) {
                prop_assert!(!line.contains('\t'));
            }
        }

        #[test]
        fn output_is_an_in_order_subsequence(lines in proptest::collection::vec(arb_line(), 0..60)) {
            let kept = filter_tracked(lines.iter().map(String::as_str), &tracked());
            let normalized: Vec<String> = lines.iter().map(|l| l.replace('\t', " ")).collect();

            let mut cursor = 0;
            for line in &kept {
                let found = normalized[cursor..].iter().position(|l| l == line);
                prop_assert!(found.is_some(), "retained line not found in order: {line:?}");
                cursor += found.unwrap_or(0) + 1;
            }
        }

        #[test]
        fn untracked_input_filters_to_nothing(lines in proptest::collection::vec("[a-z +@-]{0,30}", 0..60)) {
            // No line can contain a tracked path (the alphabet has no '/'),
            // so the region flag can never turn on.
            let kept = filter_tracked(lines.iter().map(String::as_str), &tracked());
            prop_assert!(kept.is_empty());
        }

        #[test]
        fn classify_never_panics(line in arb_line()) {
            let _ = classify(&line);
        }
    }
}
