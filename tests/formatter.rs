// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

mod helpers;

use helpers::{lf_formatter, make_commit, make_commit_type};
use powercommit::config::{CommitFormat, LineEnding};
use powercommit::services::formatter::{MessageFormatter, wrap};
use proptest::prelude::*;

// ─── Header ──────────────────────────────────────────────────────────────────

#[test]
fn gitmoji_header_only() {
    let commit = make_commit(make_commit_type("✨", "feat"), "ui", "add dropdown", "", "", true);
    assert_eq!(lf_formatter().format(&commit), "✨(ui): add dropdown ");
}

#[test]
fn semver_header_only() {
    let commit = make_commit(make_commit_type("✨", "feat"), "ui", "add dropdown", "", "", false);
    assert_eq!(lf_formatter().format(&commit), "feat(ui): add dropdown ");
}

#[test]
fn empty_scope_keeps_parentheses() {
    let commit = make_commit(make_commit_type("🐛", "fix"), "", "handle null", "", "", false);
    assert_eq!(lf_formatter().format(&commit), "fix(): handle null ");
}

#[test]
fn empty_optionals_produce_single_line() {
    let commit = make_commit(make_commit_type("🐛", "fix"), "core", "x", "", "", true);
    let message = lf_formatter().format(&commit);
    assert_eq!(message.lines().count(), 1);
    assert!(!message.ends_with('\n'));
}

// ─── Optional sections ───────────────────────────────────────────────────────

#[test]
fn issue_id_appends_reference() {
    let commit = make_commit(make_commit_type("✨", "feat"), "ui", "add dropdown", "", "JIRA-42", true);
    assert_eq!(
        lf_formatter().format(&commit),
        "✨(ui): add dropdown \n\nRelated issue id: JIRA-42"
    );
}

#[test]
fn body_follows_blank_line() {
    let commit = make_commit(
        make_commit_type("✨", "feat"),
        "ui",
        "add dropdown",
        "Lists every commit type.",
        "",
        false,
    );
    assert_eq!(
        lf_formatter().format(&commit),
        "feat(ui): add dropdown \n\nLists every commit type."
    );
}

#[test]
fn body_and_issue_id_in_order() {
    let commit = make_commit(
        make_commit_type("🐛", "fix"),
        "git",
        "handle detached HEAD",
        "Fall back to the commit id.",
        "GH-7",
        false,
    );
    assert_eq!(
        lf_formatter().format(&commit),
        "fix(git): handle detached HEAD \n\nFall back to the commit id.\n\nRelated issue id: GH-7"
    );
}

#[test]
fn long_body_is_wrapped_at_75() {
    let body = "The dropdown now lists every commit type from the catalog together with its \
                emoji and description, and remembers the last scope that was used.";
    let commit = make_commit(make_commit_type("✨", "feat"), "ui", "add dropdown", body, "", true);
    let message = lf_formatter().format(&commit);

    let body_lines: Vec<&str> = message.lines().skip(2).collect();
    insta::assert_snapshot!(body_lines.join("\n"), @r"
    The dropdown now lists every commit type from the catalog together with its
    emoji and description, and remembers the last scope that was used.
    ");
}

#[test]
fn body_line_breaks_are_kept() {
    let commit = make_commit(
        make_commit_type("📝", "docs"),
        "readme",
        "describe install",
        "First paragraph.\n\nSecond paragraph.",
        "",
        false,
    );
    assert_eq!(
        lf_formatter().format(&commit),
        "docs(readme): describe install \n\nFirst paragraph.\n\nSecond paragraph."
    );
}

#[test]
fn blank_body_is_omitted() {
    for body in ["   ", "\n\n", " \r\n\t"] {
        let commit = make_commit(make_commit_type("🐛", "fix"), "core", "x", body, "", false);
        assert_eq!(lf_formatter().format(&commit), "fix(core): x ", "body {:?}", body);
    }
}

#[test]
fn trailing_body_newlines_are_dropped() {
    let commit = make_commit(
        make_commit_type("🐛", "fix"),
        "core",
        "x",
        "abc\n\n",
        "GH-1",
        false,
    );
    assert_eq!(
        lf_formatter().format(&commit),
        "fix(core): x \n\nabc\n\nRelated issue id: GH-1"
    );
}

#[test]
fn crlf_line_ending() {
    let formatter = MessageFormatter::new(&CommitFormat {
        line_ending: LineEnding::Crlf,
        ..CommitFormat::default()
    });
    let commit = make_commit(make_commit_type("🐛", "fix"), "a", "b", "c", "D-1", false);
    assert_eq!(
        formatter.format(&commit),
        "fix(a): b \r\n\r\nc\r\n\r\nRelated issue id: D-1"
    );
}

#[test]
fn custom_issue_label_and_width() {
    let formatter = MessageFormatter::new(&CommitFormat {
        line_width: 20,
        line_ending: LineEnding::Lf,
        issue_label: "Refs: ".into(),
        ..CommitFormat::default()
    });
    let commit = make_commit(
        make_commit_type("✨", "feat"),
        "",
        "t",
        "one two three four five six",
        "#12",
        false,
    );
    assert_eq!(
        formatter.format(&commit),
        "feat(): t \n\none two three four\nfive six\n\nRefs: #12"
    );
}

#[test]
fn display_uses_default_formatter() {
    let commit = make_commit(make_commit_type("✨", "feat"), "ui", "add dropdown", "", "", true);
    assert_eq!(commit.to_string(), "✨(ui): add dropdown ");
}

// ─── Word wrap ───────────────────────────────────────────────────────────────

#[test]
fn wrap_skips_leading_spaces_on_continuation() {
    assert_eq!(wrap("aaaa   bbbb cccc", 6, "\n", false), "aaaa\nbbbb\ncccc");
}

#[test]
fn wrap_url_overflows() {
    let text = "see https://example.com/a/very/long/path/that/does/not/fit for details";
    insta::assert_snapshot!(wrap(text, 20, "\n", false), @r"
    see
    https://example.com/a/very/long/path/that/does/not/fit
    for details
    ");
}

#[test]
fn wrap_url_hard_split_when_enabled() {
    let text = "see https://example.com/a/very/long/path";
    insta::assert_snapshot!(wrap(text, 12, "\n", true), @r"
    see
    https://exam
    ple.com/a/ve
    ry/long/path
    ");
}

proptest! {
    #[test]
    fn wrapped_lines_fit_and_rejoin(words in prop::collection::vec("[a-z]{1,12}", 1..80)) {
        let body = words.join(" ");
        let wrapped = wrap(&body, 75, "\n", false);

        for line in wrapped.lines() {
            prop_assert!(line.chars().count() <= 75, "line too long: {:?}", line);
        }
        prop_assert_eq!(wrapped.lines().collect::<Vec<_>>().join(" "), body);
    }

    #[test]
    fn hard_split_never_exceeds_width(
        words in prop::collection::vec("[a-z]{1,60}", 1..20),
        width in 5usize..40,
    ) {
        let text = words.join(" ");
        let wrapped = wrap(&text, width, "\n", true);

        for line in wrapped.lines() {
            prop_assert!(line.chars().count() <= width, "line too long: {:?}", line);
        }
        prop_assert_eq!(wrapped.replace(['\n', ' '], ""), text.replace(' ', ""));
    }
}
