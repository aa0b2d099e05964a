// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use crate::config::CommitFormat;
use crate::domain::Commit;

/// Renders a [`Commit`] into the final message text.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    format: CommitFormat,
}

impl MessageFormatter {
    pub fn new(format: &CommitFormat) -> Self {
        Self {
            format: format.clone(),
        }
    }

    /// Header line, then optional wrapped body, then optional issue reference.
    ///
    /// The header always ends with a space after the title and keeps `()` for
    /// an empty scope. Empty optional sections contribute nothing; a body of
    /// only whitespace counts as empty and trailing blank lines are dropped.
    pub fn format(&self, commit: &Commit) -> String {
        let newline = self.format.line_ending.as_str();

        let mut message = format!("{}({}): {} ", commit.prefix(), commit.scope, commit.title);

        let body = commit.body.trim_end();
        if !body.is_empty() {
            message.push_str(newline);
            message.push_str(newline);
            message.push_str(&self.wrap_body(body));
        }

        if !commit.issue_id.is_empty() {
            message.push_str(newline);
            message.push_str(newline);
            message.push_str(&self.format.issue_label);
            message.push_str(&commit.issue_id);
        }

        message
    }

    /// Wrap each line of the body on its own so typed line breaks survive
    fn wrap_body(&self, body: &str) -> String {
        let newline = self.format.line_ending.as_str();
        body.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| {
                wrap(
                    line,
                    self.format.line_width,
                    newline,
                    self.format.wrap_long_words,
                )
            })
            .collect::<Vec<_>>()
            .join(newline)
    }
}

/// Greedy word wrap.
///
/// Breaks at the last space at or before `width` columns and drops the
/// spaces around the break. A token longer than `width` is hard-split when
/// `wrap_long_words` is set; otherwise it overflows up to the next space (or
/// the end of the text). Columns are counted in `char`s.
pub fn wrap(text: &str, width: usize, newline: &str, wrap_long_words: bool) -> String {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut offset = 0;
    let mut wrapped = String::with_capacity(text.len() + 32);

    let push_line = |out: &mut String, start: usize, end: usize| {
        let end = (start..end)
            .rev()
            .find(|&i| chars[i] != ' ')
            .map_or(start, |i| i + 1);
        out.extend(&chars[start..end]);
        out.push_str(newline);
    };

    loop {
        while offset < len && chars[offset] == ' ' {
            offset += 1;
        }
        if len - offset <= width {
            break;
        }

        let limit = offset + width;
        if let Some(space) = (offset..=limit).rev().find(|&i| chars[i] == ' ') {
            push_line(&mut wrapped, offset, space);
            offset = space + 1;
        } else if wrap_long_words {
            push_line(&mut wrapped, offset, limit);
            offset = limit;
        } else if let Some(space) = (limit..len).find(|&i| chars[i] == ' ') {
            push_line(&mut wrapped, offset, space);
            offset = space + 1;
        } else {
            break;
        }
    }

    wrapped.extend(&chars[offset..]);
    wrapped
}
