// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use libfuzzer_sys::fuzz_target;
use powercommit::services::formatter::wrap;

fuzz_target!(|data: &[u8]| {
    let Some((&width, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let width = usize::from(width);

    let hard = wrap(text, width, "\n", true);
    if !text.contains('\n') {
        for line in hard.split('\n') {
            assert!(line.chars().count() <= width.max(1));
        }
    }

    let _ = wrap(text, width, "\r\n", false);
});
